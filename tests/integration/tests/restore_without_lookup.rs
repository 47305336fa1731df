//! Restarts against a service that only knows login, register and status.

use crm_model::roles;
use crm_session::RenderDecision;

use crate::common::TestEnv;

#[tokio::test]
async fn test_admin_session_survives_restart() -> anyhow::Result<()> {
    let env = TestEnv::without_lookup().await?;

    env.controller()?.login("admin", "admin123").await?;
    let stored = env.store().get()?.expect("credential persisted");
    assert!(stored.token.ends_with("-admin"));

    let controller = env.controller()?;
    let outcome = controller.initialize("/dashboard").await;

    let identity = outcome.identity.expect("session restored");
    assert_eq!(identity.username, "admin");
    assert!(identity.has_role(roles::ADMIN));
    assert!(controller.is_admin());
    assert_eq!(env.store().get()?, Some(stored));
    assert_eq!(
        controller.routes().decide(&controller.state(), "/dashboard"),
        RenderDecision::Render
    );

    Ok(())
}

#[tokio::test]
async fn test_user_session_survives_restart_without_admin() -> anyhow::Result<()> {
    let env = TestEnv::without_lookup().await?;

    env.controller()?.login("jdoe", "secret1").await?;

    let controller = env.controller()?;
    let identity = controller
        .initialize("/customers")
        .await
        .identity
        .expect("session restored");

    assert_eq!(identity.username, "jdoe");
    assert_eq!(identity.roles_display(), roles::USER);
    assert!(!controller.is_admin());
    assert_eq!(env.service.me_calls(), 0);

    Ok(())
}

#[tokio::test]
async fn test_outage_still_clears_credential() -> anyhow::Result<()> {
    let env = TestEnv::without_lookup().await?;
    env.controller()?.login("jdoe", "secret1").await?;

    env.service.set_down(true);
    let controller = env.controller()?;

    assert!(controller.initialize("/").await.identity.is_none());
    assert!(env.store().get()?.is_none());
    assert!(controller.state().error.is_none());

    Ok(())
}
