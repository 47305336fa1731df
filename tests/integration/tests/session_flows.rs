//! Login, restore, registration and logout against a live service.

use crm_model::{roles, Credential, RegistrationProfile};
use crm_session::guard::DASHBOARD_PATH;
use crm_session::{RenderDecision, SessionError, ShellView};

use crate::common::TestEnv;

#[tokio::test]
async fn test_login_survives_restart() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let first = env.controller()?;
    first.initialize("/login").await;
    let identity = first.login("admin", "admin123").await?;

    assert_eq!(identity.username, "admin");
    assert!(identity.has_role(roles::ADMIN));
    assert!(first.is_admin());

    let stored = env.store().get()?.expect("credential persisted");
    assert_eq!(stored.username, "admin");

    // a new process reads the same session dir
    let second = env.controller()?;
    let outcome = second.initialize("/login").await;

    let restored = outcome.identity.expect("session restored");
    assert_eq!(restored.username, "admin");
    assert_eq!(restored.full_name.as_deref(), Some("Administrator"));
    let redirect = outcome.redirect.expect("auth-only route redirects");
    assert_eq!(redirect.to, DASHBOARD_PATH);
    assert!(redirect.replace);

    assert_eq!(env.service.me_calls(), 1);
    assert_eq!(env.service.last_authorization(), Some(stored.bearer()));

    let state = second.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(
        second.routes().decide(&state, "/customers/7/edit"),
        RenderDecision::Render
    );

    let view = ShellView::render(&state, "/customers/7/edit");
    assert!(view.admin_notice.is_some());
    assert_eq!(view.active().map(|i| i.href), Some("/customers"));

    Ok(())
}

#[tokio::test]
async fn test_boot_without_credential_skips_provider() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let controller = env.controller()?;

    let outcome = controller.initialize("/customers").await;
    assert!(outcome.identity.is_none());
    assert!(outcome.redirect.is_none());
    assert_eq!(env.service.me_calls(), 0);

    let decision = controller.routes().decide(&controller.state(), "/customers");
    match decision {
        RenderDecision::Redirect(redirect) => assert_eq!(redirect.to, "/login"),
        other => panic!("expected redirect to login, got {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_bad_credentials_are_reported() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let controller = env.controller()?;
    controller.initialize("/login").await;

    let err = controller.login("admin", "wrong").await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidCredentials));

    let state = controller.state();
    assert!(state.identity.is_none());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("invalid credentials"));
    assert!(env.store().get()?.is_none());

    // the next attempt starts clean
    controller.login("jdoe", "secret1").await?;
    assert!(controller.state().error.is_none());
    assert!(!controller.is_admin());

    Ok(())
}

#[tokio::test]
async fn test_register_then_login() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let controller = env.controller()?;
    controller.initialize("/register").await;

    let profile = RegistrationProfile::new("newbie", "newbie@example.com", "secret1")
        .with_full_name("New Bie");
    profile.validate("secret1")?;
    controller.register(&profile).await?;

    // registering does not log in
    assert!(controller.state().identity.is_none());
    assert!(env.store().get()?.is_none());

    let identity = controller.login("newbie", "secret1").await?;
    assert_eq!(identity.email, "newbie@example.com");
    assert_eq!(identity.roles_display(), roles::USER);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_registration_is_validation_failure() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let controller = env.controller()?;
    controller.initialize("/register").await;

    let profile = RegistrationProfile::new("jdoe", "other@example.com", "secret1");
    let err = controller.register(&profile).await.unwrap_err();

    assert!(
        matches!(&err, SessionError::ValidationFailure(m) if m == "Username is already taken!"),
        "got {:?}",
        err
    );
    assert_eq!(
        controller.state().error.as_deref(),
        Some("validation failed: Username is already taken!")
    );

    Ok(())
}

#[tokio::test]
async fn test_revoked_credential_is_cleared_at_boot() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.controller()?.login("jdoe", "secret1").await?;
    env.service.revoke_all();

    let controller = env.controller()?;
    let outcome = controller.initialize("/customers").await;

    assert!(outcome.identity.is_none());
    assert!(env.store().get()?.is_none());
    // boot failures are silent
    let state = controller.state();
    assert!(state.error.is_none());
    assert!(!state.loading);

    Ok(())
}

#[tokio::test]
async fn test_foreign_credential_is_rejected() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.controller()?.login("jdoe", "secret1").await?;
    let stored = env.store().get()?.expect("credential persisted");

    // token belongs to jdoe but the stored name says otherwise
    env.store().set(&Credential::new(stored.token, "admin"))?;

    let controller = env.controller()?;
    assert!(controller.initialize("/").await.identity.is_none());
    assert!(env.store().get()?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_logout_and_expire() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let controller = env.controller()?;
    controller.initialize("/login").await;

    controller.login("jdoe", "secret1").await?;
    controller.logout()?;
    assert!(controller.state().identity.is_none());
    assert!(controller.state().error.is_none());
    assert!(env.store().get()?.is_none());

    controller.login("jdoe", "secret1").await?;
    controller.expire()?;
    assert!(controller.state().identity.is_none());
    assert_eq!(controller.state().error.as_deref(), Some("session expired"));
    assert!(env.store().get()?.is_none());

    // a restart finds nothing to restore
    let restarted = env.controller()?;
    assert!(restarted.initialize("/").await.identity.is_none());
    assert_eq!(env.service.me_calls(), 0);

    Ok(())
}
