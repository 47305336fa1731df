//! Behavior when the auth service is down, slow or absent.

use std::time::Duration;

use crm_core::IdentityConfig;
use crm_identity::{HttpIdentityService, IdentityService};
use crm_integration_tests::FALLBACK_MESSAGE;
use crm_session::SessionError;

use crate::common::TestEnv;

#[tokio::test]
async fn test_gateway_fallback_is_unreachable() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let controller = env.controller()?;
    controller.initialize("/login").await;
    env.service.set_down(true);

    let err = controller.login("admin", "admin123").await.unwrap_err();
    assert!(err.is_unreachable(), "got {:?}", err);
    assert!(err.to_string().contains(FALLBACK_MESSAGE));

    let state = controller.state();
    assert!(state.identity.is_none());
    assert!(state.error.is_some());
    assert!(env.store().get()?.is_none());

    env.service.set_down(false);
    controller.login("admin", "admin123").await?;
    assert!(controller.is_admin());

    Ok(())
}

#[tokio::test]
async fn test_status_reports_service_health() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let provider = HttpIdentityService::new(&env.identity_config())?;

    let status = provider.check_status().await;
    assert!(status.reachable);
    assert_eq!(status.message.as_deref(), Some("Auth service is running"));

    env.service.set_down(true);
    let status = provider.check_status().await;
    assert!(!status.reachable);
    assert!(status
        .message
        .as_deref()
        .is_some_and(|m| m.starts_with("503")));

    Ok(())
}

#[tokio::test]
async fn test_slow_service_times_out() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let controller = env.controller_with_timeout(Duration::from_millis(200))?;
    controller.initialize("/login").await;
    env.service.set_delay(Duration::from_secs(2));

    let err = controller.login("jdoe", "secret1").await.unwrap_err();
    assert!(matches!(err, SessionError::ProviderUnreachable(_)));
    assert!(!controller.state().loading);

    Ok(())
}

#[tokio::test]
async fn test_outage_at_boot_clears_credential() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.controller()?.login("jdoe", "secret1").await?;
    assert!(env.store().get()?.is_some());

    env.service.set_down(true);
    let controller = env.controller()?;
    let outcome = controller.initialize("/dashboard").await;

    assert!(outcome.identity.is_none());
    assert!(env.store().get()?.is_none());
    assert!(controller.state().error.is_none());

    Ok(())
}

#[tokio::test]
async fn test_closed_port_at_boot() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.controller()?.login("jdoe", "secret1").await?;

    // nothing listens on the discard port
    let config = IdentityConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        timeout_secs: 2,
        demo_mode: false,
    };
    let provider = HttpIdentityService::new(&config)?;
    assert!(!provider.check_status().await.reachable);

    let controller =
        crm_session::SessionController::new(env.store(), std::sync::Arc::new(provider));
    assert!(controller.initialize("/").await.identity.is_none());
    assert!(env.store().get()?.is_none());

    Ok(())
}
