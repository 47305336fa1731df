//! Login, registration and logout commands.

use crm_model::{Identity, RegistrationProfile};
use crm_session::guard::{DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH};
use crm_session::shell::ADMIN_NOTICE;
use crm_session::Redirect;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{LoginArgs, RegisterArgs};
use crate::config::OutputFormat;
use crate::output::{info, output, output_json, prompt, prompt_password, success};
use crate::{CliError, CliResult};

use super::Shell;

/// Identity representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct IdentityDisplay {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Full name.
    #[tabled(rename = "Full Name")]
    pub full_name: String,
    /// Granted roles.
    pub roles: String,
    /// Whether the user is an administrator.
    pub admin: bool,
}

impl From<&Identity> for IdentityDisplay {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            full_name: identity.full_name.clone().unwrap_or_default(),
            roles: identity.roles_display(),
            admin: identity.is_admin(),
        }
    }
}

#[derive(Serialize)]
struct LoginOutput<'a> {
    identity: &'a Identity,
    redirect: Redirect,
}

/// Logs in, prompting for anything not given on the command line.
pub async fn run_login(shell: &Shell, args: LoginArgs, format: OutputFormat) -> CliResult<()> {
    let controller = shell.controller();

    // the login screen is public: a restored session goes straight on
    let outcome = controller.initialize(LOGIN_PATH).await;
    if let (Some(identity), Some(redirect)) = (&outcome.identity, &outcome.redirect) {
        info(&format!(
            "Already logged in as {}. Continue at {}",
            identity.username, redirect.to
        ));
        return Ok(());
    }

    let username = match args.username {
        Some(username) => username,
        None => prompt("Username")?,
    };
    if username.is_empty() {
        return Err(CliError::InvalidArgument("username is required".to_string()));
    }
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };

    let identity = controller.login(&username, &password).await?;

    match format {
        OutputFormat::Table => {
            success(&format!("Logged in as {}", identity.username));
            if controller.is_admin() {
                info(ADMIN_NOTICE);
            }
            info(&format!("Continue at {}", DASHBOARD_PATH));
        }
        OutputFormat::Json => output_json(&LoginOutput {
            identity: &identity,
            redirect: Redirect::replace(DASHBOARD_PATH),
        })?,
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Creates an account. Does not log in.
pub async fn run_register(shell: &Shell, args: RegisterArgs) -> CliResult<()> {
    let controller = shell.controller();

    let outcome = controller.initialize(REGISTER_PATH).await;
    if let Some(identity) = &outcome.identity {
        info(&format!(
            "Already logged in as {}. Log out before registering a new account",
            identity.username
        ));
        return Ok(());
    }

    let (password, confirmation) = match args.password {
        Some(password) => (password.clone(), password),
        None => (
            prompt_password("Password: ")?,
            prompt_password("Confirm password: ")?,
        ),
    };

    let mut profile = RegistrationProfile::new(args.username, args.email, password);
    if let Some(full_name) = args.full_name {
        profile = profile.with_full_name(full_name);
    }
    profile.validate(&confirmation)?;

    controller.register(&profile).await?;

    success("Registration successful! Please log in.");
    info(&format!("Run: crm login {}", profile.username));
    Ok(())
}

/// Ends the stored session. Never contacts the identity provider.
pub fn run_logout(shell: &Shell) -> CliResult<()> {
    let previous = match shell.store().get() {
        Ok(credential) => credential,
        Err(e) => {
            tracing::warn!("Could not read stored session: {}", e);
            None
        }
    };

    shell.controller().logout()?;

    match previous {
        Some(credential) => success(&format!("Logged out {}", credential.username)),
        None => info("No stored session"),
    }
    Ok(())
}

/// Shows the logged-in identity.
pub async fn run_whoami(shell: &Shell, format: OutputFormat) -> CliResult<()> {
    let outcome = shell.controller().initialize("/").await;
    let identity = outcome.identity.ok_or(CliError::NotAuthenticated)?;

    match format {
        OutputFormat::Quiet => println!("{}", identity.username),
        _ => output(&[IdentityDisplay::from(&identity)], format)?,
    }
    Ok(())
}
