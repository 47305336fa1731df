//! Identity rebuilt from the stored credential alone.
//!
//! The auth service issues `<token>-admin` to administrators and exposes no
//! current-user lookup, so a client rebuilding its session after a restart
//! only has the token and the stored username to go on.

use crm_model::{roles, Credential, Identity};

/// Token suffix marking an administrator.
pub const ADMIN_SUFFIX: &str = "-admin";

/// Identifier given to a rebuilt identity; the service does not report one.
pub const REBUILT_ID: i64 = 1;

/// Rebuilds the identity the credential was issued for.
///
/// Returns `None` for an incomplete credential.
#[must_use]
pub fn rebuild_identity(credential: &Credential) -> Option<Identity> {
    if !credential.is_complete() {
        return None;
    }

    let granted: &[&str] = if credential.token.ends_with(ADMIN_SUFFIX) {
        &[roles::ADMIN, roles::USER]
    } else {
        &[roles::USER]
    };
    Some(Identity::new(
        REBUILT_ID,
        credential.username.as_str(),
        format!("{}@example.com", credential.username),
        granted.iter().copied(),
    ))
}
