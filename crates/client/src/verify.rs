//! Credential verification against the remote users table.

use ecoboard_auth::{Account, AuthError, normalize_email, require_input, verify_password};
use ecoboard_remote::IdentityGateway;

/// Check a presented email/password pair against the remote store.
///
/// Pure read + compare: no session is established and no cache is written;
/// that is the caller's job. "No such account", a failed lookup, and a
/// wrong password all come back as [`AuthError::InvalidCredentials`] so the
/// login form cannot be used to enumerate accounts.
pub async fn verify_credentials(
    gateway: &dyn IdentityGateway,
    email: &str,
    password: &str,
) -> Result<Account, AuthError> {
    require_input(email, password)?;
    let email = normalize_email(email);

    let account = match gateway.find_account_by_email(&email).await {
        Ok(Some(account)) => account,
        Ok(None) => return Err(AuthError::InvalidCredentials),
        Err(err) => {
            tracing::warn!("account lookup failed during login: {err}");
            return Err(AuthError::InvalidCredentials);
        }
    };

    verify_password(password, &account.password_hash)?;
    Ok(account)
}
