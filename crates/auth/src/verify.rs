//! Deterministic pieces of credential verification.
//!
//! Fetching the account row is the caller's job (it owns the identity
//! service handle); everything here is pure input validation and hash
//! comparison, so it can be tested without any remote.

use crate::AuthError;

/// Reject blank credentials before anything touches the remote service.
pub fn require_input(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingInput);
    }
    Ok(())
}

/// Canonical form of an email for lookups: trimmed, lowercased.
///
/// The remote store keys accounts by lowercased email, so this must be
/// applied before every lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check a presented password against a stored bcrypt hash.
///
/// A malformed stored hash is reported as [`AuthError::InvalidCredentials`]
/// like any mismatch; the caller must not be able to tell a broken row from
/// a wrong password.
pub fn verify_password(presented: &str, stored_hash: &str) -> Result<(), AuthError> {
    match bcrypt::verify(presented, stored_hash) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AuthError::InvalidCredentials),
        Err(err) => {
            tracing::warn!("stored password hash failed to parse: {err}");
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // bcrypt's minimum cost keeps these tests fast; production hashes are
    // generated offline at cost 10.
    const TEST_COST: u32 = 4;

    #[test]
    fn blank_email_is_missing_input() {
        assert_eq!(require_input("   ", "secret"), Err(AuthError::MissingInput));
    }

    #[test]
    fn empty_password_is_missing_input() {
        assert_eq!(require_input("a@x.com", ""), Err(AuthError::MissingInput));
    }

    #[test]
    fn present_credentials_pass_input_check() {
        assert_eq!(require_input("a@x.com", "secret"), Ok(()));
    }

    #[test]
    fn correct_password_verifies() {
        let hash = bcrypt::hash("secret", TEST_COST).unwrap();
        assert_eq!(verify_password("secret", &hash), Ok(()));
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let hash = bcrypt::hash("secret", TEST_COST).unwrap();
        assert_eq!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn garbage_stored_hash_is_invalid_credentials() {
        assert_eq!(
            verify_password("secret", "not-a-bcrypt-hash"),
            Err(AuthError::InvalidCredentials)
        );
    }

    proptest! {
        #[test]
        fn normalize_email_is_idempotent(raw in "\\PC{0,40}") {
            let once = normalize_email(&raw);
            prop_assert_eq!(normalize_email(&once), once);
        }

        #[test]
        fn normalized_emails_compare_case_insensitively(local in "[a-zA-Z0-9]{1,12}") {
            let lower = normalize_email(&format!("{}@x.com", local.to_lowercase()));
            let upper = normalize_email(&format!("  {}@X.COM ", local.to_uppercase()));
            prop_assert_eq!(lower, upper);
        }
    }
}
