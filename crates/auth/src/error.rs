//! Authentication error model.

use thiserror::Error;

/// Errors surfaced by the authentication layer.
///
/// Deliberately coarse: "no such account" and "wrong password" are both
/// [`AuthError::InvalidCredentials`] so a caller (or an attacker driving
/// one) cannot enumerate which emails exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Local validation failure; never reaches the remote service.
    #[error("Email and password are required")]
    MissingInput,

    /// Unknown account, wrong password, or a failed account lookup during
    /// login; indistinguishable on purpose.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// The identity service could not be consulted while reconciling
    /// session state. Terminal for that sync cycle; not retried.
    #[error("identity service lookup failed: {0}")]
    RemoteLookup(String),
}

impl AuthError {
    pub fn remote_lookup(msg: impl Into<String>) -> Self {
        Self::RemoteLookup(msg.into())
    }
}
