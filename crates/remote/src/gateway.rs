//! The consumed identity-service contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ecoboard_auth::Account;

use crate::events::EventSubscription;

/// A session tracked by the remote service itself.
///
/// This is distinct from the locally cached session record: the service
/// keeps it server-side and only its account email is consumed here (token
/// refresh is the service's business, not ours).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSession {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl LiveSession {
    pub fn for_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            expires_at: None,
        }
    }
}

/// Failure talking to the identity service.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),
    #[error("identity service error ({0}): {1}")]
    Api(u16, String),
    #[error("unexpected response from identity service: {0}")]
    Decode(String),
}

/// Everything EcoBoard asks of the remote identity service.
///
/// Callers hold this as `Arc<dyn IdentityGateway>`; all methods run to
/// completion or failure. The contract defines no cancellation or timeout,
/// so lifecycle control is limited to dropping the event subscription.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Row lookup: at most one account whose email equals `email` (already
    /// normalized by the caller).
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, RemoteError>;

    /// The service's current live session, if it is tracking one.
    async fn get_session(&self) -> Result<Option<LiveSession>, RemoteError>;

    /// Establish a service-side session for the given credentials.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LiveSession, RemoteError>;

    /// End the service-side session.
    async fn sign_out(&self) -> Result<(), RemoteError>;

    /// Subscribe to the service's auth-event stream. The returned handle is
    /// the unsubscribe mechanism: closing (or dropping) it stops delivery.
    fn subscribe(&self) -> EventSubscription;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_session_decodes_without_expiry() {
        let session: LiveSession =
            serde_json::from_str(r#"{"email":"ops@malabar.eco"}"#).unwrap();
        assert_eq!(session.email, "ops@malabar.eco");
        assert!(session.expires_at.is_none());
    }
}
