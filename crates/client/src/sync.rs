//! Reconciliation of the local session slot against the remote service.

use std::sync::Arc;

use ecoboard_auth::{Account, AuthError, CachedSession, SessionState, normalize_email};
use ecoboard_remote::IdentityGateway;

use crate::store::SessionStore;

/// What one sync run resolved to. `error` carries the diagnostic for a
/// swallowed failure; callers only ever see a settled state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub state: SessionState,
    pub error: Option<String>,
}

impl SyncOutcome {
    pub fn account(&self) -> Option<&Account> {
        self.state.account()
    }
}

/// Decides what the current user is, reconciling the cached session record
/// against the remote service.
///
/// Priority order, short-circuiting on the first success:
/// 1. a cached session that still matches a remote account wins;
/// 2. otherwise the service's own live session, resolved to an account
///    (rewriting the cache on the way);
/// 3. otherwise nobody is signed in.
///
/// Runs are idempotent: each one ends by fully overwriting the resolved
/// state and (on the live path) the cache, so concurrent runs degrade to
/// last-writer-wins rather than merged state.
pub struct SessionSynchronizer {
    gateway: Arc<dyn IdentityGateway>,
    store: Arc<dyn SessionStore>,
}

impl SessionSynchronizer {
    pub fn new(gateway: Arc<dyn IdentityGateway>, store: Arc<dyn SessionStore>) -> Self {
        Self { gateway, store }
    }

    /// Resolve the current user. Never raises: any unexpected failure is
    /// recorded as the outcome's diagnostic and resolves `Unauthenticated`.
    pub async fn sync(&self) -> SyncOutcome {
        match self.reconcile().await {
            Ok(state) => SyncOutcome { state, error: None },
            Err(err) => {
                tracing::error!("session sync failed: {err}");
                SyncOutcome {
                    state: SessionState::Unauthenticated,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    async fn reconcile(&self) -> Result<SessionState, AuthError> {
        // Revalidate the cached record first: if its account still exists
        // remotely, it is authoritative and the cache stays untouched.
        if let Some(cached) = self.store.read() {
            match self
                .gateway
                .find_account_by_email(&normalize_email(&cached.email))
                .await
            {
                Ok(Some(account)) => return Ok(SessionState::Authenticated(account)),
                Ok(None) => {
                    tracing::info!("cached session no longer matches a remote account; discarding");
                    self.store.clear();
                }
                Err(err) => {
                    tracing::warn!("cached session revalidation failed ({err}); discarding");
                    self.store.clear();
                }
            }
        }

        // No usable cache: ask the service what session it is tracking.
        let Some(live) = self
            .gateway
            .get_session()
            .await
            .map_err(|e| AuthError::remote_lookup(e.to_string()))?
        else {
            return Ok(SessionState::Unauthenticated);
        };

        // Resolve the live session to an account. A lookup failure here is
        // terminal for this cycle, not retried.
        let account = self
            .gateway
            .find_account_by_email(&normalize_email(&live.email))
            .await
            .map_err(|e| AuthError::remote_lookup(e.to_string()))?;

        match account {
            Some(account) => {
                self.store.write(&CachedSession::from(&account));
                Ok(SessionState::Authenticated(account))
            }
            None => Ok(SessionState::Unauthenticated),
        }
    }
}
