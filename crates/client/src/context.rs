//! Process-wide auth facade.
//!
//! One `AuthContext` exists per running application. It is constructed at
//! startup, handed to every consumer, and torn down with [`AuthContext::shutdown`]
//! on exit; there is no ambient global. Consumers observe it through a
//! `tokio::sync::watch` cell, so a background sync's write is always fully
//! visible to the next read.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use ecoboard_auth::{Account, AuthError, AuthSnapshot, CachedSession, SessionState, normalize_email};
use ecoboard_remote::{AuthEvent, AuthEventKind, IdentityGateway};

use crate::store::SessionStore;
use crate::sync::SessionSynchronizer;
use crate::verify::verify_credentials;

pub struct AuthContext {
    gateway: Arc<dyn IdentityGateway>,
    store: Arc<dyn SessionStore>,
    synchronizer: SessionSynchronizer,
    snapshot: watch::Sender<AuthSnapshot>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl AuthContext {
    /// Construct the facade: resolve the initial session state, then attach
    /// the one subscription to the remote auth-event stream for the life of
    /// the context.
    pub async fn start(
        gateway: Arc<dyn IdentityGateway>,
        store: Arc<dyn SessionStore>,
    ) -> Arc<Self> {
        let (snapshot, _) = watch::channel(AuthSnapshot {
            state: SessionState::Unknown,
            loading: true,
            error: None,
        });

        let ctx = Arc::new(Self {
            synchronizer: SessionSynchronizer::new(gateway.clone(), store.clone()),
            gateway,
            store,
            snapshot,
            pump: Mutex::new(None),
        });

        ctx.sync_auth().await;

        // Every event dispatches into the same synchronization routine the
        // explicit calls use; sign-out events skip sync and clear directly.
        let mut subscription = ctx.gateway.subscribe();
        let weak = Arc::downgrade(&ctx);
        let pump = tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                let Some(ctx) = weak.upgrade() else { break };
                ctx.handle_event(event).await;
            }
        });
        *ctx.pump.lock().unwrap() = Some(pump);

        ctx
    }

    /// Stop reacting to remote auth events. Calls already in flight run to
    /// completion; only future reactions are cancelled.
    pub fn shutdown(&self) {
        if let Some(pump) = self.pump.lock().unwrap().take() {
            pump.abort();
        }
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Watch the snapshot cell directly (route guards, status displays).
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn current_user(&self) -> Option<Account> {
        self.snapshot.borrow().account().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.snapshot.borrow().is_admin()
    }

    pub fn is_manager(&self) -> bool {
        self.snapshot.borrow().is_manager()
    }

    /// Verify credentials and sign the user in.
    ///
    /// On success the cache is written and the state flips to authenticated
    /// before returning. On failure the error is recorded for the UI and
    /// re-raised unchanged. `loading` is cleared on every exit.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        self.begin();
        match self.login_flow(email, password).await {
            Ok((account, session_warning)) => {
                self.store.write(&CachedSession::from(&account));
                self.snapshot.send_modify(|s| {
                    s.state = SessionState::Authenticated(account.clone());
                    s.error = session_warning;
                    s.loading = false;
                });
                Ok(account)
            }
            Err(err) => {
                self.snapshot.send_modify(|s| {
                    s.state = SessionState::Unauthenticated;
                    s.error = Some(err.to_string());
                    s.loading = false;
                });
                Err(err)
            }
        }
    }

    async fn login_flow(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Account, Option<String>), AuthError> {
        let account = verify_credentials(self.gateway.as_ref(), email, password).await?;

        // Establish the service-side session. Verified credentials stand
        // even when this call fails; the failure is kept visible as the
        // snapshot diagnostic rather than silently ignored.
        let warning = match self
            .gateway
            .sign_in_with_password(&normalize_email(email), password)
            .await
        {
            Ok(_) => None,
            Err(err) => {
                tracing::warn!("remote sign-in failed after credential verification: {err}");
                Some(format!("remote session unavailable: {err}"))
            }
        };

        Ok((account, warning))
    }

    /// Sign out. Best-effort on the remote side: local state is cleared no
    /// matter what, so a network error can never leave the UI looking
    /// signed in.
    pub async fn logout(&self) {
        self.begin();
        if let Err(err) = self.gateway.sign_out().await {
            tracing::warn!("remote sign-out failed; clearing local session anyway: {err}");
        }
        self.store.clear();
        self.snapshot.send_modify(|s| {
            s.state = SessionState::Unauthenticated;
            s.loading = false;
        });
    }

    /// Force a re-validation of the current session (route guards call this
    /// on mount). Resolves to the synchronized account, if any.
    pub async fn sync_auth(&self) -> Option<Account> {
        self.begin();
        let outcome = self.synchronizer.sync().await;
        let account = outcome.account().cloned();
        self.snapshot.send_modify(|s| {
            s.state = outcome.state;
            s.error = outcome.error;
            s.loading = false;
        });
        account
    }

    async fn handle_event(&self, event: AuthEvent) {
        match event.kind {
            AuthEventKind::SignedIn | AuthEventKind::TokenRefreshed => {
                self.sync_auth().await;
            }
            AuthEventKind::SignedOut => {
                self.store.clear();
                self.snapshot.send_modify(|s| {
                    s.state = SessionState::Unauthenticated;
                    s.error = None;
                    s.loading = false;
                });
            }
            AuthEventKind::Other => {}
        }
    }

    fn begin(&self) {
        self.snapshot.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }
}
