//! In-memory identity service for tests and the offline demo.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use ecoboard_auth::{Account, normalize_email, verify_password};

use crate::events::{AuthEvent, EventSubscription};
use crate::gateway::{IdentityGateway, LiveSession, RemoteError};

/// Scriptable stand-in for the remote identity service.
///
/// - No IO / no async machinery beyond the event channels
/// - Fan-out: every subscriber gets a copy of every emitted event
/// - Failure injection flags let tests force each remote call to fail
/// - The event stream is driven explicitly through [`Self::emit`]; calls do
///   not announce themselves, so tests control exactly when events arrive
#[derive(Debug, Default)]
pub struct InMemoryIdentityGateway {
    /// Accounts keyed by normalized email.
    accounts: Mutex<HashMap<String, Account>>,
    live_session: Mutex<Option<LiveSession>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<AuthEvent>>>,
    fail_lookups: AtomicBool,
    fail_sessions: AtomicBool,
    fail_sign_in: AtomicBool,
    fail_sign_out: AtomicBool,
}

impl InMemoryIdentityGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let gateway = Self::new();
        for account in accounts {
            gateway.insert_account(account);
        }
        gateway
    }

    pub fn insert_account(&self, account: Account) {
        let key = normalize_email(&account.email);
        self.accounts.lock().unwrap().insert(key, account);
    }

    pub fn remove_account(&self, email: &str) {
        self.accounts
            .lock()
            .unwrap()
            .remove(&normalize_email(email));
    }

    pub fn set_live_session(&self, session: Option<LiveSession>) {
        *self.live_session.lock().unwrap() = session;
    }

    pub fn live_session(&self) -> Option<LiveSession> {
        self.live_session.lock().unwrap().clone()
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sessions(&self, fail: bool) {
        self.fail_sessions.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sign_in(&self, fail: bool) {
        self.fail_sign_in.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    /// Broadcast an event to every live subscription, dropping subscribers
    /// whose handles have gone away.
    pub fn emit(&self, event: AuthEvent) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[async_trait]
impl IdentityGateway for InMemoryIdentityGateway {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, RemoteError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("injected lookup failure".into()));
        }
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.get(&normalize_email(email)).cloned())
    }

    async fn get_session(&self) -> Result<Option<LiveSession>, RemoteError> {
        if self.fail_sessions.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("injected session failure".into()));
        }
        Ok(self.live_session())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LiveSession, RemoteError> {
        if self.fail_sign_in.load(Ordering::SeqCst) {
            return Err(RemoteError::Api(503, "sign-in unavailable".into()));
        }

        let account = {
            let accounts = self.accounts.lock().unwrap();
            accounts.get(&normalize_email(email)).cloned()
        };
        let valid = account
            .map(|account| verify_password(password, &account.password_hash).is_ok())
            .unwrap_or(false);
        if !valid {
            return Err(RemoteError::Api(400, "invalid login credentials".into()));
        }

        let session = LiveSession::for_email(normalize_email(email));
        self.set_live_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("injected sign-out failure".into()));
        }
        self.set_live_session(None);
        Ok(())
    }

    fn subscribe(&self) -> EventSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push(tx);
        EventSubscription::new(rx)
    }
}
