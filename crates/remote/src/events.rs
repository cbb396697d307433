//! Auth-event notifications and the subscription handle.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::gateway::LiveSession;

/// Kind of session-lifecycle change announced by the remote service.
///
/// The service emits more kinds than we care about; anything unrecognized
/// lands on [`AuthEventKind::Other`] and is ignored by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventKind {
    SignedIn,
    TokenRefreshed,
    SignedOut,
    #[serde(other)]
    Other,
}

/// One notification from the remote service. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEvent {
    #[serde(rename = "event")]
    pub kind: AuthEventKind,
    /// The live session accompanying the event, when the service attaches
    /// one (sign-out events carry none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<LiveSession>,
}

impl AuthEvent {
    pub fn new(kind: AuthEventKind) -> Self {
        Self { kind, session: None }
    }

    pub fn with_session(kind: AuthEventKind, session: LiveSession) -> Self {
        Self {
            kind,
            session: Some(session),
        }
    }
}

/// A live subscription to the auth-event stream.
///
/// Dropping the handle (or calling [`EventSubscription::close`]) is the
/// unsubscribe: it stops future deliveries but does not cancel remote calls
/// already in flight elsewhere.
#[derive(Debug)]
pub struct EventSubscription {
    receiver: mpsc::UnboundedReceiver<AuthEvent>,
    /// Background feeder task, when the gateway needs one (the HTTP
    /// implementation pumps an SSE connection into the channel).
    pump: Option<JoinHandle<()>>,
}

impl EventSubscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<AuthEvent>) -> Self {
        Self {
            receiver,
            pump: None,
        }
    }

    pub(crate) fn with_pump(receiver: mpsc::UnboundedReceiver<AuthEvent>, pump: JoinHandle<()>) -> Self {
        Self {
            receiver,
            pump: Some(pump),
        }
    }

    /// Next event, or `None` once the stream has ended (sender dropped or
    /// subscription closed).
    pub async fn recv(&mut self) -> Option<AuthEvent> {
        self.receiver.recv().await
    }

    /// Explicit unsubscribe.
    pub fn close(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
        self.receiver.close();
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
    }
}
