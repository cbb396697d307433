//! `ecoboard-client`
//!
//! **Responsibility:** the application shell around the identity service.
//!
//! This crate provides:
//! - The durable local session slot ([`store`])
//! - Credential verification against the remote users table ([`verify`])
//! - Reconciliation of local cache vs. the service's live session ([`sync`])
//! - The process-wide auth facade and its event subscription ([`context`])
//! - Route gating for protected and public-only views ([`guard`])
//!
//! The client is a **thin shell**: the remote identity service stays the
//! authority on who exists; the local cache only bootstraps the UI.

pub mod config;
pub mod context;
pub mod guard;
pub mod store;
pub mod sync;
pub mod verify;

pub use config::ClientConfig;
pub use context::AuthContext;
pub use guard::{GateOutcome, ProtectedGate, PublicGate, Route, fallback_route, resolve_logout};
pub use store::{FileSessionStore, InMemorySessionStore, SessionStore};
pub use sync::{SessionSynchronizer, SyncOutcome};
pub use verify::verify_credentials;
