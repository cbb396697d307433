//! `ecoboard-remote` — the remote identity service boundary.
//!
//! EcoBoard does not own an identity database; it consumes one. This crate
//! holds the consumed contract ([`IdentityGateway`]): a row lookup on the
//! `users` table plus the service's native session primitives, and a
//! subscription to its auth-event stream. Two implementations ship with it:
//! an HTTP client for the real service and an in-memory double for tests
//! and the offline demo.

pub mod events;
pub mod gateway;
pub mod http;
pub mod memory;

pub use events::{AuthEvent, AuthEventKind, EventSubscription};
pub use gateway::{IdentityGateway, LiveSession, RemoteError};
pub use http::HttpIdentityGateway;
pub use memory::InMemoryIdentityGateway;
