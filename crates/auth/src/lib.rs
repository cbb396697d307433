//! `ecoboard-auth` — pure authentication domain.
//!
//! This crate is intentionally decoupled from HTTP and storage: it defines
//! who an account is, what the resolved session state looks like, and how a
//! presented password is checked against a stored hash. Fetching accounts,
//! persisting sessions, and talking to the identity service live elsewhere.

pub mod account;
pub mod error;
pub mod roles;
pub mod state;
pub mod verify;

pub use account::{Account, CachedSession, UserId};
pub use error::AuthError;
pub use roles::Role;
pub use state::{AuthSnapshot, SessionState};
pub use verify::{normalize_email, require_input, verify_password};
