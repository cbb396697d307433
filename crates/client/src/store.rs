//! Durable local session slot.
//!
//! One fixed key, one JSON document: the `user` record the UI needs to
//! render without a network round trip. The slot is read on the single
//! logical application thread, so access is synchronous and unlocked; the
//! racing-sync tolerance lives a layer up (each sync fully overwrites).

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;

use ecoboard_auth::CachedSession;

/// Read/write/clear access to the persisted session record.
///
/// All operations fail soft: a broken slot is logged and treated as absent,
/// never propagated. Corruption self-heals by clearing.
pub trait SessionStore: Send + Sync {
    fn read(&self) -> Option<CachedSession>;
    fn write(&self, session: &CachedSession);
    fn clear(&self);
}

/// File-backed store: `{data_dir}/ecoboard/user.json`.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolve the slot under the OS application-data directory.
    pub fn in_default_location() -> anyhow::Result<Self> {
        Ok(Self::new(session_file_path()?))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self) -> Option<CachedSession> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!("failed to read session slot: {err}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!("discarding corrupt session slot: {err}");
                self.clear();
                None
            }
        }
    }

    fn write(&self, session: &CachedSession) {
        let write = || -> anyhow::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create session directory {parent:?}"))?;
            }
            let payload = serde_json::to_string(session)?;
            std::fs::write(&self.path, payload)
                .with_context(|| format!("failed to write session slot {:?}", self.path))?;
            Ok(())
        };
        if let Err(err) = write() {
            tracing::error!("failed to persist session: {err:?}");
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!("failed to clear session slot: {err}"),
        }
    }
}

/// Resolve the path to the session slot:
/// `{app_data_dir}/ecoboard/user.json`.
fn session_file_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory")?;

    let mut path = base;
    path.push("ecoboard");
    path.push("user.json");
    Ok(path)
}

/// In-memory store for tests and the offline demo.
///
/// Keeps the *serialized* form so tests can plant corrupt content and watch
/// it take the same self-healing path as the file store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant raw slot content, bypassing serialization.
    pub fn inject_raw(&self, raw: impl Into<String>) {
        *self.slot.lock().unwrap() = Some(raw.into());
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().unwrap().is_none()
    }
}

impl SessionStore for InMemorySessionStore {
    fn read(&self) -> Option<CachedSession> {
        let raw = self.slot.lock().unwrap().clone()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!("discarding corrupt session slot: {err}");
                self.clear();
                None
            }
        }
    }

    fn write(&self, session: &CachedSession) {
        match serde_json::to_string(session) {
            Ok(payload) => *self.slot.lock().unwrap() = Some(payload),
            Err(err) => tracing::error!("failed to persist session: {err}"),
        }
    }

    fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoboard_auth::{Role, UserId};

    fn cached() -> CachedSession {
        CachedSession {
            id: UserId::new(),
            email: "ops@malabar.eco".to_string(),
            role: Role::Manager,
            full_name: "Ops Desk".to_string(),
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("ecoboard-store-{}-{}", std::process::id(), name));
        path.push("user.json");
        path
    }

    #[test]
    fn file_store_round_trips() {
        let store = FileSessionStore::new(scratch_path("round-trip"));
        store.clear();

        assert!(store.read().is_none());
        let session = cached();
        store.write(&session);
        assert_eq!(store.read(), Some(session));

        store.clear();
        assert!(store.read().is_none());
    }

    #[test]
    fn file_store_self_heals_corrupt_slot() {
        let store = FileSessionStore::new(scratch_path("corrupt"));
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(store.read().is_none());
        // The corrupt slot was deleted, not just ignored.
        assert!(!store.path().exists());
    }

    #[test]
    fn clearing_a_missing_slot_is_fine() {
        let store = FileSessionStore::new(scratch_path("missing"));
        store.clear();
        store.clear();
        assert!(store.read().is_none());
    }

    #[test]
    fn memory_store_round_trips() {
        let store = InMemorySessionStore::new();
        assert!(store.is_empty());

        let session = cached();
        store.write(&session);
        assert_eq!(store.read(), Some(session));

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn memory_store_self_heals_corrupt_slot() {
        let store = InMemorySessionStore::new();
        store.inject_raw("][");
        assert!(store.read().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn stored_document_uses_the_user_slot_shape() {
        let store = InMemorySessionStore::new();
        store.write(&cached());
        let raw = store.slot.lock().unwrap().clone().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        for key in ["id", "email", "role", "full_name"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
