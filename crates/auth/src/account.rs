//! Account records and the locally cached session subset.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::Role;

/// The remote `role` column may be absent or null; both read as unassigned.
fn role_or_unassigned<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Role>::deserialize(deserializer)?.unwrap_or_default())
}

/// Unique identifier for an account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<UserId> for Uuid {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Authoritative identity record, owned by the remote store.
///
/// The application only ever holds read copies of this; it is fetched by
/// email (the case-insensitive natural key) and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    /// Stored lowercased; lookups normalize before comparing.
    pub email: String,
    /// One-way bcrypt hash. The cost factor is fixed when the hash is
    /// generated (currently 10); verification reads it from the hash itself.
    #[serde(alias = "encrypted_password")]
    pub password_hash: String,
    #[serde(default, deserialize_with = "role_or_unassigned")]
    pub role: Role,
    pub full_name: String,
}

/// The subset of [`Account`] persisted locally so the UI can render without
/// a network round trip.
///
/// A cached session corresponded to a live remote account at the time it was
/// written, but may since have gone stale (account deleted or altered); it
/// must be revalidated against the remote store before being trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedSession {
    pub id: UserId,
    pub email: String,
    #[serde(default, deserialize_with = "role_or_unassigned")]
    pub role: Role,
    pub full_name: String,
}

impl From<&Account> for CachedSession {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
            full_name: account.full_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: UserId::new(),
            email: "ops@malabar.eco".to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            role: Role::Manager,
            full_name: "Ops Desk".to_string(),
        }
    }

    #[test]
    fn cached_session_carries_public_fields_only() {
        let account = account();
        let cached = CachedSession::from(&account);

        assert_eq!(cached.id, account.id);
        assert_eq!(cached.email, account.email);
        assert_eq!(cached.role, account.role);
        assert_eq!(cached.full_name, account.full_name);

        let json = serde_json::to_value(&cached).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(
            json.as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["id", "email", "role", "full_name"]
        );
    }

    #[test]
    fn account_decodes_legacy_password_column_name() {
        let raw = serde_json::json!({
            "id": "0189c0f0-3a5e-7000-8000-000000000001",
            "email": "ops@malabar.eco",
            "encrypted_password": "$2b$10$abcdefghijklmnopqrstuv",
            "role": "admin",
            "full_name": "Ops Desk"
        });
        let account: Account = serde_json::from_value(raw).unwrap();
        assert_eq!(account.password_hash, "$2b$10$abcdefghijklmnopqrstuv");
        assert_eq!(account.role, Role::Admin);
    }

    #[test]
    fn account_without_role_defaults_to_unassigned() {
        let raw = serde_json::json!({
            "id": "0189c0f0-3a5e-7000-8000-000000000001",
            "email": "ops@malabar.eco",
            "password_hash": "$2b$10$abcdefghijklmnopqrstuv",
            "full_name": "Ops Desk"
        });
        let account: Account = serde_json::from_value(raw).unwrap();
        assert_eq!(account.role, Role::Unassigned);
    }

    #[test]
    fn account_with_null_role_defaults_to_unassigned() {
        let raw = serde_json::json!({
            "id": "0189c0f0-3a5e-7000-8000-000000000001",
            "email": "ops@malabar.eco",
            "password_hash": "$2b$10$abcdefghijklmnopqrstuv",
            "role": null,
            "full_name": "Ops Desk"
        });
        let account: Account = serde_json::from_value(raw).unwrap();
        assert_eq!(account.role, Role::Unassigned);
    }
}
