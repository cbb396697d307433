use serde::{Deserialize, Serialize};

/// Role granted to an account.
///
/// The remote store keeps this as a free-form column; anything it holds that
/// is not a role we know about deserializes to [`Role::Unassigned`] so a
/// stray value can never fail a row decode or accidentally satisfy a role
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    #[serde(other)]
    Unassigned,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Unassigned => "unassigned",
        }
    }

    /// Whether an account holding `self` meets a `required` role.
    ///
    /// Authorization here is a single equality check; there is no role
    /// hierarchy (an admin does not implicitly satisfy a manager gate).
    pub fn satisfies(&self, required: Role) -> bool {
        *self == required
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_parse_lowercase() {
        assert_eq!(serde_json::from_str::<Role>("\"admin\"").unwrap(), Role::Admin);
        assert_eq!(serde_json::from_str::<Role>("\"manager\"").unwrap(), Role::Manager);
    }

    #[test]
    fn unknown_role_string_maps_to_unassigned() {
        assert_eq!(
            serde_json::from_str::<Role>("\"superuser\"").unwrap(),
            Role::Unassigned
        );
    }

    #[test]
    fn satisfies_is_plain_equality() {
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(!Role::Manager.satisfies(Role::Admin));
        assert!(!Role::Admin.satisfies(Role::Manager));
        assert!(!Role::Unassigned.satisfies(Role::Admin));
    }
}
