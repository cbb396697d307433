//! Resolved session state as seen by the rest of the application.

use crate::{Account, Role};

/// The authentication status of the running application.
///
/// Exactly one of these exists per application instance (inside the auth
/// facade's state cell) and it only transitions through the session
/// synchronizer or the facade's login/logout paths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Startup value; synchronization has not resolved yet.
    #[default]
    Unknown,
    Authenticated(Account),
    Unauthenticated,
}

impl SessionState {
    pub fn account(&self) -> Option<&Account> {
        match self {
            SessionState::Authenticated(account) => Some(account),
            SessionState::Unknown | SessionState::Unauthenticated => None,
        }
    }
}

/// One observable value for consumers: the resolved state, whether an auth
/// operation is in flight, and the last diagnostic recorded by a swallowed
/// synchronization failure.
///
/// Views and route guards read this; they never see an error raised out of
/// `sync()`. Failures resolve to `Unauthenticated` plus `error`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthSnapshot {
    pub state: SessionState,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthSnapshot {
    pub fn account(&self) -> Option<&Account> {
        self.state.account()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    fn has_role(&self, role: Role) -> bool {
        self.state
            .account()
            .is_some_and(|account| account.role.satisfies(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_manager(&self) -> bool {
        self.has_role(Role::Manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserId;

    fn account(role: Role) -> Account {
        Account {
            id: UserId::new(),
            email: "site@malabar.eco".to_string(),
            password_hash: String::new(),
            role,
            full_name: "Site Lead".to_string(),
        }
    }

    fn authenticated(role: Role) -> AuthSnapshot {
        AuthSnapshot {
            state: SessionState::Authenticated(account(role)),
            loading: false,
            error: None,
        }
    }

    #[test]
    fn default_snapshot_is_unknown_and_signed_out() {
        let snapshot = AuthSnapshot::default();
        assert_eq!(snapshot.state, SessionState::Unknown);
        assert!(!snapshot.is_authenticated());
        assert!(snapshot.account().is_none());
    }

    #[test]
    fn role_flags_follow_the_account_role() {
        assert!(authenticated(Role::Admin).is_admin());
        assert!(!authenticated(Role::Admin).is_manager());
        assert!(authenticated(Role::Manager).is_manager());
        assert!(!authenticated(Role::Unassigned).is_admin());
    }

    #[test]
    fn unauthenticated_snapshot_has_no_role() {
        let snapshot = AuthSnapshot {
            state: SessionState::Unauthenticated,
            loading: false,
            error: None,
        };
        assert!(!snapshot.is_admin());
        assert!(!snapshot.is_manager());
    }
}
