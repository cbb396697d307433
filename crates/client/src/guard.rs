//! Route gating for protected and public-only views.

use ecoboard_auth::{AuthSnapshot, Role};

use crate::context::AuthContext;

/// The application's route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Public entry point (the login screen).
    Login,
    /// Default authenticated landing view.
    Dashboard,
    Logout,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard => "/dashboard",
            Route::Logout => "/logout",
        }
    }
}

/// What a guard decided for the wrapped view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Synchronization is still in flight: show a neutral waiting
    /// indicator, render nothing, redirect nowhere.
    Pending,
    Allow,
    Redirect(Route),
}

/// Gate in front of a protected view, with an optional role requirement.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtectedGate {
    required_role: Option<Role>,
}

impl ProtectedGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requiring(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }

    /// Decide from an already-settled snapshot.
    ///
    /// Missing authentication goes back to the public entry point; an
    /// unsatisfied role requirement goes to the default landing view
    /// instead (the user is signed in, just not allowed here).
    pub fn evaluate(&self, snapshot: &AuthSnapshot) -> GateOutcome {
        if snapshot.loading {
            return GateOutcome::Pending;
        }
        let Some(account) = snapshot.account() else {
            return GateOutcome::Redirect(Route::Login);
        };
        match self.required_role {
            Some(required) if !account.role.satisfies(required) => {
                GateOutcome::Redirect(Route::Dashboard)
            }
            _ => GateOutcome::Allow,
        }
    }

    /// The on-mount behavior: force a re-validation, then decide.
    pub async fn resolve(&self, ctx: &AuthContext) -> GateOutcome {
        ctx.sync_auth().await;
        self.evaluate(&ctx.snapshot())
    }
}

/// Inverse gate for public-only views (the login screen): anyone already
/// signed in is sent to the landing view.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicGate;

impl PublicGate {
    pub fn evaluate(&self, snapshot: &AuthSnapshot) -> GateOutcome {
        if snapshot.loading {
            return GateOutcome::Pending;
        }
        if snapshot.is_authenticated() {
            GateOutcome::Redirect(Route::Dashboard)
        } else {
            GateOutcome::Allow
        }
    }
}

/// Catch-all for unknown paths: land wherever the session state points.
pub fn fallback_route(snapshot: &AuthSnapshot) -> Route {
    if snapshot.is_authenticated() {
        Route::Dashboard
    } else {
        Route::Login
    }
}

/// The `/logout` view: end the session, then leave for the entry point.
pub async fn resolve_logout(ctx: &AuthContext) -> Route {
    ctx.logout().await;
    Route::Login
}
