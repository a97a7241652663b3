//! Access gate for role-gated surfaces.
//!
//! A pure decision function mapping (session, required role) to an access
//! decision. This is the single source of truth for every gated surface,
//! including navigation affordances that conditionally appear.

use super::model::{Role, Session};

/// The outcome of an access decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The surface may be shown.
    Allow,
    /// The session is authenticated but lacks the required role. The
    /// surface renders an access-denied state instead of redirecting,
    /// which avoids a redirect loop and gives the user feedback.
    Deny { message: String },
    /// No session: the user must authenticate first.
    RedirectToLogin,
}

impl GateDecision {
    /// True when the decision permits rendering the surface.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }
}

/// Decides whether a surface with the given role requirement may be shown.
///
/// Rules, in order:
/// 1. No session: `RedirectToLogin`.
/// 2. No required role: `Allow`.
/// 3. Required role not satisfied: `Deny` with a human-readable message.
/// 4. Otherwise: `Allow`.
///
/// Pure and synchronous; no side effects.
pub fn decide(session: Option<&Session>, required: Option<Role>) -> GateDecision {
    let Some(session) = session else {
        return GateDecision::RedirectToLogin;
    };

    match required {
        None => GateDecision::Allow,
        Some(Role::Admin) if session.role != Role::Admin => GateDecision::Deny {
            message: "You do not have permission to access this page.".to_string(),
        },
        Some(_) => GateDecision::Allow,
    }
}
