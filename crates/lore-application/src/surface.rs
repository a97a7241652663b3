//! Gated UI surfaces.
//!
//! Every surface declares its role requirement once; the access gate is
//! the single source of truth for whether it may be shown. A guard lets a
//! surface re-evaluate when the session changes (e.g. token expiry in
//! another tab).

use lore_core::session::{GateDecision, IdentityProvider, Role, Session, decide};
use tokio::sync::watch;

/// Top-level surfaces of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// The conversation view. Requires a session, no particular role.
    Chat,
    /// The document upload view. Admin only.
    AdminUpload,
}

impl Surface {
    /// The role this surface requires beyond being authenticated.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Surface::Chat => None,
            Surface::AdminUpload => Some(Role::Admin),
        }
    }

    pub fn all() -> [Surface; 2] {
        [Surface::Chat, Surface::AdminUpload]
    }
}

/// Applies the access gate to a surface for the current session.
pub fn evaluate(identity: &dyn IdentityProvider, surface: Surface) -> GateDecision {
    let session = identity.current_session();
    decide(session.as_ref(), surface.required_role())
}

/// The surfaces whose navigation affordances should appear for a session.
///
/// Surfaces the session may not enter are hidden from navigation entirely
/// (the admin-only upload link never shows for regular users).
pub fn visible_surfaces(session: Option<&Session>) -> Vec<Surface> {
    Surface::all()
        .into_iter()
        .filter(|surface| decide(session, surface.required_role()).is_allowed())
        .collect()
}

/// Watches session transitions for one surface.
pub struct SurfaceGuard {
    surface: Surface,
    receiver: watch::Receiver<Option<Session>>,
}

impl SurfaceGuard {
    pub fn new(identity: &dyn IdentityProvider, surface: Surface) -> Self {
        Self {
            surface,
            receiver: identity.subscribe(),
        }
    }

    /// The decision for the session as currently observed.
    pub fn decision(&self) -> GateDecision {
        let session = self.receiver.borrow().clone();
        decide(session.as_ref(), self.surface.required_role())
    }

    /// Waits for the next session transition and re-evaluates.
    ///
    /// Returns `RedirectToLogin` if the provider went away entirely
    /// (sender dropped), which is indistinguishable from signed-out for a
    /// gated surface.
    pub async fn changed(&mut self) -> GateDecision {
        if self.receiver.changed().await.is_err() {
            return GateDecision::RedirectToLogin;
        }
        let session = self.receiver.borrow_and_update().clone();
        decide(session.as_ref(), self.surface.required_role())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_infrastructure::{IdentityPayload, WatchSessionProvider};
    use serde_json::json;

    fn payload(role: &str) -> IdentityPayload {
        IdentityPayload {
            user_id: "u-1".to_string(),
            email: "user@example.com".to_string(),
            metadata: json!({ "role": role }),
        }
    }

    #[test]
    fn test_visible_surfaces_by_role() {
        assert!(visible_surfaces(None).is_empty());

        let user = Session::new("u-1", "u@example.com", Role::User);
        assert_eq!(visible_surfaces(Some(&user)), vec![Surface::Chat]);

        let admin = Session::new("a-1", "a@example.com", Role::Admin);
        assert_eq!(
            visible_surfaces(Some(&admin)),
            vec![Surface::Chat, Surface::AdminUpload]
        );
    }

    #[test]
    fn test_evaluate_admin_surface() {
        let provider = WatchSessionProvider::new();
        assert_eq!(
            evaluate(&provider, Surface::AdminUpload),
            GateDecision::RedirectToLogin
        );

        provider.establish(payload("user"));
        assert!(matches!(
            evaluate(&provider, Surface::AdminUpload),
            GateDecision::Deny { .. }
        ));

        provider.establish(payload("admin"));
        assert!(evaluate(&provider, Surface::AdminUpload).is_allowed());
    }

    #[tokio::test]
    async fn test_guard_reacts_to_expiry() {
        let provider = WatchSessionProvider::new();
        provider.establish(payload("admin"));

        let mut guard = SurfaceGuard::new(&provider, Surface::AdminUpload);
        assert!(guard.decision().is_allowed());

        // Externally-triggered invalidation, as after token expiry.
        provider.clear();
        assert_eq!(guard.changed().await, GateDecision::RedirectToLogin);
    }
}
