//! In-process identity provider backed by a watch channel.
//!
//! The external authentication collaborator (whatever owns token issuance
//! and refresh) calls `establish` and `clear`; everything downstream reads
//! the session through the `IdentityProvider` trait and subscribes to
//! transitions. Role resolution happens exactly once, here, when the
//! session is established.

use lore_core::session::{IdentityProvider, Role, Session};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The raw identity handed over by the authentication collaborator:
/// a user id, an email, and whatever metadata the provider attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityPayload {
    pub user_id: String,
    pub email: String,
    /// Provider-attached metadata; the role claim lives at `metadata.role`.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Identity provider that broadcasts session transitions over a
/// `tokio::sync::watch` channel.
pub struct WatchSessionProvider {
    sender: watch::Sender<Option<Session>>,
}

impl WatchSessionProvider {
    /// Creates a provider with no active session.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Establishes (or refreshes) the session from a raw identity.
    ///
    /// The role claim is read from `metadata.role`; absent or unrecognized
    /// values degrade to `Role::User`. All subscribers observe the
    /// transition.
    pub fn establish(&self, payload: IdentityPayload) -> Session {
        let claim = payload.metadata.get("role").and_then(|v| v.as_str());
        let role = Role::from_claim(claim);
        let session = Session::new(payload.user_id, payload.email, role);

        tracing::info!(user_id = %session.user_id, role = role.as_claim(), "session established");
        self.sender.send_replace(Some(session.clone()));
        session
    }

    /// Clears the session without going through `sign_out` (used for
    /// externally-triggered invalidation such as token expiry).
    pub fn clear(&self) {
        self.sender.send_replace(None);
    }
}

impl Default for WatchSessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for WatchSessionProvider {
    fn current_session(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }

    fn sign_out(&self) {
        tracing::info!("session cleared");
        self.clear();
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(metadata: serde_json::Value) -> IdentityPayload {
        IdentityPayload {
            user_id: "u-1".to_string(),
            email: "user@example.com".to_string(),
            metadata,
        }
    }

    #[test]
    fn test_establish_resolves_admin_claim() {
        let provider = WatchSessionProvider::new();
        let session = provider.establish(payload(json!({ "role": "admin" })));
        assert_eq!(session.role, Role::Admin);
        assert_eq!(provider.current_session().unwrap().role, Role::Admin);
    }

    #[test]
    fn test_missing_or_garbage_claim_defaults_to_user() {
        let provider = WatchSessionProvider::new();
        assert_eq!(provider.establish(payload(json!({}))).role, Role::User);
        assert_eq!(
            provider.establish(payload(json!({ "role": 42 }))).role,
            Role::User
        );
        assert_eq!(
            provider.establish(payload(json!({ "role": "owner" }))).role,
            Role::User
        );
    }

    #[tokio::test]
    async fn test_subscribers_observe_sign_out() {
        let provider = WatchSessionProvider::new();
        let mut receiver = provider.subscribe();

        provider.establish(payload(json!({ "role": "user" })));
        receiver.changed().await.unwrap();
        assert!(receiver.borrow_and_update().is_some());

        provider.sign_out();
        receiver.changed().await.unwrap();
        assert!(receiver.borrow_and_update().is_none());
        assert!(provider.current_session().is_none());
    }
}
