//! Identity provider trait.
//!
//! Defines the interface to the external authentication collaborator. The
//! core treats the current session as an opaque, externally-refreshed value:
//! token issuance, storage and refresh are owned by the provider.

use super::model::Session;
use tokio::sync::watch;

/// An abstract source of the current authenticated session.
///
/// Implementations own the mechanics of establishing, refreshing and
/// clearing the session; consumers only read it and subscribe to changes.
///
/// `current_session` is a local read, not a network call: no retry policy
/// is needed on the consumer side.
pub trait IdentityProvider: Send + Sync {
    /// Returns the currently active session, if any.
    fn current_session(&self) -> Option<Session>;

    /// Clears the active session (sign-out).
    fn sign_out(&self);

    /// Subscribes to session transitions.
    ///
    /// The receiver observes every establish, refresh and clear, including
    /// clears triggered externally (e.g. token expiry in another tab).
    /// Gated surfaces re-evaluate the access gate on each change, and
    /// in-flight operations must not persist results under an identity
    /// that has since changed.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}
