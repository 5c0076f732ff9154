//! Holder of the current authenticated identity.

use tokio::sync::watch;

use crate::types::User;

/// The process-wide session: the current [`User`], or `None` when signed out.
///
/// Reads are open to everyone; only the auth flows inside this crate write.
/// Observers can [`subscribe`](SessionStore::subscribe) to be woken on every
/// change.
#[derive(Debug)]
pub struct SessionStore {
    current: watch::Sender<Option<User>>,
}

impl SessionStore {
    /// Create an empty (signed out) store.
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self { current }
    }

    /// The current identity.
    pub fn get(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    /// Whether someone is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Watch the identity for changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    /// Replace the identity. Returns the previous one.
    pub(crate) fn set(&self, user: Option<User>) -> Option<User> {
        self.current.send_replace(user)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
