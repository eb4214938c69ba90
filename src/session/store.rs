use std::sync::{PoisonError, RwLock};

use super::Session;

/// Holds the active session of the game client.
///
/// Hosts that keep the session in their own state implement this to have
/// logins written there.
pub trait SessionStore: Send + Sync + 'static {
    /// Returns the active session.
    fn current(&self) -> Session;

    /// Swaps the active session for `session`.
    fn replace(&self, session: Session) -> crate::Result<()>;
}

/// In-memory session store.
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn current(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, session: Session) -> crate::Result<()> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
        Ok(())
    }
}
