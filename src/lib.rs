//! Session management for Minecraft clients.
//!
//! [`SessionManager`](session::manager::SessionManager) owns the active
//! [`Session`](session::Session), caches whether its token is still accepted by
//! the identity service, and swaps it on online (Yggdrasil) or offline logins.

pub mod auth;
pub mod error;
pub mod http;
pub mod session;
pub mod util;

use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use crate::{
        auth::stub::{valid_session, StubIdentity},
        session::{
            config::ConfigBuilder, manager::SessionManager, store::MemorySessionStore, Status,
        },
    };

    #[tokio::test(flavor = "multi_thread")]
    async fn offline_login_then_status() {
        let config = ConfigBuilder::new().build();
        let manager = SessionManager::new(
            &config,
            StubIdentity::default(),
            MemorySessionStore::new(valid_session("Miate")),
        );

        assert_eq!(manager.status().await, Status::Valid);

        // Offline tokens are never accepted by the identity service.
        let session = manager.login_offline("Miate");
        assert_eq!(manager.current(), session);
        assert_eq!(manager.status().await, Status::Invalid);
        assert_eq!(manager.status().await, Status::Invalid);
        assert_eq!(manager.identity().joins(), 2);
    }
}
