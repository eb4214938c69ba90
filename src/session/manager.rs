use std::{future::Future, sync::Arc, time::Duration};

use super::{
    cache::{CacheEntry, Lookup, StatusCache},
    config::Config,
    emitter::{Emit, Emitter, Event},
    store::{MemorySessionStore, SessionStore},
    Session, Status,
};
use crate::{
    auth::{self, offline::offline_session, yggdrasil::YggdrasilClient, Credentials, IdentityService},
    error::Error,
    util::time::now_millis,
};

/// Owns the active session and its cached validity.
///
/// Cloning is cheap and every clone shares the same state. Status checks and
/// online logins run on the tokio runtime, so the manager must be used from
/// within one.
pub struct SessionManager<I: IdentityService, S: SessionStore = MemorySessionStore> {
    inner: Arc<Inner<I, S>>,
}

struct Inner<I, S> {
    identity: I,
    store: S,
    cache: StatusCache,
    request_timeout: Option<Duration>,
    emitter: Option<Emitter>,
}

impl<I: IdentityService, S: SessionStore> Clone for SessionManager<I, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SessionManager<YggdrasilClient> {
    /// Creates a manager backed by the configured Yggdrasil servers and an
    /// in-memory store holding `session`.
    pub fn yggdrasil(config: &Config, session: Session) -> crate::Result<Self> {
        let identity = YggdrasilClient::new(config)?;
        Ok(Self::new(config, identity, MemorySessionStore::new(session)))
    }
}

impl<I: IdentityService, S: SessionStore> SessionManager<I, S> {
    pub fn new(config: &Config, identity: I, store: S) -> Self {
        Self::build(config, identity, store, None)
    }

    /// Like [`SessionManager::new`], notifying `emitter` of session changes and status checks.
    pub fn with_emitter(config: &Config, identity: I, store: S, emitter: Emitter) -> Self {
        Self::build(config, identity, store, Some(emitter))
    }

    fn build(config: &Config, identity: I, store: S, emitter: Option<Emitter>) -> Self {
        Self {
            inner: Arc::new(Inner {
                identity,
                store,
                cache: StatusCache::new(config.status_ttl),
                request_timeout: config.request_timeout,
                emitter,
            }),
        }
    }

    pub fn identity(&self) -> &I {
        &self.inner.identity
    }

    /// Returns the active session.
    pub fn current(&self) -> Session {
        self.inner.store.current()
    }

    /// Returns the cached status without checking it.
    pub fn cached(&self) -> CacheEntry {
        self.inner.cache.entry()
    }

    /// Makes `session` the active session.
    ///
    /// The cached status is reset to [`Status::Unknown`] once the store accepted
    /// the session. The store is written with the cache locked, so status calls
    /// wait for the write. If the store fails nothing changes.
    pub fn replace(&self, session: Session) -> crate::Result<()> {
        self.inner.replace(session)
    }

    /// Returns the status of the active session.
    ///
    /// A status checked within the TTL is returned as is. Otherwise the session is
    /// validated against the identity service on a background task. Concurrent calls
    /// past the TTL are not merged and each run their own check.
    ///
    /// A result is only cached if the session was not replaced while it was being
    /// checked; it is returned to the caller either way.
    pub async fn status(&self) -> Status {
        let generation = match self.inner.cache.lookup(now_millis()) {
            Lookup::Fresh(status) => {
                tracing::debug!(%status, "using cached session status");
                return status;
            }
            Lookup::Stale { generation } => generation,
        };

        let session = self.inner.store.current();
        let inner = Arc::clone(&self.inner);
        let check = tokio::spawn(async move {
            let status = match inner.request_timeout {
                Some(timeout) => {
                    tokio::time::timeout(timeout, auth::validate(&inner.identity, &session))
                        .await
                        .unwrap_or_else(|_| {
                            tracing::warn!(?timeout, "session validation timed out");
                            Status::Invalid
                        })
                }
                None => auth::validate(&inner.identity, &session).await,
            };

            if inner.cache.store(generation, status, now_millis()) {
                inner.emitter.as_ref().emit(Event::StatusChecked, status);
            } else {
                tracing::debug!(
                    username = %session.display_name,
                    %status,
                    "session replaced during validation, result not cached"
                );
            }

            status
        });

        match check.await {
            Ok(status) => status,
            Err(error) => {
                tracing::error!(%error, "session validation task failed");
                Status::Unknown
            }
        }
    }

    /// Logs in with the identity service and makes the new session active.
    ///
    /// # Parameters
    /// - `username`: Account username.
    /// - `password`: Account password.
    ///
    /// The login runs on a background task. Dropping the returned future does not
    /// cancel it: a login that succeeds afterwards still replaces the session.
    ///
    /// # Returns
    /// A result containing the new `Session`. On failure the active session and
    /// cached status are left untouched.
    pub async fn login_online(&self, username: &str, password: &str) -> crate::Result<Session> {
        let credentials = Credentials::new(username, password);
        let inner = Arc::clone(&self.inner);

        let result = tokio::spawn(async move {
            let session = with_timeout(
                inner.request_timeout,
                auth::authenticate(&inner.identity, &credentials),
            )
            .await?;
            inner.replace(session.clone())?;
            Ok::<_, Error>(session)
        })
        .await
        .map_err(Error::from)
        .and_then(|result| result);

        match result {
            Ok(session) => {
                tracing::info!(
                    username = %session.display_name,
                    account_id = %session.account_id,
                    "session login successful"
                );
                Ok(session)
            }
            Err(error) => {
                tracing::error!(username, %error, "session login failed");
                Err(error)
            }
        }
    }

    /// Makes an offline session for `username` active.
    ///
    /// The account id is derived from the username, so the same name always maps
    /// to the same id. Never fails: if the store rejects the session, the previous
    /// session is returned.
    pub fn login_offline(&self, username: &str) -> Session {
        let session = offline_session(username);

        match self.inner.replace(session.clone()) {
            Ok(()) => {
                tracing::info!(
                    username,
                    account_id = %session.account_id,
                    "session login (offline) successful"
                );
                session
            }
            Err(error) => {
                tracing::error!(username, %error, "session login (offline) failed");
                self.current()
            }
        }
    }
}

impl<I, S: SessionStore> Inner<I, S> {
    fn replace(&self, session: Session) -> crate::Result<()> {
        let announcement = (session.display_name.clone(), session.account_id.to_string());

        self.cache.reset_with(|| self.store.replace(session))?;
        self.emitter
            .as_ref()
            .emit(Event::SessionChanged, announcement);

        Ok(())
    }
}

async fn with_timeout<T>(
    timeout: Option<Duration>,
    future: impl Future<Output = crate::Result<T>>,
) -> crate::Result<T> {
    match timeout {
        Some(timeout) => tokio::time::timeout(timeout, future)
            .await
            .map_err(|_| Error::Timeout(timeout))?,
        None => future.await,
    }
}
