use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use uuid::Uuid;

use super::{Authentication, Credentials, GameProfile, IdentityService};
use crate::{
    error::Error,
    session::{AccountType, Session},
    util::hash::name_uuid_from_bytes,
};

pub(crate) const VALID_TOKEN: &str = "valid-token";
pub(crate) const PASSWORD: &str = "hunter2";

/// Identity service double that accepts [`VALID_TOKEN`] and [`PASSWORD`].
#[derive(Default)]
pub(crate) struct StubIdentity {
    pub joins: AtomicUsize,
    pub logins: AtomicUsize,
    pub logouts: AtomicUsize,
    /// Every call fails as if the service was unreachable.
    pub unreachable: bool,
    /// Joins succeed but are never reported as complete.
    pub incomplete_joins: bool,
    pub failing_logout: bool,
    pub delay: Option<Duration>,
}

impl StubIdentity {
    pub fn joins(&self) -> usize {
        self.joins.load(Ordering::SeqCst)
    }

    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn logouts(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }

    async fn call(&self) -> crate::Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unreachable {
            return Err(Error::Status(503));
        }
        Ok(())
    }
}

pub(crate) fn profile_id(username: &str) -> Uuid {
    name_uuid_from_bytes(username.as_bytes())
}

/// A session holding a token the stub accepts.
pub(crate) fn valid_session(username: &str) -> Session {
    Session {
        display_name: username.to_string(),
        account_id: profile_id(username),
        auth_token: VALID_TOKEN.to_string(),
        account_type: AccountType::Mojang,
        properties: HashMap::new(),
    }
}

impl IdentityService for StubIdentity {
    async fn join_server(
        &self,
        _profile: &GameProfile,
        access_token: &str,
        _server_id: &str,
    ) -> crate::Result<()> {
        self.joins.fetch_add(1, Ordering::SeqCst);
        self.call().await?;
        if access_token != VALID_TOKEN {
            return Err(Error::Authentication("Invalid token.".to_string()));
        }
        Ok(())
    }

    async fn has_joined_server(
        &self,
        profile: &GameProfile,
        _server_id: &str,
    ) -> crate::Result<Option<GameProfile>> {
        self.call().await?;
        Ok((!self.incomplete_joins).then(|| profile.clone()))
    }

    async fn log_in(&self, credentials: &Credentials) -> crate::Result<Authentication> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        self.call().await?;
        if credentials.password != PASSWORD {
            return Err(Error::Authentication(
                "Invalid credentials. Invalid username or password.".to_string(),
            ));
        }
        Ok(Authentication {
            access_token: VALID_TOKEN.to_string(),
            client_token: "client".to_string(),
            profile: GameProfile {
                id: profile_id(&credentials.username),
                name: credentials.username.clone(),
            },
            legacy: false,
            properties: HashMap::from([(
                "preferredLanguage".to_string(),
                vec!["en".to_string()],
            )]),
        })
    }

    async fn log_out(&self, _authentication: &Authentication) -> crate::Result<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        if self.failing_logout {
            return Err(Error::Status(500));
        }
        Ok(())
    }
}
