use std::{collections::HashMap, fmt, future::Future};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{AccountType, Session, Status};

pub mod offline;
pub mod yggdrasil;

#[cfg(test)]
pub(crate) mod stub;

/// A player's identity as the identity service knows it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameProfile {
    pub id: Uuid,
    pub name: String,
}

/// Username and password for a single login. Never stored.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Represents a successful login against the identity service.
#[derive(Debug, Clone)]
pub struct Authentication {
    pub access_token: String,
    pub client_token: String,
    pub profile: GameProfile,
    /// Whether the profile is a legacy (pre-Mojang) account.
    pub legacy: bool,
    pub properties: HashMap<String, Vec<String>>,
}

impl From<Authentication> for Session {
    fn from(value: Authentication) -> Self {
        Session {
            display_name: value.profile.name,
            account_id: value.profile.id,
            auth_token: value.access_token,
            account_type: if value.legacy {
                AccountType::Legacy
            } else {
                AccountType::Mojang
            },
            properties: value.properties,
        }
    }
}

/// The remote operations needed from an identity service.
///
/// Implemented over HTTP by [`yggdrasil::YggdrasilClient`]. Methods return
/// `Send` futures so checks can run on background tasks.
pub trait IdentityService: Send + Sync + 'static {
    /// Proves possession of `access_token` by joining the server identified by `server_id`.
    fn join_server(
        &self,
        profile: &GameProfile,
        access_token: &str,
        server_id: &str,
    ) -> impl Future<Output = crate::Result<()>> + Send;

    /// Asks whether `profile` has joined `server_id`.
    ///
    /// Returns `Some` with the profile reported by the service if the join is complete.
    fn has_joined_server(
        &self,
        profile: &GameProfile,
        server_id: &str,
    ) -> impl Future<Output = crate::Result<Option<GameProfile>>> + Send;

    /// Exchanges credentials for a token and profile.
    fn log_in(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = crate::Result<Authentication>> + Send;

    /// Ends the login state held for `authentication`.
    fn log_out(
        &self,
        authentication: &Authentication,
    ) -> impl Future<Output = crate::Result<()>> + Send;
}

/// Checks whether the token of `session` is accepted by the identity service.
///
/// Joins a server under a fresh random id and asks whether the join completed.
/// Errors are logged and reported as [`Status::Invalid`], never returned.
///
/// # Parameters
/// - `service`: The identity service to check against.
/// - `session`: The session whose token is checked.
///
/// # Returns
/// [`Status::Valid`] or [`Status::Invalid`].
pub async fn validate<S: IdentityService>(service: &S, session: &Session) -> Status {
    let profile = session.profile();
    let server_id = Uuid::new_v4().to_string();

    match check_join(service, &profile, &session.auth_token, &server_id).await {
        Ok(true) => {
            tracing::info!(username = %profile.name, "session validated");
            Status::Valid
        }
        Ok(false) => {
            tracing::info!(username = %profile.name, "session invalidated");
            Status::Invalid
        }
        Err(error) => {
            tracing::warn!(username = %profile.name, %error, "unable to validate the session");
            Status::Invalid
        }
    }
}

async fn check_join<S: IdentityService>(
    service: &S,
    profile: &GameProfile,
    access_token: &str,
    server_id: &str,
) -> crate::Result<bool> {
    service.join_server(profile, access_token, server_id).await?;
    let joined = service.has_joined_server(profile, server_id).await?;
    Ok(joined.is_some())
}

/// Logs in with `credentials` and builds the resulting session.
///
/// The service login state is ended right after the token is retrieved. A failure
/// to do so is logged; the login itself still succeeds.
///
/// # Parameters
/// - `service`: The identity service to log in with.
/// - `credentials`: Username and password.
///
/// # Returns
/// A result containing the new `Session`, or the error reported by the service.
pub async fn authenticate<S: IdentityService>(
    service: &S,
    credentials: &Credentials,
) -> crate::Result<Session> {
    tracing::info!(username = %credentials.username, "logging into a new session");

    let authentication = service.log_in(credentials).await?;

    if let Err(error) = service.log_out(&authentication).await {
        tracing::warn!(%error, "unable to log out after login");
    }

    Ok(Session::from(authentication))
}
