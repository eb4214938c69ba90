use std::collections::HashMap;

use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Authentication, Credentials, GameProfile, IdentityService};
use crate::{
    error::Error,
    http::fetch::{fetch_with_options, send_with_options, FetchOptions},
    session::config::Config,
};

/// The default authentication server.
pub static AUTH_SERVER: &str = "https://authserver.mojang.com";
/// The default session server.
pub static SESSION_SERVER: &str = "https://sessionserver.mojang.com";

/// Represents the response of the authentication server after a login.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
struct AuthenticateResponse {
    access_token: String,
    client_token: String,
    selected_profile: Option<SelectedProfile>,
    user: Option<User>,
}

/// Represents the profile selected for the logged in account.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct SelectedProfile {
    id: Uuid,
    name: String,
    #[serde(default)]
    legacy: bool,
}

/// Represents the account that owns the selected profile.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct User {
    #[serde(default)]
    properties: Vec<Property>,
}

/// Represents a single user property.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct Property {
    name: String,
    value: String,
}

/// Client for the Yggdrasil authentication and session servers.
#[derive(Clone)]
pub struct YggdrasilClient {
    client: Client,
    auth_server: String,
    session_server: String,
    client_token: String,
}

impl YggdrasilClient {
    /// Creates a client from the given configuration.
    ///
    /// Uses the configured HTTP client if there is one, otherwise builds one
    /// bounded by the configured request timeout.
    ///
    /// # Parameters
    /// - `config`: Server URLs, client token and HTTP settings.
    ///
    /// # Returns
    /// A result containing the `YggdrasilClient`.
    pub fn new(config: &Config) -> crate::Result<Self> {
        let client = match &config.client {
            Some(client) => client.clone(),
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = config.request_timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(Self {
            client,
            auth_server: config.auth_server.trim_end_matches('/').to_string(),
            session_server: config.session_server.trim_end_matches('/').to_string(),
            client_token: config.client_token.clone(),
        })
    }
}

impl IdentityService for YggdrasilClient {
    async fn join_server(
        &self,
        profile: &GameProfile,
        access_token: &str,
        server_id: &str,
    ) -> crate::Result<()> {
        let body = serde_json::json!({
            "accessToken": access_token,
            "selectedProfile": profile.id.simple().to_string(),
            "serverId": server_id,
        });

        send_with_options(
            &format!("{}/session/minecraft/join", self.session_server),
            Some(FetchOptions {
                method: Method::POST,
                query_params: HashMap::default(),
                body: Some(body),
            }),
            &self.client,
        )
        .await?;

        Ok(())
    }

    async fn has_joined_server(
        &self,
        profile: &GameProfile,
        server_id: &str,
    ) -> crate::Result<Option<GameProfile>> {
        let query_params = HashMap::from([
            ("username".to_string(), profile.name.clone()),
            ("serverId".to_string(), server_id.to_string()),
        ]);

        let response = send_with_options(
            &format!("{}/session/minecraft/hasJoined", self.session_server),
            Some(FetchOptions {
                method: Method::GET,
                query_params,
                body: None,
            }),
            &self.client,
        )
        .await?;

        // An empty body (204) means the join was not seen.
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&body)?))
    }

    async fn log_in(&self, credentials: &Credentials) -> crate::Result<Authentication> {
        let body = serde_json::json!({
            "agent": {
                "name": "Minecraft",
                "version": 1
            },
            "username": credentials.username,
            "password": credentials.password,
            "clientToken": self.client_token,
            "requestUser": true
        });

        let response: AuthenticateResponse = fetch_with_options(
            &format!("{}/authenticate", self.auth_server),
            Some(FetchOptions {
                method: Method::POST,
                query_params: HashMap::default(),
                body: Some(body),
            }),
            &self.client,
        )
        .await?;

        let profile = response.selected_profile.ok_or(Error::Authentication(
            "No profile selected for this account.".to_string(),
        ))?;

        let mut properties: HashMap<String, Vec<String>> = HashMap::new();
        for property in response.user.map(|user| user.properties).unwrap_or_default() {
            properties
                .entry(property.name)
                .or_default()
                .push(property.value);
        }

        Ok(Authentication {
            access_token: response.access_token,
            client_token: response.client_token,
            profile: GameProfile {
                id: profile.id,
                name: profile.name,
            },
            legacy: profile.legacy,
            properties,
        })
    }

    async fn log_out(&self, authentication: &Authentication) -> crate::Result<()> {
        // Invalidating the access token server side would revoke the token the
        // new session carries.
        tracing::debug!(
            username = %authentication.profile.name,
            "no server-side login state held, nothing to log out"
        );
        Ok(())
    }
}
