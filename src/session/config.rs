use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::yggdrasil::{AUTH_SERVER, SESSION_SERVER};

/// How long a checked status is trusted.
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(60);
/// Upper bound for a single validation or login.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration structure for the session manager and the identity client.
#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    pub status_ttl: Duration,
    /// `None` lets remote calls run without a bound.
    pub request_timeout: Option<Duration>,
    pub auth_server: String,
    pub session_server: String,
    /// Identifies this client to the authentication server.
    pub client_token: String,
    #[serde(skip)]
    pub client: Option<Client>,
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::new().build()
    }
}

#[derive(Serialize, Deserialize)]
pub struct ConfigBuilder {
    status_ttl: Duration,
    request_timeout: Option<Duration>,
    auth_server: String,
    session_server: String,
    client_token: String,
    #[serde(skip)]
    client: Option<Client>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> ConfigBuilder {
        ConfigBuilder {
            status_ttl: DEFAULT_STATUS_TTL,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            auth_server: AUTH_SERVER.to_string(),
            session_server: SESSION_SERVER.to_string(),
            client_token: Uuid::new_v4().simple().to_string(),
            client: None,
        }
    }

    pub fn status_ttl(mut self, status_ttl: Duration) -> Self {
        self.status_ttl = status_ttl;
        self
    }

    pub fn request_timeout(mut self, request_timeout: Option<Duration>) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn auth_server(mut self, auth_server: String) -> Self {
        self.auth_server = auth_server;
        self
    }

    pub fn session_server(mut self, session_server: String) -> Self {
        self.session_server = session_server;
        self
    }

    pub fn client_token(mut self, client_token: String) -> Self {
        self.client_token = client_token;
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Config {
        Config {
            status_ttl: self.status_ttl,
            request_timeout: self.request_timeout,
            auth_server: self.auth_server,
            session_server: self.session_server,
            client_token: self.client_token,
            client: self.client,
        }
    }
}
