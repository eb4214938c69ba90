use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::GameProfile;

pub mod cache;
pub mod config;
pub mod emitter;
pub mod manager;
pub mod store;

/// Represents the kind of account a session belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Legacy,
    Mojang,
    Microsoft,
}

/// The credential bundle of a logged in identity.
///
/// Sessions are replaced as a whole, never patched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub display_name: String,
    pub account_id: Uuid,
    pub auth_token: String,
    pub account_type: AccountType,
    pub properties: HashMap<String, Vec<String>>,
}

impl Session {
    /// Returns the profile the identity service knows this session by.
    pub fn profile(&self) -> GameProfile {
        GameProfile {
            id: self.account_id,
            name: self.display_name.clone(),
        }
    }
}

/// Last known validity of the current session's token.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Unknown => write!(f, "unknown"),
            Status::Valid => write!(f, "valid"),
            Status::Invalid => write!(f, "invalid"),
        }
    }
}
