use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    session::{AccountType, Session},
    util::hash::name_uuid_from_bytes,
};

/// Token carried by offline sessions. The identity service never accepts it.
pub static OFFLINE_TOKEN: &str = "invalidtoken";

/// Derives the account id used for an offline session.
///
/// # Parameters
/// - `username`: The desired username.
///
/// # Returns
/// The version 3 UUID of `"offline:" + username`.
pub fn offline_uuid(username: &str) -> Uuid {
    name_uuid_from_bytes(format!("offline:{}", username).as_bytes())
}

/// Builds an offline session for `username`.
pub fn offline_session(username: &str) -> Session {
    Session {
        display_name: username.to_string(),
        account_id: offline_uuid(username),
        auth_token: OFFLINE_TOKEN.to_string(),
        account_type: AccountType::Legacy,
        properties: HashMap::new(),
    }
}
