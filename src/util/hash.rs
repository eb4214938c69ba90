use md5::{Digest, Md5};
use uuid::{Builder, Uuid};

/// Derives a name-based (version 3) UUID from raw bytes.
///
/// The bytes are hashed as-is, with no namespace prepended, which matches the
/// ids game servers compute for offline players.
///
/// # Parameters
/// - `name`: The bytes to derive the UUID from.
///
/// # Returns
/// The version 3 UUID for the given bytes.
pub fn name_uuid_from_bytes(name: &[u8]) -> Uuid {
    let mut hasher = Md5::new();
    hasher.update(name);
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    Builder::from_md5_bytes(bytes).into_uuid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_offline_player_id() {
        let uuid = name_uuid_from_bytes(b"OfflinePlayer:Notch");
        assert_eq!(uuid.to_string(), "b50ad385-829d-3141-a216-7e7d7539ba7f");
        assert_eq!(uuid.get_version_num(), 3);
    }
}
