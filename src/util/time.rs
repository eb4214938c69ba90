use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the milliseconds elapsed since the unix epoch.
///
/// A clock set before the epoch reads as zero.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
