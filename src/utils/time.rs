//! Wall-clock helpers for the frame timestamp field.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current UNIX time in seconds, as carried in the frame header.
///
/// A clock before the epoch maps to 0 rather than failing; the device
/// does not validate the timestamp.
pub fn unix_now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as u32)
}
