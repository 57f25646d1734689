//! Small formatting and lookup helpers shared by the accessors.

use serde_json::{Map, Value};

use crate::error::{Result, SpotifyError};

/// Parse an `mm:ss` position into seconds.
pub fn time_to_seconds(position: &str) -> Result<u64> {
    let invalid = || SpotifyError::InvalidArgument(format!("expected mm:ss, got {position:?}"));
    let (minutes, seconds) = position.split_once(':').ok_or_else(invalid)?;
    let minutes: u64 = minutes.trim().parse().map_err(|_| invalid())?;
    let seconds: u64 = seconds.trim().parse().map_err(|_| invalid())?;
    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(invalid)
}

/// Format a millisecond offset as `HH:MM:SS`, dropping the sub-second part.
pub fn time_tag(milliseconds: u64) -> String {
    let seconds = milliseconds / 1000;
    let (minutes, seconds) = (seconds / 60, seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Ids of the devices whose `device_type` equals `device_type`.
///
/// Matching ids are concatenated in map order; no match gives an empty
/// string.
pub fn find_device_id(devices: &Map<String, Value>, device_type: &str) -> String {
    devices
        .iter()
        .filter(|(_, info)| info["device_type"].as_str() == Some(device_type))
        .map(|(id, _)| id.as_str())
        .collect()
}
