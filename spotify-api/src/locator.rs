//! Locators (`https://open.spotify.com/track/...`) and identifier helpers.
//!
//! Spotify identifies resources three ways:
//!
//! - a 22 character base62 **id** inside URLs and URIs (`4uLU6hMCjMI75M1A2tKUQC`),
//! - a **URI** (`spotify:track:4uLU6hMCjMI75M1A2tKUQC`) used by GraphQL variables,
//! - a 32 character hex **GID** (`93bc414a606747b2b612491ef83d5a3e`) used by
//!   the metadata service.

use std::sync::LazyLock;

use num_bigint::BigUint;
use regex::Regex;

use crate::error::{Result, SpotifyError};

/// Base62 alphabet used by Spotify ids (digits, then lower, then upper case).
const BASE62: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ID_LEN: usize = 22;
const GID_LEN: usize = 32;

/// Kind of resource a locator can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Track,
    Artist,
    Playlist,
    Album,
    User,
}

impl ResourceKind {
    /// Order in which locator patterns are tried.
    pub const ALL: [Self; 5] = [Self::Track, Self::Artist, Self::Playlist, Self::Album, Self::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Artist => "artist",
            Self::Playlist => "playlist",
            Self::Album => "album",
            Self::User => "user",
        }
    }

    /// Build the `spotify:<kind>:<id>` URI.
    pub fn uri(self, id: &str) -> String {
        format!("spotify:{}:{id}", self.as_str())
    }
}

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ResourceKind::ALL
        .iter()
        .map(|kind| Regex::new(&format!(r"/{}/([^/?]+)", kind.as_str())).expect("static pattern"))
        .collect()
});

/// Extract the resource id from a locator.
///
/// Patterns are tried in [`ResourceKind::ALL`] order and the first match
/// wins. A locator that matches none is returned unchanged, so bare ids
/// pass through.
pub fn extract_id(locator: &str) -> &str {
    PATTERNS
        .iter()
        .find_map(|re| re.captures(locator))
        .and_then(|caps| caps.get(1))
        .map_or(locator, |m| m.as_str())
}

/// Validate that `locator` is a `spotify.com` URL and extract its id.
///
/// Runs before any request is built, so a foreign URL never reaches the
/// network.
pub fn resource_id(locator: &str) -> Result<&str> {
    if !locator.contains("spotify.com") {
        return Err(SpotifyError::InvalidLocator(locator.to_owned()));
    }
    Ok(extract_id(locator))
}

/// Convert a base62 id to its 32 character hex GID.
pub fn uri_to_gid(id: &str) -> Result<String> {
    let digits = id
        .bytes()
        .map(|b| {
            BASE62
                .iter()
                .position(|&c| c == b)
                .and_then(|d| u8::try_from(d).ok())
                .ok_or_else(|| SpotifyError::InvalidArgument(format!("not a base62 id: {id}")))
        })
        .collect::<Result<Vec<u8>>>()?;
    let n = BigUint::from_radix_be(&digits, 62)
        .ok_or_else(|| SpotifyError::InvalidArgument(format!("not a base62 id: {id}")))?;
    Ok(format!("{:0>width$}", n.to_str_radix(16), width = GID_LEN))
}

/// Convert a hex GID back to its 22 character base62 id.
pub fn gid_to_uri(gid: &str) -> Result<String> {
    let n = BigUint::parse_bytes(gid.as_bytes(), 16)
        .ok_or_else(|| SpotifyError::InvalidArgument(format!("not a hex gid: {gid}")))?;
    let encoded: String = n
        .to_radix_be(62)
        .into_iter()
        .map(|d| char::from(BASE62[usize::from(d)]))
        .collect();
    Ok(format!("{encoded:0>width$}", width = ID_LEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_locator_with_query() {
        assert_eq!(
            resource_id("https://open.spotify.com/track/abc123?si=xyz").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn playlist_locator() {
        assert_eq!(
            resource_id("https://open.spotify.com/playlist/def456").unwrap(),
            "def456"
        );
    }

    #[test]
    fn other_kinds() {
        assert_eq!(extract_id("https://open.spotify.com/artist/ar1"), "ar1");
        assert_eq!(extract_id("https://open.spotify.com/album/al1/"), "al1");
        assert_eq!(extract_id("https://open.spotify.com/user/someone?si=1"), "someone");
    }

    #[test]
    fn track_pattern_wins_over_playlist() {
        let locator = "https://open.spotify.com/playlist/pl1/track/tr1";
        assert_eq!(extract_id(locator), "tr1");
    }

    #[test]
    fn unmatched_locator_is_returned_unchanged() {
        assert_eq!(extract_id("4uLU6hMCjMI75M1A2tKUQC"), "4uLU6hMCjMI75M1A2tKUQC");
    }

    #[test]
    fn foreign_locator_is_rejected() {
        let err = resource_id("https://example.com/track/abc123").unwrap_err();
        assert!(matches!(err, SpotifyError::InvalidLocator(_)));
    }

    #[test]
    fn extraction_is_idempotent() {
        let locator = "https://open.spotify.com/track/abc123?si=xyz";
        assert_eq!(extract_id(locator), extract_id(locator));
    }

    #[test]
    fn gid_conversion_matches_known_pair() {
        assert_eq!(
            uri_to_gid("4uLU6hMCjMI75M1A2tKUQC").unwrap(),
            "93bc414a606747b2b612491ef83d5a3e"
        );
        assert_eq!(
            gid_to_uri("93bc414a606747b2b612491ef83d5a3e").unwrap(),
            "4uLU6hMCjMI75M1A2tKUQC"
        );
    }

    #[test]
    fn gid_is_zero_padded() {
        assert_eq!(
            uri_to_gid("0000000000000000000001").unwrap(),
            "00000000000000000000000000000001"
        );
        assert_eq!(gid_to_uri("1").unwrap(), "0000000000000000000001");
    }

    #[test]
    fn invalid_ids_are_rejected() {
        assert!(uri_to_gid("not-base62!").is_err());
        assert!(gid_to_uri("xyz").is_err());
    }

    #[test]
    fn uri_builder() {
        assert_eq!(ResourceKind::Artist.uri("ar1"), "spotify:artist:ar1");
    }
}
