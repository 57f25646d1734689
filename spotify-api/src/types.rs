//! Data types returned by, and option enums accepted by, the accessors.
//!
//! Most accessors hand back the relevant `serde_json::Value` sub-tree
//! untouched: the web player schemas are large, undocumented and change
//! without notice. The types here cover the few responses the client itself
//! interprets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SpotifyError};
use crate::util::find_device_id;

/// Connect-state view of the account's devices and player.
///
/// Returned by [`SpotifyClient::devices`](crate::SpotifyClient::devices).
///
/// API JSON fields: `devices` (id → `{ device_type, name, ... }`),
/// `active_device_id`, `player_state.{prev_tracks, next_tracks,
/// playback_speed, playback_quality, context_uri}`.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    /// Device id → device description, in response order.
    pub devices: Map<String, Value>,
    pub prev_tracks: Value,
    pub next_tracks: Value,
    pub playback_speed: Value,
    pub playback_quality: Value,
    /// Concatenated ids of `SMARTPHONE` devices (usually one, or empty).
    pub smartphone_device_id: String,
    /// Concatenated ids of `COMPUTER` devices (usually one, or empty).
    pub computer_device_id: String,
    /// First device listed, if any.
    pub primary_device_id: Option<String>,
    /// Device currently playing; empty when nothing is active.
    pub active_device_id: String,
    /// Id part of `player_state.context_uri`.
    pub currently_playing_id: Option<String>,
    /// Full response.
    pub raw: Value,
}

impl DeviceInfo {
    pub fn from_value(raw: Value) -> Self {
        let devices = raw["devices"].as_object().cloned().unwrap_or_default();
        let player = &raw["player_state"];
        Self {
            smartphone_device_id: find_device_id(&devices, "SMARTPHONE"),
            computer_device_id: find_device_id(&devices, "COMPUTER"),
            primary_device_id: devices.keys().next().cloned(),
            active_device_id: raw["active_device_id"].as_str().unwrap_or("").to_owned(),
            currently_playing_id: player["context_uri"]
                .as_str()
                .and_then(|uri| uri.rsplit(':').next())
                .map(String::from),
            prev_tracks: player["prev_tracks"].clone(),
            next_tracks: player["next_tracks"].clone(),
            playback_speed: player["playback_speed"].clone(),
            playback_quality: player["playback_quality"].clone(),
            devices,
            raw,
        }
    }

    /// Device player commands are sent to: the active one, else the primary.
    pub fn target_device_id(&self) -> Result<&str> {
        if !self.active_device_id.trim().is_empty() {
            return Ok(&self.active_device_id);
        }
        self.primary_device_id
            .as_deref()
            .ok_or_else(|| SpotifyError::NotFound("no connect device available".into()))
    }
}

/// Everything needed to fetch and decrypt an audio file.
///
/// Returned by [`SpotifyClient::streams`](crate::SpotifyClient::streams).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streams {
    /// Widevine PSSH box, base64.
    pub pssh: String,
    /// Hex audio file id.
    pub file_id: String,
    /// Signed CDN URL of the encrypted file.
    pub cdn_url: String,
}

/// Home feed.
///
/// API JSON path: `data.home.greeting` and `data.home.sectionContainer.sections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Home {
    pub greeting: Value,
    pub sections: Value,
}

/// Whether one artist or track is saved in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStatus {
    /// `"Artist"` or `"Track"`.
    #[serde(rename = "__typename")]
    pub typename: String,
    pub saved: bool,
    pub id: String,
}

/// One lyrics line with its start rendered as `HH:MM:SS`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricLine {
    #[serde(rename = "timeTag")]
    pub time_tag: String,
    pub words: Value,
    pub syllables: Value,
}

impl LyricLine {
    pub fn into_value(self) -> Value {
        serde_json::json!({
            "timeTag": self.time_tag,
            "words": self.words,
            "syllables": self.syllables,
        })
    }
}

/// Shape of the lyrics returned by [`SpotifyClient::lyrics`](crate::SpotifyClient::lyrics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LyricsFormat {
    /// Response as sent by the color-lyrics service.
    #[default]
    Raw,
    /// `lyrics.lines` rewritten to [`LyricLine`]s.
    Lrc,
}

/// Part of the artist overview to return.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArtistView {
    /// The whole `artistUnion`.
    #[default]
    Full,
    /// One top-level key of `artistUnion` (`discography`, `goods`, `profile`,
    /// `relatedContent`, `sharingInfo`, `stats`, `visuals`).
    Section(String),
    /// `artistUnion.discography.topTracks`.
    TopTracks,
}

/// Section of the search response to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    TopResults,
    Albums,
    Artists,
    Episodes,
    Genres,
    Playlists,
    Podcasts,
    Audiobooks,
    Users,
}

impl SearchFilter {
    /// Key under `data.searchV2`.
    pub fn key(self) -> &'static str {
        match self {
            Self::TopResults => "topResults",
            Self::Albums => "albums",
            Self::Artists => "artists",
            Self::Episodes => "episodes",
            Self::Genres => "genres",
            Self::Playlists => "playlists",
            Self::Podcasts => "podcasts",
            Self::Audiobooks => "audiobooks",
            Self::Users => "users",
        }
    }
}

/// Which "top items" list to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopKind {
    #[default]
    Tracks,
    Artists,
}

impl TopKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tracks => "tracks",
            Self::Artists => "artists",
        }
    }
}

/// Direction of the social graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionKind {
    #[default]
    Following,
    Followers,
}

impl ConnectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Following => "following",
            Self::Followers => "followers",
        }
    }
}

/// Where a track lands when added to a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaylistPosition {
    #[default]
    Top,
    Bottom,
}

impl PlaylistPosition {
    /// `moveType` value.
    pub fn move_type(self) -> &'static str {
        match self {
            Self::Top => "TOP_OF_PLAYLIST",
            Self::Bottom => "BOTTOM_OF_PLAYLIST",
        }
    }
}

/// Playback command for [`SpotifyClient::manage_player`](crate::SpotifyClient::manage_player).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Play,
    Pause,
}

impl PlayerAction {
    /// Connect-state command `endpoint`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
        }
    }
}
