//! Track APIs: info, artwork, lyrics, recommendations, credits and streams.
//!
//! # Endpoints
//!
//! | Method                | Request                                                        |
//! |-----------------------|----------------------------------------------------------------|
//! | `track_info`          | `GET api /v1/tracks?ids={id}&market=from_token`                |
//! | `poster_url`          | pathfinder `getTrack`                                          |
//! | `lyrics`              | `GET spclient /color-lyrics/v2/track/{id}/image/{cover}`       |
//! | `recommended_tracks`  | pathfinder `internalLinkRecommenderTrack`                      |
//! | `track_credits`       | `GET spclient /track-credits-view/v0/experimental/{id}/credits` |
//! | `track_metadata`      | `GET spclient /metadata/4/track/{gid}`                         |
//! | `cdn_url`             | `GET connect /storage-resolve/v2/files/audio/interactive/10/{file}` |
//! | `pssh`                | `GET seektables /seektable/{file}.json` (no session headers)   |
//!
//! ## `lyrics` response
//!
//! ```json
//! {
//!   "lyrics": {
//!     "syncType": "LINE_SYNCED",
//!     "lines": [ { "startTimeMs": "1230", "words": "...", "syllables": [] } ]
//!   },
//!   "colors": { ... }
//! }
//! ```
//!
//! With [`LyricsFormat::Lrc`] every line becomes
//! `{ "timeTag": "00:00:01", "words": "...", "syllables": [] }`.

use serde_json::{Value, json};

use crate::auth::Overlay;
use crate::client::{SpotifyClient, diagnose, pick, pick_str};
use crate::error::{AccessError, Result, SpotifyError};
use crate::locator::{ResourceKind, resource_id, uri_to_gid};
use crate::operations;
use crate::types::{LyricLine, LyricsFormat, Streams};
use crate::util::time_tag;

/// Audio format picked by [`SpotifyClient::file_id`] when none is given.
pub const DEFAULT_AUDIO_FORMAT: &str = "MP4_128";

impl SpotifyClient {
    /// Full track object from the public REST API.
    pub fn track_info(&self, track: &str) -> Result<Value> {
        let id = resource_id(track)?;
        let context = "error retrieving track info, check track URL or response format";
        let resp = self.get_json(
            &format!("{}/v1/tracks", self.endpoints().api),
            &[("ids", id.to_owned()), ("market", "from_token".into())],
            &[],
            context,
        )?;
        pick(&resp, "tracks.0", context)
    }

    /// URL of the largest cover art of the track's album.
    pub fn poster_url(&self, track: &str) -> Result<String> {
        let id = resource_id(track)?;
        let context = "error retrieving poster URL, check track URL or response format";
        let resp = self.query(
            &operations::GET_TRACK,
            &json!({ "uri": ResourceKind::Track.uri(id) }),
            &[],
            context,
        )?;
        pick_str(&resp, "data.trackUnion.albumOfTrack.coverArt.sources.-1.url", context)
    }

    /// Synced lyrics of a track.
    ///
    /// Costs two requests: the color-lyrics service is keyed by the cover
    /// image as well as the track.
    pub fn lyrics(&self, track: &str, format: LyricsFormat) -> Result<Value> {
        let id = resource_id(track)?;
        let poster = self.poster_url(track)?;
        let poster_id = poster.rsplit('/').next().unwrap_or_default();
        let image = urlencoding::encode(&format!("https://i.scdn.co/image/{poster_id}")).into_owned();

        let context = "error retrieving lyrics, check track URL or response format";
        let mut resp = self.get_json(
            &format!(
                "{}/color-lyrics/v2/track/{id}/image/{image}",
                self.endpoints().spclient
            ),
            &[
                ("format", "json".into()),
                ("vocalRemoval", "false".into()),
                ("market", "from_token".into()),
            ],
            &[Overlay::WebPlayer],
            context,
        )?;

        if format == LyricsFormat::Lrc {
            let lines = lrc_lines(&pick(&resp, "lyrics.lines", context)?, context)?;
            resp["lyrics"]["lines"] = Value::Array(lines);
        }
        Ok(resp)
    }

    /// Tracks Spotify links from the track page.
    pub fn recommended_tracks(&self, track: &str) -> Result<Value> {
        let id = resource_id(track)?;
        let context = "error retrieving recommended tracks, check track URL or response format";
        let resp = self.query(
            &operations::RECOMMENDER_TRACK,
            &json!({ "uri": ResourceKind::Track.uri(id), "strategy": "ORGANIC_TRAFFIC" }),
            &[],
            context,
        )?;
        pick(&resp, "data.seoRecommended.items", context)
    }

    /// Performer, writer and producer credits.
    pub fn track_credits(&self, track: &str) -> Result<Value> {
        let id = resource_id(track)?;
        self.get_json(
            &format!(
                "{}/track-credits-view/v0/experimental/{id}/credits",
                self.endpoints().spclient
            ),
            &[],
            &[Overlay::WebPlayer],
            "error retrieving track credits, check track URL or response format",
        )
    }

    /// Internal metadata record, including the `file` list of audio files.
    pub fn track_metadata(&self, track: &str) -> Result<Value> {
        let gid = uri_to_gid(resource_id(track)?)?;
        self.get_json(
            &format!("{}/metadata/4/track/{gid}", self.endpoints().spclient),
            &[("market", "from_token".into())],
            &[Overlay::AcceptJson],
            "error retrieving track metadata, check track URL or response format",
        )
    }

    /// Id of the track's audio file in `format` (default [`DEFAULT_AUDIO_FORMAT`]).
    ///
    /// When several files share the format, the last one listed wins.
    pub fn file_id(&self, track: &str, format: Option<&str>) -> Result<String> {
        let format = format.unwrap_or(DEFAULT_AUDIO_FORMAT);
        let metadata = self.track_metadata(track)?;
        metadata["file"]
            .as_array()
            .into_iter()
            .flatten()
            .filter(|file| file["format"].as_str() == Some(format))
            .filter_map(|file| file["file_id"].as_str())
            .next_back()
            .map(String::from)
            .ok_or_else(|| SpotifyError::NotFound(format!("no {format} audio file for {track}")))
    }

    /// Signed CDN URL for an audio file.
    pub fn cdn_url(&self, file_id: &str) -> Result<String> {
        let context = "error retrieving CDN URL, check file id or response format";
        let resp = self.get_json(
            &format!(
                "{}/storage-resolve/v2/files/audio/interactive/10/{file_id}",
                self.endpoints().connect
            ),
            &[
                ("version", "10000000".into()),
                ("product", "9".into()),
                ("platform", "39".into()),
                ("alt", "json".into()),
            ],
            &[],
            context,
        )?;
        pick_str(&resp, "cdnurl.-1", context)
    }

    /// Widevine PSSH of an audio file.
    pub fn pssh(&self, file_id: &str) -> Result<String> {
        let context = "error retrieving PSSH, check file id or response format";
        let resp = self.get_plain(
            &format!("{}/seektable/{file_id}.json", self.endpoints().seektables),
            context,
        )?;
        pick_str(&resp, "pssh", context)
    }

    /// File id, PSSH and CDN URL of a track in one go.
    pub fn streams(&self, track: &str, format: Option<&str>) -> Result<Streams> {
        let file_id = self.file_id(track, format)?;
        let pssh = self.pssh(&file_id)?;
        let cdn_url = self.cdn_url(&file_id)?;
        Ok(Streams {
            pssh,
            file_id,
            cdn_url,
        })
    }
}

/// Rewrite every line of `lines` with an `HH:MM:SS` time tag.
fn lrc_lines(lines: &Value, context: &str) -> Result<Vec<Value>> {
    let lines = lines.as_array().ok_or_else(|| {
        diagnose(AccessError::new(context, "`lyrics.lines` is not an array").with_body(lines.to_string()))
    })?;
    lines
        .iter()
        .map(|line| parse_line(line, context).map(LyricLine::into_value))
        .collect()
}

fn parse_line(v: &Value, context: &str) -> Result<LyricLine> {
    let start_ms = v["startTimeMs"]
        .as_u64()
        .or_else(|| v["startTimeMs"].as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| {
            diagnose(
                AccessError::new(context, "lyrics line without a valid `startTimeMs`")
                    .with_body(v.to_string()),
            )
        })?;
    Ok(LyricLine {
        time_tag: time_tag(start_ms),
        words: v["words"].clone(),
        syllables: v["syllables"].clone(),
    })
}
