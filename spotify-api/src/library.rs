//! Library APIs: liked songs, the library sidebar and saved-state checks.
//!
//! Every call is a pathfinder operation:
//!
//! | Method                   | Operation              | Returns                      |
//! |--------------------------|------------------------|------------------------------|
//! | `liked_songs`            | `fetchLibraryTracks`   | `data.me.library.tracks`     |
//! | `like_song`              | `addToLibrary`         | raw response                 |
//! | `unlike_song`            | `removeFromLibrary`    | raw response                 |
//! | `library`                | `libraryV2`            | raw response                 |
//! | `are_artists_in_library` | `areArtistsInLibrary`  | one [`LibraryStatus`] per input |
//! | `are_tracks_in_library`  | `areTracksInLibrary`   | one [`LibraryStatus`] per input |
//!
//! Saved-state response:
//!
//! ```json
//! { "data": { "tracks": [ { "__typename": "Track", "saved": true } ] } }
//! ```

use serde_json::{Value, json};

use crate::auth::Overlay;
use crate::client::{SpotifyClient, diagnose, pick};
use crate::error::{AccessError, Result};
use crate::locator::{ResourceKind, resource_id};
use crate::operations::{self, PersistedOperation};
use crate::types::LibraryStatus;

impl SpotifyClient {
    /// One page of the "Liked Songs" collection.
    pub fn liked_songs(&self, offset: u64, limit: u64) -> Result<Value> {
        let context = "error retrieving liked songs, check response format";
        let resp = self.query(
            &operations::FETCH_LIBRARY_TRACKS,
            &json!({ "offset": offset, "limit": limit }),
            &[Overlay::WebPlayer],
            context,
        )?;
        pick(&resp, "data.me.library.tracks", context)
    }

    pub fn like_song(&self, track: &str) -> Result<Value> {
        self.liked_songs_operation(
            track,
            &operations::ADD_TO_LIBRARY,
            "error adding track to liked songs, check track URL or response format",
        )
    }

    pub fn unlike_song(&self, track: &str) -> Result<Value> {
        self.liked_songs_operation(
            track,
            &operations::REMOVE_FROM_LIBRARY,
            "error removing track from liked songs, check track URL or response format",
        )
    }

    /// Library sidebar: playlists, albums, artists and folders, sorted by creator.
    pub fn library(&self, offset: u64, limit: u64) -> Result<Value> {
        self.query(
            &operations::LIBRARY_V2,
            &json!({
                "filters": [],
                "order": "Creator",
                "textFilter": "",
                "features": ["LIKED_SONGS", "YOUR_EPISODES"],
                "limit": limit,
                "offset": offset,
                "flatten": false,
                "expandedFolders": [],
                "folderUri": null,
                "includeFoldersWhenFlattening": true,
            }),
            &[Overlay::WebPlayer],
            "error retrieving library, check response format",
        )
    }

    /// Followed state of each artist, in input order.
    pub fn are_artists_in_library(&self, artists: &[&str]) -> Result<Vec<LibraryStatus>> {
        self.saved_state(
            artists,
            ResourceKind::Artist,
            &operations::ARE_ARTISTS_IN_LIBRARY,
            "error checking if artists are in library, check artist URLs or response format",
        )
    }

    /// Liked state of each track, in input order.
    pub fn are_tracks_in_library(&self, tracks: &[&str]) -> Result<Vec<LibraryStatus>> {
        self.saved_state(
            tracks,
            ResourceKind::Track,
            &operations::ARE_TRACKS_IN_LIBRARY,
            "error checking if tracks are in library, check track URLs or response format",
        )
    }

    fn liked_songs_operation(
        &self,
        track: &str,
        op: &PersistedOperation,
        context: &str,
    ) -> Result<Value> {
        let id = resource_id(track)?;
        self.mutate(
            op,
            json!({ "uris": [ResourceKind::Track.uri(id)] }),
            &[Overlay::WebPlayer],
            context,
        )
    }

    fn saved_state(
        &self,
        locators: &[&str],
        kind: ResourceKind,
        op: &PersistedOperation,
        context: &str,
    ) -> Result<Vec<LibraryStatus>> {
        let ids = locators
            .iter()
            .map(|locator| resource_id(locator))
            .collect::<Result<Vec<_>>>()?;
        let uris: Vec<String> = ids.iter().map(|id| kind.uri(id)).collect();
        let resp = self.query(op, &json!({ "uris": uris }), &[], context)?;
        let entries = pick(&resp, &format!("data.{}s", kind.as_str()), context)?;
        statuses(&entries, &ids, kind, context)
    }
}

/// Pair each saved flag with the id it was asked for.
fn statuses(
    entries: &Value,
    ids: &[&str],
    kind: ResourceKind,
    context: &str,
) -> Result<Vec<LibraryStatus>> {
    let typename = match kind {
        ResourceKind::Artist => "Artist",
        _ => "Track",
    };
    let shape_error = |cause: String| {
        diagnose(AccessError::new(context, cause).with_body(entries.to_string()))
    };
    let list = entries
        .as_array()
        .ok_or_else(|| shape_error("saved-state entries are not an array".into()))?;
    if list.len() != ids.len() {
        return Err(shape_error(format!(
            "expected {} saved-state entries, got {}",
            ids.len(),
            list.len()
        )));
    }
    list.iter()
        .zip(ids)
        .map(|(entry, id)| {
            let saved = entry["saved"].as_bool().ok_or_else(|| {
                diagnose(
                    AccessError::new(context, "entry without boolean `saved`")
                        .with_body(entry.to_string()),
                )
            })?;
            Ok(LibraryStatus {
                typename: typename.to_owned(),
                saved,
                id: (*id).to_owned(),
            })
        })
        .collect()
}
