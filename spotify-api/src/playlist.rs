//! Playlist APIs.
//!
//! Reads use the pathfinder `fetchPlaylist` query; edits use pathfinder
//! mutations, except title/description which go through the playlist
//! changes endpoint:
//!
//! `POST spclient /playlist/v2/playlist/{id}/changes`
//!
//! ```json
//! {
//!   "deltas": [{
//!     "ops": [{ "kind": 6, "updateListAttributes": { "newAttributes": { "values": { "name": "...", "description": "..." } } } }],
//!     "info": { "source": { "client": 5 } }
//!   }]
//! }
//! ```
//!
//! Moves and removals address playlist rows by `uid`, not by track, so they
//! first fetch the playlist to resolve the uid. `fetchPlaylist` returns:
//!
//! ```json
//! {
//!   "data": {
//!     "playlistV2": {
//!       "name": "...",
//!       "content": {
//!         "totalCount": 2,
//!         "items": [ { "uid": "a1b2", "itemV2": { "data": { "uri": "spotify:track:..." } } } ]
//!       }
//!     }
//!   }
//! }
//! ```

use serde_json::{Value, json};

use crate::auth::Overlay;
use crate::client::{SpotifyClient, diagnose, pick};
use crate::error::{AccessError, Result, SpotifyError};
use crate::locator::{ResourceKind, resource_id};
use crate::operations::{self, PersistedOperation};
use crate::types::PlaylistPosition;

/// Rows fetched when resolving uids for moves and removals.
const UID_LOOKUP_LIMIT: u64 = 100;

impl SpotifyClient {
    /// Playlist with one page of its items.
    pub fn playlist_info(&self, playlist: &str, offset: u64, limit: u64) -> Result<Value> {
        let id = resource_id(playlist)?;
        let context = "error retrieving playlist information, check playlist URL or response format";
        let resp = self.query(
            &operations::FETCH_PLAYLIST,
            &json!({
                "uri": ResourceKind::Playlist.uri(id),
                "offset": offset,
                "limit": limit,
            }),
            &[Overlay::WebPlayer],
            context,
        )?;
        pick(&resp, "data.playlistV2", context)
    }

    pub fn add_track_to_playlist(
        &self,
        playlist: &str,
        track: &str,
        position: PlaylistPosition,
    ) -> Result<Value> {
        let playlist_id = resource_id(playlist)?;
        let track_id = resource_id(track)?;
        self.mutate(
            &operations::ADD_TO_PLAYLIST,
            json!({
                "uris": [ResourceKind::Track.uri(track_id)],
                "playlistUri": ResourceKind::Playlist.uri(playlist_id),
                "newPosition": { "moveType": position.move_type(), "fromUid": null },
            }),
            &[Overlay::WebPlayer],
            "error adding track to playlist, check track URL or response format",
        )
    }

    pub fn remove_track_from_playlist(&self, playlist: &str, track: &str) -> Result<Value> {
        let playlist_id = resource_id(playlist)?;
        let items = self.playlist_items(playlist)?;
        let uid = find_track_uid(&items, resource_id(track)?)?;
        self.mutate(
            &operations::REMOVE_FROM_PLAYLIST,
            json!({
                "playlistUri": ResourceKind::Playlist.uri(playlist_id),
                "uids": [uid],
            }),
            &[Overlay::WebPlayer],
            "error removing track from playlist, check playlist URL or response format",
        )
    }

    /// Move `track` in front of the row currently at `new_position` (0-based).
    pub fn move_track_in_playlist(
        &self,
        playlist: &str,
        track: &str,
        new_position: usize,
    ) -> Result<Value> {
        let items = self.playlist_items(playlist)?;
        let uid = find_track_uid(&items, resource_id(track)?)?;
        let before = uid_at(&items, new_position)?;
        self.move_uid(
            playlist,
            uid,
            before,
            "error moving track to new position, check track URL, playlist URL or response format",
        )
    }

    /// Move the row at `old_position` (1-based) in front of the row at
    /// `new_position` (0-based).
    pub fn reorder_playlist_items(
        &self,
        playlist: &str,
        old_position: usize,
        new_position: usize,
    ) -> Result<Value> {
        let old_index = old_position
            .checked_sub(1)
            .ok_or_else(|| SpotifyError::InvalidArgument("old_position is 1-based".into()))?;
        let items = self.playlist_items(playlist)?;
        let uid = uid_at(&items, old_index)?;
        let before = uid_at(&items, new_position)?;
        self.move_uid(
            playlist,
            uid,
            before,
            "error reordering track in playlist, check playlist URL or response format",
        )
    }

    /// Rename a playlist and replace its description (empty when `None`).
    pub fn edit_playlist_details(
        &self,
        playlist: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<Value> {
        let id = resource_id(playlist)?;
        let body = json!({
            "deltas": [{
                "ops": [{
                    "kind": 6,
                    "updateListAttributes": {
                        "newAttributes": {
                            "values": {
                                "name": title,
                                "description": description.unwrap_or(""),
                                "formatAttributes": [],
                                "pictureSize": [],
                            },
                            "noValue": [],
                        },
                    },
                }],
                "info": { "source": { "client": 5 } },
            }],
            "wantResultingRevisions": false,
            "wantSyncResult": false,
            "nonces": [],
        });
        self.post_json(
            &format!("{}/playlist/v2/playlist/{id}/changes", self.endpoints().spclient),
            &body,
            &[Overlay::WebPlayer],
            "error editing playlist details, check playlist URL or response format",
        )
    }

    pub fn pin_playlist(&self, playlist: &str) -> Result<Value> {
        self.pin_operation(
            playlist,
            &operations::PIN_LIBRARY_ITEM,
            "error pinning playlist, check playlist URL or response format",
        )
    }

    pub fn unpin_playlist(&self, playlist: &str) -> Result<Value> {
        self.pin_operation(
            playlist,
            &operations::UNPIN_LIBRARY_ITEM,
            "error unpinning playlist, check playlist URL or response format",
        )
    }

    fn pin_operation(&self, playlist: &str, op: &PersistedOperation, context: &str) -> Result<Value> {
        let id = resource_id(playlist)?;
        self.mutate(
            op,
            json!({ "uri": ResourceKind::Playlist.uri(id) }),
            &[Overlay::WebPlayer],
            context,
        )
    }

    fn playlist_items(&self, playlist: &str) -> Result<Vec<Value>> {
        let info = self.playlist_info(playlist, 0, UID_LOOKUP_LIMIT)?;
        let context = "error retrieving playlist items, check playlist URL or response format";
        playlist_rows(pick(&info, "content.items", context)?, context)
    }

    fn move_uid(&self, playlist: &str, uid: &str, before: &str, context: &str) -> Result<Value> {
        let id = resource_id(playlist)?;
        self.mutate(
            &operations::MOVE_ITEMS_IN_PLAYLIST,
            json!({
                "playlistUri": ResourceKind::Playlist.uri(id),
                "uids": [uid],
                "newPosition": { "moveType": "BEFORE_UID", "fromUid": before },
            }),
            &[Overlay::WebPlayer],
            context,
        )
    }
}

fn playlist_rows(items: Value, context: &str) -> Result<Vec<Value>> {
    match items {
        Value::Array(items) => Ok(items),
        other => Err(diagnose(
            AccessError::new(context, "`content.items` is not an array").with_body(other.to_string()),
        )),
    }
}

/// Uid of the first row holding `track_id`.
fn find_track_uid<'a>(items: &'a [Value], track_id: &str) -> Result<&'a str> {
    let suffix = format!("track:{track_id}");
    items
        .iter()
        .find(|item| {
            item["itemV2"]["data"]["uri"]
                .as_str()
                .is_some_and(|uri| uri.ends_with(&suffix))
        })
        .and_then(|item| item["uid"].as_str())
        .ok_or_else(|| SpotifyError::NotFound(format!("track {track_id} is not in the playlist")))
}

fn uid_at(items: &[Value], index: usize) -> Result<&str> {
    items
        .get(index)
        .and_then(|item| item["uid"].as_str())
        .ok_or_else(|| {
            SpotifyError::NotFound(format!(
                "no playlist row at position {index} (playlist has {} rows)",
                items.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Value> {
        vec![
            json!({ "uid": "u0", "itemV2": { "data": { "uri": "spotify:track:aaa" } } }),
            json!({ "uid": "u1", "itemV2": { "data": { "uri": "spotify:track:bbb" } } }),
            json!({ "uid": "u2", "itemV2": { "data": { "uri": "spotify:episode:ccc" } } }),
        ]
    }

    #[test]
    fn finds_uid_by_track() {
        let items = rows();
        assert_eq!(find_track_uid(&items, "bbb").unwrap(), "u1");
        assert!(matches!(
            find_track_uid(&items, "ccc"),
            Err(SpotifyError::NotFound(_))
        ));
    }

    #[test]
    fn non_array_items_is_access_error() {
        let err = playlist_rows(json!({ "items": null }), "ctx").unwrap_err();
        let SpotifyError::Access(access) = err else {
            panic!("expected access error");
        };
        assert!(access.cause.contains("content.items"));
        assert_eq!(playlist_rows(json!([{ "uid": "u0" }]), "ctx").unwrap().len(), 1);
    }

    #[test]
    fn uid_by_position() {
        let items = rows();
        assert_eq!(uid_at(&items, 2).unwrap(), "u2");
        assert!(uid_at(&items, 3).is_err());
    }
}
