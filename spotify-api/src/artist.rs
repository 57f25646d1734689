//! Artist APIs.
//!
//! All four go through the pathfinder endpoint:
//!
//! - `artist_info` — `queryArtistOverview`, returns `data.artistUnion` (or part of it)
//! - `artist_discography_all` — `queryArtistDiscographyAll`, returns `data.artistUnion.discography`
//! - `follow_artist` / `unfollow_artist` — `addToLibrary` / `removeFromLibrary` mutations
//!
//! Overview response, trimmed:
//!
//! ```json
//! {
//!   "data": {
//!     "artistUnion": {
//!       "profile": { "name": "..." },
//!       "stats": { "monthlyListeners": 123 },
//!       "discography": { "topTracks": { "items": [ ... ] }, ... },
//!       "relatedContent": { ... }
//!     }
//!   }
//! }
//! ```

use serde_json::{Value, json};

use crate::auth::Overlay;
use crate::client::{SpotifyClient, pick};
use crate::error::{Result, SpotifyError};
use crate::locator::{ResourceKind, resource_id};
use crate::operations::{self, PersistedOperation};
use crate::types::ArtistView;

impl SpotifyClient {
    /// Artist overview, or one part of it.
    ///
    /// An [`ArtistView::Section`] naming a key absent from the overview is
    /// reported as [`SpotifyError::NotFound`].
    pub fn artist_info(&self, artist: &str, view: &ArtistView) -> Result<Value> {
        let id = resource_id(artist)?;
        let context = "error retrieving artist information, check artist URL or response format";
        let resp = self.query(
            &operations::ARTIST_OVERVIEW,
            &json!({
                "uri": ResourceKind::Artist.uri(id),
                "locale": "",
                "includePrerelease": false,
            }),
            &[],
            context,
        )?;
        let union = pick(&resp, "data.artistUnion", context)?;

        match view {
            ArtistView::Full => Ok(union),
            ArtistView::TopTracks => pick(&union, "discography.topTracks", context),
            ArtistView::Section(key) => union
                .get(key.as_str())
                .cloned()
                .ok_or_else(|| SpotifyError::NotFound(format!("artist section `{key}`"))),
        }
    }

    /// Albums, singles and compilations of an artist, one page at a time.
    pub fn artist_discography_all(&self, artist: &str, offset: u64, limit: u64) -> Result<Value> {
        let id = resource_id(artist)?;
        let context = "error retrieving artist discography, check artist URL or response format";
        let resp = self.query(
            &operations::ARTIST_DISCOGRAPHY_ALL,
            &json!({
                "uri": ResourceKind::Artist.uri(id),
                "offset": offset,
                "limit": limit,
            }),
            &[Overlay::WebPlayer],
            context,
        )?;
        pick(&resp, "data.artistUnion.discography", context)
    }

    pub fn follow_artist(&self, artist: &str) -> Result<Value> {
        self.artist_operation(
            artist,
            &operations::ADD_TO_LIBRARY,
            "error following artist, check artist URL or response format",
        )
    }

    pub fn unfollow_artist(&self, artist: &str) -> Result<Value> {
        self.artist_operation(
            artist,
            &operations::REMOVE_FROM_LIBRARY,
            "error unfollowing artist, check artist URL or response format",
        )
    }

    fn artist_operation(&self, artist: &str, op: &PersistedOperation, context: &str) -> Result<Value> {
        let id = resource_id(artist)?;
        self.mutate(
            op,
            json!({ "uris": [ResourceKind::Artist.uri(id)] }),
            &[Overlay::WebPlayer],
            context,
        )
    }
}
