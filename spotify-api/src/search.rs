//! Search API.
//!
//! Pathfinder operation: `searchDesktop`
//!
//! Variables:
//! - `searchTerm` — query text
//! - `offset` / `limit` — first page of 10
//! - `numberOfTopResults` — 5
//! - `includeAudiobooks` — `true`
//!
//! Response JSON:
//! ```json
//! {
//!   "data": {
//!     "searchV2": {
//!       "chipOrder": { "items": [ ... ] },
//!       "topResults": { "itemsV2": [ { "item": { "data": { "uri": "spotify:track:..." } } } ] },
//!       "albums": { ... },
//!       "artists": { ... },
//!       "playlists": { ... },
//!       ...
//!     }
//!   }
//! }
//! ```

use serde_json::{Map, Value, json};

use crate::client::{SpotifyClient, pick};
use crate::error::{Result, SpotifyError};
use crate::operations;
use crate::types::SearchFilter;

impl SpotifyClient {
    /// Search the catalogue.
    ///
    /// Without a filter, returns `topResults.itemsV2`. With one, returns
    /// `{ "<filter key>": <section> }`.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::NotFound`] — the response has no section for `filter`
    /// - [`SpotifyError::Access`] — network failure or unexpected response shape
    pub fn search(&self, query: &str, filter: Option<SearchFilter>) -> Result<Value> {
        let context = "error searching, check query or response format";
        let resp = self.query(
            &operations::SEARCH_DESKTOP,
            &json!({
                "searchTerm": query,
                "offset": 0,
                "limit": 10,
                "numberOfTopResults": 5,
                "includeAudiobooks": true,
            }),
            &[],
            context,
        )?;
        let search = pick(&resp, "data.searchV2", context)?;
        select(search, filter, context)
    }
}

fn select(mut search: Value, filter: Option<SearchFilter>, context: &str) -> Result<Value> {
    if let Some(map) = search.as_object_mut() {
        map.remove("chipOrder");
    }
    let Some(filter) = filter else {
        return pick(&search, "topResults.itemsV2", context);
    };
    let key = filter.key();
    let section = search
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| SpotifyError::NotFound(format!("search filter `{key}`")))?;
    let mut filtered = Map::new();
    filtered.insert(key.to_owned(), section);
    Ok(Value::Object(filtered))
}
