//! Persisted GraphQL operations understood by the pathfinder endpoint.
//!
//! The pathfinder endpoint does not accept free-form queries: a request names
//! an operation and the SHA-256 hash of the query document the web player
//! ships with. Hashes change whenever Spotify redeploys the web player, so
//! they live here, away from the session logic.
//!
//! Each entry also lists the variable keys the operation requires. Requests
//! are checked against that list before anything is sent.

use serde_json::{Value, json};

use crate::error::{Result, SpotifyError};

/// A persisted operation: its name, query hash and required variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedOperation {
    pub name: &'static str,
    pub hash: &'static str,
    pub variables: &'static [&'static str],
}

impl PersistedOperation {
    /// The `extensions` object sent next to the variables.
    pub fn extensions(&self) -> Value {
        json!({
            "persistedQuery": {
                "version": 1,
                "sha256Hash": self.hash,
            }
        })
    }

    /// Check that `variables` is an object carrying every required key.
    pub fn check_variables(&self, variables: &Value) -> Result<()> {
        let Some(map) = variables.as_object() else {
            return Err(SpotifyError::InvalidArgument(format!(
                "{}: variables must be a JSON object",
                self.name
            )));
        };
        if let Some(missing) = self.variables.iter().find(|k| !map.contains_key(**k)) {
            return Err(SpotifyError::InvalidArgument(format!(
                "{}: missing variable `{missing}`",
                self.name
            )));
        }
        Ok(())
    }
}

pub const SEARCH_DESKTOP: PersistedOperation = PersistedOperation {
    name: "searchDesktop",
    hash: "130115162add6f3499d2f88ead8a37a7cad1d4d2314f3a206377035e7d26b74c",
    variables: &["searchTerm", "offset", "limit", "numberOfTopResults", "includeAudiobooks"],
};

pub const GET_TRACK: PersistedOperation = PersistedOperation {
    name: "getTrack",
    hash: "e101aead6d78faa11d75bec5e36385a07b2f1c4a0420932d374d89ee17c70dd6",
    variables: &["uri"],
};

pub const RECOMMENDER_TRACK: PersistedOperation = PersistedOperation {
    name: "internalLinkRecommenderTrack",
    hash: "97f52864d50ba62ab761a7bff47f1a9921d9e357316f7d60ad84ae3788eea4cf",
    variables: &["uri", "strategy"],
};

pub const ARTIST_OVERVIEW: PersistedOperation = PersistedOperation {
    name: "queryArtistOverview",
    hash: "35648a112beb1794e39ab931365f6ae4a8d45e65396d641eeda94e4003d41497",
    variables: &["uri", "locale", "includePrerelease"],
};

pub const ARTIST_DISCOGRAPHY_ALL: PersistedOperation = PersistedOperation {
    name: "queryArtistDiscographyAll",
    hash: "35a699e12a728c1a02f5bf67121a50f87341e65054e13126c03b7697fbd26692",
    variables: &["uri", "offset", "limit"],
};

pub const HOME: PersistedOperation = PersistedOperation {
    name: "home",
    hash: "3099d0901548aa93509318763519c57acd1a0bb533a9793ff57732fe8b91504a",
    variables: &["timeZone"],
};

pub const FETCH_LIBRARY_TRACKS: PersistedOperation = PersistedOperation {
    name: "fetchLibraryTracks",
    hash: "8474ec383b530ce3e54611fca2d8e3da57ef5612877838b8dbf00bd9fc692dfb",
    variables: &["offset", "limit"],
};

pub const FETCH_PLAYLIST: PersistedOperation = PersistedOperation {
    name: "fetchPlaylist",
    hash: "5534e86cc2181b9e70be86ae26d514abd8d828be2ee56e5f8b7882dd70204c62",
    variables: &["uri", "offset", "limit"],
};

pub const ADD_TO_LIBRARY: PersistedOperation = PersistedOperation {
    name: "addToLibrary",
    hash: "656c491c3f65d9d08d259be6632f4ef1931540ebcf766488ed17f76bb9156d15",
    variables: &["uris"],
};

pub const REMOVE_FROM_LIBRARY: PersistedOperation = PersistedOperation {
    name: "removeFromLibrary",
    hash: "1103bfd4b9d80275950bff95ef6d41a02cec3357e8f7ecd8974528043739677c",
    variables: &["uris"],
};

pub const MOVE_ITEMS_IN_PLAYLIST: PersistedOperation = PersistedOperation {
    name: "moveItemsInPlaylist",
    hash: "06f8c6722ac42c1669ba2cf19e44e9bc2caf303255a3ceeed758d4366c76742f",
    variables: &["playlistUri", "uids", "newPosition"],
};

pub const REMOVE_FROM_PLAYLIST: PersistedOperation = PersistedOperation {
    name: "removeFromPlaylist",
    hash: "c0202852f3743f013eb453bfa15637c9da2d52a437c528960f4d10a15f6dfb49",
    variables: &["playlistUri", "uids"],
};

pub const ADD_TO_PLAYLIST: PersistedOperation = PersistedOperation {
    name: "addToPlaylist",
    hash: "200b7618afd05364c4aafb95e2070249ed87ee3f08fc4d2f1d5d04fdf1a516d9",
    variables: &["uris", "playlistUri", "newPosition"],
};

pub const PIN_LIBRARY_ITEM: PersistedOperation = PersistedOperation {
    name: "pinLibraryItem",
    hash: "b90ca9015c5e9928a5a14d74fb5fd528255905c8aa607db449097332725caa8b",
    variables: &["uri"],
};

pub const UNPIN_LIBRARY_ITEM: PersistedOperation = PersistedOperation {
    name: "unpinLibraryItem",
    hash: "bb5cefe831e624d7d5daa76cf9c2d3bfebb2998a329ce595003cf59740ebd0d4",
    variables: &["uri"],
};

pub const LIBRARY_V2: PersistedOperation = PersistedOperation {
    name: "libraryV2",
    hash: "93662a816ebf38ab32f6028512e584c53c4b71d6aad920ce6039a4a62236574e",
    variables: &["filters", "order", "textFilter", "features", "limit", "offset"],
};

pub const ARE_ARTISTS_IN_LIBRARY: PersistedOperation = PersistedOperation {
    name: "areArtistsInLibrary",
    hash: "bb7f6d46598f5a2d0148a6418ff148d8613112af87a55c4cb6df33d69acc3038",
    variables: &["uris"],
};

pub const ARE_TRACKS_IN_LIBRARY: PersistedOperation = PersistedOperation {
    name: "areTracksInLibrary",
    hash: "2b51d510cac8d1262d8ed3d44af70e45a41b3c4d94c454483e779dcae6dc890e",
    variables: &["uris"],
};
