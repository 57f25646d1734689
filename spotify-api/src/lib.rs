//! Spotify web player API client library.
//!
//! Authenticates like the browser web player, from nothing but the `sp_dc`
//! session cookie, and exposes the player's private endpoints: catalogue
//! lookups, lyrics, audio streams, playlists, library, connect player and
//! social graph.
//!
//! # Authentication
//!
//! Building a client bootstraps a session (see [`auth`]): the cookie is
//! exchanged for an access token, the access token's client id for a client
//! token, and both are attached to every later request. A client only exists
//! once both steps succeed.
//!
//! ```no_run
//! use spotify_api::SpotifyClient;
//!
//! let client = SpotifyClient::new("AQB...sp_dc value...").unwrap();
//! let track = client
//!     .track_info("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC")
//!     .unwrap();
//! println!("{}", track["name"]);
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                     | Request                                     | Description            |
//! |--------------------------------------------|---------------------------------------------|------------------------|
//! | [`SpotifyClient::search`]                  | pathfinder `searchDesktop`                  | Search the catalogue   |
//! | [`SpotifyClient::track_info`]              | `GET api /v1/tracks`                        | Track metadata         |
//! | [`SpotifyClient::lyrics`]                  | `GET spclient /color-lyrics/v2/track/..`    | Synced lyrics          |
//! | [`SpotifyClient::streams`]                 | metadata, seektables, storage-resolve       | File id, PSSH, CDN URL |
//! | [`SpotifyClient::artist_info`]             | pathfinder `queryArtistOverview`            | Artist overview        |
//! | [`SpotifyClient::playlist_info`]           | pathfinder `fetchPlaylist`                  | Playlist with items    |
//! | [`SpotifyClient::edit_playlist_details`]   | `POST spclient /playlist/v2/playlist/../changes` | Rename playlist   |
//! | [`SpotifyClient::liked_songs`]             | pathfinder `fetchLibraryTracks`             | Liked songs            |
//! | [`SpotifyClient::library`]                 | pathfinder `libraryV2`                      | Library sidebar        |
//! | [`SpotifyClient::home`]                    | pathfinder `home`                           | Home feed              |
//! | [`SpotifyClient::user_profile`]            | `GET spclient /user-profile-view/v3/..`     | Public profile         |
//! | [`SpotifyClient::devices`]                 | `PUT connect /connect-state/v1/devices/..`  | Connect devices        |
//! | [`SpotifyClient::seek`]                    | `POST connect /connect-state/v1/player/..`  | Player commands        |
//!
//! The per-module docs list every method.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (request lines at `debug`, the
//! bootstrap outcome at `info`, failures at `error`) and never installs a
//! subscriber.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod fingerprint;
pub mod locator;
pub mod operations;
pub mod types;
pub mod util;

mod artist;
mod library;
mod player;
mod playlist;
mod search;
mod track;
mod user;

pub use auth::{AccessToken, AuthenticatedSession, ClientToken, Credential, Overlay};
pub use client::{SpotifyClient, SpotifyClientBuilder};
pub use endpoints::Endpoints;
pub use error::{AccessError, Result, SpotifyError};
pub use track::DEFAULT_AUDIO_FORMAT;
pub use types::{
    ArtistView, ConnectionKind, DeviceInfo, Home, LibraryStatus, LyricLine, LyricsFormat,
    PlayerAction, PlaylistPosition, SearchFilter, Streams, TopKind,
};
