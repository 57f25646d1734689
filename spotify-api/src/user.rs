//! User APIs: account, home feed, listening history and social graph.
//!
//! | Method             | Request                                                          |
//! |--------------------|------------------------------------------------------------------|
//! | `me`               | `GET api /v1/me`                                                 |
//! | `home`             | pathfinder `home`                                                |
//! | `recently_played`  | `GET spclient /recently-played/v3/user/{id}/recently-played`     |
//! | `user_profile`     | `GET spclient /user-profile-view/v3/profile/{id}`                |
//! | `top`              | `GET api /v1/me/top/{tracks,artists}?time_range=short_term`      |
//! | `connections`      | `GET spclient /user-profile-view/v3/profile/{id}/{following,followers}` |
//! | `public_playlists` | `GET spclient /user-profile-view/v3/profile/{id}/playlists`      |
//! | `account_info`     | `GET spclient /melody/v1/product_state`                          |
//!
//! Methods taking `Option<&str>` for the user address the authenticated
//! account when given `None`; its id is the last segment of `me().uri`
//! (`spotify:user:<id>`), which costs one extra request.

use serde_json::{Value, json};

use crate::auth::Overlay;
use crate::client::{SpotifyClient, pick, pick_str};
use crate::error::Result;
use crate::locator::resource_id;
use crate::operations;
use crate::types::{ConnectionKind, Home, TopKind};

impl SpotifyClient {
    /// Profile of the authenticated account.
    pub fn me(&self) -> Result<Value> {
        self.get_json(
            &format!("{}/v1/me", self.endpoints().api),
            &[],
            &[Overlay::WebPlayer],
            "error retrieving user details, check authentication or response status",
        )
    }

    /// Id of the authenticated account.
    pub fn current_user_id(&self) -> Result<String> {
        let me = self.me()?;
        let uri = pick_str(&me, "uri", "error retrieving user id, check response format")?;
        Ok(uri.rsplit(':').next().unwrap_or_default().to_owned())
    }

    /// Home feed for the configured time zone.
    pub fn home(&self) -> Result<Home> {
        let context = "error retrieving home page information, check response format";
        let resp = self.query(
            &operations::HOME,
            &json!({ "timeZone": self.time_zone() }),
            &[Overlay::WebPlayer],
            context,
        )?;
        Ok(Home {
            greeting: pick(&resp, "data.home.greeting", context)?,
            sections: pick(&resp, "data.home.sectionContainer.sections", context)?,
        })
    }

    /// Recently played tracks, episodes and contexts of the authenticated account.
    pub fn recently_played(&self, offset: u64, limit: u64) -> Result<Value> {
        let id = self.current_user_id()?;
        self.get_json(
            &format!(
                "{}/recently-played/v3/user/{id}/recently-played",
                self.endpoints().spclient
            ),
            &[
                ("format", "json".into()),
                ("filter", "default,collection-new-episodes".into()),
                ("market", "from_token".into()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ],
            &[Overlay::WebPlayer],
            "error retrieving recently played, check response format",
        )
    }

    /// Public profile with up to `limit` playlists, artists and episodes.
    pub fn user_profile(&self, user: Option<&str>, limit: u64) -> Result<Value> {
        let id = self.user_id(user)?;
        let limit = limit.to_string();
        self.get_json(
            &format!("{}/user-profile-view/v3/profile/{id}", self.endpoints().spclient),
            &[
                ("market", "from_token".into()),
                ("playlist_limit", limit.clone()),
                ("artist_limit", limit.clone()),
                ("episode_limit", limit),
            ],
            &[Overlay::WebPlayer],
            "error retrieving user profile details, check user URL or response format",
        )
    }

    /// Short-term top tracks or artists of the authenticated account.
    pub fn top(&self, kind: TopKind, offset: u64, limit: u64) -> Result<Value> {
        self.get_json(
            &format!("{}/v1/me/top/{}", self.endpoints().api, kind.as_str()),
            &[
                ("time_range", "short_term".into()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ],
            &[Overlay::WebPlayer],
            "error retrieving top tracks or artists, check response format",
        )
    }

    pub fn top_artists(&self, offset: u64, limit: u64) -> Result<Value> {
        self.top(TopKind::Artists, offset, limit)
    }

    pub fn top_tracks(&self, offset: u64, limit: u64) -> Result<Value> {
        self.top(TopKind::Tracks, offset, limit)
    }

    /// Accounts a user follows, or is followed by.
    pub fn connections(&self, user: Option<&str>, kind: ConnectionKind) -> Result<Value> {
        let id = self.user_id(user)?;
        self.get_json(
            &format!(
                "{}/user-profile-view/v3/profile/{id}/{}",
                self.endpoints().spclient,
                kind.as_str()
            ),
            &[("market", "from_token".into())],
            &[Overlay::WebPlayer],
            "error retrieving user connections, check user URL or response format",
        )
    }

    pub fn public_playlists(&self, user: Option<&str>, offset: u64, limit: u64) -> Result<Value> {
        let id = self.user_id(user)?;
        self.get_json(
            &format!(
                "{}/user-profile-view/v3/profile/{id}/playlists",
                self.endpoints().spclient
            ),
            &[
                ("market", "from_token".into()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ],
            &[Overlay::WebPlayer],
            "error retrieving public playlists, check user URL or response format",
        )
    }

    /// Subscription and product state of the authenticated account.
    pub fn account_info(&self) -> Result<Value> {
        self.get_json(
            &format!("{}/melody/v1/product_state", self.endpoints().spclient),
            &[("market", "from_token".into())],
            &[Overlay::WebPlayer],
            "error retrieving account info, check response format",
        )
    }

    fn user_id(&self, user: Option<&str>) -> Result<String> {
        match user {
            Some(locator) => Ok(resource_id(locator)?.to_owned()),
            None => self.current_user_id(),
        }
    }
}
