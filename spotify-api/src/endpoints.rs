//! Base URLs of the services the client talks to.
//!
//! | Field          | Default                                 | Used for                          |
//! |----------------|-----------------------------------------|-----------------------------------|
//! | `open`         | `https://open.spotify.com`              | access token (identity endpoint)  |
//! | `client_token` | `https://clienttoken.spotify.com`       | client token                      |
//! | `api`          | `https://api.spotify.com`               | REST `/v1/...` resources          |
//! | `partner`      | `https://api-partner.spotify.com`       | persisted GraphQL operations      |
//! | `spclient`     | `https://spclient.wg.spotify.com`       | lyrics, profiles, metadata, ...   |
//! | `connect`      | `https://gae2-spclient.spotify.com`     | connect-state devices and player  |
//! | `seektables`   | `https://seektables.scdn.co`            | PSSH lookup                       |
//!
//! Tests point every field at a local mock server.

/// Base URLs, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub open: String,
    pub client_token: String,
    pub api: String,
    pub partner: String,
    pub spclient: String,
    pub connect: String,
    pub seektables: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            open: "https://open.spotify.com".into(),
            client_token: "https://clienttoken.spotify.com".into(),
            api: "https://api.spotify.com".into(),
            partner: "https://api-partner.spotify.com".into(),
            spclient: "https://spclient.wg.spotify.com".into(),
            connect: "https://gae2-spclient.spotify.com".into(),
            seektables: "https://seektables.scdn.co".into(),
        }
    }
}

impl Endpoints {
    /// Route every service to the same base URL.
    pub fn single(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_owned();
        Self {
            open: base.clone(),
            client_token: base.clone(),
            api: base.clone(),
            partner: base.clone(),
            spclient: base.clone(),
            connect: base.clone(),
            seektables: base,
        }
    }

    pub(crate) fn access_token_url(&self) -> String {
        format!("{}/get_access_token", self.open)
    }

    pub(crate) fn client_token_url(&self) -> String {
        format!("{}/v1/clienttoken", self.client_token)
    }

    pub(crate) fn pathfinder_url(&self) -> String {
        format!("{}/pathfinder/v1/query", self.partner)
    }

    /// Base URLs that receive the `sp_dc` cookie once the session exists.
    pub(crate) fn cookie_targets(&self) -> [&str; 5] {
        [
            self.open.as_str(),
            self.api.as_str(),
            self.partner.as_str(),
            self.spclient.as_str(),
            self.connect.as_str(),
        ]
    }
}
