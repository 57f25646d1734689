//! Session bootstrap: `sp_dc` cookie → access token → client token.
//!
//! The web player authenticates in two steps:
//!
//! 1. `GET https://open.spotify.com/get_access_token?reason=transport&productType=web_player`
//!    with the `sp_dc` cookie. Returns
//!
//!    ```json
//!    { "accessToken": "BQD...", "clientId": "d8a5ed95...", "accessTokenExpirationTimestampMs": 1700000000000 }
//!    ```
//!
//!    or, when the cookie is rejected, an object with an `error` key.
//!
//! 2. `POST https://clienttoken.spotify.com/v1/clienttoken` with the client id
//!    and a synthetic device description. Returns
//!
//!    ```json
//!    { "response_type": "RESPONSE_GRANTED_TOKEN_RESPONSE", "granted_token": { "token": "AAC...", "expires_after_seconds": 1209600 } }
//!    ```
//!
//! Both tokens are then pinned into the default header set of an
//! [`AuthenticatedSession`]. Nothing here refreshes them: once Spotify expires
//! the access token every call fails until a new client is built.
//!
//! The `sp_dc` cookie can be copied from the browser developer tools
//! (Application → Cookies → `open.spotify.com`) while logged in to the web
//! player.

use std::fmt;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CACHE_CONTROL, HeaderMap, HeaderName, HeaderValue,
    InvalidHeaderValue, ORIGIN, REFERER, UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use crate::client::{diagnose, fetch};
use crate::endpoints::Endpoints;
use crate::error::{AccessError, Result, SpotifyError};
use crate::fingerprint;

const COOKIE_NAME: &str = "sp_dc";
const ACCESS_TOKEN_CONTEXT: &str = "error retrieving access token, check sp_dc cookie value or response format";
const CLIENT_TOKEN_CONTEXT: &str = "error retrieving client token, check response format";

/// The long-lived `sp_dc` session cookie.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Wrap a cookie value.
    ///
    /// Empty values are rejected, and so are `;`, `,` and control
    /// characters, which would end the cookie pair early.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SpotifyError::InvalidArgument("sp_dc cookie is empty".into()));
        }
        if value.chars().any(|c| c == ';' || c == ',' || c.is_control()) {
            return Err(SpotifyError::InvalidArgument(
                "sp_dc cookie contains `;`, `,` or control characters".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Bearer token and the client id it was issued for.
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    #[serde(rename = "accessToken")]
    pub token: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("client_id", &self.client_id)
            .finish()
    }
}

/// Token from the client-token endpoint, sent as the `client-token` header.
#[derive(Clone)]
pub struct ClientToken(String);

impl ClientToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientToken(<redacted>)")
    }
}

/// Extra header applied to a single request on top of the session defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// `app-platform: WebPlayer`, expected by most spclient and library calls.
    WebPlayer,
    /// `accept: application/json`, for services that default to protobuf.
    AcceptJson,
    /// `x-spotify-connection-id`, required by the connect-state devices call.
    ConnectionId,
}

impl Overlay {
    fn header(self) -> (HeaderName, HeaderValue) {
        match self {
            Self::WebPlayer => (
                HeaderName::from_static("app-platform"),
                HeaderValue::from_static("WebPlayer"),
            ),
            Self::AcceptJson => (ACCEPT, HeaderValue::from_static("application/json")),
            Self::ConnectionId => (
                HeaderName::from_static("x-spotify-connection-id"),
                HeaderValue::from_static(fingerprint::CONNECTION_ID),
            ),
        }
    }
}

/// A fully authenticated session.
///
/// Only [`bootstrap`] creates one, and nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    credential: Credential,
    access_token: AccessToken,
    client_token: ClientToken,
    headers: HeaderMap,
}

impl AuthenticatedSession {
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn client_token(&self) -> &ClientToken {
        &self.client_token
    }

    /// Default headers attached to every resource request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Default headers merged with `overlays`, later entries winning.
    pub fn headers_with(&self, overlays: &[Overlay]) -> HeaderMap {
        let mut headers = self.headers.clone();
        for overlay in overlays {
            let (name, value) = overlay.header();
            headers.insert(name, value);
        }
        headers
    }
}

/// Exchange `credential` for an [`AuthenticatedSession`].
///
/// Any failure aborts the whole exchange; an explicit `error` payload from the
/// identity endpoint maps to [`SpotifyError::Unauthorized`], everything else
/// to [`SpotifyError::Access`].
pub(crate) fn bootstrap(
    http: &Client,
    jar: &Jar,
    endpoints: &Endpoints,
    credential: Credential,
) -> Result<AuthenticatedSession> {
    add_cookie(jar, &endpoints.open, &credential)?;

    let access_token = fetch_access_token(http, endpoints)?;
    debug!(client_id = %access_token.client_id, "access token granted");

    let client_token = fetch_client_token(http, endpoints, &access_token.client_id)?;
    let headers = default_headers(&access_token, &client_token)?;

    for target in endpoints.cookie_targets() {
        add_cookie(jar, target, &credential)?;
    }

    info!(client_id = %access_token.client_id, "session bootstrapped");
    Ok(AuthenticatedSession {
        credential,
        access_token,
        client_token,
        headers,
    })
}

fn fetch_access_token(http: &Client, endpoints: &Endpoints) -> Result<AccessToken> {
    let url = endpoints.access_token_url();
    debug!(%url, "requesting access token");

    let request = http
        .get(&url)
        .query(&[("reason", "transport"), ("productType", "web_player")])
        .headers(navigation_headers());
    let raw = fetch(request, ACCESS_TOKEN_CONTEXT)?;
    let body = raw.json(ACCESS_TOKEN_CONTEXT)?;

    if body.get("error").is_some() {
        error!(status = raw.status.as_u16(), body = %raw.body, "identity endpoint rejected the sp_dc cookie");
        return Err(SpotifyError::Unauthorized);
    }

    serde_json::from_value(body).map_err(|e| diagnose(raw.error(ACCESS_TOKEN_CONTEXT, e)))
}

fn fetch_client_token(http: &Client, endpoints: &Endpoints, client_id: &str) -> Result<ClientToken> {
    let url = endpoints.client_token_url();
    debug!(%url, "requesting client token");

    let device = &fingerprint::COMPUTER;
    let payload = json!({
        "client_data": {
            "client_version": fingerprint::CLIENT_VERSION,
            "client_id": client_id,
            "js_sdk_data": {
                "device_brand": device.brand,
                "device_model": device.model,
                "os": device.os,
                "os_version": device.os_version,
                "device_id": device.device_id,
                "device_type": device.device_type,
            },
        },
    });

    let request = http.post(&url).headers(client_token_headers()).json(&payload);
    let raw = fetch(request, CLIENT_TOKEN_CONTEXT)?;
    let body = raw.json(CLIENT_TOKEN_CONTEXT)?;

    match body["granted_token"]["token"].as_str() {
        Some(token) => Ok(ClientToken(token.to_owned())),
        None => Err(diagnose(
            raw.error(CLIENT_TOKEN_CONTEXT, "missing `granted_token.token`"),
        )),
    }
}

fn add_cookie(jar: &Jar, base: &str, credential: &Credential) -> Result<()> {
    let url = Url::parse(base)
        .map_err(|e| SpotifyError::InvalidArgument(format!("invalid endpoint URL {base:?}: {e}")))?;
    jar.add_cookie_str(&format!("{COOKIE_NAME}={}", credential.as_str()), &url);
    Ok(())
}

fn browser_hints(headers: &mut HeaderMap) {
    headers.insert("sec-ch-ua", HeaderValue::from_static(fingerprint::SEC_CH_UA));
    headers.insert(
        "sec-ch-ua-mobile",
        HeaderValue::from_static(fingerprint::SEC_CH_UA_MOBILE),
    );
    headers.insert(
        "sec-ch-ua-platform",
        HeaderValue::from_static(fingerprint::SEC_CH_UA_PLATFORM),
    );
}

/// Headers of a top-level document navigation to the web player.
fn navigation_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(fingerprint::ACCEPT_DOCUMENT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(fingerprint::ACCEPT_LANGUAGE));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    browser_hints(&mut headers);
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("cross-site"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert(USER_AGENT, HeaderValue::from_static(fingerprint::BOOTSTRAP_USER_AGENT));
    headers
}

fn client_token_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(fingerprint::ACCEPT_LANGUAGE));
    headers.insert(ORIGIN, HeaderValue::from_static(fingerprint::ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static(fingerprint::REFERER));
    browser_hints(&mut headers);
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-site"));
    headers.insert(USER_AGENT, HeaderValue::from_static(fingerprint::BOOTSTRAP_USER_AGENT));
    headers
}

/// Session defaults: both tokens plus a same-site fetch from the web player.
fn default_headers(access_token: &AccessToken, client_token: &ClientToken) -> Result<HeaderMap> {
    let invalid = |e: InvalidHeaderValue| {
        diagnose(AccessError::new(
            "error building session headers, token is not a valid header value",
            e,
        ))
    };

    let mut authorization =
        HeaderValue::from_str(&format!("Bearer {}", access_token.token)).map_err(invalid)?;
    authorization.set_sensitive(true);
    let mut client_token = HeaderValue::from_str(client_token.as_str()).map_err(invalid)?;
    client_token.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert("client-token", client_token);
    headers.insert(USER_AGENT, HeaderValue::from_static(fingerprint::USER_AGENT));
    headers.insert(REFERER, HeaderValue::from_static(fingerprint::REFERER));
    browser_hints(&mut headers);
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-site"));
    Ok(headers)
}
