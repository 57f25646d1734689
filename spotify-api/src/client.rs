//! Blocking HTTP client for the Spotify web player API.
//!
//! [`SpotifyClient`] is only obtainable through a successful session
//! bootstrap (see [`auth`](crate::auth)), so every request it sends carries the
//! bearer token, the client token and the `sp_dc` cookie.
//!
//! Requests come in three shapes:
//!
//! - REST style `GET`/`POST`/`PUT` with a query string or JSON body
//!   ([`get_json`](SpotifyClient::get_json) and friends),
//! - persisted GraphQL queries: `GET /pathfinder/v1/query?operationName=..&variables=..&extensions=..`
//!   ([`query`](SpotifyClient::query)),
//! - persisted GraphQL mutations: the same three fields as a JSON `POST` body
//!   ([`mutate`](SpotifyClient::mutate)).
//!
//! # Failures
//!
//! Transport errors, non-2xx statuses and bodies that are not JSON all become
//! [`SpotifyError::Access`] carrying the call-site message, the status and
//! the raw body. The same details are emitted as a `tracing` error event
//! before the error is returned.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::cookie::Jar;
use serde_json::{Value, json};
use tracing::{debug, error, trace};

use crate::auth::{self, AuthenticatedSession, Credential, Overlay};
use crate::endpoints::Endpoints;
use crate::error::{AccessError, Result, SpotifyError};
use crate::operations::PersistedOperation;

const DEFAULT_TIME_ZONE: &str = "America/New_York";

/// Query string parameters.
pub(crate) type Query<'a> = [(&'a str, String)];

/// Blocking client for the Spotify web player API.
///
/// Holds a [`reqwest::blocking::Client`] with a cookie jar and the
/// [`AuthenticatedSession`]. API methods are implemented in separate modules
/// (`track`, `artist`, `playlist`, `library`, `user`, `player`, `search`) as
/// `impl SpotifyClient` blocks.
#[derive(Debug)]
pub struct SpotifyClient {
    http: Client,
    session: AuthenticatedSession,
    endpoints: Endpoints,
    time_zone: String,
}

/// Builder for [`SpotifyClient`]; the only configuration surface.
#[derive(Debug, Clone)]
pub struct SpotifyClientBuilder {
    sp_dc: String,
    endpoints: Endpoints,
    time_zone: String,
}

impl SpotifyClientBuilder {
    /// Replace the production base URLs.
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// IANA time zone sent with the home feed query.
    #[must_use]
    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// Bootstrap the session and return a ready client.
    ///
    /// Either both tokens are obtained or no client is returned.
    pub fn build(self) -> Result<SpotifyClient> {
        let credential = Credential::new(self.sp_dc)?;
        let jar = Arc::new(Jar::default());
        let http = Client::builder().cookie_provider(Arc::clone(&jar)).build()?;
        let session = auth::bootstrap(&http, &jar, &self.endpoints, credential)?;
        Ok(SpotifyClient {
            http,
            session,
            endpoints: self.endpoints,
            time_zone: self.time_zone,
        })
    }
}

impl SpotifyClient {
    /// Authenticate against production Spotify with an `sp_dc` cookie.
    pub fn new(sp_dc: impl Into<String>) -> Result<Self> {
        Self::builder(sp_dc).build()
    }

    pub fn builder(sp_dc: impl Into<String>) -> SpotifyClientBuilder {
        SpotifyClientBuilder {
            sp_dc: sp_dc.into(),
            endpoints: Endpoints::default(),
            time_zone: DEFAULT_TIME_ZONE.to_owned(),
        }
    }

    pub fn session(&self) -> &AuthenticatedSession {
        &self.session
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }

    /// `GET url?query` with the session headers.
    pub(crate) fn get_json(
        &self,
        url: &str,
        query: &Query<'_>,
        overlays: &[Overlay],
        context: &str,
    ) -> Result<Value> {
        debug!(%url, "GET");
        self.send(self.http.get(url).query(query), overlays, context)
    }

    /// `POST url` with a JSON body and the session headers.
    pub(crate) fn post_json(
        &self,
        url: &str,
        body: &Value,
        overlays: &[Overlay],
        context: &str,
    ) -> Result<Value> {
        debug!(%url, "POST");
        self.send(self.http.post(url).json(body), overlays, context)
    }

    /// `PUT url` with a JSON body and the session headers.
    pub(crate) fn put_json(
        &self,
        url: &str,
        body: &Value,
        overlays: &[Overlay],
        context: &str,
    ) -> Result<Value> {
        debug!(%url, "PUT");
        self.send(self.http.put(url).json(body), overlays, context)
    }

    /// `GET url` outside the session: no tokens, only a browser user agent.
    pub(crate) fn get_plain(&self, url: &str, context: &str) -> Result<Value> {
        debug!(%url, "GET (no session)");
        let request = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, crate::fingerprint::USER_AGENT);
        fetch(request, context)?.into_json(context)
    }

    /// Run a persisted GraphQL query.
    pub(crate) fn query(
        &self,
        op: &PersistedOperation,
        variables: &Value,
        overlays: &[Overlay],
        context: &str,
    ) -> Result<Value> {
        op.check_variables(variables)?;
        let params = [
            ("operationName", op.name.to_owned()),
            ("variables", variables.to_string()),
            ("extensions", op.extensions().to_string()),
        ];
        self.get_json(&self.endpoints.pathfinder_url(), &params, overlays, context)
    }

    /// Run a persisted GraphQL mutation.
    pub(crate) fn mutate(
        &self,
        op: &PersistedOperation,
        variables: Value,
        overlays: &[Overlay],
        context: &str,
    ) -> Result<Value> {
        op.check_variables(&variables)?;
        let body = json!({
            "variables": variables,
            "operationName": op.name,
            "extensions": op.extensions(),
        });
        self.post_json(&self.endpoints.pathfinder_url(), &body, overlays, context)
    }

    fn send(&self, request: RequestBuilder, overlays: &[Overlay], context: &str) -> Result<Value> {
        let request = request.headers(self.session.headers_with(overlays));
        fetch(request, context)?.into_json(context)
    }
}

/// Status and body of a response, kept together for diagnostics.
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Parse the body as JSON, regardless of status.
    pub(crate) fn json(&self, context: &str) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|e| diagnose(self.error(context, e)))
    }

    /// Parse the body as JSON, rejecting non-2xx statuses first.
    pub(crate) fn into_json(self, context: &str) -> Result<Value> {
        if !self.status.is_success() {
            return Err(diagnose(
                self.error(context, format!("unexpected status {}", self.status)),
            ));
        }
        self.json(context)
    }

    pub(crate) fn error(&self, context: &str, cause: impl std::fmt::Display) -> AccessError {
        AccessError::new(context, cause)
            .with_status(self.status.as_u16())
            .with_body(self.body.clone())
    }
}

/// Send `request` and read the whole body.
pub(crate) fn fetch(request: RequestBuilder, context: &str) -> Result<RawResponse> {
    let response = request
        .send()
        .map_err(|e| diagnose(AccessError::new(context, e)))?;
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| diagnose(AccessError::new(context, e).with_status(status.as_u16())))?;
    trace!(status = status.as_u16(), len = body.len(), "response received");
    Ok(RawResponse { status, body })
}

/// Emit the diagnostic event for `err` and wrap it.
pub(crate) fn diagnose(err: AccessError) -> SpotifyError {
    error!(
        context = %err.context,
        status = ?err.status,
        body = err.body.as_deref().unwrap_or(""),
        cause = %err.cause,
        "spotify request failed"
    );
    SpotifyError::Access(err)
}

/// Extract the sub-tree at a dotted `path`.
///
/// Segments index objects by key and arrays by position; negative positions
/// count from the end (`sources.-1` is the last source).
pub(crate) fn pick(value: &Value, path: &str, context: &str) -> Result<Value> {
    let mut current = value;
    for key in path.split('.') {
        current = step(current, key).ok_or_else(|| {
            diagnose(
                AccessError::new(context, format!("missing `{key}` in `{path}`"))
                    .with_body(value.to_string()),
            )
        })?;
    }
    Ok(current.clone())
}

/// Like [`pick`], but the target must be a string.
pub(crate) fn pick_str(value: &Value, path: &str, context: &str) -> Result<String> {
    match pick(value, path, context)? {
        Value::String(s) => Ok(s),
        other => Err(diagnose(
            AccessError::new(context, format!("`{path}` is not a string: {other}"))
                .with_body(value.to_string()),
        )),
    }
}

fn step<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => {
            let index: i64 = key.parse().ok()?;
            let index = if index < 0 {
                items.len().checked_sub(usize::try_from(index.unsigned_abs()).ok()?)?
            } else {
                usize::try_from(index).ok()?
            };
            items.get(index)
        }
        _ => None,
    }
}
