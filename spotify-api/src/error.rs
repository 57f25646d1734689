//! Error types for the Spotify web player API client.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when interacting with the Spotify API.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// The identity endpoint answered with an `error` payload.
    ///
    /// Almost always an expired or mistyped `sp_dc` cookie.
    #[error("unauthorized, check the sp_dc cookie value")]
    Unauthorized,

    /// A request failed, returned a body that is not JSON, or the body lacked
    /// the expected key path.
    ///
    /// Network failures, HTTP error statuses and unexpected shapes all land
    /// here; the attached [`AccessError`] keeps the raw material for debugging.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The locator does not point at `spotify.com`.
    #[error("invalid locator (expected a spotify.com URL): {0}")]
    InvalidLocator(String),

    /// An argument was rejected before any request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An item looked up locally in a response was not there
    /// (track not in playlist, no audio file in the requested format, ...).
    #[error("not found: {0}")]
    NotFound(String),

    /// The underlying HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Details of a failed remote call.
///
/// `context` is the call-site message, e.g.
/// `"error retrieving poster URL, check track URL or response format"`.
#[derive(Debug)]
pub struct AccessError {
    /// Call-site message.
    pub context: String,
    /// HTTP status, if a response was received.
    pub status: Option<u16>,
    /// Raw response body, if one was read.
    pub body: Option<String>,
    /// Underlying cause (transport error, JSON error, missing key).
    pub cause: String,
}

impl AccessError {
    pub(crate) fn new(context: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self {
            context: context.into(),
            status: None,
            body: None,
            cause: cause.to_string(),
        }
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub(crate) fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.cause)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {status})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AccessError {}

/// Convenience alias for `Result<T, SpotifyError>`.
pub type Result<T> = std::result::Result<T, SpotifyError>;
