#![allow(dead_code)]

use serde_json::json;
use spotify_api::{Endpoints, Result, SpotifyClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const SP_DC: &str = "test-sp-dc";
pub const ACCESS_TOKEN: &str = "test-access-token";
pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_TOKEN: &str = "test-client-token";

/// Mount both bootstrap endpoints with successful answers.
pub async fn mount_bootstrap(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/get_access_token"))
        .and(query_param("reason", "transport"))
        .and(query_param("productType", "web_player"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": ACCESS_TOKEN,
            "clientId": CLIENT_ID,
            "accessTokenExpirationTimestampMs": 1_700_000_000_000_u64,
            "isAnonymous": false
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/clienttoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response_type": "RESPONSE_GRANTED_TOKEN_RESPONSE",
            "granted_token": { "token": CLIENT_TOKEN, "expires_after_seconds": 1_209_600 }
        })))
        .mount(server)
        .await;
}

/// Bootstrap a client against `server` and run `f` with it.
///
/// The blocking client must be built, used and dropped off the async
/// runtime, so everything happens inside `spawn_blocking`.
pub async fn with_client<T, F>(server: &MockServer, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&SpotifyClient) -> Result<T> + Send + 'static,
{
    let endpoints = Endpoints::single(&server.uri());
    tokio::task::spawn_blocking(move || {
        let client = SpotifyClient::builder(SP_DC).endpoints(endpoints).build()?;
        f(&client)
    })
    .await
    .unwrap()
}

/// Requests received on `path`, in arrival order.
pub async fn requests_to(server: &MockServer, request_path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == request_path)
        .collect()
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

pub fn query<'a>(request: &'a Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
