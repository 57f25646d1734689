//! Resource accessor tests against a mock Spotify.

mod common;

use common::{header, mount_bootstrap, query, requests_to, with_client};
use serde_json::{Value, json};
use spotify_api::{LyricsFormat, PlaylistPosition, SearchFilter, SpotifyError};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRACK: &str = "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC";
const TRACK_GID: &str = "93bc414a606747b2b612491ef83d5a3e";
const PLAYLIST: &str = "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M";
const OBSERVER: &str = "/connect-state/v1/devices/hobs_1244c7ff01cd7cfcab51e39d2fb5573e71b";

async fn mount_devices(server: &MockServer, active: &str) {
    Mock::given(method("PUT"))
        .and(path(OBSERVER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "active_device_id": active,
            "devices": {
                "desk1": { "device_type": "COMPUTER", "name": "Desk" },
                "phone1": { "device_type": "SMARTPHONE", "name": "Phone" }
            },
            "player_state": { "context_uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC" }
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Request shaping
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_overlay_applies_to_one_call_only() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uri": "spotify:user:bob" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/tracks"))
        .and(query_param("ids", "4uLU6hMCjMI75M1A2tKUQC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [ { "name": "Never Gonna Give You Up" } ]
        })))
        .mount(&server)
        .await;

    let track = with_client(&server, |client| {
        client.me()?;
        client.track_info(TRACK)
    })
    .await
    .unwrap();
    assert_eq!(track["name"], "Never Gonna Give You Up");

    let me = &requests_to(&server, "/v1/me").await[0];
    assert_eq!(header(me, "app-platform"), Some("WebPlayer"));
    let tracks = &requests_to(&server, "/v1/tracks").await[0];
    assert_eq!(header(tracks, "app-platform"), None);
    assert!(header(tracks, "authorization").is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_foreign_locator_sends_no_request() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;

    let err = with_client(&server, |client| {
        client.track_info("https://example.com/track/4uLU6hMCjMI75M1A2tKUQC")
    })
    .await
    .unwrap_err();

    assert!(matches!(err, SpotifyError::InvalidLocator(_)));
    // Only the two bootstrap requests.
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_status_is_access_error() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/tracks"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream failed"))
        .mount(&server)
        .await;

    let err = with_client(&server, |client| client.track_info(TRACK))
        .await
        .unwrap_err();
    let SpotifyError::Access(access) = err else {
        panic!("expected access error, got {err:?}");
    };
    assert_eq!(access.status, Some(502));
    assert_eq!(access.body.as_deref(), Some("upstream failed"));
    assert!(access.context.contains("track info"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_json_body_is_access_error() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;

    Mock::given(method("GET"))
        .and(path("/melody/v1/product_state"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = with_client(&server, |client| client.account_info())
        .await
        .unwrap_err();
    let SpotifyError::Access(access) = err else {
        panic!("expected access error, got {err:?}");
    };
    assert_eq!(access.status, Some(200));
    assert_eq!(access.body.as_deref(), Some("not json"));
}

// ============================================================================
// Persisted operations
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_search_sends_persisted_query() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;

    Mock::given(method("GET"))
        .and(path("/pathfinder/v1/query"))
        .and(query_param("operationName", "searchDesktop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "searchV2": {
                    "chipOrder": { "items": [] },
                    "topResults": { "itemsV2": [ { "item": 1 } ] },
                    "artists": { "totalCount": 7 }
                }
            }
        })))
        .mount(&server)
        .await;

    let (top, artists) = with_client(&server, |client| {
        Ok((
            client.search("rick astley", None)?,
            client.search("rick astley", Some(SearchFilter::Artists))?,
        ))
    })
    .await
    .unwrap();
    assert_eq!(top, json!([ { "item": 1 } ]));
    assert_eq!(artists, json!({ "artists": { "totalCount": 7 } }));

    let request = &requests_to(&server, "/pathfinder/v1/query").await[0];
    let variables: Value = serde_json::from_str(&query(request, "variables").unwrap()).unwrap();
    assert_eq!(variables["searchTerm"], "rick astley");
    assert_eq!(variables["limit"], 10);
    let extensions: Value = serde_json::from_str(&query(request, "extensions").unwrap()).unwrap();
    assert_eq!(extensions["persistedQuery"]["version"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_like_song_posts_mutation() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;

    Mock::given(method("POST"))
        .and(path("/pathfinder/v1/query"))
        .and(body_partial_json(json!({
            "operationName": "addToLibrary",
            "variables": { "uris": ["spotify:track:4uLU6hMCjMI75M1A2tKUQC"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = with_client(&server, |client| client.like_song(TRACK))
        .await
        .unwrap();
    assert_eq!(resp, json!({ "data": {} }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_saved_state_pairs_flags_with_ids() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;

    Mock::given(method("GET"))
        .and(path("/pathfinder/v1/query"))
        .and(query_param("operationName", "areTracksInLibrary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "tracks": [
                { "__typename": "Track", "saved": true },
                { "__typename": "Track", "saved": false }
            ] }
        })))
        .mount(&server)
        .await;

    let statuses = with_client(&server, |client| {
        client.are_tracks_in_library(&[TRACK, "https://open.spotify.com/track/abc"])
    })
    .await
    .unwrap();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].id, "4uLU6hMCjMI75M1A2tKUQC");
    assert!(statuses[0].saved);
    assert_eq!(statuses[1].id, "abc");
    assert!(!statuses[1].saved);

    let request = &requests_to(&server, "/pathfinder/v1/query").await[0];
    let variables: Value = serde_json::from_str(&query(request, "variables").unwrap()).unwrap();
    assert_eq!(
        variables["uris"],
        json!(["spotify:track:4uLU6hMCjMI75M1A2tKUQC", "spotify:track:abc"])
    );
}

// ============================================================================
// Playlists
// ============================================================================

async fn mount_playlist(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/pathfinder/v1/query"))
        .and(query_param("operationName", "fetchPlaylist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "playlistV2": { "content": { "items": [
                { "uid": "u0", "itemV2": { "data": { "uri": "spotify:track:aaa" } } },
                { "uid": "u1", "itemV2": { "data": { "uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC" } } }
            ] } } }
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remove_track_resolves_uid() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;
    mount_playlist(&server).await;

    Mock::given(method("POST"))
        .and(path("/pathfinder/v1/query"))
        .and(body_partial_json(json!({
            "operationName": "removeFromPlaylist",
            "variables": {
                "playlistUri": "spotify:playlist:37i9dQZF1DXcBWIGoYBM5M",
                "uids": ["u1"]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    with_client(&server, |client| client.remove_track_from_playlist(PLAYLIST, TRACK))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_move_track_targets_uid_at_position() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;
    mount_playlist(&server).await;

    Mock::given(method("POST"))
        .and(path("/pathfinder/v1/query"))
        .and(body_partial_json(json!({
            "operationName": "moveItemsInPlaylist",
            "variables": {
                "uids": ["u1"],
                "newPosition": { "moveType": "BEFORE_UID", "fromUid": "u0" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    with_client(&server, |client| client.move_track_in_playlist(PLAYLIST, TRACK, 0))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_track_is_not_found() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;
    mount_playlist(&server).await;

    let err = with_client(&server, |client| {
        client.remove_track_from_playlist(PLAYLIST, "https://open.spotify.com/track/zzz")
    })
    .await
    .unwrap_err();
    assert!(matches!(err, SpotifyError::NotFound(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_track_uses_move_type() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;

    Mock::given(method("POST"))
        .and(path("/pathfinder/v1/query"))
        .and(body_partial_json(json!({
            "operationName": "addToPlaylist",
            "variables": { "newPosition": { "moveType": "BOTTOM_OF_PLAYLIST" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    with_client(&server, |client| {
        client.add_track_to_playlist(PLAYLIST, TRACK, PlaylistPosition::Bottom)
    })
    .await
    .unwrap();
}

// ============================================================================
// Tracks
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_streams_resolve_file_pssh_and_cdn() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("/metadata/4/track/{TRACK_GID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file": [
                { "file_id": "f-ogg", "format": "OGG_VORBIS_160" },
                { "file_id": "f-mp4-a", "format": "MP4_128" },
                { "file_id": "f-mp4-b", "format": "MP4_128" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/seektable/f-mp4-b.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pssh": "AAAA" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/storage-resolve/v2/files/audio/interactive/10/f-mp4-b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cdnurl": ["https://cdn/a", "https://cdn/b"]
        })))
        .mount(&server)
        .await;

    let streams = with_client(&server, |client| client.streams(TRACK, None))
        .await
        .unwrap();
    assert_eq!(streams.file_id, "f-mp4-b");
    assert_eq!(streams.pssh, "AAAA");
    assert_eq!(streams.cdn_url, "https://cdn/b");

    let metadata = &requests_to(&server, &format!("/metadata/4/track/{TRACK_GID}")).await[0];
    assert_eq!(header(metadata, "accept"), Some("application/json"));
    let seektable = &requests_to(&server, "/seektable/f-mp4-b.json").await[0];
    assert!(header(seektable, "authorization").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lrc_lyrics_use_time_tags() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;

    Mock::given(method("GET"))
        .and(path("/pathfinder/v1/query"))
        .and(query_param("operationName", "getTrack"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "trackUnion": { "albumOfTrack": { "coverArt": { "sources": [
                { "url": "https://i.scdn.co/image/small" },
                { "url": "https://i.scdn.co/image/large" }
            ] } } } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/color-lyrics/v2/track/4uLU6hMCjMI75M1A2tKUQC/image/https%3A%2F%2Fi.scdn.co%2Fimage%2Flarge",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lyrics": { "lines": [ { "startTimeMs": "18500", "words": "We're no strangers", "syllables": [] } ] }
        })))
        .mount(&server)
        .await;

    let lyrics = with_client(&server, |client| client.lyrics(TRACK, LyricsFormat::Lrc))
        .await
        .unwrap();
    assert_eq!(
        lyrics["lyrics"]["lines"][0],
        json!({ "timeTag": "00:00:18", "words": "We're no strangers", "syllables": [] })
    );
}

// ============================================================================
// Player
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_player_targets_active_device() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;
    mount_devices(&server, "phone1").await;

    Mock::given(method("POST"))
        .and(path("/connect-state/v1/player/command/from/phone1/to/phone1"))
        .and(body_partial_json(json!({
            "command": { "endpoint": "seek_to", "value": 90 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ack_id": "1" })))
        .expect(1)
        .mount(&server)
        .await;

    with_client(&server, |client| client.seek("1:30"))
        .await
        .unwrap();

    let devices = &requests_to(&server, OBSERVER).await[0];
    assert!(header(devices, "x-spotify-connection-id").is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_player_falls_back_to_primary_device() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;
    mount_devices(&server, "").await;

    Mock::given(method("POST"))
        .and(path("/connect-state/v1/player/command/from/desk1/to/desk1"))
        .and(body_partial_json(json!({
            "command": { "endpoint": "set_shuffling_context", "value": true }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ack_id": "2" })))
        .expect(1)
        .mount(&server)
        .await;

    with_client(&server, |client| client.enable_shuffle())
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_reports_connect_state() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;
    mount_devices(&server, "").await;

    let info = with_client(&server, |client| client.devices())
        .await
        .unwrap();
    assert_eq!(info.primary_device_id.as_deref(), Some("desk1"));
    assert_eq!(info.smartphone_device_id, "phone1");
    assert_eq!(info.currently_playing_id.as_deref(), Some("4uLU6hMCjMI75M1A2tKUQC"));
}
