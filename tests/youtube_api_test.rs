use playlist_pace::error::FetchError;
use playlist_pace::playlist::PlaylistProvider;
use playlist_pace::playlist::youtube::YouTubeApiClient;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_title(server: &MockServer, title: &str) {
    Mock::given(method("GET"))
        .and(path("/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{ "snippet": { "title": title } }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_sums_video_durations() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "PLcourse"))
        .and(query_param("key", "TEST_KEY"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "nextPageToken": "page2",
            "items": [
                { "contentDetails": { "videoId": "v1" } },
                { "contentDetails": { "videoId": "v2" } }
            ]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("pageToken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                { "contentDetails": { "videoId": "v3" } },
                { "contentDetails": { "videoId": "v4" } }
            ]
        })))
        .mount(&mock_server)
        .await;

    // v4 is private and missing from the videos response
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "v1,v2,v3,v4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                { "id": "v2", "contentDetails": { "duration": "PT20M" } },
                { "id": "v1", "contentDetails": { "duration": "PT10M" } },
                { "id": "v3", "contentDetails": { "duration": "PT30M" } }
            ]
        })))
        .mount(&mock_server)
        .await;

    mount_title(&mock_server, "Rust Course").await;

    let uri = mock_server.uri();
    let snapshot = tokio::task::spawn_blocking(move || {
        let client = YouTubeApiClient::new("TEST_KEY", Duration::from_secs(5))
            .unwrap()
            .with_base_url(&uri);
        client.fetch("https://www.youtube.com/playlist?list=PLcourse")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(snapshot.title.as_deref(), Some("Rust Course"));
    assert_eq!(snapshot.total_video_count, 4);
    assert_eq!(snapshot.durations_secs, vec![600.0, 1200.0, 1800.0, 0.0]);
    assert_eq!(snapshot.unknown_durations, 1);
}

#[tokio::test]
async fn test_fetch_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": { "code": 404, "message": "The playlist identified with the request's playlistId parameter cannot be found." }
        })))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let client = YouTubeApiClient::new("TEST_KEY", Duration::from_secs(5))
            .unwrap()
            .with_base_url(&uri);
        client.fetch("PLgone")
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, FetchError::NotFound(ref id) if id == "PLgone"));
}

#[tokio::test]
async fn test_fetch_api_error_is_network_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let client = YouTubeApiClient::new("BAD_KEY", Duration::from_secs(5))
            .unwrap()
            .with_base_url(&uri);
        client.fetch("PLcourse")
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn test_fetch_empty_unknown_playlist() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let client = YouTubeApiClient::new("TEST_KEY", Duration::from_secs(5))
            .unwrap()
            .with_base_url(&uri);
        client.fetch("PLempty")
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, FetchError::NotFound(_)));
}

#[tokio::test]
async fn test_fetch_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "items": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let client = YouTubeApiClient::new("TEST_KEY", Duration::from_millis(300))
            .unwrap()
            .with_base_url(&uri);
        client.fetch("PLslow")
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, FetchError::Timeout(d) if d == Duration::from_millis(300)));
}

#[tokio::test]
async fn test_fetch_rejects_url_without_list_before_any_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let client = YouTubeApiClient::new("TEST_KEY", Duration::from_secs(5))
            .unwrap()
            .with_base_url(&uri);
        client.fetch("https://www.youtube.com/watch?v=abc")
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, FetchError::InvalidReference(_)));
}

#[tokio::test]
async fn test_pagination_stops_on_repeated_page_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "PLloop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "nextPageToken": "again",
            "items": [{ "contentDetails": { "videoId": "v1" } }]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let ids = tokio::task::spawn_blocking(move || {
        let client = YouTubeApiClient::new("TEST_KEY", Duration::from_secs(5))
            .unwrap()
            .with_base_url(&uri);
        client.playlist_video_ids("PLloop")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(ids, vec!["v1".to_string(), "v1".to_string()]);
}
