//! OMDb contract tests.
//!
//! These tests run `OmdbClient` against a local mock server and check the
//! request parameters it sends and how each response shape is mapped.

use std::time::Duration;

use omdb_client::{LookupKey, MetadataProvider, OmdbClient, OmdbConfig, ProviderError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OmdbClient {
    OmdbClient::new(OmdbConfig::new("test-key").with_base_url(server.uri()))
        .expect("client should build")
}

#[tokio::test]
async fn test_resolve_by_id_sends_key_and_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("i", "tt0133093"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": "The Matrix",
            "Year": "1999",
            "Genre": "Action, Sci-Fi",
            "Director": "Lana Wachowski, Lilly Wachowski",
            "Actors": "Keanu Reeves",
            "imdbID": "tt0133093",
            "imdbRating": "8.7",
            "Response": "True"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client_for(&server)
        .resolve(&LookupKey::Id("tt0133093".into()))
        .await
        .expect("resolve should succeed");

    assert_eq!(record.title, "The Matrix");
    assert_eq!(record.genres, vec!["Action", "Sci-Fi"]);
    assert_eq!(record.imdb_rating, "8.7");
}

#[tokio::test]
async fn test_resolve_by_title_uses_t_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("t", "Heat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": "Heat", "Year": "1995", "Genre": "Crime", "imdbID": "tt0113277",
            "imdbRating": "8.3", "Response": "True"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client_for(&server)
        .resolve(&LookupKey::Title("Heat".into()))
        .await
        .unwrap();
    assert_eq!(record.imdb_id, "tt0113277");
}

#[tokio::test]
async fn test_resolve_false_response_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Incorrect IMDb ID."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .resolve(&LookupKey::Id("tt-bogus".into()))
        .await
        .unwrap_err();

    match err {
        ProviderError::NotFound(message) => assert_eq!(message, "Incorrect IMDb ID."),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_page_sends_type_and_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("s", "love"))
        .and(query_param("type", "movie"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Search": [
                {"Title": "Love Actually", "Year": "2003", "imdbID": "tt0314331", "Type": "movie"},
                {"Title": "Crazy, Stupid, Love.", "Year": "2011", "imdbID": "tt1570728", "Type": "movie"}
            ],
            "totalResults": "5000",
            "Response": "True"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).search_page("love", 2).await.unwrap();
    assert_eq!(page.candidates.len(), 2);
    assert_eq!(page.candidates[1].imdb_id, "tt1570728");
    assert_eq!(page.total_results, Some(5000));
}

#[tokio::test]
async fn test_search_not_found_is_no_more_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Movie not found!"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).search_page("zzzzqqq", 1).await.unwrap_err();
    assert!(matches!(err, ProviderError::NoMoreResults));
}

#[tokio::test]
async fn test_search_rate_limit_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Request limit reached!"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).search_page("the", 1).await.unwrap_err();
    assert!(matches!(err, ProviderError::Api { .. }));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_http_error_status_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .resolve(&LookupKey::Title("Heat".into()))
        .await
        .unwrap_err();

    match err {
        ProviderError::Api { status_code, message } => {
            assert_eq!(status_code, 401);
            assert_eq!(message, "unauthorized");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_maps_to_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Search": "not-a-list",
            "Response": "True"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).search_page("the", 1).await.unwrap_err();
    match err {
        ProviderError::Decode { path, .. } => assert_eq!(path, "Search"),
        other => panic!("expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_response_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Response": "False"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = OmdbClient::new(
        OmdbConfig::new("test-key")
            .with_base_url(server.uri())
            .with_timeout(Duration::from_millis(50)),
    )
    .unwrap();

    let err = client.search_page("the", 1).await.unwrap_err();
    assert!(matches!(err, ProviderError::Timeout(_)));
}
