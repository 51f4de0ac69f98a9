//! Rate limit tracking and error mapping tests.

mod common;

use asyncgur::{AlbumPayload, Imgur, ImgurError};
use common::{image_json, ok, TestApi};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn throttled() -> ResponseTemplate {
    ResponseTemplate::new(429)
        .insert_header("X-RateLimit-ClientLimit", "12500")
        .insert_header("X-RateLimit-ClientRemaining", "0")
        .insert_header("X-RateLimit-ClientReset", "1700003600")
        .set_body_json(json!({
            "data": { "error": "Too Many Requests" },
            "success": false,
            "status": 429
        }))
}

fn assert_rate_limited(err: ImgurError) {
    match err {
        ImgurError::RateLimitExceeded { reset, message } => {
            assert_eq!(reset, Some(1700003600));
            assert!(message.contains("Too Many Requests"));
        }
        other => panic!("Expected RateLimitExceeded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_headers_update_snapshot() {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/3/image/abc"))
        .respond_with(
            ok(image_json("abc"))
                .insert_header("X-RateLimit-ClientLimit", "12500")
                .insert_header("X-RateLimit-ClientRemaining", "12345")
                .insert_header("X-RateLimit-ClientReset", "1700000000")
                .insert_header("X-RateLimit-UserLimit", "2000")
                .insert_header("X-RateLimit-UserRemaining", "1999")
                .insert_header("X-RateLimit-UserReset", "1700000500"),
        )
        .mount(&api.server)
        .await;

    let client = api.client();
    assert_eq!(client.rate_limits().client_remaining, 12500);
    assert_eq!(client.rate_limits().user_limit, None);

    client.get_image("abc").await.unwrap();

    let limits = client.rate_limits();
    assert_eq!(limits.client_remaining, 12345);
    assert_eq!(limits.client_reset, 1700000000);
    assert_eq!(limits.user_limit, Some(2000));
    assert_eq!(limits.user_remaining, Some(1999));
    assert_eq!(limits.user_reset, Some(1700000500));
    assert_eq!(limits.post_remaining, None);
}

#[tokio::test]
async fn test_post_quota_headers() {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/3/album"))
        .respond_with(
            ok(json!({ "id": "a", "deletehash": "d" }))
                .insert_header("X-Post-Rate-Limit-Limit", "1250")
                .insert_header("X-Post-Rate-Limit-Remaining", "1249")
                .insert_header("X-Post-Rate-Limit-Reset", "3600"),
        )
        .mount(&api.server)
        .await;

    let client = api.client();
    client.create_album(AlbumPayload::new()).await.unwrap();

    let limits = client.rate_limits();
    assert_eq!(limits.post_limit, Some(1250));
    assert_eq!(limits.post_remaining, Some(1249));
    assert_eq!(limits.post_reset, Some(3600));
}

#[tokio::test]
async fn test_429_on_every_verb() {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .respond_with(throttled())
        .mount(&api.server)
        .await;
    Mock::given(method("POST"))
        .respond_with(throttled())
        .mount(&api.server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(throttled())
        .mount(&api.server)
        .await;

    let client = api.client();
    assert_rate_limited(client.get_image("abc").await.unwrap_err());
    assert_rate_limited(client.create_album(AlbumPayload::new()).await.unwrap_err());
    assert_rate_limited(client.delete_image("abc").await.unwrap_err());

    // Headers on the refused responses are recorded too
    let limits = client.rate_limits();
    assert_eq!(limits.client_remaining, 0);
    assert!(limits.is_exhausted());
}

#[tokio::test]
async fn test_server_error_is_retryable() {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/3/image/abc"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&api.server)
        .await;

    let err = api.client().get_image("abc").await.unwrap_err();

    match &err {
        ImgurError::Api { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
    assert!(err.is_server_error());
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_success_false_in_ok_response() {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/3/image/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "error": "Imgur is over capacity" },
            "success": false,
            "status": 500
        })))
        .mount(&api.server)
        .await;

    let err = api.client().get_image("abc").await.unwrap_err();

    match err {
        ImgurError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Imgur is over capacity");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unexpected_payload_is_decode_error() {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/3/image/abc"))
        .respond_with(ok(json!({ "no_id_here": true })))
        .mount(&api.server)
        .await;

    let err = api.client().get_image("abc").await.unwrap_err();
    assert!(matches!(err, ImgurError::Decode(_)));
}

#[tokio::test]
async fn test_local_throttle_holds_requests_past_burst() {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .respond_with(ok(image_json("abc")))
        .expect(2)
        .mount(&api.server)
        .await;

    let mut config = api.config();
    config.rate_limit.enabled = true;
    config.rate_limit.requests_per_window = 2;
    config.rate_limit.window_seconds = 3600;
    let client = Imgur::from_config(&config).unwrap();

    client.get_image("a").await.unwrap();
    client.get_image("b").await.unwrap();

    let third = tokio::time::timeout(Duration::from_millis(300), client.get_image("c")).await;
    assert!(third.is_err(), "third request should wait for the throttle");
}
