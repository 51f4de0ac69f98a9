//! OAuth token refresh tests.

mod common;

use asyncgur::ImgurError;
use common::{image_json, ok, TestApi, CLIENT_ID};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_refresh_switches_to_bearer() {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .and(body_string_contains(&format!("client_id={}", CLIENT_ID)))
        .and(body_string_contains("client_secret=test-secret"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "new-access",
            "refresh_token": "new-refresh",
            "expires_in": 315360000,
            "token_type": "bearer",
            "scope": null,
            "account_id": 384077,
            "account_username": "someone"
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/3/account/me/images"))
        .and(header("Authorization", "Bearer new-access"))
        .respond_with(ok(json!([image_json("mine")])))
        .expect(1)
        .mount(&api.server)
        .await;

    let client = api.refreshable_client();
    assert!(matches!(
        client.get_account_images().await,
        Err(ImgurError::AuthRequired(_))
    ));

    let token = client.refresh_access_token().await.unwrap();
    assert_eq!(token.access_token, "new-access");
    assert_eq!(token.account_username.as_deref(), Some("someone"));

    // Clones share the refreshed credentials
    let clone = client.clone();
    assert_eq!(
        clone.credentials().refresh_token.as_deref(),
        Some("new-refresh")
    );

    let images = clone.get_account_images().await.unwrap().into_data();
    assert_eq!(images[0].id, "mine");
}

#[tokio::test]
async fn test_failed_refresh_keeps_credentials() {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "data": { "error": "Invalid refresh token" },
            "success": false,
            "status": 400
        })))
        .mount(&api.server)
        .await;

    let client = api.refreshable_client();
    let err = client.refresh_access_token().await.unwrap_err();

    match err {
        ImgurError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid refresh token");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }

    let credentials = client.credentials();
    assert_eq!(credentials.access_token, None);
    assert_eq!(credentials.refresh_token.as_deref(), Some("old-refresh"));
    assert_eq!(
        credentials.authorization_header(),
        format!("Client-ID {}", CLIENT_ID)
    );
}
