//! Common test utilities and helpers.

#![allow(dead_code)]

use asyncgur::{Config, Credentials, Imgur};
use serde_json::{json, Value};
use wiremock::{MockServer, Request, ResponseTemplate};

pub const CLIENT_ID: &str = "test-client";
pub const ACCESS_TOKEN: &str = "user-token";

/// Mock Imgur API instance
pub struct TestApi {
    pub server: MockServer,
}

impl TestApi {
    /// Start a mock API on a random port
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Configuration pointing at the mock server
    pub fn config(&self) -> Config {
        let mut config = Config::with_client_id(CLIENT_ID);
        config.api.base_url = format!("{}/3/", self.server.uri());
        config.api.oauth_url = format!("{}/oauth2/", self.server.uri());
        config.api.timeout_seconds = 5;
        config
    }

    /// Anonymous client
    pub fn client(&self) -> Imgur {
        Imgur::from_config(&self.config()).expect("Failed to build client")
    }

    /// Client with a user access token
    pub fn oauth_client(&self) -> Imgur {
        let mut config = self.config();
        config.auth.access_token = Some(ACCESS_TOKEN.to_string());
        Imgur::from_config(&config).expect("Failed to build client")
    }

    /// Client able to refresh its token
    pub fn refreshable_client(&self) -> Imgur {
        let mut config = self.config();
        let credentials = Credentials::new(CLIENT_ID)
            .with_client_secret("test-secret")
            .with_refresh_token("old-refresh");
        config.auth = credentials.into();
        Imgur::from_config(&config).expect("Failed to build client")
    }

    /// Requests the mock server has seen so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("Request recording is enabled")
    }
}

/// Wrap data in a success envelope
pub fn envelope(data: Value) -> Value {
    json!({ "data": data, "success": true, "status": 200 })
}

/// 200 response carrying `data` in an envelope
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(envelope(data))
}

/// Error response in the service's format
pub fn error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "data": { "error": message, "request": "/3/test", "method": "GET" },
        "success": false,
        "status": status
    }))
}

/// Minimal image payload
pub fn image_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Image {}", id),
        "description": null,
        "datetime": 1700000000,
        "type": "image/png",
        "animated": false,
        "width": 100,
        "height": 100,
        "size": 1234,
        "views": 10,
        "bandwidth": 12340,
        "favorite": false,
        "nsfw": null,
        "account_url": null,
        "account_id": null,
        "in_gallery": false,
        "link": format!("https://i.imgur.com/{}.png", id)
    })
}

/// Minimal comment payload
pub fn comment_json(id: u64, parent_id: u64, children: Vec<Value>) -> Value {
    json!({
        "id": id,
        "image_id": "gal1",
        "comment": format!("comment {}", id),
        "author": "tester",
        "author_id": 7,
        "on_album": false,
        "ups": 3,
        "downs": 1,
        "points": 2,
        "datetime": 1700000000,
        "parent_id": parent_id,
        "deleted": false,
        "children": children
    })
}

/// Whether `haystack` contains `needle`
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Create a test PNG image
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    use image::codecs::png::PngEncoder;
    use image::{ImageBuffer, ImageEncoder, Rgb};

    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 255) / width) as u8,
            ((y * 255) / height) as u8,
            128,
        ])
    });

    let mut buffer = Vec::new();
    let encoder = PngEncoder::new(&mut buffer);
    encoder
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .expect("Failed to encode PNG");

    buffer
}
