//! Response envelope.
//!
//! Every endpoint wraps its payload as `{"data": ..., "success": ..., "status": ...}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Endpoint payload
    pub data: T,
    /// Whether the service considers the call successful
    #[serde(default = "default_success")]
    pub success: bool,
    /// HTTP status echoed by the service
    #[serde(default)]
    pub status: u16,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Discard the envelope and keep the payload
    pub fn into_data(self) -> T {
        self.data
    }

    /// Transform the payload, keeping the envelope
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            success: self.success,
            status: self.status,
        }
    }
}

/// Envelope of an unsuccessful response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub data: Option<ErrorData>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorData {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub request: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

impl ErrorEnvelope {
    /// Human-readable error message, if the body carried one.
    ///
    /// `error` is either a plain string or an object with a `message` field.
    pub fn message(&self) -> Option<String> {
        let data = self.data.as_ref()?;
        let message = match data.error.as_ref()? {
            Value::String(s) => s.clone(),
            Value::Object(obj) => obj.get("message")?.as_str()?.to_string(),
            _ => return None,
        };

        Some(match (&data.method, &data.request) {
            (Some(method), Some(request)) => format!("{} ({} {})", message, method, request),
            _ => message,
        })
    }
}
