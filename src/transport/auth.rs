//! Credential handling.
//!
//! Requests are authorized in one of two ways:
//! 1. `Authorization: Bearer <access_token>` when a user token is available
//! 2. `Authorization: Client-ID <client_id>` for anonymous, app-level access

use crate::config::AuthConfig;
use crate::models::OAuthToken;

/// Application and user credentials
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Registered application client ID
    pub client_id: String,
    /// Application secret, needed for token refresh
    pub client_secret: Option<String>,
    /// OAuth access token
    pub access_token: Option<String>,
    /// OAuth refresh token
    pub refresh_token: Option<String>,
}

impl Credentials {
    /// Anonymous credentials for a client ID
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Value for the Authorization header
    pub fn authorization_header(&self) -> String {
        match &self.access_token {
            Some(token) => format!("Bearer {}", token),
            None => format!("Client-ID {}", self.client_id),
        }
    }

    /// Whether user-scoped endpoints can be called
    pub fn has_oauth(&self) -> bool {
        self.access_token.is_some()
    }

    /// Whether the access token can be refreshed
    pub fn can_refresh(&self) -> bool {
        self.client_secret.is_some() && self.refresh_token.is_some()
    }

    /// Replace the user tokens with freshly issued ones
    pub(crate) fn apply_token(&mut self, token: &OAuthToken) {
        self.access_token = Some(token.access_token.clone());
        self.refresh_token = Some(token.refresh_token.clone());
    }
}

impl From<&AuthConfig> for Credentials {
    fn from(config: &AuthConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: non_blank(&config.client_secret),
            access_token: non_blank(&config.access_token),
            refresh_token: non_blank(&config.refresh_token),
        }
    }
}

impl From<Credentials> for AuthConfig {
    fn from(credentials: Credentials) -> Self {
        Self {
            client_id: credentials.client_id,
            client_secret: credentials.client_secret,
            access_token: credentials.access_token,
            refresh_token: credentials.refresh_token,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        let anonymous = Credentials::new("abc123");
        assert_eq!(anonymous.authorization_header(), "Client-ID abc123");
        assert!(!anonymous.has_oauth());

        let user = anonymous.with_access_token("tok");
        assert_eq!(user.authorization_header(), "Bearer tok");
        assert!(user.has_oauth());
    }

    #[test]
    fn test_can_refresh_needs_secret_and_refresh_token() {
        let credentials = Credentials::new("id").with_refresh_token("r");
        assert!(!credentials.can_refresh());
        assert!(credentials.with_client_secret("s").can_refresh());
    }

    #[test]
    fn test_blank_config_values_are_dropped() {
        let config = AuthConfig {
            client_id: "id".to_string(),
            client_secret: Some(String::new()),
            access_token: Some("  ".to_string()),
            refresh_token: Some("r".to_string()),
        };

        let credentials = Credentials::from(&config);
        assert_eq!(credentials.client_secret, None);
        assert_eq!(credentials.access_token, None);
        assert_eq!(credentials.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let credentials = Credentials::new("id").with_access_token("very-secret");
        assert!(!format!("{:?}", credentials).contains("very-secret"));
    }
}
