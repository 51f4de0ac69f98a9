//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

/// A user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(deserialize_with = "de::count")]
    pub id: u64,

    /// Username
    pub url: String,

    #[serde(default)]
    pub bio: Option<String>,

    /// Avatar image link
    #[serde(default)]
    pub avatar: Option<String>,

    /// Cover image link
    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default)]
    pub reputation: f64,

    /// Reputation tier name
    #[serde(default)]
    pub reputation_name: Option<String>,

    /// Account creation time (unix seconds)
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub created: Option<i64>,

    /// Pro subscription expiry (unix seconds); the service sends `false`
    /// for accounts without one
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub pro_expiration: Option<i64>,

    #[serde(default, deserialize_with = "de::flag")]
    pub is_blocked: bool,
}

impl AccountInfo {
    /// Account creation time as a UTC datetime
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        super::timestamp(self.created)
    }

    /// Whether the account has a pro subscription
    pub fn is_pro(&self) -> bool {
        self.pro_expiration.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_account_without_pro() {
        let account: AccountInfo = serde_json::from_value(serde_json::json!({
            "id": 384077,
            "url": "joshTest",
            "bio": "A real hoopy frood who really knows where his towel is at.",
            "reputation": 15303.84,
            "created": 1376951504,
            "pro_expiration": false
        }))
        .unwrap();

        assert_eq!(account.url, "joshTest");
        assert!(!account.is_pro());
        assert_eq!(account.created_at().map(|t| t.timestamp()), Some(1376951504));
    }
}
