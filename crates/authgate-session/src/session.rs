//! Session types: the token itself and where it is kept.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SessionToken
// ---------------------------------------------------------------------------

/// The opaque bearer credential issued by the authentication endpoint.
///
/// Authgate never looks inside it. The only thing anyone does with it is
/// store it, check it exists, and echo it back in an `Authorization`
/// header.
///
/// There is no `Display` impl and `Debug` is redacted, so a
/// token can't end up in a log line by accident. Use [`as_str`](Self::as_str)
/// when the raw value is genuinely needed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for SessionToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for SessionToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(<{} bytes>)", self.0.len())
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Where the token lives inside a store.
///
/// Defaults mirror a browser cookie named `access_token` scoped to the
/// whole application (`/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// The storage key.
    pub key: String,

    /// The scope the entry applies to.
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key: "access_token".to_string(),
            path: "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_hides_value() {
        let token = SessionToken::new("super-secret");
        let printed = format!("{token:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("12 bytes"));
    }

    #[test]
    fn test_token_serializes_as_plain_string() {
        let json = serde_json::to_string(&SessionToken::new("T")).unwrap();
        assert_eq!(json, "\"T\"");
    }

    #[test]
    fn test_token_conversions() {
        assert_eq!(SessionToken::from("T").as_str(), "T");
        assert_eq!(SessionToken::from("T".to_string()).into_inner(), "T");
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.key, "access_token");
        assert_eq!(config.path, "/");
    }
}
