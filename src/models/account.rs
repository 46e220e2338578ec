use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session identifier authorizing account operations
///
/// Issued and validated elsewhere; the client only forwards it. `Debug`
/// output is redacted so tokens don't leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Account information from GET /api/account/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub include_adult: bool,
    #[serde(default)]
    pub iso_639_1: Option<String>,
    #[serde(default)]
    pub iso_3166_1: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

/// Body of POST /api/account/{id}/favorite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRequest {
    pub media_type: MediaType,
    pub media_id: u64,
    pub favorite: bool,
}

impl FavoriteRequest {
    /// Marks (or unmarks) a movie as favorite
    pub fn movie(media_id: u64, favorite: bool) -> Self {
        Self {
            media_type: MediaType::Movie,
            media_id,
            favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteResponse {
    #[serde(default)]
    pub success: Option<bool>,
    pub status_code: i32,
    pub status_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("abc123");
        assert_eq!(format!("{:?}", token), "SessionToken(***)");
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn test_favorite_request_serialization() {
        let body = serde_json::to_value(FavoriteRequest::movie(550, true)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "media_type": "movie", "media_id": 550, "favorite": true })
        );
    }
}
