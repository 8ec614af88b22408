//! Wire types for the articles API
//!
//! Articles are treated as opaque records beyond `article_id`: any fields the
//! server adds are kept in `extra` and sent back untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Topics the article form offers. The server is the authority; the client
/// never rejects a topic it doesn't know.
pub const TOPICS: [&str; 3] = ["JavaScript", "React", "Node"];

/// Server-assigned article identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// An article as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: ArticleId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub topic: String,
    /// Fields the client doesn't interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Request body for create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub text: String,
    pub topic: String,
}

impl From<&Article> for ArticleDraft {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            text: article.text.clone(),
            topic: article.topic.clone(),
        }
    }
}

/// Login request body
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Never print the password, even at trace level
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `POST /login` success body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub token: String,
}

/// `GET /articles` success body
#[derive(Debug, Clone, Deserialize)]
pub struct ArticlesResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// `POST /articles` and `PUT /articles/:id` success body
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleResponse {
    #[serde(default)]
    pub message: String,
    pub article: Article,
}

/// `DELETE /articles/:id` success body
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Structured error body: `{ "message": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
