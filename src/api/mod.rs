// API module - thin async request layer for the articles server
//
// `ArticlesApi` is the seam the controller depends on. `HttpApiClient` talks
// to the real server with reqwest; tests substitute a queued fake.

mod client;
mod error;
mod types;

pub use client::HttpApiClient;
pub use error::{status_fallback_message, ApiError, ApiErrorKind};
pub use types::{
    Article, ArticleDraft, ArticleId, ArticleResponse, ArticlesResponse, Credentials, ErrorBody,
    LoginResponse, MessageResponse, TOPICS,
};

use async_trait::async_trait;

/// Operations offered by the articles server
///
/// Every call is a single attempt. Authenticated operations read the current
/// session token at call time.
#[async_trait]
pub trait ArticlesApi: Send + Sync {
    /// `POST /login` (unauthenticated)
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// `GET /articles`
    async fn list_articles(&self) -> Result<ArticlesResponse, ApiError>;

    /// `POST /articles`, echoes the created article
    async fn create_article(&self, draft: &ArticleDraft) -> Result<ArticleResponse, ApiError>;

    /// `PUT /articles/:id`
    async fn update_article(
        &self,
        id: ArticleId,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse, ApiError>;

    /// `DELETE /articles/:id`
    async fn delete_article(&self, id: ArticleId) -> Result<MessageResponse, ApiError>;
}

#[cfg(test)]
pub(crate) mod testing;
