//! reqwest-backed implementation of `ArticlesApi`

use super::error::ApiError;
use super::types::{
    ArticleDraft, ArticleId, ArticleResponse, ArticlesResponse, Credentials, ErrorBody,
    LoginResponse, MessageResponse,
};
use super::ArticlesApi;
use crate::session::SessionStore;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the articles server
///
/// The token is sent verbatim in `Authorization` (no scheme prefix), which is
/// what the server expects.
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:9000/api`)
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<dyn SessionStore>,
    ) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        tracing::debug!("API client rooted at {}", base_url);

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Attach the token as it is right now, not as it was when the action began
    fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.request(method, path);
        match self.session.token() {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        }
    }

    /// Send a request and decode the outcome
    ///
    /// 2xx bodies decode as `T`. Anything else becomes an `ApiError` with the
    /// `{message}` body if one parses. A 2xx whose body doesn't decode is
    /// reported as a transport failure: there was no usable response.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(method, path, "API request failed: {}", e);
                return Err(ApiError::transport(e.to_string()));
            }
        };

        let status = response.status();
        tracing::debug!(method, path, status = status.as_u16(), "API response");

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                tracing::warn!(method, path, "Undecodable success body: {}", e);
                ApiError::transport(format!("invalid response body: {}", e))
            })
        } else {
            let body = response.json::<ErrorBody>().await.ok();
            Err(ApiError::from_status(status.as_u16(), body))
        }
    }
}

#[async_trait]
impl ArticlesApi for HttpApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = self.request(Method::POST, "/login").json(credentials);
        self.execute("POST", "/login", request).await
    }

    async fn list_articles(&self) -> Result<ArticlesResponse, ApiError> {
        let request = self.authorized(Method::GET, "/articles");
        self.execute("GET", "/articles", request).await
    }

    async fn create_article(&self, draft: &ArticleDraft) -> Result<ArticleResponse, ApiError> {
        let request = self.authorized(Method::POST, "/articles").json(draft);
        self.execute("POST", "/articles", request).await
    }

    async fn update_article(
        &self,
        id: ArticleId,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse, ApiError> {
        let path = format!("/articles/{}", id);
        let request = self.authorized(Method::PUT, &path).json(draft);
        self.execute("PUT", &path, request).await
    }

    async fn delete_article(&self, id: ArticleId) -> Result<MessageResponse, ApiError> {
        let path = format!("/articles/{}", id);
        let request = self.authorized(Method::DELETE, &path);
        self.execute("DELETE", &path, request).await
    }
}
