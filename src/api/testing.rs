//! Queued fake for controller tests
//!
//! Each operation pops the next queued reply. A call with nothing queued
//! fails as a transport error so a missing setup shows up in assertions.

use super::{
    ApiError, ArticleDraft, ArticleId, ArticleResponse, ArticlesApi, ArticlesResponse,
    Credentials, LoginResponse, MessageResponse,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// A recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    List,
    Create(ArticleDraft),
    Update(ArticleId, ArticleDraft),
    Delete(ArticleId),
}

#[derive(Default)]
pub struct FakeApi {
    logins: Mutex<VecDeque<Result<LoginResponse, ApiError>>>,
    lists: Mutex<VecDeque<Result<ArticlesResponse, ApiError>>>,
    creates: Mutex<VecDeque<Result<ArticleResponse, ApiError>>>,
    updates: Mutex<VecDeque<Result<ArticleResponse, ApiError>>>,
    deletes: Mutex<VecDeque<Result<MessageResponse, ApiError>>>,
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_login(&self, reply: Result<LoginResponse, ApiError>) {
        self.logins.lock().unwrap().push_back(reply);
    }

    pub fn queue_list(&self, reply: Result<ArticlesResponse, ApiError>) {
        self.lists.lock().unwrap().push_back(reply);
    }

    pub fn queue_create(&self, reply: Result<ArticleResponse, ApiError>) {
        self.creates.lock().unwrap().push_back(reply);
    }

    pub fn queue_update(&self, reply: Result<ArticleResponse, ApiError>) {
        self.updates.lock().unwrap().push_back(reply);
    }

    pub fn queue_delete(&self, reply: Result<MessageResponse, ApiError>) {
        self.deletes.lock().unwrap().push_back(reply);
    }

    /// Hold the next call until the returned sender fires (or is dropped)
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>) -> Result<T, ApiError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::transport("no fake reply queued")))
}

#[async_trait]
impl ArticlesApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.enter(Call::Login(credentials.username.clone())).await;
        pop(&self.logins)
    }

    async fn list_articles(&self) -> Result<ArticlesResponse, ApiError> {
        self.enter(Call::List).await;
        pop(&self.lists)
    }

    async fn create_article(&self, draft: &ArticleDraft) -> Result<ArticleResponse, ApiError> {
        self.enter(Call::Create(draft.clone())).await;
        pop(&self.creates)
    }

    async fn update_article(
        &self,
        id: ArticleId,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse, ApiError> {
        self.enter(Call::Update(id, draft.clone())).await;
        pop(&self.updates)
    }

    async fn delete_article(&self, id: ArticleId) -> Result<MessageResponse, ApiError> {
        self.enter(Call::Delete(id)).await;
        pop(&self.deletes)
    }
}
