//! Application state controller
//!
//! Owns the UI-visible state and runs each user action through the API:
//!
//! 1. clear the message and raise `busy`
//! 2. call the API
//! 3. on success reconcile the response into state, take the server message
//! 4. on failure either log out (401 on an authenticated call) or show the
//!    server's message
//!
//! `busy` always drops when the action settles. Actions are not mutually
//! exclusive: the view spawns each one as its own task, and the state lock is
//! never held across an `.await`.

mod state;

#[cfg(test)]
mod tests;

pub use state::{AppState, Outcome, Route, GOODBYE};

use crate::api::{ApiError, ArticleDraft, ArticleId, ArticlesApi, Credentials};
use crate::session::SessionStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Drives actions and holds the resulting state
pub struct Controller {
    api: Arc<dyn ArticlesApi>,
    session: Arc<dyn SessionStore>,
    state: Mutex<AppState>,
    /// Discard list responses overtaken by a newer list or a mutation
    discard_stale_lists: bool,
    list_generation: AtomicU64,
}

impl Controller {
    pub fn new(api: Arc<dyn ArticlesApi>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            session,
            state: Mutex::new(AppState::default()),
            discard_stale_lists: false,
            list_generation: AtomicU64::new(0),
        }
    }

    /// Opt in to dropping stale `list_articles` responses
    ///
    /// Off by default, so a slow list that resolves after a delete still
    /// overwrites the list.
    pub fn with_stale_list_discard(mut self, enabled: bool) -> Self {
        self.discard_stale_lists = enabled;
        self
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> AppState {
        self.lock().clone()
    }

    pub fn has_session(&self) -> bool {
        self.session.token().is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Log in and, on success, store the token and go to the articles view
    pub async fn login(&self, credentials: Credentials) -> Outcome {
        self.begin("login");

        match self.api.login(&credentials).await {
            Ok(response) => {
                if let Err(e) = self.session.set_token(&response.token) {
                    tracing::error!("Failed to persist session: {}", e);
                }
                tracing::info!(username = %credentials.username, "Logged in");

                let mut state = self.lock();
                state.message = response.message;
                state.busy = false;
                state.route = Route::Articles;
                Outcome::Done
            }
            // A rejected login is never a session expiry
            Err(e) => self.fail("login", e, false),
        }
    }

    /// Replace the article list with the server's
    pub async fn get_articles(&self) -> Outcome {
        self.begin("list_articles");
        let generation = self.list_generation.fetch_add(1, Ordering::SeqCst) + 1;

        match self.api.list_articles().await {
            Ok(response) => {
                let mut state = self.lock();
                let current = self.list_generation.load(Ordering::SeqCst);
                if self.discard_stale_lists && current != generation {
                    tracing::debug!(generation, current, "Discarding stale article list");
                } else {
                    tracing::debug!(count = response.articles.len(), "Articles loaded");
                    state.articles = response.articles;
                    state.prune_selection();
                }
                state.message = response.message;
                state.busy = false;
                Outcome::Done
            }
            Err(e) => self.fail("list_articles", e, true),
        }
    }

    /// Create an article and append the server's copy to the list
    ///
    /// `on_created` runs exactly once on success, before any further state
    /// change. It is not called on failure.
    pub async fn post_article<F>(&self, draft: ArticleDraft, on_created: F) -> Outcome
    where
        F: FnOnce() + Send,
    {
        self.begin("create_article");

        match self.api.create_article(&draft).await {
            Ok(response) => {
                on_created();
                self.invalidate_lists();

                let mut state = self.lock();
                let article = response.article;
                match state.index_of(article.article_id) {
                    // Keep ids unique if the server echoes one we already hold
                    Some(index) => {
                        tracing::warn!(article_id = %article.article_id, "Created article id already listed");
                        state.articles[index] = article;
                    }
                    None => state.articles.push(article),
                }
                state.message = response.message;
                state.busy = false;
                Outcome::Done
            }
            Err(e) => self.fail("create_article", e, true),
        }
    }

    /// Update an article and swap the server's copy into the selected slot
    ///
    /// The request goes to `article_id`, but the slot replaced locally is the
    /// one matching the selection at the time of the call. Callers keep the
    /// two consistent. The selection is cleared on success.
    pub async fn update_article(&self, article_id: ArticleId, draft: ArticleDraft) -> Outcome {
        let selected = {
            let mut state = self.begin_locked("update_article");
            state.selected_article_id
        };

        match self.api.update_article(article_id, &draft).await {
            Ok(response) => {
                self.invalidate_lists();

                let mut state = self.lock();
                let returned = response.article.article_id;
                if selected.is_some_and(|id| id != returned) {
                    tracing::warn!(
                        %article_id,
                        %returned,
                        "Selected id and returned article disagree"
                    );
                }
                match selected.and_then(|id| state.index_of(id)) {
                    Some(index) => state.articles[index] = response.article,
                    None => tracing::warn!(
                        %article_id,
                        "Selected article no longer listed; update not applied locally"
                    ),
                }
                state.selected_article_id = None;
                state.message = response.message;
                state.busy = false;
                Outcome::Done
            }
            Err(e) => self.fail("update_article", e, true),
        }
    }

    /// Delete an article and remove the list entry at `index`
    ///
    /// Removal is by position, not by id: `article_id` and `index` must refer
    /// to the same article when the call is made.
    pub async fn delete_article(&self, article_id: ArticleId, index: usize) -> Outcome {
        self.begin("delete_article");

        match self.api.delete_article(article_id).await {
            Ok(response) => {
                self.invalidate_lists();

                let mut state = self.lock();
                if index < state.articles.len() {
                    let removed = state.articles.remove(index);
                    if removed.article_id != article_id {
                        tracing::warn!(
                            %article_id,
                            removed = %removed.article_id,
                            index,
                            "Deleted id and removed index disagree"
                        );
                    }
                    state.prune_selection();
                } else {
                    tracing::warn!(%article_id, index, "Delete index out of range");
                }
                state.message = response.message;
                state.busy = false;
                Outcome::Done
            }
            Err(e) => self.fail("delete_article", e, true),
        }
    }

    /// Forget the session and return to the login view
    ///
    /// Safe to call with no session.
    pub fn logout(&self) {
        if let Err(e) = self.session.clear() {
            tracing::error!("Failed to clear session: {}", e);
        }
        tracing::info!("Logged out");

        let mut state = self.lock();
        state.message = GOODBYE.to_string();
        state.route = Route::Login;
        state.prune_selection();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation and selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Go to the articles view and load the list
    ///
    /// Without a stored token this lands on the login view instead and makes
    /// no request.
    pub async fn open_articles(&self) {
        if !self.has_session() {
            tracing::debug!("No session, staying on login");
            self.lock().route = Route::Login;
            return;
        }
        self.lock().route = Route::Articles;
        self.get_articles().await;
    }

    pub fn open_login(&self) {
        self.lock().route = Route::Login;
    }

    /// Select an article for editing, or clear the selection with `None`
    ///
    /// Ids that aren't in the list clear the selection.
    pub fn select_article(&self, article_id: Option<ArticleId>) {
        let mut state = self.lock();
        let listed = article_id.filter(|id| state.index_of(*id).is_some());
        state.selected_article_id = listed;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self, action: &'static str) {
        drop(self.begin_locked(action));
    }

    fn begin_locked(&self, action: &'static str) -> MutexGuard<'_, AppState> {
        tracing::debug!(action, "Action started");
        let mut state = self.lock();
        state.message.clear();
        state.busy = true;
        state
    }

    fn invalidate_lists(&self) {
        self.list_generation.fetch_add(1, Ordering::SeqCst);
    }

    fn fail(&self, action: &'static str, error: ApiError, authenticated: bool) -> Outcome {
        if authenticated && error.is_unauthorized() {
            tracing::info!(action, "Session rejected by server");
            self.logout();
            self.lock().busy = false;
            return Outcome::LoggedOut;
        }

        tracing::warn!(action, status = ?error.status(), "Action failed: {}", error);
        let mut state = self.lock();
        state.message = error.user_message();
        state.busy = false;
        Outcome::Failed
    }
}
