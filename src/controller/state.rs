//! UI-visible application state

use crate::api::{Article, ArticleId};

/// Message shown after any logout, explicit or forced by a 401
pub const GOODBYE: &str = "Goodbye!";

/// How an action settled
///
/// The message and route in [`AppState`] carry the details; this is for
/// callers that need to branch on the result, like the headless commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the request and state was reconciled
    Done,
    /// The request failed; `message` holds the reason
    Failed,
    /// An authenticated request got a 401 and the session was dropped
    LoggedOut,
}

/// Screens the client can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Articles,
}

impl Route {
    /// Short label shown at the right of the title bar
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Articles => "/articles",
        }
    }

    /// Display name for navigation tabs
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Articles => "Articles",
        }
    }
}

/// Everything the view layer renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Outcome of the most recent action, empty while one is starting
    pub message: String,
    /// Articles in server order
    pub articles: Vec<Article>,
    /// Article being edited, if any
    pub selected_article_id: Option<ArticleId>,
    /// An action's request is in flight (advisory)
    pub busy: bool,
    pub route: Route,
}

impl AppState {
    /// The article the selection points at
    pub fn current_article(&self) -> Option<&Article> {
        let id = self.selected_article_id?;
        self.articles.iter().find(|a| a.article_id == id)
    }

    /// Position of an article in the list
    pub fn index_of(&self, id: ArticleId) -> Option<usize> {
        self.articles.iter().position(|a| a.article_id == id)
    }

    /// Drop the selection if it no longer points at a listed article
    pub(super) fn prune_selection(&mut self) {
        if let Some(id) = self.selected_article_id {
            if self.index_of(id).is_none() {
                self.selected_article_id = None;
            }
        }
    }
}
