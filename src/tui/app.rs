// TUI application state
//
// View-only state (forms, focus, cursor, scroll) plus the handles the view
// needs to start controller actions. Everything the server decides lives in
// the controller; the App reads it through a fresh snapshot each frame.

use super::form::{ArticleField, ArticleForm, LoginForm};
use super::scroll::ScrollState;
use super::theme::Theme;
use crate::api::ArticleId;
use crate::controller::{AppState, Controller};
use crate::logging::LogBuffer;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Which half of the articles view takes keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    List,
}

/// Notifications from spawned actions back to the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Create succeeded; clear the form
    ArticleCreated,
}

pub struct App {
    pub controller: Arc<Controller>,
    pub log_buffer: LogBuffer,
    pub theme: Theme,
    /// Shown in the status bar
    pub api_url: String,

    pub login_form: LoginForm,
    pub article_form: ArticleForm,
    pub focus: Focus,

    /// Highlighted row in the article list
    pub list_cursor: usize,
    pub list_scroll: ScrollState,
    pub logs_scroll: ScrollState,
    pub show_logs: bool,

    pub should_quit: bool,
    pub start_time: Instant,
    animation_frame: usize,

    /// Selection the article form was last loaded from
    form_source: Option<ArticleId>,

    ui_tx: mpsc::UnboundedSender<UiEvent>,
    ui_rx: mpsc::UnboundedReceiver<UiEvent>,
}

impl App {
    pub fn new(
        controller: Arc<Controller>,
        log_buffer: LogBuffer,
        theme: Theme,
        api_url: impl Into<String>,
    ) -> Self {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            log_buffer,
            theme,
            api_url: api_url.into(),
            login_form: LoginForm::default(),
            article_form: ArticleForm::default(),
            focus: Focus::default(),
            list_cursor: 0,
            list_scroll: ScrollState::manual(),
            logs_scroll: ScrollState::new(),
            show_logs: true,
            should_quit: false,
            start_time: Instant::now(),
            animation_frame: 0,
            form_source: None,
            ui_tx,
            ui_rx,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame bookkeeping
    // ─────────────────────────────────────────────────────────────────────────

    /// Bring view state in line with a fresh controller snapshot
    pub fn sync(&mut self, state: &AppState) {
        // Selecting an article loads it into the form; clearing the
        // selection (edit done or cancelled) blanks the form
        if state.selected_article_id != self.form_source {
            match state.current_article() {
                Some(article) => self.article_form.prefill(article),
                None => self.article_form.reset(),
            }
            self.form_source = state.selected_article_id;
        }

        self.list_cursor = self.list_cursor.min(state.articles.len().saturating_sub(1));
    }

    /// Apply notifications from finished actions
    pub fn drain_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ArticleCreated => {
                    self.article_form.reset();
                }
            }
        }
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = (self.animation_frame + 1) % SPINNER.len();
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame]
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Focus and cursor
    // ─────────────────────────────────────────────────────────────────────────

    /// Tab order: title, text, topic, list
    pub fn focus_next(&mut self) {
        match (self.focus, self.article_form.focus) {
            (Focus::Form, ArticleField::Topic) => self.focus = Focus::List,
            (Focus::Form, field) => self.article_form.focus = field.next(),
            (Focus::List, _) => {
                self.focus = Focus::Form;
                self.article_form.focus = ArticleField::Title;
            }
        }
    }

    pub fn focus_prev(&mut self) {
        match (self.focus, self.article_form.focus) {
            (Focus::Form, ArticleField::Title) => self.focus = Focus::List,
            (Focus::Form, field) => self.article_form.focus = field.prev(),
            (Focus::List, _) => {
                self.focus = Focus::Form;
                self.article_form.focus = ArticleField::Topic;
            }
        }
    }

    pub fn cursor_up(&mut self) {
        self.list_cursor = self.list_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self, len: usize) {
        if self.list_cursor + 1 < len {
            self.list_cursor += 1;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn submit_login(&mut self) {
        let credentials = self.login_form.credentials();
        self.login_form.password.clear();
        self.spawn(move |c| async move { c.login(credentials).await });
    }

    /// F2: articles view, or login if there's no session
    pub fn open_articles(&mut self) {
        self.spawn(|c| async move { c.open_articles().await });
    }

    pub fn open_login(&mut self) {
        self.controller.open_login();
    }

    pub fn refresh(&mut self) {
        self.spawn(|c| async move { c.get_articles().await });
    }

    pub fn logout(&mut self) {
        self.controller.logout();
        self.login_form = LoginForm::default();
    }

    /// Create, or update the selected article
    pub fn submit_article(&mut self, state: &AppState) {
        match state.current_article() {
            Some(article) => {
                let article_id = article.article_id;
                let draft = self.article_form.draft(Some(&article.topic));
                self.spawn(move |c| async move { c.update_article(article_id, draft).await });
            }
            None => {
                let draft = self.article_form.draft(None);
                let ui_tx = self.ui_tx.clone();
                self.spawn(move |c| async move {
                    c.post_article(draft, move || {
                        let _ = ui_tx.send(UiEvent::ArticleCreated);
                    })
                    .await
                });
            }
        }
    }

    /// Load the highlighted article into the form
    pub fn edit_at_cursor(&mut self, state: &AppState) {
        if let Some(article) = state.articles.get(self.list_cursor) {
            self.controller.select_article(Some(article.article_id));
            self.focus = Focus::Form;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.controller.select_article(None);
        self.article_form.reset();
        self.form_source = None;
    }

    pub fn delete_at_cursor(&mut self, state: &AppState) {
        let index = self.list_cursor;
        if let Some(article) = state.articles.get(index) {
            let article_id = article.article_id;
            self.spawn(move |c| async move { c.delete_article(article_id, index).await });
        }
    }

    /// Run a controller action on its own task so the UI keeps drawing
    fn spawn<F, Fut>(&self, action: F)
    where
        F: FnOnce(Arc<Controller>) -> Fut,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
    {
        tokio::spawn(action(self.controller.clone()));
    }
}
