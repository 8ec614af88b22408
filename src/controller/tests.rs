//! Controller behaviour tests against the queued fake API

use super::*;
use crate::api::testing::{Call, FakeApi};
use crate::api::{
    Article, ArticleResponse, ArticlesResponse, ErrorBody, LoginResponse, MessageResponse,
};
use crate::session::MemorySessionStore;

// ─────────────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────────────

fn article(id: u64, title: &str) -> Article {
    Article {
        article_id: ArticleId(id),
        title: title.to_string(),
        text: format!("{} text", title),
        topic: "React".to_string(),
        extra: Default::default(),
    }
}

fn draft(title: &str) -> ArticleDraft {
    ArticleDraft {
        title: title.to_string(),
        text: "body".to_string(),
        topic: "Node".to_string(),
    }
}

fn unauthorized() -> ApiError {
    ApiError::from_status(
        401,
        Some(ErrorBody {
            message: "Ouch: jwt expired".to_string(),
        }),
    )
}

fn listed(articles: Vec<Article>) -> Result<ArticlesResponse, ApiError> {
    Ok(ArticlesResponse {
        message: "Here are your articles".to_string(),
        articles,
    })
}

struct Harness {
    api: Arc<FakeApi>,
    session: Arc<MemorySessionStore>,
    controller: Arc<Controller>,
}

fn harness() -> Harness {
    harness_with_session(MemorySessionStore::with_token("tok"))
}

fn harness_with_session(session: MemorySessionStore) -> Harness {
    let api = Arc::new(FakeApi::new());
    let session = Arc::new(session);
    let controller = Arc::new(Controller::new(api.clone(), session.clone()));
    Harness {
        api,
        session,
        controller,
    }
}

impl Harness {
    /// Seed the list through a real list action
    async fn seed(&self, articles: Vec<Article>) {
        self.api.queue_list(listed(articles));
        self.controller.get_articles().await;
    }

    fn ids(&self) -> Vec<u64> {
        self.controller
            .snapshot()
            .articles
            .iter()
            .map(|a| a.article_id.0)
            .collect()
    }
}

/// Yield until `cond` holds; the spawned action runs in between
async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}

// ─────────────────────────────────────────────────────────────────────────────
// login
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_success_stores_token_and_navigates() {
    let h = harness_with_session(MemorySessionStore::new());
    h.api.queue_login(Ok(LoginResponse {
        message: "Here are your articles, foo!".to_string(),
        token: "fresh-token".to_string(),
    }));

    h.controller
        .login(Credentials::new("foo", "12345678"))
        .await;

    let state = h.controller.snapshot();
    assert_eq!(h.session.token().as_deref(), Some("fresh-token"));
    assert_eq!(state.route, Route::Articles);
    assert_eq!(state.message, "Here are your articles, foo!");
    assert!(!state.busy);
    assert_eq!(h.api.calls(), vec![Call::Login("foo".to_string())]);
}

#[tokio::test]
async fn login_invalid_credentials_shows_server_message() {
    let h = harness_with_session(MemorySessionStore::new());
    h.api.queue_login(Err(ApiError::from_status(
        400,
        Some(ErrorBody {
            message: "invalid credentials".to_string(),
        }),
    )));

    h.controller.login(Credentials::new("foo", "nope")).await;

    let state = h.controller.snapshot();
    assert_eq!(state.message, "invalid credentials");
    assert_eq!(h.session.token(), None);
    assert_eq!(state.route, Route::Login);
    assert!(!state.busy);
}

#[tokio::test]
async fn login_401_is_not_treated_as_expiry() {
    let h = harness_with_session(MemorySessionStore::new());
    h.api.queue_login(Err(unauthorized()));

    h.controller.login(Credentials::new("foo", "bar")).await;

    let state = h.controller.snapshot();
    assert_eq!(state.message, "Ouch: jwt expired");
    assert_ne!(state.message, GOODBYE);
}

// ─────────────────────────────────────────────────────────────────────────────
// 401 on authenticated actions
// ─────────────────────────────────────────────────────────────────────────────

fn assert_logged_out(h: &Harness) {
    let state = h.controller.snapshot();
    assert_eq!(h.session.token(), None);
    assert_eq!(state.message, GOODBYE);
    assert_eq!(state.route, Route::Login);
    assert!(!state.busy);
}

#[tokio::test]
async fn list_401_logs_out() {
    let h = harness();
    h.api.queue_list(Err(unauthorized()));

    assert_eq!(h.controller.get_articles().await, Outcome::LoggedOut);
    assert_logged_out(&h);
}

#[tokio::test]
async fn create_401_logs_out_without_callback() {
    let h = harness();
    h.api.queue_create(Err(unauthorized()));

    let mut called = false;
    h.controller
        .post_article(draft("x"), || called = true)
        .await;

    assert!(!called);
    assert_logged_out(&h);
}

#[tokio::test]
async fn update_401_logs_out() {
    let h = harness();
    h.seed(vec![article(1, "a")]).await;
    h.controller.select_article(Some(ArticleId(1)));
    h.api.queue_update(Err(unauthorized()));

    h.controller.update_article(ArticleId(1), draft("a2")).await;
    assert_logged_out(&h);
}

#[tokio::test]
async fn delete_401_logs_out() {
    let h = harness();
    h.seed(vec![article(1, "a")]).await;
    h.api.queue_delete(Err(unauthorized()));

    h.controller.delete_article(ArticleId(1), 0).await;
    assert_logged_out(&h);
    assert_eq!(h.ids(), vec![1]);
}

// ─────────────────────────────────────────────────────────────────────────────
// busy sequencing
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn busy_spans_exactly_the_request() {
    let h = harness();
    h.api.queue_list(listed(vec![article(1, "a")]));
    let release = h.api.hold_next();

    h.controller.logout();
    assert_eq!(h.controller.snapshot().message, GOODBYE);
    assert!(!h.controller.snapshot().busy);

    let task = tokio::spawn({
        let c = h.controller.clone();
        async move { c.get_articles().await }
    });

    let c = h.controller.clone();
    wait_until(move || c.snapshot().busy).await;
    let mid = h.controller.snapshot();
    assert!(mid.message.is_empty(), "message clears when an action starts");
    assert!(mid.articles.is_empty());

    release.send(()).unwrap();
    task.await.unwrap();

    let done = h.controller.snapshot();
    assert!(!done.busy);
    assert_eq!(done.articles.len(), 1);
}

#[tokio::test]
async fn busy_clears_on_failure() {
    let h = harness();
    h.api.queue_create(Err(ApiError::from_status(422, None)));
    let release = h.api.hold_next();

    let task = tokio::spawn({
        let c = h.controller.clone();
        async move { c.post_article(draft("t"), || {}).await }
    });

    let c = h.controller.clone();
    wait_until(move || c.snapshot().busy).await;
    release.send(()).unwrap();
    task.await.unwrap();

    let state = h.controller.snapshot();
    assert!(!state.busy);
    assert_eq!(state.message, "Request failed with status 422");
}

#[tokio::test]
async fn transport_failure_uses_fallback_and_keeps_session() {
    let h = harness();
    h.api.queue_list(Err(ApiError::transport("connection refused")));

    assert_eq!(h.controller.get_articles().await, Outcome::Failed);

    let state = h.controller.snapshot();
    assert_eq!(state.message, "Request failed: connection refused");
    assert!(!state.busy);
    assert_eq!(h.session.token().as_deref(), Some("tok"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Reconciliation
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_replaces_never_merges() {
    let h = harness();
    h.seed(vec![article(1, "a"), article(2, "b")]).await;
    assert_eq!(h.ids(), vec![1, 2]);

    h.seed(vec![article(3, "c")]).await;
    assert_eq!(h.ids(), vec![3]);
    assert_eq!(h.controller.snapshot().message, "Here are your articles");
}

#[tokio::test]
async fn list_drops_selection_of_vanished_article() {
    let h = harness();
    h.seed(vec![article(1, "a"), article(2, "b")]).await;
    h.controller.select_article(Some(ArticleId(2)));

    h.seed(vec![article(1, "a")]).await;
    assert_eq!(h.controller.snapshot().selected_article_id, None);
}

#[tokio::test]
async fn create_appends_and_calls_back_first() {
    let h = harness();
    h.seed(vec![article(1, "a"), article(2, "b")]).await;
    h.api.queue_create(Ok(ArticleResponse {
        message: "Well done, foo. Great article!".to_string(),
        article: article(3, "c"),
    }));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let c = h.controller.clone();
    let record = seen.clone();
    h.controller
        .post_article(draft("c"), move || {
            let state = c.snapshot();
            record.lock().unwrap().push((state.articles.len(), state.busy));
        })
        .await;

    // Callback ran once, before the append and before busy dropped
    assert_eq!(*seen.lock().unwrap(), vec![(2, true)]);
    assert_eq!(h.ids(), vec![1, 2, 3]);
    let state = h.controller.snapshot();
    assert_eq!(state.message, "Well done, foo. Great article!");
    assert!(!state.busy);
    assert_eq!(h.api.calls().last(), Some(&Call::Create(draft("c"))));
}

#[tokio::test]
async fn update_replaces_selected_slot_and_clears_selection() {
    let h = harness();
    h.seed(vec![article(1, "a"), article(2, "b")]).await;
    h.controller.select_article(Some(ArticleId(2)));
    h.api.queue_update(Ok(ArticleResponse {
        message: "Nice update".to_string(),
        article: article(2, "b2"),
    }));

    h.controller.update_article(ArticleId(2), draft("b2")).await;

    let state = h.controller.snapshot();
    assert_eq!(state.articles, vec![article(1, "a"), article(2, "b2")]);
    assert_eq!(state.selected_article_id, None);
    assert_eq!(state.message, "Nice update");
    assert_eq!(
        h.api.calls().last(),
        Some(&Call::Update(ArticleId(2), draft("b2")))
    );
}

#[tokio::test]
async fn update_uses_selection_not_payload_id_for_slot() {
    let h = harness();
    h.seed(vec![article(1, "a"), article(2, "b")]).await;
    h.controller.select_article(Some(ArticleId(1)));
    h.api.queue_update(Ok(ArticleResponse {
        message: "ok".to_string(),
        article: article(2, "b2"),
    }));

    h.controller.update_article(ArticleId(2), draft("b2")).await;

    // Slot 0 (the selection) receives the server's article, leaving two
    // entries with id 2. Keeping id and selection consistent is the caller's job.
    let titles: Vec<_> = h
        .controller
        .snapshot()
        .articles
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, vec!["b2", "b"]);
}

#[tokio::test]
async fn update_without_selection_leaves_list() {
    let h = harness();
    h.seed(vec![article(1, "a")]).await;
    h.api.queue_update(Ok(ArticleResponse {
        message: "ok".to_string(),
        article: article(1, "a2"),
    }));

    h.controller.update_article(ArticleId(1), draft("a2")).await;

    let state = h.controller.snapshot();
    assert_eq!(state.articles, vec![article(1, "a")]);
    assert_eq!(state.message, "ok");
    assert!(!state.busy);
}

#[tokio::test]
async fn delete_is_index_based() {
    let h = harness();
    h.seed(vec![article(1, "a"), article(2, "b"), article(3, "c")]).await;
    h.api.queue_delete(Ok(MessageResponse {
        message: "Article 3 was deleted".to_string(),
    }));

    // Id and index deliberately disagree
    h.controller.delete_article(ArticleId(3), 1).await;

    assert_eq!(h.ids(), vec![1, 3]);
    assert_eq!(h.controller.snapshot().message, "Article 3 was deleted");
    assert_eq!(h.api.calls().last(), Some(&Call::Delete(ArticleId(3))));
}

#[tokio::test]
async fn delete_out_of_range_keeps_list() {
    let h = harness();
    h.seed(vec![article(1, "a")]).await;
    h.api.queue_delete(Ok(MessageResponse {
        message: "gone".to_string(),
    }));

    h.controller.delete_article(ArticleId(1), 5).await;

    assert_eq!(h.ids(), vec![1]);
    assert!(!h.controller.snapshot().busy);
}

#[tokio::test]
async fn delete_clears_selection_of_removed_article() {
    let h = harness();
    h.seed(vec![article(1, "a"), article(2, "b")]).await;
    h.controller.select_article(Some(ArticleId(2)));
    h.api.queue_delete(Ok(MessageResponse {
        message: "gone".to_string(),
    }));

    h.controller.delete_article(ArticleId(2), 1).await;
    assert_eq!(h.controller.snapshot().selected_article_id, None);
}

// ─────────────────────────────────────────────────────────────────────────────
// logout, navigation, selection
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn logout_is_idempotent() {
    let h = harness_with_session(MemorySessionStore::new());
    h.controller.logout();
    h.controller.logout();

    let state = h.controller.snapshot();
    assert_eq!(state.message, GOODBYE);
    assert_eq!(state.route, Route::Login);
    assert!(h.api.calls().is_empty());
}

#[tokio::test]
async fn open_articles_without_session_stays_on_login() {
    let h = harness_with_session(MemorySessionStore::new());

    h.controller.open_articles().await;

    assert_eq!(h.controller.snapshot().route, Route::Login);
    assert!(h.api.calls().is_empty());
}

#[tokio::test]
async fn open_articles_with_session_fetches() {
    let h = harness();
    h.api.queue_list(listed(vec![article(1, "a")]));

    h.controller.open_articles().await;

    let state = h.controller.snapshot();
    assert_eq!(state.route, Route::Articles);
    assert_eq!(state.articles.len(), 1);
    assert_eq!(h.api.calls(), vec![Call::List]);
}

#[tokio::test]
async fn select_unknown_article_clears_selection() {
    let h = harness();
    h.seed(vec![article(1, "a")]).await;

    h.controller.select_article(Some(ArticleId(1)));
    assert_eq!(
        h.controller.snapshot().current_article().map(|a| a.title.clone()),
        Some("a".to_string())
    );

    h.controller.select_article(Some(ArticleId(42)));
    assert_eq!(h.controller.snapshot().selected_article_id, None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlapping actions
// ─────────────────────────────────────────────────────────────────────────────

/// Slow list resolving after a delete overwrites it
async fn slow_list_then_delete(discard: bool) -> Vec<u64> {
    let api = Arc::new(FakeApi::new());
    let session = Arc::new(MemorySessionStore::with_token("tok"));
    let controller = Arc::new(
        Controller::new(api.clone(), session).with_stale_list_discard(discard),
    );

    api.queue_list(listed(vec![article(1, "a"), article(2, "b")]));
    controller.get_articles().await;

    api.queue_list(listed(vec![article(1, "a"), article(2, "b")]));
    api.queue_delete(Ok(MessageResponse {
        message: "deleted".to_string(),
    }));
    let release_list = api.hold_next();

    let slow = tokio::spawn({
        let c = controller.clone();
        async move { c.get_articles().await }
    });
    let a = api.clone();
    wait_until(move || a.calls().len() == 2).await;

    controller.delete_article(ArticleId(2), 1).await;
    release_list.send(()).unwrap();
    slow.await.unwrap();

    let state = controller.snapshot();
    assert!(!state.busy);
    state.articles.iter().map(|a| a.article_id.0).collect()
}

#[tokio::test]
async fn stale_list_overwrites_delete_by_default() {
    assert_eq!(slow_list_then_delete(false).await, vec![1, 2]);
}

#[tokio::test]
async fn stale_list_discarded_when_enabled() {
    assert_eq!(slow_list_then_delete(true).await, vec![1]);
}

#[tokio::test]
async fn successful_list_reports_done() {
    let h = harness();
    h.api.queue_list(Ok(ArticlesResponse {
        message: "Here are your articles".to_string(),
        articles: vec![article(1, "a")],
    }));

    assert_eq!(h.controller.get_articles().await, Outcome::Done);
    // The controller starts on the login route and a list never navigates
    assert_eq!(h.controller.snapshot().route, Route::Login);
}
