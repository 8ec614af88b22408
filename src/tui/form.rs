// Form state for the login and article views
//
// Plain editing state, no rendering and no I/O. The App owns one of each
// form and feeds them key events when they have focus.

use crate::api::{Article, ArticleDraft, Credentials, TOPICS};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// Single-line text field with a cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in chars, 0..=len
    cursor: usize,
    /// Render as bullets (passwords)
    masked: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the contents and put the cursor at the end
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns false if the key isn't an editing key.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.type_char(c)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            _ => return false,
        }
        true
    }

    pub fn type_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Text as it should appear on screen
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.len())
        } else {
            self.value.clone()
        }
    }

    /// Terminal columns between the start of the field and the cursor
    pub fn cursor_col(&self) -> u16 {
        if self.masked {
            return self.cursor as u16;
        }
        let prefix: String = self.value.chars().take(self.cursor).collect();
        prefix.width() as u16
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Login form
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: TextInput,
    pub password: TextInput,
    pub focus: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: TextInput::new(),
            password: TextInput::masked(),
            focus: LoginField::Username,
        }
    }
}

impl LoginForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Credentials as typed; the server does all validation
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.value().trim(), self.password.value())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Article form
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleField {
    #[default]
    Title,
    Text,
    Topic,
}

impl ArticleField {
    pub fn next(self) -> Self {
        match self {
            ArticleField::Title => ArticleField::Text,
            ArticleField::Text => ArticleField::Topic,
            ArticleField::Topic => ArticleField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ArticleField::Title => ArticleField::Topic,
            ArticleField::Text => ArticleField::Title,
            ArticleField::Topic => ArticleField::Text,
        }
    }
}

/// Create/edit form. Topic is `None` until one is picked.
#[derive(Debug, Clone, Default)]
pub struct ArticleForm {
    pub title: TextInput,
    pub text: TextInput,
    pub topic: Option<usize>,
    pub focus: ArticleField,
}

impl ArticleForm {
    /// Back to a blank form
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load an existing article for editing
    pub fn prefill(&mut self, article: &Article) {
        self.title.set(article.title.clone());
        self.text.set(article.text.clone());
        // Topics outside the known set are sent back unchanged
        self.topic = TOPICS.iter().position(|t| *t == article.topic);
        self.focus = ArticleField::Title;
    }

    pub fn topic_name(&self) -> Option<&'static str> {
        self.topic.and_then(|i| TOPICS.get(i).copied())
    }

    pub fn next_topic(&mut self) {
        self.topic = Some(match self.topic {
            Some(i) => (i + 1) % TOPICS.len(),
            None => 0,
        });
    }

    pub fn prev_topic(&mut self) {
        self.topic = Some(match self.topic {
            Some(0) | None => TOPICS.len() - 1,
            Some(i) => i - 1,
        });
    }

    /// Route a key to the focused field. Returns false if unused.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match self.focus {
            ArticleField::Title => self.title.handle_key(key),
            ArticleField::Text => self.text.handle_key(key),
            ArticleField::Topic => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => {
                    self.next_topic();
                    true
                }
                KeyCode::Left => {
                    self.prev_topic();
                    true
                }
                _ => false,
            },
        }
    }

    /// Draft for submission; `fallback_topic` keeps an unrecognized topic
    /// from the article being edited
    pub fn draft(&self, fallback_topic: Option<&str>) -> ArticleDraft {
        ArticleDraft {
            title: self.title.value().trim().to_string(),
            text: self.text.value().trim().to_string(),
            topic: self
                .topic_name()
                .or(fallback_topic)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ArticleId;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn article(topic: &str) -> Article {
        Article {
            article_id: ArticleId(7),
            title: "Closures".to_string(),
            text: "They capture".to_string(),
            topic: topic.to_string(),
            extra: Default::default(),
        }
    }

    #[test]
    fn text_input_edits_at_cursor() {
        let mut input = TextInput::new();
        for c in "helo".chars() {
            input.type_char(c);
        }
        input.handle_key(&key(KeyCode::Left));
        input.type_char('l');
        assert_eq!(input.value(), "hello");

        input.handle_key(&key(KeyCode::Home));
        input.handle_key(&key(KeyCode::Delete));
        assert_eq!(input.value(), "ello");

        input.handle_key(&key(KeyCode::End));
        input.handle_key(&key(KeyCode::Backspace));
        assert_eq!(input.value(), "ell");
    }

    #[test]
    fn text_input_handles_multibyte() {
        let mut input = TextInput::new();
        input.set("héllo");
        input.handle_key(&key(KeyCode::Home));
        input.handle_key(&key(KeyCode::Right));
        input.handle_key(&key(KeyCode::Right));
        input.backspace();
        assert_eq!(input.value(), "hllo");
        assert_eq!(input.cursor_col(), 1);
    }

    #[test]
    fn cursor_col_counts_wide_chars() {
        let mut input = TextInput::new();
        input.set("日本");
        assert_eq!(input.cursor_col(), 4);
    }

    #[test]
    fn control_chars_are_not_typed() {
        let mut input = TextInput::new();
        let ctrl_o = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert!(!input.handle_key(&ctrl_o));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn password_is_masked() {
        let mut form = LoginForm::default();
        form.next_field();
        for c in "secret".chars() {
            form.focused_input().type_char(c);
        }
        assert_eq!(form.password.display(), "••••••");
        assert_eq!(form.credentials().password, "secret");
    }

    #[test]
    fn prefill_then_reset() {
        let mut form = ArticleForm::default();
        form.prefill(&article("React"));
        assert_eq!(form.title.value(), "Closures");
        assert_eq!(form.topic_name(), Some("React"));

        form.reset();
        assert_eq!(form.title.value(), "");
        assert_eq!(form.topic, None);
    }

    #[test]
    fn topic_cycles_through_known_topics() {
        let mut form = ArticleForm::default();
        form.prev_topic();
        assert_eq!(form.topic_name(), Some("Node"));
        form.next_topic();
        assert_eq!(form.topic_name(), Some("JavaScript"));
    }

    #[test]
    fn unknown_topic_survives_edit() {
        let mut form = ArticleForm::default();
        form.prefill(&article("Rust"));
        assert_eq!(form.topic, None);

        let draft = form.draft(Some("Rust"));
        assert_eq!(draft.topic, "Rust");
        assert_eq!(draft.title, "Closures");
    }

    #[test]
    fn draft_without_topic_sends_empty() {
        let mut form = ArticleForm::default();
        form.title.set("  Title  ");
        assert_eq!(form.draft(None).title, "Title");
        assert_eq!(form.draft(None).topic, "");
    }
}
