// Article form - create a new article, or edit the selected one

use super::render_input;
use crate::api::TOPICS;
use crate::controller::AppState;
use crate::tui::app::{App, Focus};
use crate::tui::form::ArticleField;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let theme = &app.theme;
    let form = &app.article_form;
    let focused = app.focus == Focus::Form;

    let heading = match state.current_article() {
        Some(article) => format!(" Edit article #{} ", article.article_id),
        None => " Create article ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(focused))
        .title(heading);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [title, text, topic, hint] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .areas(inner);

    render_input(
        f,
        title,
        "Title",
        &form.title,
        focused && form.focus == ArticleField::Title,
        theme,
    );
    render_input(
        f,
        text,
        "Text",
        &form.text,
        focused && form.focus == ArticleField::Text,
        theme,
    );

    // Topic picker: ◀ JavaScript React Node ▶
    let mut spans = vec![Span::raw(" ◀ ")];
    for (i, name) in TOPICS.iter().enumerate() {
        let style = if form.topic == Some(i) {
            Style::default()
                .fg(theme.selected_fg)
                .bg(theme.selected_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(format!(" {} ", name), style));
    }
    spans.push(Span::raw(" ▶"));
    if form.topic.is_none() {
        if let Some(current) = state.current_article() {
            spans.push(Span::styled(
                format!("  ({})", current.topic),
                Style::default().fg(theme.topic),
            ));
        }
    }

    let topic_focused = focused && form.focus == ArticleField::Topic;
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(theme.border_style(topic_focused))
                .title(" Topic "),
        ),
        topic,
    );

    let hint_text = if state.selected_article_id.is_some() {
        "Enter: save   Esc: cancel edit"
    } else {
        "Enter: submit   ←/→: topic"
    };
    f.render_widget(
        Paragraph::new(hint_text).style(Style::default().fg(theme.muted)),
        hint,
    );
}
