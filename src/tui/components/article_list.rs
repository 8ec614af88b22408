// Article list - one row per article, in server order
//
// Rows: "#id  [Topic]  Title - text", truncated to the panel width.

use super::scrollbar::render_scrollbar;
use crate::api::Article;
use crate::controller::AppState;
use crate::tui::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(f: &mut Frame, area: Rect, app: &mut App, state: &AppState) {
    let focused = app.focus == Focus::List;
    let viewport = area.height.saturating_sub(2) as usize;

    app.list_scroll
        .update_dimensions(state.articles.len(), viewport);
    app.list_scroll.ensure_visible(app.list_cursor);

    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(focused))
        .title(format!(" Articles ({}) ", state.articles.len()));

    if state.articles.is_empty() {
        let empty = Paragraph::new("No articles yet")
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let row_width = area.width.saturating_sub(3) as usize;
    let (start, end) = app.list_scroll.visible_range();

    let items: Vec<ListItem> = state.articles[start..end]
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let index = start + i;
            let editing = state.selected_article_id == Some(article.article_id);
            let line = article_line(article, editing, row_width, app);

            let style = if focused && index == app.list_cursor {
                Style::default()
                    .fg(theme.selected_fg)
                    .bg(theme.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
    render_scrollbar(f, area, &app.list_scroll);
}

fn article_line(article: &Article, editing: bool, width: usize, app: &App) -> Line<'static> {
    let theme = &app.theme;
    let marker = if editing { "✎ " } else { "  " };
    let id = format!("#{:<4} ", article.article_id);
    let topic = format!("[{}] ", article.topic);

    let used = marker.width() + id.width() + topic.width();
    let body = if article.text.is_empty() {
        article.title.clone()
    } else {
        format!("{} — {}", article.title, article.text)
    };

    Line::from(vec![
        Span::raw(marker),
        Span::styled(id, Style::default().fg(theme.muted)),
        Span::styled(topic, Style::default().fg(theme.topic)),
        Span::raw(truncate(&body, width.saturating_sub(used))),
    ])
}

/// Cut `s` to at most `max` terminal columns, ending in '…' if shortened
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
