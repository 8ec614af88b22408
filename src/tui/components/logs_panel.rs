//! Logs panel component
//!
//! Displays captured tracing events, newest at the bottom. Follows new
//! entries until scrolled up with PageUp; PageDown back to the bottom resumes.

use super::scrollbar::render_scrollbar;
use crate::logging::LogEntry;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let height = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.get_all();

    app.logs_scroll.update_dimensions(entries.len(), height);
    let (start, end) = app.logs_scroll.visible_range();

    let theme = &app.theme;
    let items: Vec<ListItem> = entries[start..end]
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(theme.log_style(entry.level)))
        .collect();

    let title = if app.logs_scroll.auto_follow {
        " System Logs ".to_string()
    } else {
        format!(" System Logs [scroll {}/{}] ", end, entries.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(false))
            .title(title),
    );

    f.render_widget(list, area);
    render_scrollbar(f, area, &app.logs_scroll);
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}
