// Components module - UI building blocks
//
// Shell components are rendered on every route:
// - Title bar: app name, busy spinner, route tabs
// - Message banner: outcome of the last action
// - Logs panel: system log entries
// - Status bar: key hints, API URL, uptime
//
// Route bodies: login form (Login); article form and list (Articles).

pub mod article_form;
pub mod article_list;
pub mod login_form;
pub mod logs_panel;
pub mod message_banner;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;

use crate::tui::form::TextInput;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render a bordered single-line input, placing the terminal cursor in it
/// when focused
pub fn render_input(
    f: &mut Frame,
    area: Rect,
    label: &str,
    input: &TextInput,
    focused: bool,
    theme: &Theme,
) {
    let inner_width = area.width.saturating_sub(2);
    let cursor_col = input.cursor_col();

    // Keep the cursor in view for values wider than the field
    let skip = cursor_col.saturating_sub(inner_width.saturating_sub(1));

    let field = Paragraph::new(input.display())
        .style(Style::default().fg(theme.fg))
        .scroll((0, skip))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(theme.border_style(focused))
                .title(format!(" {} ", label)),
        );
    f.render_widget(field, area);

    if focused {
        f.set_cursor_position((area.x + 1 + cursor_col - skip, area.y + 1));
    }
}
