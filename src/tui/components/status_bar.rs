// Status bar component
//
// Key hints for the current route, then API URL and uptime when there's room.

use crate::controller::{AppState, Route};
use crate::tui::app::{App, Focus};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let bp = Breakpoint::from_width(area.width);

    let hints = match (state.route, app.focus) {
        (Route::Login, _) => "Enter login",
        (Route::Articles, Focus::Form) => "Enter submit │ Tab next │ F5 refresh",
        (Route::Articles, Focus::List) => "↑↓ move │ e edit │ d delete │ F5 refresh",
    };

    let status_text = if bp.at_least(Breakpoint::Wide) {
        format!(
            " {} │ ^O logout │ ^L logs │ ^Q quit │ {} │ {}",
            hints,
            app.api_url,
            app.uptime()
        )
    } else if bp.at_least(Breakpoint::Normal) {
        format!(" {} │ ^O logout │ ^Q quit", hints)
    } else {
        format!(" {}", hints)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
