// Title bar component
//
// App name, busy spinner and the route tabs (F1 Login, F2 Articles).

use crate::controller::{AppState, Route};
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let theme = &app.theme;

    let mut spans = vec![Span::styled(
        " 📰 quire",
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    )];

    if state.busy {
        spans.push(Span::styled(
            format!(" {} working", app.spinner_char()),
            Style::default().fg(theme.title),
        ));
    }

    spans.push(Span::raw("  ──  "));

    for (key, route) in [("F1", Route::Login), ("F2", Route::Articles)] {
        let label = format!(" {} {} ", key, route.name());
        let style = if state.route == route {
            Style::default()
                .fg(theme.selected_fg)
                .bg(theme.selected_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.title))
            .title_top(Line::from(format!(" {} ", state.route.path())).right_aligned()),
    );

    f.render_widget(title, area);
}
