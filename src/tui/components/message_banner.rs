// Message banner - the outcome of the most recent action

use crate::controller::{AppState, GOODBYE};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let color = if state.message == GOODBYE {
        theme.goodbye
    } else {
        theme.message
    };

    let banner = Paragraph::new(state.message.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );

    f.render_widget(banner, area);
}
