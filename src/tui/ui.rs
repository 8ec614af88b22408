// Frame layout
//
// ┌ title bar ─────────────────────────┐
// │ message banner                     │
// │ body (login form | article views)  │
// │ system logs (toggle with Ctrl+L)   │
// └ status bar ────────────────────────┘
//
// The body is dimmed while a request is in flight.

use super::app::App;
use super::components::{
    article_form, article_list, login_form, logs_panel, message_banner, status_bar, title_bar,
};
use super::layout::Breakpoint;
use crate::controller::{AppState, Route};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    Frame,
};

const LOGS_HEIGHT: u16 = 8;
const ARTICLE_FORM_HEIGHT: u16 = 12;

pub fn draw(f: &mut Frame, app: &mut App, state: &AppState) {
    let logs_height = if app.show_logs { LOGS_HEIGHT } else { 0 };

    let [title, message, body, logs, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Min(6),
        Constraint::Length(logs_height),
        Constraint::Length(2),
    ])
    .areas(f.area());

    title_bar::render(f, title, app, state);
    message_banner::render(f, message, state, &app.theme);

    match state.route {
        Route::Login => login_form::render(f, body, app),
        Route::Articles => draw_articles(f, body, app, state),
    }

    if state.busy {
        f.buffer_mut()
            .set_style(body, Style::default().add_modifier(Modifier::DIM));
    }

    if app.show_logs {
        logs_panel::render(f, logs, app);
    }
    status_bar::render(f, status, app, state);
}

fn draw_articles(f: &mut Frame, area: Rect, app: &mut App, state: &AppState) {
    let [form, list] = if Breakpoint::from_width(area.width).at_least(Breakpoint::Wide) {
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area)
    } else {
        Layout::vertical([Constraint::Length(ARTICLE_FORM_HEIGHT), Constraint::Min(3)]).areas(area)
    };

    article_form::render(f, form, app, state);
    article_list::render(f, list, app, state);
}
