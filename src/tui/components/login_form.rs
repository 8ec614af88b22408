// Login form - username and password, Enter submits

use super::render_input;
use crate::tui::app::App;
use crate::tui::form::LoginField;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

const FORM_WIDTH: u16 = 48;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let form = &app.login_form;

    // Centered column
    let width = FORM_WIDTH.min(area.width);
    let column = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let [heading, username, password, hint] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
    ])
    .areas(column);

    f.render_widget(
        Paragraph::new("Login").style(Style::default().fg(theme.title)),
        heading,
    );
    render_input(
        f,
        username,
        "Username",
        &form.username,
        form.focus == LoginField::Username,
        theme,
    );
    render_input(
        f,
        password,
        "Password",
        &form.password,
        form.focus == LoginField::Password,
        theme,
    );
    f.render_widget(
        Paragraph::new("Tab: next field   Enter: submit").style(Style::default().fg(theme.muted)),
        hint,
    );
}
