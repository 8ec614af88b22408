// TUI module - Terminal User Interface
//
// Manages the terminal UI using ratatui:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks)
// - Key dispatch to the App, which starts controller actions
// - Rendering from a fresh controller snapshot every frame

pub mod app;
pub mod components;
pub mod form;
pub mod layout;
pub mod scroll;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::controller::{AppState, Controller, Route};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, Focus};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use form::ArticleField;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use theme::Theme;

/// Run the TUI until the user quits
pub async fn run_tui(
    controller: Arc<Controller>,
    log_buffer: LogBuffer,
    config: &Config,
) -> Result<()> {
    let mut app = App::new(
        controller,
        log_buffer,
        Theme::by_name(&config.theme),
        config.api_url.clone(),
    );

    // A stored session goes straight to the articles
    if app.controller.has_session() {
        app.open_articles();
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal even if the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input and a redraw tick with `tokio::select!`. Actions
/// run on their own tasks; their results show up in the next snapshot.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // Spinner speed and the upper bound on how stale a frame can be
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        app.drain_ui_events();
        let state = app.controller.snapshot();
        app.sync(&state);

        terminal
            .draw(|f| ui::draw(f, app, &state))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Layered dispatch: global keys, then the current route
fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if handle_global_keys(app, &key) {
        return;
    }

    let state = app.controller.snapshot();
    match state.route {
        Route::Login => handle_login_keys(app, &key),
        Route::Articles => handle_article_keys(app, &key, &state),
    }
}

/// Keys that work on every route. Returns true if handled.
fn handle_global_keys(app: &mut App, key: &KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Up if shift => app.logs_scroll.scroll_up(),
        KeyCode::Down if shift => app.logs_scroll.scroll_down(),
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => app.should_quit = true,
        KeyCode::Char('o') if ctrl => app.logout(),
        KeyCode::Char('l') if ctrl => app.show_logs = !app.show_logs,
        KeyCode::F(1) => app.open_login(),
        KeyCode::F(2) => app.open_articles(),
        KeyCode::F(5) => {
            if app.controller.snapshot().route == Route::Articles {
                app.refresh();
            }
        }
        KeyCode::PageUp => app.logs_scroll.page_up(),
        KeyCode::PageDown => app.logs_scroll.page_down(),
        _ => return false,
    }
    true
}

fn handle_login_keys(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_form.next_field()
        }
        KeyCode::Enter => app.submit_login(),
        _ => {
            app.login_form.focused_input().handle_key(key);
        }
    }
}

fn handle_article_keys(app: &mut App, key: &KeyEvent, state: &AppState) {
    match key.code {
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Esc => app.cancel_edit(),
        _ => dispatch_article_focus(app, key, state),
    }
}

fn dispatch_article_focus(app: &mut App, key: &KeyEvent, state: &AppState) {
    match app.focus {
        Focus::List => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => app.cursor_down(state.articles.len()),
            KeyCode::Home => app.list_cursor = 0,
            KeyCode::End => app.list_cursor = state.articles.len().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char('e') => app.edit_at_cursor(state),
            KeyCode::Delete | KeyCode::Char('d') => app.delete_at_cursor(state),
            _ => {}
        },
        Focus::Form => match key.code {
            KeyCode::Enter => app.submit_article(state),
            KeyCode::Up => app.focus_prev(),
            KeyCode::Down if app.article_form.focus != ArticleField::Topic => app.focus_next(),
            _ => {
                app.article_form.handle_key(key);
            }
        },
    }
}
