use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use finboard::config::Config;
use finboard::store::Store;

use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::screens::cards::CARD_HEIGHT;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &mut dyn Store, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    app.refresh_all(store)?;
    tracing::info!(year = app.selected_year, "starting TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "TUI exited with an error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut dyn Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store),
                InputMode::Command => handle_command_input(key, app, store),
                InputMode::Confirm => handle_confirm_input(key, app, store),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut dyn Store) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('1') => switch_screen(app, store, Screen::Ledger),
        KeyCode::Char('2') => switch_screen(app, store, Screen::Cards),
        KeyCode::Char('3') => switch_screen(app, store, Screen::Goals),
        KeyCode::Char('4') => switch_screen(app, store, Screen::Projects),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, store, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, store, screens[prev]);
        }
        KeyCode::Enter | KeyCode::Char(' ') if app.screen == Screen::Ledger => {
            app.toggle_selected_month();
        }
        KeyCode::Char('p') if app.screen == Screen::Ledger => {
            commands::run_reporting("toggle-paid", app, store);
        }
        KeyCode::Char('H') => {
            commands::run_reporting("prev-year", app, store);
        }
        KeyCode::Char('L') => {
            commands::run_reporting("next-year", app, store);
        }
        KeyCode::Char('D') | KeyCode::Delete => {
            commands::run_reporting("delete", app, store);
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &mut dyn Store) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::run_reporting(&input, app, store);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &mut dyn Store) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => commands::confirm_pending(app, store),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
}

fn switch_screen(app: &mut App, store: &mut dyn Store, screen: Screen) {
    app.screen = screen;
    let refreshed = match screen {
        Screen::Ledger => app.refresh_ledger(store),
        Screen::Cards => app.refresh_cards(store),
        Screen::Goals => app.refresh_goals(store),
        Screen::Projects => app.refresh_projects(store),
    };
    match refreshed {
        Ok(()) => app.set_status(format!("{screen}")),
        Err(e) => {
            tracing::warn!(%screen, error = %e, "refresh failed");
            app.set_status(format!("Error: {e}"));
        }
    }
}

// ── Cursor movement ──────────────────────────────────────────

fn card_page(app: &App) -> usize {
    (app.visible_rows.saturating_sub(2) / CARD_HEIGHT).max(1)
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Ledger => {
            let len = app.ledger_rows().len();
            let page = app.ledger_page();
            scroll_down(&mut app.ledger_index, &mut app.ledger_scroll, len, page);
        }
        Screen::Cards => {
            let page = card_page(app);
            scroll_down(
                &mut app.card_index,
                &mut app.card_scroll,
                app.cards.len(),
                page,
            );
        }
        Screen::Goals => {
            let page = app.table_page();
            scroll_down(
                &mut app.goal_index,
                &mut app.goal_scroll,
                app.goals.len(),
                page,
            );
        }
        Screen::Projects => {
            let page = app.table_page();
            scroll_down(
                &mut app.project_index,
                &mut app.project_scroll,
                app.projects.len(),
                page,
            );
        }
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Ledger => scroll_up(&mut app.ledger_index, &mut app.ledger_scroll),
        Screen::Cards => scroll_up(&mut app.card_index, &mut app.card_scroll),
        Screen::Goals => scroll_up(&mut app.goal_index, &mut app.goal_scroll),
        Screen::Projects => scroll_up(&mut app.project_index, &mut app.project_scroll),
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Ledger => scroll_to_top(&mut app.ledger_index, &mut app.ledger_scroll),
        Screen::Cards => scroll_to_top(&mut app.card_index, &mut app.card_scroll),
        Screen::Goals => scroll_to_top(&mut app.goal_index, &mut app.goal_scroll),
        Screen::Projects => scroll_to_top(&mut app.project_index, &mut app.project_scroll),
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Ledger => {
            let len = app.ledger_rows().len();
            let page = app.ledger_page();
            scroll_to_bottom(&mut app.ledger_index, &mut app.ledger_scroll, len, page);
        }
        Screen::Cards => {
            let page = card_page(app);
            scroll_to_bottom(
                &mut app.card_index,
                &mut app.card_scroll,
                app.cards.len(),
                page,
            );
        }
        Screen::Goals => {
            let page = app.table_page();
            scroll_to_bottom(
                &mut app.goal_index,
                &mut app.goal_scroll,
                app.goals.len(),
                page,
            );
        }
        Screen::Projects => {
            let page = app.table_page();
            scroll_to_bottom(
                &mut app.project_index,
                &mut app.project_scroll,
                app.projects.len(),
                page,
            );
        }
    }
}
