use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::tracker::Tracker;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(tracker: &mut Tracker, config: &Config) -> Result<()> {
    let mut app = App::new(
        config.currency.clone(),
        config.export_path.clone(),
        tracker.today(),
    );
    app.refresh(tracker)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, tracker);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tracker: &mut Tracker,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, form, KPI line, table borders and header
            let content_height = f.area().height.saturating_sub(10) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // A failed store call is reported and the session carries on.
            if let Err(e) = handle_key(key, app, tracker) {
                tracing::error!(error = %e, "action failed");
                app.input_mode = InputMode::Normal;
                app.set_status(format!("Error: {e:#}"));
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_key(key: KeyEvent, app: &mut App, tracker: &mut Tracker) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, tracker),
        InputMode::Command => handle_command_input(key, app, tracker),
        InputMode::Editing => handle_editing_input(key, app, tracker),
        InputMode::Confirm => handle_confirm_input(key, app, tracker),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, tracker: &mut Tracker) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('1') => switch_screen(app, tracker, Screen::Transactions)?,
        KeyCode::Char('2') => switch_screen(app, tracker, Screen::Insights)?,
        KeyCode::Tab | KeyCode::BackTab => {
            let next = match app.screen {
                Screen::Transactions => Screen::Insights,
                Screen::Insights => Screen::Transactions,
            };
            switch_screen(app, tracker, next)?;
        }
        KeyCode::Char('a') => app.start_editing(),
        KeyCode::Char('j') | KeyCode::Down => scroll_down(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.overview.transactions.len(),
            app.visible_rows.max(1),
        ),
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('g') => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('G') => scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.overview.transactions.len(),
            app.visible_rows.max(1),
        ),
        KeyCode::Char('x') => app.delete_latest(tracker)?,
        KeyCode::Char('X') => app.request_delete_all(),
        KeyCode::Char('e') => app.export(tracker, None)?,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, tracker: &mut Tracker) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, tracker)?;
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
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: KeyEvent, app: &mut App, tracker: &mut Tracker) -> Result<()> {
    match key.code {
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.reset_form(tracker.today());
            app.set_status("Form cleared");
        }
        KeyCode::Enter => app.submit_form(tracker)?,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.prev_field(),
        KeyCode::Left => app.cycle_category(false),
        KeyCode::Right => app.cycle_category(true),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, tracker: &mut Tracker) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(tracker)?,
        // Any other key = cancel
        _ => app.cancel_pending(),
    }
    Ok(())
}

fn switch_screen(app: &mut App, tracker: &Tracker, screen: Screen) -> Result<()> {
    app.screen = screen;
    app.refresh(tracker)
}
