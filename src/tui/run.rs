//! Picker effects boundary: terminal lifecycle, key mapping, event loop.
//!
//! The only module here with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//! Keys are read on the calling thread; there is nothing to run in the
//! background.

use std::io;
use std::sync::Once;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::error::Result;
use crate::interactive::{Selection, Selector};

use super::state::{Action, Picker, Screen, Transition};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action. The mapping
/// depends on the screen: `n` means "select none" on the list and "no"
/// on the confirmation gate.
pub fn map_key(key: KeyEvent, screen: Screen) -> Option<Action> {
    // Ctrl+C always cancels the group
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Cancel);
    }

    match (screen, key.code) {
        (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => Some(Action::Cancel),

        (Screen::Select, KeyCode::Up) | (Screen::Select, KeyCode::Char('k')) => {
            Some(Action::MoveUp)
        }
        (Screen::Select, KeyCode::Down) | (Screen::Select, KeyCode::Char('j')) => {
            Some(Action::MoveDown)
        }
        (Screen::Select, KeyCode::Char(' ')) => Some(Action::ToggleSelection),
        (Screen::Select, KeyCode::Char('a')) => Some(Action::SelectAll),
        (Screen::Select, KeyCode::Char('n')) => Some(Action::SelectNone),
        (Screen::Select, KeyCode::Enter) => Some(Action::Submit),

        (Screen::Confirm, KeyCode::Char('Y')) | (Screen::Confirm, KeyCode::Char('y')) => {
            Some(Action::ConfirmYes)
        }
        (Screen::Confirm, KeyCode::Char('N')) | (Screen::Confirm, KeyCode::Char('n')) => {
            Some(Action::ConfirmNo)
        }

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            // Best-effort terminal restoration
            let _ = restore_terminal();
            original_hook(panic_info);
        }));
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run one picker until the operator submits or cancels.
fn run_picker(terminal: &mut Term, mut picker: Picker) -> io::Result<Selection> {
    loop {
        terminal.draw(|frame| render(&picker, frame))?;

        let key = match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => key,
            _ => continue, // ignore mouse, resize, key release
        };

        let Some(action) = map_key(key, picker.screen) else {
            continue;
        };

        match update(picker, action) {
            Transition::Picker(next) => picker = next,
            Transition::Done(selection) => return Ok(selection),
        }
    }
}

/// [`Selector`] that shows a full-screen checkbox list per group.
///
/// The terminal is taken over only while a picker is open, so output
/// printed between groups lands on the normal screen.
#[derive(Debug, Default)]
pub struct TerminalSelector;

impl TerminalSelector {
    pub fn new() -> Self {
        install_panic_hook();
        TerminalSelector
    }
}

impl Selector for TerminalSelector {
    fn select(&mut self, header: &str, items: &[String]) -> Result<Selection> {
        let mut terminal = setup_terminal()?;
        let result = run_picker(&mut terminal, Picker::new(header, items.to_vec()));
        restore_terminal()?;
        Ok(result?)
    }
}

// ============================================================================
// TESTS
// ============================================================================
