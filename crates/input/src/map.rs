//! Key mapping from terminal events to game commands.
//!
//! The same key means different things on different screens (`Q` exits from
//! the start screen but returns to the menu from pause), so mapping takes the
//! current [`Screen`].

use crate::types::{Command, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to the command it triggers on `screen`.
pub fn handle_key_event(key: KeyEvent, screen: Screen) -> Option<Command> {
    match screen {
        Screen::Start => match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Play),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::ResetHighScore),
            KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::ToggleFlashEffect),
            _ => None,
        },
        Screen::Playing => match key.code {
            KeyCode::Left => Some(Command::MoveLeft),
            KeyCode::Right => Some(Command::MoveRight),
            KeyCode::Down => Some(Command::SoftDrop),
            KeyCode::Up => Some(Command::Rotate),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
            _ => None,
        },
        Screen::Paused => match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            _ => None,
        },
        Screen::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            _ => None,
        },
    }
}

/// Check if key should exit the program regardless of screen.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
