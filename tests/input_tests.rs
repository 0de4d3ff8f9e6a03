//! Key events driving the game through the per-screen key map

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tui_blocks::core::{GameState, MemoryStore};
use tui_blocks::input::{handle_key_event, should_quit};
use tui_blocks::types::{Command, Screen};

fn press(state: &mut GameState<MemoryStore>, code: KeyCode) -> bool {
    match handle_key_event(KeyEvent::from(code), state.screen()) {
        Some(command) => state.apply_command(command),
        None => false,
    }
}

#[test]
fn keys_walk_through_every_screen() {
    let mut state = GameState::new(2024, MemoryStore::new());

    assert!(press(&mut state, KeyCode::Char('f')));
    assert!(!state.settings().flash_effect);

    assert!(press(&mut state, KeyCode::Char('p')));
    assert_eq!(state.screen(), Screen::Playing);

    let x0 = state.active().unwrap().x;
    assert!(press(&mut state, KeyCode::Left));
    assert_eq!(state.active().unwrap().x, x0 - 1);
    assert!(press(&mut state, KeyCode::Down));
    assert_eq!(state.active().unwrap().y, 1);

    // Q does nothing mid-run.
    assert!(!press(&mut state, KeyCode::Char('q')));
    assert_eq!(state.screen(), Screen::Playing);

    assert!(press(&mut state, KeyCode::Char('p')));
    assert_eq!(state.screen(), Screen::Paused);
    assert!(!press(&mut state, KeyCode::Left));

    assert!(press(&mut state, KeyCode::Char('q')));
    assert_eq!(state.screen(), Screen::Start);

    assert!(press(&mut state, KeyCode::Char('q')));
    assert!(state.exit_requested());
}

#[test]
fn restart_key_only_on_game_over() {
    assert_eq!(
        handle_key_event(KeyEvent::from(KeyCode::Char('r')), Screen::GameOver),
        Some(Command::Restart)
    );
    for screen in [Screen::Start, Screen::Playing, Screen::Paused] {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('r')), screen), None);
    }
}

#[test]
fn ctrl_c_exits_from_anywhere() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(should_quit(ctrl_c));
    for screen in [Screen::Start, Screen::Playing, Screen::Paused, Screen::GameOver] {
        assert_eq!(handle_key_event(ctrl_c, screen), None);
    }
}
