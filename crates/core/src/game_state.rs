//! Game state module - the screen state machine and run lifecycle
//!
//! This module ties together the grid, locked cells, pieces, line clearing,
//! scoring, and the high-score store. It handles gravity timing, command
//! handling per screen, and the start/play/pause/game-over transitions.

use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::grid::Grid;
use crate::line_clear::{clear_lines, FlashEvent};
use crate::locked::LockedCells;
use crate::piece::Piece;
use crate::placement::{ghost, is_valid};
use crate::scoring::{beats_high_score, line_clear_score};
use crate::settings::Settings;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::store::HighScoreStore;
use crate::types::{Color, Command, Screen, FALL_INTERVAL_MS};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S> {
    screen: Screen,
    locked: LockedCells,
    /// Rebuilt from `locked` whenever it changes
    grid: Grid,
    active: Option<Piece>,
    score: u32,
    fall_timer_ms: u32,
    settings: Settings,
    rng: Pcg32,
    store: S,
    /// Flash request from the last lock (consumed by the front end)
    pending_flash: Option<FlashEvent>,
    exit_requested: bool,
}

impl<S: HighScoreStore> GameState<S> {
    /// Create a game on the start screen with default settings
    pub fn new(seed: u64, store: S) -> Self {
        Self::with_settings(seed, store, Settings::default())
    }

    pub fn with_settings(seed: u64, store: S, settings: Settings) -> Self {
        Self {
            screen: Screen::Start,
            locked: LockedCells::new(),
            grid: Grid::new(),
            active: None,
            score: 0,
            fall_timer_ms: 0,
            settings,
            rng: Pcg32::seed_from_u64(seed),
            store,
            pending_flash: None,
            exit_requested: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Stored high score, read from the store on every call
    pub fn high_score(&self) -> u32 {
        self.store.load()
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn locked(&self) -> &LockedCells {
        &self.locked
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Set once `Quit` is accepted on the start screen
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Take the flash request left by the last line clear, if any
    pub fn take_flash(&mut self) -> Option<FlashEvent> {
        self.pending_flash.take()
    }

    /// Resting position of the falling piece (render-only)
    pub fn ghost(&self) -> Option<Piece> {
        self.active.map(|piece| ghost(&piece, &self.grid))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.screen = self.screen;
        out.grid = self.grid;
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost = self.ghost().map(|g| g.cells());
        out.score = self.score;
        out.high_score = self.high_score();
        out.flash_effect = self.settings.flash_effect;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a command to the current screen
    ///
    /// Returns false when the command does not apply to the current screen or
    /// (for movement and rotation) when the piece could not move.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match (self.screen, command) {
            (Screen::Start, Command::Play) => {
                self.start_run();
                true
            }
            (Screen::Start, Command::ResetHighScore) => {
                self.store.reset();
                info!("high score reset");
                true
            }
            (Screen::Start, Command::ToggleFlashEffect) => {
                let on = self.settings.toggle_flash_effect();
                debug!("flash effect {}", if on { "on" } else { "off" });
                true
            }
            (Screen::Start, Command::Quit) => {
                self.exit_requested = true;
                true
            }

            (Screen::Playing, Command::MoveLeft) => self.try_move(-1, 0),
            (Screen::Playing, Command::MoveRight) => self.try_move(1, 0),
            (Screen::Playing, Command::SoftDrop) => self.try_move(0, 1),
            (Screen::Playing, Command::Rotate) => self.try_rotate(),
            (Screen::Playing, Command::Pause) => {
                self.set_screen(Screen::Paused);
                true
            }

            (Screen::Paused, Command::Pause) => {
                self.set_screen(Screen::Playing);
                true
            }
            (Screen::Paused, Command::Quit) => {
                self.quit_to_menu();
                true
            }

            (Screen::GameOver, Command::Restart) => {
                self.record_high_score();
                self.start_run();
                true
            }
            (Screen::GameOver, Command::Quit) => {
                self.quit_to_menu();
                true
            }

            _ => false,
        }
    }

    /// Advance gravity by `elapsed_ms`
    ///
    /// Only runs while playing. Once the fall timer reaches
    /// [`FALL_INTERVAL_MS`] it resets and the piece drops one row; a piece
    /// that cannot drop is locked. Returns true when the piece moved or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.screen != Screen::Playing {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < FALL_INTERVAL_MS {
            return false;
        }
        self.fall_timer_ms = 0;

        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Try to move the falling piece, reverting if the result is invalid
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        active.shift(dx, dy);
        if is_valid(active, &self.grid) {
            return true;
        }
        active.shift(-dx, -dy);
        false
    }

    /// Rotate clockwise; if blocked, rotate three more times to undo
    pub fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        active.rotate();
        if is_valid(active, &self.grid) {
            return true;
        }
        for _ in 0..3 {
            active.rotate();
        }
        false
    }

    /// Lock the falling piece, clear rows, score, and spawn the next piece
    ///
    /// Cells above the grid are dropped. If the next piece does not fit at its
    /// spawn position the run ends.
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        for (x, y) in piece.cells() {
            if y >= 0 {
                self.locked.insert(x, y, piece.color);
            }
        }

        let cleared = clear_lines(&mut self.locked, self.settings.flash_effect);
        let gained = line_clear_score(cleared.count());
        self.score = self.score.saturating_add(gained);
        if cleared.count() > 0 {
            debug!(
                "cleared rows {:?} (+{}, score {})",
                cleared.rows.as_slice(),
                gained,
                self.score
            );
        }
        self.pending_flash = cleared.flash;
        self.grid = Grid::build(&self.locked);

        self.spawn_piece();
    }

    /// Spawn a random piece; ends the run when it does not fit
    pub fn spawn_piece(&mut self) -> bool {
        let piece = Piece::spawn(&mut self.rng);
        if !is_valid(&piece, &self.grid) {
            debug!("spawn blocked at ({}, {})", piece.x, piece.y);
            self.active = None;
            self.enter_game_over();
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Replace the falling piece (scenario setup and tooling)
    ///
    /// Returns whether the piece fits where it was placed.
    pub fn set_active(&mut self, piece: Piece) -> bool {
        self.active = Some(piece);
        is_valid(&piece, &self.grid)
    }

    /// Lock a single block directly and rebuild the grid (scenario setup and tooling)
    pub fn insert_locked(&mut self, x: i8, y: i8, color: Color) {
        self.locked.insert(x, y, color);
        self.grid = Grid::build(&self.locked);
    }

    fn start_run(&mut self) {
        self.locked.clear();
        self.grid = Grid::build(&self.locked);
        self.score = 0;
        self.fall_timer_ms = 0;
        self.pending_flash = None;
        self.set_screen(Screen::Playing);
        self.spawn_piece();
    }

    fn enter_game_over(&mut self) {
        self.set_screen(Screen::GameOver);
        self.record_high_score();
    }

    fn quit_to_menu(&mut self) {
        self.locked.clear();
        self.grid = Grid::build(&self.locked);
        self.active = None;
        self.score = 0;
        self.fall_timer_ms = 0;
        self.pending_flash = None;
        self.set_screen(Screen::Start);
    }

    /// Persist the current score if it beats the stored high score
    fn record_high_score(&mut self) -> bool {
        let stored = self.store.load();
        if !beats_high_score(self.score, stored) {
            return false;
        }
        self.store.save(self.score);
        info!("new high score {} (was {})", self.score, stored);
        true
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        debug!("screen {} -> {}", self.screen.as_str(), screen.as_str());
        self.screen = screen;
        if matches!(screen, Screen::Start | Screen::GameOver) {
            self.store.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

    fn playing(seed: u64) -> GameState<MemoryStore> {
        let mut state = GameState::new(seed, MemoryStore::new());
        assert!(state.apply_command(Command::Play));
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345, MemoryStore::new());

        assert_eq!(state.screen(), Screen::Start);
        assert_eq!(state.score(), 0);
        assert!(state.active().is_none());
        assert!(state.locked().is_empty());
        assert!(!state.exit_requested());
    }

    #[test]
    fn test_play_spawns_piece() {
        let state = playing(12345);

        assert_eq!(state.screen(), Screen::Playing);
        let active = state.active().unwrap();
        assert_eq!(active.y, 0);
        assert_eq!(
            active.x,
            (BOARD_WIDTH / 2) as i8 - (active.shape.cols() / 2) as i8
        );
    }

    #[test]
    fn test_start_screen_commands() {
        let mut state = GameState::new(1, MemoryStore::with_high_score(900));

        assert!(state.apply_command(Command::ToggleFlashEffect));
        assert!(!state.settings().flash_effect);
        assert_eq!(state.screen(), Screen::Start);

        assert!(state.apply_command(Command::ResetHighScore));
        assert_eq!(state.high_score(), 0);
        assert_eq!(state.screen(), Screen::Start);

        assert!(!state.apply_command(Command::MoveLeft));
        assert!(!state.apply_command(Command::Restart));

        assert!(state.apply_command(Command::Quit));
        assert!(state.exit_requested());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = playing(3);
        let before = state.active();

        assert!(state.apply_command(Command::Pause));
        assert_eq!(state.screen(), Screen::Paused);

        // Paused: no gravity, no movement.
        assert!(!state.tick(FALL_INTERVAL_MS * 4));
        assert!(!state.apply_command(Command::MoveLeft));
        assert_eq!(state.active(), before);

        assert!(state.apply_command(Command::Pause));
        assert_eq!(state.screen(), Screen::Playing);
    }

    #[test]
    fn test_quit_from_pause_returns_to_start() {
        let mut state = playing(3);
        state.apply_command(Command::Pause);

        assert!(state.apply_command(Command::Quit));
        assert_eq!(state.screen(), Screen::Start);
        assert!(state.active().is_none());
        assert!(!state.exit_requested());
    }

    #[test]
    fn test_quit_ignored_while_playing() {
        let mut state = playing(3);
        assert!(!state.apply_command(Command::Quit));
        assert_eq!(state.screen(), Screen::Playing);
    }

    #[test]
    fn test_tick_waits_for_fall_interval() {
        let mut state = playing(5);
        let y0 = state.active().unwrap().y;

        assert!(!state.tick(FALL_INTERVAL_MS - 1));
        assert_eq!(state.active().unwrap().y, y0);

        assert!(state.tick(1));
        assert_eq!(state.active().unwrap().y, y0 + 1);
        assert_eq!(state.fall_timer_ms(), 0);
    }

    #[test]
    fn test_try_move_reverts_at_wall() {
        let mut state = playing(5);
        while state.try_move(-1, 0) {}
        let at_wall = state.active().unwrap();
        assert!(at_wall.cells().iter().any(|&(x, _)| x == 0));

        assert!(!state.apply_command(Command::MoveLeft));
        assert_eq!(state.active().unwrap(), at_wall);
    }

    #[test]
    fn test_rotate_blocked_restores_orientation() {
        let mut state = playing(5);
        // Vertical I against the right wall cannot turn horizontal.
        let mut piece = Piece::new(ShapeKind::I, Color::Cyan);
        piece.rotate();
        piece.x = 9;
        piece.y = 5;
        assert!(state.set_active(piece));

        assert!(!state.apply_command(Command::Rotate));
        assert_eq!(state.active().unwrap(), piece);
    }

    #[test]
    fn test_rotate_succeeds_in_open_space() {
        let mut state = playing(5);
        let mut piece = Piece::new(ShapeKind::T, Color::Purple);
        piece.y = 5;
        state.set_active(piece);

        assert!(state.apply_command(Command::Rotate));
        let rotated = state.active().unwrap();
        assert_eq!((rotated.shape.rows(), rotated.shape.cols()), (3, 2));
        assert_eq!((rotated.x, rotated.y), (piece.x, piece.y));
    }

    #[test]
    fn test_soft_drop_stops_at_floor() {
        let mut state = playing(9);
        let mut moves = 0;
        while state.apply_command(Command::SoftDrop) {
            moves += 1;
            assert!(moves <= BOARD_HEIGHT as usize);
        }
        let piece = state.active().unwrap();
        assert_eq!(state.ghost().unwrap(), piece);
        // Soft drop never locks on its own.
        assert!(state.locked().is_empty());
    }

    #[test]
    fn test_lock_piece_on_gravity() {
        let mut state = playing(11);
        while state.apply_command(Command::SoftDrop) {}
        let piece = state.active().unwrap();

        assert!(state.tick(FALL_INTERVAL_MS));

        assert_eq!(state.locked().len(), piece.cells().len());
        for (x, y) in piece.cells() {
            assert_eq!(state.locked().get(x, y), Some(piece.color));
            assert_eq!(state.grid().get(x, y), Some(Some(piece.color)));
        }
        assert!(state.active().is_some());
        assert_eq!(state.screen(), Screen::Playing);
    }

    #[test]
    fn test_lock_clears_row_and_scores() {
        let mut state = playing(21);
        for x in 0..9 {
            state.insert_locked(x, 19, Color::Red);
        }
        // Vertical I dropping into the gap at column 9.
        let mut piece = Piece::new(ShapeKind::I, Color::Cyan);
        piece.rotate();
        piece.x = 9;
        piece.y = 16;
        assert!(state.set_active(piece));

        state.lock_piece();

        assert_eq!(state.score(), 100);
        assert_eq!(state.locked().len(), 3);
        for y in 17..20 {
            assert_eq!(state.locked().get(9, y), Some(Color::Cyan));
        }
        assert!(state.take_flash().is_some());
        assert!(state.take_flash().is_none());
    }

    #[test]
    fn test_no_flash_when_disabled() {
        let mut state = GameState::with_settings(
            21,
            MemoryStore::new(),
            Settings {
                flash_effect: false,
            },
        );
        state.apply_command(Command::Play);
        for x in 0..9 {
            state.insert_locked(x, 19, Color::Red);
        }
        let mut piece = Piece::new(ShapeKind::I, Color::Cyan);
        piece.rotate();
        piece.x = 9;
        piece.y = 16;
        state.set_active(piece);

        state.lock_piece();

        assert_eq!(state.score(), 100);
        assert!(state.take_flash().is_none());
    }

    #[test]
    fn test_lock_drops_cells_above_grid() {
        let mut state = playing(2);
        let mut piece = Piece::new(ShapeKind::I, Color::Cyan);
        piece.rotate();
        piece.x = 0;
        piece.y = -2;
        state.set_active(piece);

        state.lock_piece();

        assert_eq!(state.locked().len(), 2);
        assert!(state.locked().contains(0, 0));
        assert!(state.locked().contains(0, 1));
    }

    #[test]
    fn test_blocked_spawn_ends_run_and_saves_high_score() {
        let mut state = GameState::new(8, MemoryStore::with_high_score(50));
        state.apply_command(Command::Play);
        // Fill the top two rows except one column so nothing clears.
        for y in 0..2 {
            for x in 1..BOARD_WIDTH as i8 {
                state.insert_locked(x, y, Color::Blue);
            }
        }
        state.score = 300;

        assert!(!state.spawn_piece());

        assert_eq!(state.screen(), Screen::GameOver);
        assert!(state.active().is_none());
        assert_eq!(state.high_score(), 300);
        assert_eq!(state.store().save_count(), 1);
    }

    #[test]
    fn test_game_over_keeps_better_high_score() {
        let mut state = GameState::new(8, MemoryStore::with_high_score(5000));
        state.apply_command(Command::Play);
        for x in 1..BOARD_WIDTH as i8 {
            state.insert_locked(x, 0, Color::Blue);
        }
        state.score = 200;

        state.spawn_piece();

        assert_eq!(state.screen(), Screen::GameOver);
        assert_eq!(state.high_score(), 5000);
        assert_eq!(state.store().save_count(), 0);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = playing(8);
        for x in 1..BOARD_WIDTH as i8 {
            state.insert_locked(x, 0, Color::Blue);
        }
        state.score = 700;
        state.spawn_piece();
        assert_eq!(state.screen(), Screen::GameOver);
        assert_eq!(state.store().save_count(), 1);

        assert!(state.apply_command(Command::Restart));

        assert_eq!(state.screen(), Screen::Playing);
        assert_eq!(state.score(), 0);
        assert!(state.locked().is_empty());
        assert!(state.active().is_some());
        // Already persisted on game over; restart does not write again.
        assert_eq!(state.store().save_count(), 1);
        assert_eq!(state.high_score(), 700);
    }

    #[test]
    fn test_quit_from_game_over_does_not_save_again() {
        let mut state = playing(8);
        for x in 1..BOARD_WIDTH as i8 {
            state.insert_locked(x, 0, Color::Blue);
        }
        state.score = 400;
        state.spawn_piece();

        assert!(state.apply_command(Command::Quit));

        assert_eq!(state.screen(), Screen::Start);
        assert_eq!(state.store().save_count(), 1);
    }

    #[test]
    fn test_snapshot_reports_ghost_and_scores() {
        let state = GameState::new(4, MemoryStore::with_high_score(1200));
        let snap = state.snapshot();
        assert_eq!(snap.screen, Screen::Start);
        assert_eq!(snap.high_score, 1200);
        assert!(snap.active.is_none());
        assert!(snap.ghost.is_none());

        let mut state = state;
        state.apply_command(Command::Play);
        let snap = state.snapshot();
        let active = snap.active.unwrap();
        let ghost = snap.ghost.unwrap();
        assert_eq!(active.cells.len(), ghost.len());
        assert!(ghost.iter().all(|&(_, y)| y >= 0));
        assert!(ghost.iter().any(|&(_, y)| y == BOARD_HEIGHT as i8 - 1));
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let a = playing(777);
        let b = playing(777);
        assert_eq!(a.active(), b.active());
    }
}
