//! Terminal block-game runner (default binary).
//!
//! Reads configuration from the environment, opens the high-score file, and
//! drives the game with a fixed frame clock. It uses crossterm for input and
//! the framebuffer renderer from the term crate.

use std::fs::OpenOptions;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_blocks::core::{FlashEvent, GameSnapshot, GameState, HighScoreStore};
use tui_blocks::input::{handle_key_event, should_quit};
use tui_blocks::store::{Config, JsonFileStore};
use tui_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blocks::types::{FLASH_DURATION_MS, FLASH_TIMES, FRAME_MS};

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config)?;

    let store = JsonFileStore::open(&config.score_path);
    info!(
        "seed {} high score {} ({})",
        config.seed,
        store.load(),
        store.path().display()
    );
    let mut game = GameState::with_settings(config.seed, store, config.settings());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Route `log` output to `BLOCKS_LOG_PATH`; the terminal is in raw mode.
fn init_logging(config: &Config) -> Result<()> {
    let default_filter = if config.log_path.is_some() {
        "info"
    } else {
        "off"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = &config.log_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

fn run<S: HighScoreStore>(term: &mut TerminalRenderer, game: &mut GameState<S>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Input until the next frame is due.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key, game.screen()) {
                        game.apply_command(command);
                    }
                    if game.exit_requested() {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed < frame {
            continue;
        }
        last_tick = Instant::now();

        game.tick(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game.snapshot_into(&mut snap);

        if let Some(flash) = game.take_flash() {
            play_flash(term, &view, &flash, &snap, viewport, &mut fb)?;
            // The flash blocks the loop; it does not count toward gravity.
            last_tick = Instant::now();
        }

        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;
    }
}

fn play_flash(
    term: &mut TerminalRenderer,
    view: &GameView,
    flash: &FlashEvent,
    snap: &GameSnapshot,
    viewport: Viewport,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let hold = Duration::from_millis(FLASH_DURATION_MS as u64);
    for _ in 0..FLASH_TIMES {
        for lit in [true, false] {
            view.render_flash_into(flash, lit, snap, viewport, fb);
            term.draw_swap(fb)?;
            thread::sleep(hold);
        }
    }
    Ok(())
}
