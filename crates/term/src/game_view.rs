//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{FlashEvent, GameSnapshot, Grid};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, Screen, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const TITLE: Rgb = Rgb::new(0, 255, 255);
const GOLD: Rgb = Rgb::new(255, 215, 0);
const WARN: Rgb = Rgb::new(255, 100, 100);
const DANGER: Rgb = Rgb::new(180, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Frame of the board inside the viewport (border included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoardFrame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the block game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the screen named by `snap.screen` into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        match snap.screen {
            Screen::Start => self.draw_start_screen(fb, snap, viewport),
            Screen::Playing => {
                let frame = self.board_frame(viewport);
                self.draw_board(fb, frame, &snap.grid, &[]);
                self.draw_pieces(fb, frame, snap);
                self.draw_side_panel(fb, snap, viewport, frame);
            }
            Screen::Paused => self.draw_paused_screen(fb, viewport),
            Screen::GameOver => self.draw_game_over_screen(fb, snap, viewport),
        }
    }

    /// Render one frame of the line-clear flash.
    ///
    /// Draws the grid as it was before the clear. When `lit` is set the cleared
    /// rows are painted white; otherwise the plain pre-clear grid is shown.
    pub fn render_flash_into(
        &self,
        flash: &FlashEvent,
        lit: bool,
        snap: &GameSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.board_frame(viewport);
        let highlight: &[i8] = if lit { flash.rows.as_slice() } else { &[] };
        self.draw_board(fb, frame, &flash.grid, highlight);
        self.draw_side_panel(fb, snap, viewport, frame);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn board_frame(&self, viewport: Viewport) -> BoardFrame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        BoardFrame { x, y, w, h }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, frame: BoardFrame, grid: &Grid, highlight: &[i8]) {
        let bg = CellStyle {
            bg: BOARD_BG,
            ..CellStyle::fg(Rgb::new(80, 80, 90))
        };
        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', bg);
        self.draw_border(fb, frame, CellStyle::fg(Rgb::new(200, 200, 200)));

        for (y, row) in grid.rows().enumerate() {
            let lit = highlight.contains(&(y as i8));
            for (x, cell) in row.iter().enumerate() {
                let (cx, cy) = (x as u16, y as u16);
                if lit {
                    self.draw_block(fb, frame, cx, cy, Rgb::WHITE);
                } else if let Some(color) = cell {
                    self.draw_block(fb, frame, cx, cy, Rgb::from(*color));
                } else {
                    self.draw_empty_cell(fb, frame, cx, cy);
                }
            }
        }
    }

    fn draw_pieces(&self, fb: &mut FrameBuffer, frame: BoardFrame, snap: &GameSnapshot) {
        if let Some(ghost) = &snap.ghost {
            let style = CellStyle {
                bg: BOARD_BG,
                dim: true,
                ..CellStyle::fg(Rgb::new(100, 100, 100))
            };
            for &(x, y) in ghost.iter().filter(|&&c| on_board(c)) {
                self.fill_cell_rect(fb, frame, x as u16, y as u16, '░', style);
            }
        }

        if let Some(active) = &snap.active {
            for &(x, y) in active.cells.iter().filter(|&&c| on_board(c)) {
                self.draw_block(fb, frame, x as u16, y as u16, Rgb::from(active.color));
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: BoardFrame, style: CellStyle) {
        let BoardFrame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: u16, y: u16) {
        let style = CellStyle {
            bg: BOARD_BG,
            dim: true,
            ..CellStyle::fg(Rgb::new(90, 90, 100))
        };
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: u16, y: u16, fg: Rgb) {
        let style = CellStyle {
            fg,
            bg: BOARD_BG,
            bold: true,
            dim: false,
        };
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: BoardFrame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: BoardFrame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let hint = CellStyle { dim: true, ..value };

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "HIGH SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.high_score, CellStyle::fg(GOLD));
        y = y.saturating_add(3);

        for line in ["←/→ move", "↓ drop", "↑ rotate", "P pause"] {
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_start_screen(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let w = viewport.width;
        let text = CellStyle::fg(Rgb::WHITE);
        let mut y = viewport.height / 5;

        fb.put_str_centered(0, w, y, "BLOCKS", CellStyle::fg(TITLE).bold());
        y = y.saturating_add(2);
        put_labeled_u32_centered(fb, w, y, "High Score: ", snap.high_score, CellStyle::fg(GOLD));
        y = y.saturating_add(2);
        fb.put_str_centered(0, w, y, "P: Play", text);
        y = y.saturating_add(1);
        fb.put_str_centered(0, w, y, "Q: Quit", text);
        y = y.saturating_add(1);
        fb.put_str_centered(0, w, y, "D: Delete High Score", CellStyle::fg(DANGER));
        y = y.saturating_add(1);
        let flash = if snap.flash_effect {
            "F: Toggle Flash [ON]"
        } else {
            "F: Toggle Flash [OFF]"
        };
        fb.put_str_centered(0, w, y, flash, CellStyle::fg(WARN));
        y = y.saturating_add(1);
        fb.put_str_centered(
            0,
            w,
            y,
            "! Flashing effect warning",
            CellStyle::fg(Rgb::new(255, 0, 0)),
        );
    }

    fn draw_paused_screen(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let w = viewport.width;
        let hint = CellStyle::fg(Rgb::new(200, 200, 200));
        let y = viewport.height / 3;

        fb.put_str_centered(0, w, y, "PAUSED", CellStyle::fg(Rgb::WHITE).bold());
        fb.put_str_centered(0, w, y.saturating_add(2), "P: Resume", hint);
        fb.put_str_centered(0, w, y.saturating_add(3), "Q: Quit to Menu", hint);
    }

    fn draw_game_over_screen(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let w = viewport.width;
        let text = CellStyle::fg(Rgb::WHITE);
        let mut y = viewport.height / 4;

        fb.put_str_centered(0, w, y, "GAME OVER", CellStyle::fg(Color::Red.into()).bold());
        y = y.saturating_add(2);
        put_labeled_u32_centered(fb, w, y, "Your Score: ", snap.score, text);
        y = y.saturating_add(1);
        put_labeled_u32_centered(fb, w, y, "High Score: ", snap.high_score, CellStyle::fg(GOLD));
        y = y.saturating_add(2);
        fb.put_str_centered(0, w, y, "R: Restart", text);
        y = y.saturating_add(1);
        fb.put_str_centered(0, w, y, "Q: Quit to Menu", text);
    }
}

fn on_board((x, y): (i8, i8)) -> bool {
    x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
}

fn digit_count(mut n: u32) -> u16 {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

/// Centered "label + number" line without formatting into a `String`.
fn put_labeled_u32_centered(
    fb: &mut FrameBuffer,
    w: u16,
    y: u16,
    label: &str,
    value: u32,
    style: CellStyle,
) {
    let label_w = label.chars().count() as u16;
    let x = w.saturating_sub(label_w + digit_count(value)) / 2;
    fb.put_str(x, y, label, style);
    fb.put_u32(x + label_w, y, value, style);
}

trait IntoCell {
    fn into_cell(self, ch: char) -> crate::fb::Cell;
}

impl IntoCell for CellStyle {
    fn into_cell(self, ch: char) -> crate::fb::Cell {
        crate::fb::Cell { ch, style: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{clear_lines, ActiveSnapshot, LockedCells, Piece};
    use crate::types::ShapeKind;

    const VIEW: Viewport = Viewport {
        width: 60,
        height: 24,
    };

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn cell_at(fb: &FrameBuffer, view: &GameView, x: u16, y: u16) -> crate::fb::Cell {
        let frame = view.board_frame(VIEW);
        fb.get(frame.x + 1 + x * view.cell_w, frame.y + 1 + y * view.cell_h)
            .unwrap()
    }

    #[test]
    fn test_digit_count_matches_decimal_width() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(u32::MAX), 10);
    }

    #[test]
    fn test_start_screen_lists_options_and_flash_state() {
        let view = GameView::default();
        let mut snap = GameSnapshot {
            high_score: 1200,
            ..GameSnapshot::default()
        };

        let text = screen_text(&view.render(&snap, VIEW));
        assert!(text.contains("BLOCKS"));
        assert!(text.contains("High Score: 1200"));
        assert!(text.contains("P: Play"));
        assert!(text.contains("D: Delete High Score"));
        assert!(text.contains("[ON]"));

        snap.flash_effect = false;
        let text = screen_text(&view.render(&snap, VIEW));
        assert!(text.contains("[OFF]"));
    }

    #[test]
    fn test_playing_draws_locked_active_and_ghost() {
        let view = GameView::default();
        let mut locked = LockedCells::new();
        locked.insert(0, 19, Color::Red);
        let piece = Piece::new(ShapeKind::O, Color::Yellow);
        let snap = GameSnapshot {
            screen: Screen::Playing,
            grid: Grid::build(&locked),
            active: Some(ActiveSnapshot::from(piece)),
            ghost: Some(Piece { y: 18, ..piece }.cells()),
            score: 300,
            ..GameSnapshot::default()
        };

        let fb = view.render(&snap, VIEW);

        let locked_cell = cell_at(&fb, &view, 0, 19);
        assert_eq!(locked_cell.ch, '█');
        assert_eq!(locked_cell.style.fg, Rgb::from(Color::Red));

        let active_cell = cell_at(&fb, &view, 4, 0);
        assert_eq!(active_cell.style.fg, Rgb::from(Color::Yellow));

        assert_eq!(cell_at(&fb, &view, 4, 19).ch, '░');
        assert_eq!(cell_at(&fb, &view, 9, 9).ch, '·');
        assert!(screen_text(&fb).contains("300"));
    }

    #[test]
    fn test_paused_and_game_over_screens() {
        let view = GameView::default();

        let paused = GameSnapshot {
            screen: Screen::Paused,
            ..GameSnapshot::default()
        };
        let text = screen_text(&view.render(&paused, VIEW));
        assert!(text.contains("PAUSED"));
        assert!(text.contains("Q: Quit to Menu"));

        let over = GameSnapshot {
            screen: Screen::GameOver,
            score: 700,
            high_score: 900,
            ..GameSnapshot::default()
        };
        let text = screen_text(&view.render(&over, VIEW));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Your Score: 700"));
        assert!(text.contains("High Score: 900"));
        assert!(text.contains("R: Restart"));
    }

    #[test]
    fn test_flash_frame_paints_cleared_rows_white() {
        let view = GameView::default();
        let mut locked = LockedCells::new();
        for x in 0..BOARD_WIDTH as i8 {
            locked.insert(x, 19, Color::Blue);
        }
        locked.insert(3, 18, Color::Green);
        let flash = clear_lines(&mut locked, true).flash.unwrap();
        let snap = GameSnapshot {
            screen: Screen::Playing,
            ..GameSnapshot::default()
        };
        let mut fb = FrameBuffer::new(VIEW.width, VIEW.height);

        view.render_flash_into(&flash, true, &snap, VIEW, &mut fb);
        assert_eq!(cell_at(&fb, &view, 0, 19).style.fg, Rgb::WHITE);
        assert_eq!(cell_at(&fb, &view, 3, 18).style.fg, Rgb::from(Color::Green));

        view.render_flash_into(&flash, false, &snap, VIEW, &mut fb);
        assert_eq!(cell_at(&fb, &view, 0, 19).style.fg, Rgb::from(Color::Blue));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let view = GameView::default();
        for screen in [Screen::Start, Screen::Playing, Screen::Paused, Screen::GameOver] {
            let snap = GameSnapshot {
                screen,
                ..GameSnapshot::default()
            };
            let fb = view.render(&snap, Viewport::new(5, 3));
            assert_eq!(fb.width(), 5);
        }
    }
}
