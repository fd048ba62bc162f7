//! Headless host loop
//!
//! Drives a [`Game`] without a window: used by the native binary and by
//! integration tests. Frames are rasterized into a coarse character grid so
//! a session can still be eyeballed in a terminal or a log.

use glam::Vec2;
use serde::Serialize;

use super::{DrawTarget, Game, InputSource, KeyState};
use crate::consts::*;
use crate::draw::{Color, Font, Rect, colors};
use crate::settings::Settings;

/// Field units per character cell
const CELL: Vec2 = Vec2::new(10.0, 20.0);

/// Character-grid draw target
#[derive(Debug, Clone)]
pub struct TextCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
    /// Text labels in draw order (they don't fit the grid well)
    pub labels: Vec<String>,
    /// Rectangles received this frame
    pub rect_count: usize,
}

impl Default for TextCanvas {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

impl TextCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        let cols = (width / CELL.x).ceil() as usize;
        let rows = (height / CELL.y).ceil() as usize;
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
            labels: Vec::new(),
            rect_count: 0,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
        self.labels.clear();
        self.rect_count = 0;
    }

    /// Glyph for a rectangle of the given color
    fn glyph(color: Color) -> char {
        if color == colors::BRICK { '#' } else { '@' }
    }

    /// Render the grid as lines, framed by the side walls
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.cols + 3) * self.rows);
        for row in self.cells.chunks(self.cols) {
            out.push('|');
            out.extend(row.iter());
            out.push('|');
            out.push('\n');
        }
        out
    }
}

impl DrawTarget for TextCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.rect_count += 1;
        let glyph = Self::glyph(color);
        let start = (rect.min / CELL).floor().max(Vec2::ZERO);
        let end = (rect.max() / CELL).ceil();
        let col_end = (end.x.max(0.0) as usize).min(self.cols);
        let row_end = (end.y.max(0.0) as usize).min(self.rows);
        for row in start.y as usize..row_end {
            for col in start.x as usize..col_end {
                self.cells[row * self.cols + col] = glyph;
            }
        }
    }

    fn draw_text(&mut self, text: &str, _font: Font, _pos: Vec2, _color: Color) {
        self.labels.push(text.to_string());
    }
}

/// Outcome of a headless session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub ticks: u64,
    pub score: i32,
    pub bricks_left: usize,
    pub game_over: bool,
    /// Labels from the last frame
    pub labels: Vec<String>,
}

/// Run a session until the game ends or the tick budget runs out
pub fn run(settings: Settings, input: &impl InputSource) -> (SessionSummary, TextCanvas) {
    let max_ticks = settings.max_ticks;
    let mut game = Game::init(settings);
    let (width, height) = game.layout(FIELD_WIDTH as u32, FIELD_HEIGHT as u32);
    let mut canvas = TextCanvas::new(width as f32, height as f32);

    let mut last_score = game.state.score;
    while game.ticks < max_ticks && !game.state.game_over {
        game.update(input);

        if game.state.score / 10 != last_score / 10 {
            log::debug!(
                "tick {}: score {} ({} bricks left)",
                game.ticks,
                game.state.score,
                game.state.bricks.remaining()
            );
        }
        last_score = game.state.score;
    }

    canvas.clear();
    game.draw(&mut canvas);

    let summary = SessionSummary {
        ticks: game.ticks,
        score: game.state.score,
        bricks_left: game.state.bricks.remaining(),
        game_over: game.state.game_over,
        labels: canvas.labels.clone(),
    };
    log::info!(
        "Session finished after {} ticks: score {}, {} bricks left{}",
        summary.ticks,
        summary.score,
        summary.bricks_left,
        if summary.game_over { ", game over" } else { "" }
    );
    (summary, canvas)
}

/// Autopilot session with no keyboard attached
pub fn run_demo(mut settings: Settings) -> (SessionSummary, TextCanvas) {
    settings.autopilot = true;
    run(settings, &KeyState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Variant;
    use crate::sim::{BrickGrid, Rules};

    #[test]
    fn test_canvas_rasterizes_rects() {
        let mut canvas = TextCanvas::new(40.0, 40.0);
        canvas.fill_rect(Rect::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0)), colors::BRICK);
        canvas.fill_rect(Rect::new(Vec2::new(25.0, 25.0), Vec2::new(5.0, 5.0)), colors::BALL);
        assert_eq!(canvas.to_text(), "|##  |\n|  @ |\n");
        assert_eq!(canvas.rect_count, 2);
    }

    #[test]
    fn test_canvas_clips_out_of_bounds() {
        let mut canvas = TextCanvas::new(40.0, 40.0);
        canvas.fill_rect(Rect::new(Vec2::new(-15.0, 30.0), Vec2::new(100.0, 100.0)), colors::BALL);
        assert_eq!(canvas.to_text(), "|    |\n|@@@@|\n");
    }

    #[test]
    fn test_run_stops_at_budget() {
        let mut settings = Settings::from_preset(Variant::Endless);
        settings.max_ticks = 50;
        let (summary, canvas) = run(settings, &KeyState::default());
        assert_eq!(summary.ticks, 50);
        assert!(!summary.game_over);
        assert_eq!(summary.labels, vec![format!("Score: {}", summary.score)]);
        assert_eq!(canvas.rect_count, 2 + summary.bricks_left);
    }

    #[test]
    fn test_demo_clears_classic_board() {
        let mut settings = Settings::from_preset(Variant::Classic);
        settings.max_ticks = 20_000;
        let (summary, canvas) = run_demo(settings);
        assert!(summary.game_over);
        assert_eq!(summary.bricks_left, 0);
        assert_eq!(summary.labels, vec![format!("GAME OVER! Score: {}", summary.score)]);
        assert_eq!(canvas.rect_count, 0);
    }

    #[test]
    fn test_full_frame_shape() {
        let mut canvas = TextCanvas::default();
        let game = Game::init(Settings::default());
        game.draw(&mut canvas);
        let text = canvas.to_text();
        assert_eq!(text.lines().count(), 30);
        assert!(text.lines().all(|l| l.chars().count() == 36));
        // Bottom row carries the paddle
        assert!(text.lines().last().is_some_and(|l| l.contains('@')));

        // Brick cells only show up while bricks stand
        let mut state = game.state.clone();
        state.bricks = BrickGrid::empty();
        let mut canvas = TextCanvas::default();
        crate::draw::project(&state, &Rules::CLASSIC).submit(&mut canvas);
        assert!(!canvas.to_text().contains('#'));
    }
}
