//! Render projection
//!
//! Maps a [`GameState`] to the list of primitives a backend has to draw:
//! filled rectangles and text labels in field coordinates. Nothing here
//! touches pixels or mutates the state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Aabb, BrickGrid, GameState, Rules};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Linear components for GPU vertex data. The render surface is sRGB,
    /// so the channels are decoded here and re-encoded on write; alpha
    /// passes through unchanged.
    pub fn to_linear(self) -> [f32; 4] {
        fn decode(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [
            decode(self.r),
            decode(self.g),
            decode(self.b),
            self.a as f32 / 255.0,
        ]
    }

    /// CSS `rgba()` string for DOM text
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const PADDLE: Color = Color::rgb(255, 255, 255);
    pub const BALL: Color = Color::rgb(255, 255, 255);
    pub const BRICK: Color = Color::rgb(61, 61, 61);
    pub const TEXT: Color = Color::rgb(255, 255, 255);
    pub const BACKGROUND: Color = Color::rgb(0, 0, 0);
}

/// Font faces the text primitives can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Font {
    /// Fixed 7x13 bitmap face
    #[default]
    Basic,
}

impl Font {
    /// Glyph cell size in field units
    pub fn glyph_size(self) -> Vec2 {
        match self {
            Font::Basic => Vec2::new(7.0, 13.0),
        }
    }
}

/// Axis-aligned rectangle in field coordinates
pub type Rect = Aabb;

/// One draw primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    /// `pos` is the baseline origin of the first glyph
    Text {
        text: String,
        font: Font,
        pos: Vec2,
        color: Color,
    },
}

/// Ordered draw list for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            font: Font::Basic,
            pos,
            color,
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Filled rectangles in draw order
    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((rect, color)),
            DrawCommand::Text { .. } => None,
        })
    }

    /// Text labels in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::FillRect { .. } => None,
        })
    }
}

/// Label shown while playing
pub fn score_label(score: i32) -> String {
    format!("Score: {}", score)
}

/// Label shown once the game is over
pub fn game_over_label(score: i32) -> String {
    format!("GAME OVER! Score: {}", score)
}

/// Project the game state into draw primitives
pub fn project(state: &GameState, rules: &Rules) -> DrawList {
    let mut list = DrawList::new();

    if state.game_over {
        list.text(
            game_over_label(state.score),
            Vec2::new(FIELD_WIDTH / 2.0 - 60.0, FIELD_HEIGHT / 2.0),
            colors::TEXT,
        );
        return list;
    }

    list.fill_rect(state.paddle.bounds(), colors::PADDLE);
    list.fill_rect(state.ball.bounds(), colors::BALL);

    for (col, row) in state.bricks.present() {
        list.fill_rect(
            BrickGrid::cell_bounds(col, row, rules.top_offset),
            colors::BRICK,
        );
    }

    list.text(
        score_label(state.score),
        Vec2::new(FIELD_WIDTH / 2.0 - 40.0, 10.0),
        colors::TEXT,
    );

    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_fresh_game() {
        let rules = Rules::CLASSIC;
        let state = GameState::new(&rules);
        let list = project(&state, &rules);

        // Paddle, ball, every brick, score label
        assert_eq!(list.len(), 2 + BRICK_COUNT + 1);
        let rects: Vec<_> = list.rects().collect();
        assert_eq!(*rects[0].0, state.paddle.bounds());
        assert_eq!(*rects[0].1, colors::PADDLE);
        assert_eq!(rects[1].0.min, state.ball.pos);
        assert_eq!(rects[1].0.size, Vec2::splat(BALL_SIZE));
        assert!(rects[2..].iter().all(|(_, c)| **c == colors::BRICK));
        // First brick sits below the score bar
        assert_eq!(rects[2].0.min, Vec2::new(0.0, SCORE_BAR_HEIGHT));

        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Score: 0"]);
    }

    #[test]
    fn test_project_skips_cleared_bricks() {
        let rules = Rules::ENDLESS;
        let mut state = GameState::new(&rules);
        state.bricks = BrickGrid::empty();
        state.score = 7;
        let list = project(&state, &rules);
        assert_eq!(list.len(), 3);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Score: 7"]);
    }

    #[test]
    fn test_project_game_over_replaces_everything() {
        let rules = Rules::CLASSIC;
        let mut state = GameState::new(&rules);
        state.score = 42;
        state.game_over = true;
        let list = project(&state, &rules);
        assert_eq!(list.len(), 1);
        match &list.commands[0] {
            DrawCommand::Text { text, pos, .. } => {
                assert_eq!(text, "GAME OVER! Score: 42");
                assert_eq!(*pos, Vec2::new(110.0, 300.0));
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_project_does_not_mutate() {
        let rules = Rules::CLASSIC;
        let state = GameState::new(&rules);
        let before = state.clone();
        let _ = project(&state, &rules);
        assert_eq!(state, before);
    }

    #[test]
    fn test_color_conversions() {
        assert_eq!(colors::BALL.to_linear(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(colors::BACKGROUND.to_linear(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(colors::BRICK.to_css(), "rgba(61, 61, 61, 1.000)");
    }

    #[test]
    fn test_linear_colors_survive_srgb_encoding() {
        // What an sRGB surface does on write
        fn encode(l: f32) -> f32 {
            if l <= 0.0031308 {
                l * 12.92
            } else {
                1.055 * l.powf(1.0 / 2.4) - 0.055
            }
        }
        let [r, g, b, a] = colors::BRICK.to_linear();
        assert!((r - 0.0467).abs() < 1e-3, "brick red decoded to {}", r);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 1.0);
        assert_eq!((encode(r) * 255.0).round() as u8, 61);

        let dim = Color::rgb(5, 128, 250);
        let [r, g, b, _] = dim.to_linear();
        let back = [r, g, b].map(|c| (encode(c) * 255.0).round() as u8);
        assert_eq!(back, [5, 128, 250]);
    }
}
