//! Platform abstraction layer
//!
//! The simulation only sees a [`TickInput`] snapshot and produces a
//! [`DrawList`]. This module holds the seams to whatever sits around it:
//! - [`InputSource`]: "is key K held" queries
//! - [`DrawTarget`]: rectangle and text sinks
//! - [`Game`]: the object a host loop drives (init / update / draw / layout)

pub mod headless;

use glam::Vec2;

use crate::consts::*;
use crate::draw::{Color, DrawCommand, DrawList, Font, Rect, project};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, steer, tick};

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Start a new game once the current one is over
    Restart,
}

/// Read-only view of the keyboard
pub trait InputSource {
    fn is_key_pressed(&self, key: Key) -> bool;
}

/// Held-key set, filled from key down/up events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub restart: bool,
}

impl KeyState {
    pub fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Restart => self.restart = down,
        }
    }

    /// Map a DOM `KeyboardEvent.key` value
    pub fn key_from_name(name: &str) -> Option<Key> {
        match name {
            "ArrowLeft" | "Left" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "Right" | "d" | "D" => Some(Key::Right),
            "Enter" | " " => Some(Key::Restart),
            _ => None,
        }
    }
}

impl InputSource for KeyState {
    fn is_key_pressed(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Restart => self.restart,
        }
    }
}

/// Sink for draw primitives
pub trait DrawTarget {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, font: Font, pos: Vec2, color: Color);
}

impl DrawList {
    /// Replay every command into a target, in order
    pub fn submit(&self, target: &mut impl DrawTarget) {
        for command in &self.commands {
            match command {
                DrawCommand::FillRect { rect, color } => target.fill_rect(*rect, *color),
                DrawCommand::Text {
                    text,
                    font,
                    pos,
                    color,
                } => target.draw_text(text, *font, *pos, *color),
            }
        }
    }
}

/// Snapshot the movement keys for one tick
pub fn poll(input: &impl InputSource) -> TickInput {
    TickInput {
        left: input.is_key_pressed(Key::Left),
        right: input.is_key_pressed(Key::Right),
    }
}

/// Game instance driven by a host loop
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    /// Unspent frame time (seconds)
    accumulator: f32,
    /// Ticks simulated since the last (re)start
    pub ticks: u64,
}

impl Game {
    /// Build the initial state
    pub fn init(settings: Settings) -> Self {
        log::info!(
            "New game: variant={} autopilot={}",
            settings.variant.as_str(),
            settings.autopilot
        );
        Self {
            state: GameState::new(&settings.rules),
            settings,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Throw the current game away and start over with the same settings
    pub fn restart(&mut self) {
        log::info!("Restarting (final score {})", self.state.score);
        self.state = GameState::new(&self.settings.rules);
        self.accumulator = 0.0;
        self.ticks = 0;
    }

    /// Run exactly one simulation tick with the current input
    pub fn update(&mut self, input: &impl InputSource) {
        if self.state.game_over && input.is_key_pressed(Key::Restart) {
            self.restart();
            return;
        }

        let tick_input = if self.settings.autopilot {
            steer(&self.state)
        } else {
            poll(input)
        };
        tick(&mut self.state, &tick_input, &self.settings.rules);
        self.ticks += 1;
    }

    /// Accumulate frame time and run whole ticks at `SIM_DT`. Returns the
    /// number of ticks run.
    pub fn advance(&mut self, dt: f32, input: &impl InputSource) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.update(input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop whatever the substep cap left over rather than spiralling
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Project the current state
    pub fn frame(&self) -> DrawList {
        project(&self.state, &self.settings.rules)
    }

    /// Hand this frame's primitives to a draw target
    pub fn draw(&self, target: &mut impl DrawTarget) {
        self.frame().submit(target);
    }

    /// Viewport size negotiation: the game takes whatever the host offers
    pub fn layout(&self, outside_width: u32, outside_height: u32) -> (u32, u32) {
        (outside_width, outside_height)
    }

    /// Window size the host should request
    pub fn window_size(&self) -> (u32, u32) {
        (FIELD_WIDTH as u32, FIELD_HEIGHT as u32)
    }
}
