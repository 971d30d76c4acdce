//! Keyboard state sampled once per tick
//!
//! Key events may arrive at any time between frames. They only update this
//! snapshot; the simulation reads it through `TickInput` at the start of the
//! next tick, so event timing never splits a tick.

use crate::settings::ShootKey;
use crate::sim::TickInput;

/// A key identifier, normalised from browser-style key names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    /// Letters are stored upper-case
    Char(char),
    Other,
}

impl Key {
    /// Parse a key name such as `"ArrowLeft"`, `" "`, `"Space"` or `"a"`
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            " " | "Space" | "Spacebar" => Key::Space,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_uppercase()),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// Held directions plus a pending fire edge
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Trigger currently held (for edge detection)
    trigger_held: bool,
    /// Rising edges seen since the last snapshot
    pending_shots: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press (or auto-repeat)
    pub fn key_down(&mut self, key: Key, shoot: ShootKey) {
        if shoot.matches(&key) {
            if !self.trigger_held {
                self.trigger_held = true;
                self.pending_shots += 1;
            }
            return;
        }
        self.set_direction(key, true);
    }

    /// Record a key release
    pub fn key_up(&mut self, key: Key, shoot: ShootKey) {
        if shoot.matches(&key) {
            self.trigger_held = false;
            return;
        }
        self.set_direction(key, false);
    }

    fn set_direction(&mut self, key: Key, held: bool) {
        match key {
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            _ => {}
        }
    }

    /// Build the input for the next tick and consume pending edges
    pub fn snapshot(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            fire: self.pending_shots,
        };
        self.pending_shots = 0;
        input
    }

    /// Forget everything (round end)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
