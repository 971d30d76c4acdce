//! Egg Invaders - a formation shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (formation, projectiles, collisions, game state)
//! - `round`: Round lifecycle, timers and the frame driver
//! - `session`: Wiring between a round and its external collaborators
//! - `render`: Draw commands and HUD text derived from game state
//! - `tuning`: Data-driven game balance
//! - `settings`: Player-facing configuration

pub mod audio;
pub mod clock;
pub mod error;
pub mod highscores;
pub mod input;
pub mod render;
pub mod round;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::StoreError;
pub use highscores::ScoreHistory;
pub use round::{Round, RoundOver};
pub use session::Session;
pub use settings::{Settings, ShipSkin, ShootKey};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frame rate assumed by the headless driver
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest delta a single frame may advance (stalls, tab switches)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Enemy grid shape
    pub const ENEMY_ROWS: u32 = 4;
    pub const ENEMY_COLS: u32 = 5;
    pub const ENEMY_W: f32 = 40.0;
    pub const ENEMY_H: f32 = 30.0;
    pub const ENEMY_GAP_X: f32 = 20.0;
    pub const ENEMY_GAP_Y: f32 = 20.0;
    /// Top of the back row at spawn
    pub const ENEMY_START_Y: f32 = 60.0;
    /// Points per row of distance from the front: row r scores (ROWS - r) * this
    pub const POINTS_PER_ROW: u64 = 5;

    /// Formation horizontal speed at round start (pixels/s)
    pub const FORMATION_SPEED: f32 = 60.0;
    /// Vertical increment applied on edge contact
    pub const ROW_DROP: f32 = ENEMY_H;
    /// Vertical drift speed when drift is enabled (pixels/s)
    pub const DRIFT_SPEED: f32 = 20.0;

    /// Bottom fraction of the play area the player may occupy
    pub const PLAYER_AREA: f32 = 0.4;
    pub const PLAYER_W: f32 = 50.0;
    pub const PLAYER_H: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_LIVES: u8 = 3;

    /// Player shot
    pub const BULLET_W: f32 = 4.0;
    pub const BULLET_H: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 450.0;

    /// Enemy shot (egg)
    pub const EGG_W: f32 = 20.0;
    pub const EGG_H: f32 = 28.0;
    pub const EGG_SPEED: f32 = 260.0;
    /// Display-only spin (radians/s)
    pub const EGG_SPIN: f32 = 3.0;
    /// Minimum real time between two eggs
    pub const EGG_INTERVAL_MS: f64 = 800.0;
    /// Fraction of the play height the previous egg must pass (single-in-flight)
    pub const EGG_CLEARANCE: f32 = 0.75;

    /// Shots this far beyond the play area are culled
    pub const CULL_MARGIN: f32 = 10.0;

    /// Difficulty accelerator
    pub const ACCEL_INTERVAL_MS: f64 = 5000.0;
    pub const MAX_ACCEL_STEPS: u32 = 4;
    pub const ACCEL_FACTOR: f32 = 1.2;

    /// Round duration bounds (seconds)
    pub const MIN_DURATION_SECS: u32 = 120;
    pub const COUNTDOWN_INTERVAL_MS: f64 = 1000.0;

    /// Timed-out rounds at or above this score are framed as a win
    pub const TIMEOUT_WIN_SCORE: u64 = 100;
}

/// Format remaining seconds as `m:ss`
///
/// Minutes are unpadded, seconds always two digits.
pub fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
