//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a round can be replayed or
//! rebalanced without touching simulation code. Defaults come from `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How often the player may fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayerFirePolicy {
    /// One shot per trigger press, no cap on shots in flight
    #[default]
    Unlimited,
    /// A press is ignored while any player shot is still live
    SingleInFlight,
}

/// When the formation may drop its next egg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyFirePolicy {
    /// At most one egg per interval of round time
    FixedInterval { interval_ms: f64 },
    /// The previous egg must pass `clearance` of the play height (or be gone)
    SingleInFlight { clearance: f32 },
}

impl EnemyFirePolicy {
    /// Single-in-flight gating with the standard clearance
    pub fn single_in_flight() -> Self {
        EnemyFirePolicy::SingleInFlight {
            clearance: EGG_CLEARANCE,
        }
    }
}

impl Default for EnemyFirePolicy {
    fn default() -> Self {
        EnemyFirePolicy::FixedInterval {
            interval_ms: EGG_INTERVAL_MS,
        }
    }
}

/// Whether the formation also bounces vertically
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum FormationDrift {
    /// Horizontal sweep with row-drop only
    #[default]
    None,
    /// Living enemies bob between the spawn line and the player area
    Vertical { speed: f32 },
}

impl FormationDrift {
    /// Vertical bounce at the standard drift speed
    pub fn vertical() -> Self {
        FormationDrift::Vertical { speed: DRIFT_SPEED }
    }
}

/// Balance parameters for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub rows: u32,
    pub cols: u32,
    pub enemy_size: (f32, f32),
    pub enemy_gap: (f32, f32),
    pub enemy_start_y: f32,
    pub points_per_row: u64,

    pub formation_speed: f32,
    pub row_drop: f32,
    pub drift: FormationDrift,

    pub player_size: (f32, f32),
    pub player_speed: f32,
    pub player_area: f32,
    pub lives: u8,

    pub bullet_size: (f32, f32),
    pub bullet_speed: f32,
    pub player_fire: PlayerFirePolicy,

    pub egg_size: (f32, f32),
    pub egg_speed: f32,
    pub egg_spin: f32,
    pub enemy_fire: EnemyFirePolicy,

    pub cull_margin: f32,

    pub accel_interval_ms: f64,
    pub max_accel_steps: u32,
    pub accel_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            rows: ENEMY_ROWS,
            cols: ENEMY_COLS,
            enemy_size: (ENEMY_W, ENEMY_H),
            enemy_gap: (ENEMY_GAP_X, ENEMY_GAP_Y),
            enemy_start_y: ENEMY_START_Y,
            points_per_row: POINTS_PER_ROW,

            formation_speed: FORMATION_SPEED,
            row_drop: ROW_DROP,
            drift: FormationDrift::None,

            player_size: (PLAYER_W, PLAYER_H),
            player_speed: PLAYER_SPEED,
            player_area: PLAYER_AREA,
            lives: PLAYER_LIVES,

            bullet_size: (BULLET_W, BULLET_H),
            bullet_speed: BULLET_SPEED,
            player_fire: PlayerFirePolicy::Unlimited,

            egg_size: (EGG_W, EGG_H),
            egg_speed: EGG_SPEED,
            egg_spin: EGG_SPIN,
            enemy_fire: EnemyFirePolicy::default(),

            cull_margin: CULL_MARGIN,

            accel_interval_ms: ACCEL_INTERVAL_MS,
            max_accel_steps: MAX_ACCEL_STEPS,
            accel_factor: ACCEL_FACTOR,
        }
    }
}

impl Tuning {
    /// Total points for clearing the whole grid
    pub fn full_clear_score(&self) -> u64 {
        (0..self.rows)
            .map(|row| (self.rows - row) as u64 * self.points_per_row * self.cols as u64)
            .sum()
    }

    /// Width of the formation at spawn
    pub fn formation_width(&self) -> f32 {
        if self.cols == 0 {
            return 0.0;
        }
        self.cols as f32 * self.enemy_size.0 + (self.cols - 1) as f32 * self.enemy_gap.0
    }
}
