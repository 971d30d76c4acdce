//! Game state and core simulation types
//!
//! Everything a round mutates lives in `GameState`. It is created in one piece
//! when a round starts and dropped in one piece when it ends.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::ShipSkin;
use crate::tuning::{FormationDrift, Tuning};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No round has been started
    Idle,
    /// Active gameplay
    Running,
    /// Every enemy destroyed
    Won,
    /// Lives exhausted
    Lost,
    /// Countdown reached zero
    TimedOut,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost | GamePhase::TimedOut)
    }
}

/// Play-area dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Top of the region the player is confined to
    pub fn player_top(&self, player_area: f32) -> f32 {
        self.height * (1.0 - player_area)
    }

    /// Zero-sized areas skip geometry that needs a real extent
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
}

impl Player {
    /// Centered in the player area
    pub fn spawn(area: PlayArea, tuning: &Tuning) -> Self {
        let (w, h) = tuning.player_size;
        let min_y = area.player_top(tuning.player_area);
        Self {
            rect: Rect::new(
                (area.width - w) / 2.0,
                min_y + (area.height - min_y - h) / 2.0,
                w,
                h,
            ),
        }
    }

    /// Clamp into the player area
    ///
    /// Uses max/min rather than `clamp` so a too-small area pins the ship to
    /// the origin instead of panicking.
    pub fn clamp_to(&mut self, area: PlayArea, player_area: f32) {
        let min_y = area.player_top(player_area);
        let max_x = area.width - self.rect.size.x;
        let max_y = area.height - self.rect.size.y;
        self.rect.pos.x = self.rect.pos.x.min(max_x).max(0.0);
        self.rect.pos.y = self.rect.pos.y.min(max_y).max(min_y);
    }
}

/// One member of the enemy grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Horizontal anchor; screen x is `base_x + formation.offset`
    pub base_x: f32,
    pub y: f32,
    /// 0 = back row
    pub row: u32,
    pub col: u32,
    pub alive: bool,
}

impl Enemy {
    /// Screen rectangle for the current formation offset
    pub fn rect(&self, offset: f32, size: (f32, f32)) -> Rect {
        Rect::new(self.base_x + offset, self.y, size.0, size.1)
    }
}

/// Vertical bounce shared by the whole formation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalDrift {
    pub speed: f32,
    /// +1 down, -1 up
    pub direction: f32,
    /// Top of the back row at spawn
    pub top_y: f32,
}

/// Motion shared by every enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    pub offset: f32,
    /// +1 right, -1 left
    pub direction: f32,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
    pub drift: Option<VerticalDrift>,
}

/// A player bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShot {
    pub id: u32,
    pub rect: Rect,
    /// Hit something this frame; removed after the collision scan
    pub spent: bool,
}

/// An egg dropped by an enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShot {
    pub id: u32,
    pub rect: Rect,
    /// Downward speed, fixed at spawn and scaled by the accelerator
    pub vy: f32,
    /// Display only
    pub rotation: f32,
    pub spent: bool,
}

/// Things that happened during a tick (drained by the round each frame)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired { enemy_id: u32, at_ms: f64 },
    PlayerHit { lives_left: u8 },
    EnemyDestroyed { row: u32, points: u64 },
    DifficultyRaised { step: u32 },
}

/// Complete round state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
    pub tuning: Tuning,
    pub area: PlayArea,
    pub skin: ShipSkin,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Seconds left on the countdown
    pub time_left: u32,
    /// Accelerator steps applied so far
    pub accel_steps: u32,
    /// Speed given to newly spawned eggs
    pub egg_speed: f32,
    /// Simulated round time
    pub elapsed_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Round time of the last egg spawn
    pub last_egg_ms: Option<f64>,
    /// Id of the last egg spawned
    pub last_egg_id: Option<u32>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub formation: Formation,
    pub player_shots: Vec<PlayerShot>,
    pub enemy_shots: Vec<EnemyShot>,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create the state for a fresh round
    pub fn new(
        seed: u64,
        tuning: Tuning,
        area: PlayArea,
        duration_secs: u32,
        skin: ShipSkin,
    ) -> Self {
        let drift = match tuning.drift {
            FormationDrift::None => None,
            FormationDrift::Vertical { speed } => Some(VerticalDrift {
                speed,
                direction: 1.0,
                top_y: tuning.enemy_start_y,
            }),
        };

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::spawn(area, &tuning),
            area,
            skin,
            phase: GamePhase::Running,
            score: 0,
            lives: tuning.lives,
            time_left: duration_secs,
            accel_steps: 0,
            egg_speed: tuning.egg_speed,
            elapsed_ms: 0.0,
            time_ticks: 0,
            last_egg_ms: None,
            last_egg_id: None,
            enemies: Vec::new(),
            formation: Formation {
                offset: 0.0,
                direction: 1.0,
                speed: tuning.formation_speed,
                drift,
            },
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            events: Vec::new(),
            tuning,
            next_id: 1,
        };

        state.spawn_enemies();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Lay out the grid, centered horizontally
    fn spawn_enemies(&mut self) {
        let (w, h) = self.tuning.enemy_size;
        let (gap_x, gap_y) = self.tuning.enemy_gap;
        let start_x = (self.area.width - self.tuning.formation_width()) / 2.0;

        for row in 0..self.tuning.rows {
            for col in 0..self.tuning.cols {
                let id = self.next_entity_id();
                self.enemies.push(Enemy {
                    id,
                    base_x: start_x + col as f32 * (w + gap_x),
                    y: self.tuning.enemy_start_y + row as f32 * (h + gap_y),
                    row,
                    col,
                    alive: true,
                });
            }
        }
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    pub fn any_enemy_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.alive)
    }

    /// Screen rectangle of an enemy
    pub fn enemy_rect(&self, enemy: &Enemy) -> Rect {
        enemy.rect(self.formation.offset, self.tuning.enemy_size)
    }

    /// Points for destroying an enemy in `row`
    pub fn points_for_row(&self, row: u32) -> u64 {
        self.tuning.rows.saturating_sub(row) as u64 * self.tuning.points_per_row
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
