//! Draw commands and HUD text derived from game state
//!
//! Nothing here mutates the simulation. A host rebuilds the whole list every
//! frame and maps each command onto its own drawing API.

use glam::Vec2;

use crate::format_time;
use crate::sim::{GameState, Rect};

pub const ENEMY_SPRITE: &str = "enemy.png";
pub const EGG_SPRITE: &str = "egg.png";

/// Player bullets are plain filled rects
pub const BULLET_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// One thing to draw, back to front
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Player {
        rect: Rect,
        sprite: &'static str,
    },
    Enemy {
        rect: Rect,
        /// 0 = back row
        row: u32,
        sprite: &'static str,
    },
    PlayerShot {
        rect: Rect,
        color: [f32; 4],
    },
    /// Drawn rotated about its center
    EnemyShot {
        center: Vec2,
        size: Vec2,
        rotation: f32,
        sprite: &'static str,
    },
}

/// Build the draw list for the current frame
pub fn draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        1 + state.enemies.len() + state.player_shots.len() + state.enemy_shots.len(),
    );

    commands.push(DrawCommand::Player {
        rect: state.player.rect,
        sprite: state.skin.sprite(),
    });

    for enemy in state.living_enemies() {
        commands.push(DrawCommand::Enemy {
            rect: state.enemy_rect(enemy),
            row: enemy.row,
            sprite: ENEMY_SPRITE,
        });
    }

    for shot in &state.player_shots {
        commands.push(DrawCommand::PlayerShot {
            rect: shot.rect,
            color: BULLET_COLOR,
        });
    }

    for egg in &state.enemy_shots {
        commands.push(DrawCommand::EnemyShot {
            center: egg.rect.pos + egg.rect.size * 0.5,
            size: egg.rect.size,
            rotation: egg.rotation,
            sprite: EGG_SPRITE,
        });
    }

    commands
}

/// Heads-up display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub lives: String,
    pub time: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: format!("Score: {}", state.score),
            lives: format!("Lives: {}", state.lives),
            time: format_time(state.time_left),
        }
    }
}
