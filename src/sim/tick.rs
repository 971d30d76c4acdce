//! Per-frame simulation update
//!
//! Order within one tick:
//! 1. apply input (move and clamp the ship, spawn bullets for fire edges)
//! 2. advance shots
//! 3. move the formation
//! 4. cull shots that left the play area
//! 5. maybe drop an egg
//! 6. resolve collisions

use super::collision;
use super::formation;
use super::projectile;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire-trigger presses since the previous tick
    pub fire: u32,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    state.elapsed_ms += dt as f64 * 1000.0;

    move_player(state, input, dt);
    for _ in 0..input.fire {
        projectile::fire_player_shot(state);
    }

    projectile::advance_shots(state, dt);
    formation::advance(
        &mut state.formation,
        &mut state.enemies,
        &state.tuning,
        state.area,
        dt,
    );
    projectile::cull_shots(state);
    projectile::maybe_fire_egg(state);
    collision::resolve(state);
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let step = state.tuning.player_speed * dt;
    let pos = &mut state.player.rect.pos;
    if input.left {
        pos.x -= step;
    }
    if input.right {
        pos.x += step;
    }
    if input.up {
        pos.y -= step;
    }
    if input.down {
        pos.y += step;
    }
    state.player.clamp_to(state.area, state.tuning.player_area);
}
