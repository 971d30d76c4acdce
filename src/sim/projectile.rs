//! Player bullets and enemy eggs: spawning, movement and culling

use rand::Rng;

use super::rect::Rect;
use super::state::{EnemyShot, GameEvent, GameState, PlayerShot};
use crate::tuning::{EnemyFirePolicy, PlayerFirePolicy};

/// Spawn a bullet from the ship's nose
///
/// Returns false when the fire policy refuses the shot.
pub fn fire_player_shot(state: &mut GameState) -> bool {
    let single = state.tuning.player_fire == PlayerFirePolicy::SingleInFlight;
    if single && !state.player_shots.is_empty() {
        return false;
    }

    let (w, h) = state.tuning.bullet_size;
    let ship = state.player.rect;
    let id = state.next_entity_id();
    state.player_shots.push(PlayerShot {
        id,
        rect: Rect::new(ship.center_x() - w / 2.0, ship.top(), w, h),
        spent: false,
    });
    state.events.push(GameEvent::PlayerFired);
    true
}

/// Move every shot by its velocity
pub fn advance_shots(state: &mut GameState, dt: f32) {
    let bullet_speed = state.tuning.bullet_speed;
    for shot in &mut state.player_shots {
        shot.rect.pos.y -= bullet_speed * dt;
    }

    let spin = state.tuning.egg_spin;
    for egg in &mut state.enemy_shots {
        egg.rect.pos.y += egg.vy * dt;
        egg.rotation = (egg.rotation + spin * dt) % std::f32::consts::TAU;
    }
}

/// Drop shots that left the play area
pub fn cull_shots(state: &mut GameState) {
    let margin = state.tuning.cull_margin;
    let floor = state.area.height + margin;
    state.player_shots.retain(|s| s.rect.top() > -margin);
    state.enemy_shots.retain(|e| e.rect.top() < floor);
}

/// Whether the formation may drop another egg now
pub fn egg_ready(state: &GameState) -> bool {
    match state.tuning.enemy_fire {
        EnemyFirePolicy::FixedInterval { interval_ms } => match state.last_egg_ms {
            None => true,
            Some(last) => state.elapsed_ms - last >= interval_ms,
        },
        EnemyFirePolicy::SingleInFlight { clearance } => {
            let Some(last_id) = state.last_egg_id else {
                return true;
            };
            match state.enemy_shots.iter().find(|e| e.id == last_id) {
                None => true,
                Some(egg) => egg.rect.top() > state.area.height * clearance,
            }
        }
    }
}

/// Let one random living enemy drop an egg if the fire policy allows
///
/// Returns the new egg's id.
pub fn maybe_fire_egg(state: &mut GameState) -> Option<u32> {
    if !egg_ready(state) {
        return None;
    }

    let shooters: Vec<(u32, f32, f32)> = state
        .living_enemies()
        .map(|e| (e.id, e.base_x, e.y))
        .collect();
    if shooters.is_empty() {
        return None;
    }

    let pick = state.rng().random_range(0..shooters.len());
    let (enemy_id, base_x, y) = shooters[pick];

    let (enemy_w, enemy_h) = state.tuning.enemy_size;
    let (w, h) = state.tuning.egg_size;
    let x = base_x + state.formation.offset + enemy_w / 2.0 - w / 2.0;
    let id = state.next_entity_id();
    state.enemy_shots.push(EnemyShot {
        id,
        rect: Rect::new(x, y + enemy_h, w, h),
        vy: state.egg_speed,
        rotation: 0.0,
        spent: false,
    });

    let at_ms = state.elapsed_ms;
    state.last_egg_ms = Some(at_ms);
    state.last_egg_id = Some(id);
    state.events.push(GameEvent::EnemyFired { enemy_id, at_ms });
    log::debug!("Enemy {} dropped egg {} at {:.0}ms", enemy_id, id, at_ms);

    Some(id)
}
