//! Collision resolution between shots and ships
//!
//! Both passes mark hits during the scan and filter the pools once afterwards,
//! so nothing is removed from a `Vec` while it is being iterated.

use super::state::{GameEvent, GamePhase, GameState};

/// Result of a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    /// Lives lost this frame
    pub hits_taken: u8,
    /// Enemies destroyed this frame
    pub kills: u32,
    /// Points gained this frame
    pub points: u64,
}

/// Run both passes; the player pass short-circuits on `Lost`
pub fn resolve(state: &mut GameState) -> CollisionResult {
    let mut result = CollisionResult {
        hits_taken: eggs_vs_player(state),
        ..Default::default()
    };
    if state.phase != GamePhase::Running {
        return result;
    }

    let (kills, points) = bullets_vs_enemies(state);
    result.kills = kills;
    result.points = points;
    result
}

/// Eggs hitting the ship: one life per egg, the egg is consumed
///
/// Sets `Lost` and stops scanning as soon as lives reach zero.
pub fn eggs_vs_player(state: &mut GameState) -> u8 {
    let ship = state.player.rect;
    let mut hits = 0;

    for egg in state.enemy_shots.iter_mut() {
        if egg.spent || !egg.rect.overlaps(&ship) {
            continue;
        }
        egg.spent = true;
        state.lives = state.lives.saturating_sub(1);
        hits += 1;
        state.events.push(GameEvent::PlayerHit {
            lives_left: state.lives,
        });
        log::debug!("Player hit by egg {}, {} lives left", egg.id, state.lives);

        if state.lives == 0 {
            state.phase = GamePhase::Lost;
            log::info!("Lives exhausted");
            break;
        }
    }

    state.enemy_shots.retain(|e| !e.spent);
    hits
}

/// Bullets hitting living enemies
///
/// Each enemy dies (and scores) at most once: it is marked dead on the first
/// hit and skipped by every later bullet in the same scan. A bullet is spent on
/// its first hit. Sets `Won` once no enemy is left alive.
pub fn bullets_vs_enemies(state: &mut GameState) -> (u32, u64) {
    let offset = state.formation.offset;
    let size = state.tuning.enemy_size;
    let rows = state.tuning.rows;
    let per_row = state.tuning.points_per_row;
    let mut kills = 0;
    let mut points = 0;

    for shot in state.player_shots.iter_mut() {
        for enemy in state.enemies.iter_mut() {
            if !enemy.alive || !enemy.rect(offset, size).overlaps(&shot.rect) {
                continue;
            }
            enemy.alive = false;
            shot.spent = true;

            let gained = rows.saturating_sub(enemy.row) as u64 * per_row;
            state.score += gained;
            points += gained;
            kills += 1;
            state.events.push(GameEvent::EnemyDestroyed {
                row: enemy.row,
                points: gained,
            });
            log::debug!("Enemy {} (row {}) destroyed, +{}", enemy.id, enemy.row, gained);
            break;
        }
    }

    state.player_shots.retain(|s| !s.spent);

    if !state.any_enemy_alive() {
        state.phase = GamePhase::Won;
        log::info!("Formation cleared");
    }
    (kills, points)
}
