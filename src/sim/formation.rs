//! Formation motion
//!
//! The grid moves as one rigid body: a single horizontal offset shared by
//! every enemy, reversed with a row-drop whenever the living enemies touch a
//! side of the play area.

use super::state::{Enemy, Formation, PlayArea};
use crate::tuning::Tuning;

/// Side of the play area the formation bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

/// Horizontal screen extent `(min_x, max_x)` of the living enemies
///
/// `None` when nobody is alive.
pub fn living_extent(enemies: &[Enemy], offset: f32, enemy_w: f32) -> Option<(f32, f32)> {
    enemies
        .iter()
        .filter(|e| e.alive)
        .map(|e| e.base_x + offset)
        .fold(None, |acc, x| match acc {
            None => Some((x, x + enemy_w)),
            Some((min, max)) => Some((min.min(x), max.max(x + enemy_w))),
        })
}

/// Advance the formation by `dt` seconds
///
/// Returns the edge hit this tick, if any. Dead enemies do not constrain the
/// bounds but are dropped along with the rest of the grid.
pub fn advance(
    formation: &mut Formation,
    enemies: &mut [Enemy],
    tuning: &Tuning,
    area: PlayArea,
    dt: f32,
) -> Option<Edge> {
    formation.offset += formation.direction * formation.speed * dt;

    let edge = if !area.is_degenerate() {
        bounce(formation, enemies, tuning, area.width)
    } else {
        None
    };

    if let Some(drift) = formation.drift.as_mut() {
        let lower = area.player_top(tuning.player_area);
        let enemy_h = tuning.enemy_size.1;
        let step = drift.speed * drift.direction * dt;

        let mut top = f32::INFINITY;
        let mut bottom = f32::NEG_INFINITY;
        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            enemy.y += step;
            top = top.min(enemy.y);
            bottom = bottom.max(enemy.y + enemy_h);
        }

        if top.is_finite() {
            if drift.direction > 0.0 && bottom >= lower {
                drift.direction = -1.0;
            } else if drift.direction < 0.0 && top <= drift.top_y {
                drift.direction = 1.0;
            }
        }
    }

    edge
}

/// Clamp the offset back inside `[0, width]`, flip and drop a row
///
/// Only the edge the formation is heading for is checked, so a formation
/// already turned around never bounces twice off the same side.
fn bounce(
    formation: &mut Formation,
    enemies: &mut [Enemy],
    tuning: &Tuning,
    width: f32,
) -> Option<Edge> {
    let enemy_w = tuning.enemy_size.0;
    let (min_x, max_x) = living_extent(enemies, formation.offset, enemy_w)?;

    let edge = if formation.direction > 0.0 && max_x > width {
        formation.offset -= max_x - width;
        pin_inside(formation, enemies, enemy_w, width);
        formation.direction = -1.0;
        Edge::Right
    } else if formation.direction < 0.0 && min_x < 0.0 {
        formation.offset -= min_x;
        pin_inside(formation, enemies, enemy_w, width);
        formation.direction = 1.0;
        Edge::Left
    } else {
        return None;
    };

    for enemy in enemies.iter_mut() {
        enemy.y += tuning.row_drop;
    }
    log::debug!("Formation hit {:?} edge, offset now {:.1}", edge, formation.offset);

    Some(edge)
}

/// Nudge the offset until rounding leaves no overshoot on either side
fn pin_inside(formation: &mut Formation, enemies: &[Enemy], enemy_w: f32, width: f32) {
    let ulp = width.max(1.0) * f32::EPSILON;
    for _ in 0..8 {
        match living_extent(enemies, formation.offset, enemy_w) {
            Some((_, max_x)) if max_x > width => formation.offset -= (max_x - width).max(ulp),
            Some((min_x, _)) if min_x < 0.0 => formation.offset += (-min_x).max(ulp),
            _ => return,
        }
    }
}
