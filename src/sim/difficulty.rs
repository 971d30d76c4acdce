//! Time-based difficulty ramp
//!
//! Each step speeds up the formation, the speed new eggs spawn with, and every
//! egg already falling.

use super::state::{GameEvent, GameState};

/// Apply one accelerator step
///
/// Returns false (and changes nothing) once the step cap is reached.
pub fn accelerate(state: &mut GameState) -> bool {
    if state.accel_steps >= state.tuning.max_accel_steps {
        return false;
    }

    let factor = state.tuning.accel_factor;
    state.accel_steps += 1;
    state.formation.speed *= factor;
    state.egg_speed *= factor;
    for egg in &mut state.enemy_shots {
        egg.vy *= factor;
    }

    state.events.push(GameEvent::DifficultyRaised {
        step: state.accel_steps,
    });
    log::info!(
        "Difficulty step {}/{}: formation {:.1}px/s, eggs {:.1}px/s",
        state.accel_steps,
        state.tuning.max_accel_steps,
        state.formation.speed,
        state.egg_speed
    );
    true
}

/// Whether further steps are possible
pub fn at_cap(state: &GameState) -> bool {
    state.accel_steps >= state.tuning.max_accel_steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ShipSkin;
    use crate::sim::projectile::maybe_fire_egg;
    use crate::sim::state::PlayArea;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(9, Tuning::default(), PlayArea::new(800.0, 600.0), 120, ShipSkin::Blue)
    }

    #[test]
    fn test_step_scales_speeds() {
        let mut state = state();
        maybe_fire_egg(&mut state).unwrap();

        assert!(accelerate(&mut state));
        assert_eq!(state.accel_steps, 1);
        assert!((state.formation.speed - 72.0).abs() < 1e-3);
        assert!((state.egg_speed - 312.0).abs() < 1e-3);
        assert!((state.enemy_shots[0].vy - 312.0).abs() < 1e-3);
        assert_eq!(state.events.last(), Some(&GameEvent::DifficultyRaised { step: 1 }));
    }

    #[test]
    fn test_step_cap() {
        let mut state = state();
        for _ in 0..4 {
            assert!(accelerate(&mut state));
        }
        assert!(at_cap(&state));
        let speed = state.formation.speed;
        let egg_speed = state.egg_speed;

        assert!(!accelerate(&mut state));
        assert_eq!(state.accel_steps, 4);
        assert_eq!(state.formation.speed, speed);
        assert_eq!(state.egg_speed, egg_speed);
        // 60 * 1.2^4
        assert!((speed - 124.416).abs() < 1e-2);
    }
}
