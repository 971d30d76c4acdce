//! Round lifecycle: start, per-frame driving, timers and the terminal handoff
//!
//! A `Round` owns everything one game needs between start and finish: the
//! simulation state, the input snapshot, the frame clock and both periodic
//! timers. Finishing a round cancels the timers and drops the state in one
//! place, so a new round can never inherit live timers from the last one.

use crate::clock::{FrameClock, PeriodicTimer};
use crate::consts::{COUNTDOWN_INTERVAL_MS, TIMEOUT_WIN_SCORE};
use crate::input::{InputState, Key};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, PlayArea, difficulty, tick};
use crate::tuning::Tuning;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Won,
    Lost,
    TimedOut,
}

impl EndReason {
    pub fn phase(&self) -> GamePhase {
        match self {
            EndReason::Won => GamePhase::Won,
            EndReason::Lost => GamePhase::Lost,
            EndReason::TimedOut => GamePhase::TimedOut,
        }
    }
}

/// Final result handed to the screen router and score history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOver {
    pub reason: EndReason,
    pub score: u64,
    pub message: &'static str,
}

impl RoundOver {
    pub fn new(reason: EndReason, score: u64) -> Self {
        let message = match reason {
            EndReason::Lost => "You Lost!",
            EndReason::Won => "Champion!",
            EndReason::TimedOut if score >= TIMEOUT_WIN_SCORE => "Winner!",
            EndReason::TimedOut => "You can do better",
        };
        Self {
            reason,
            score,
            message,
        }
    }

    /// Whether the outcome is framed as a win
    pub fn is_win(&self) -> bool {
        match self.reason {
            EndReason::Won => true,
            EndReason::Lost => false,
            EndReason::TimedOut => self.score >= TIMEOUT_WIN_SCORE,
        }
    }
}

/// Everything one frame produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Simulation events in the order they happened
    pub events: Vec<GameEvent>,
    /// Set on the frame the round ended
    pub over: Option<RoundOver>,
}

/// One round of play
#[derive(Debug, Clone)]
pub struct Round {
    tuning: Tuning,
    settings: Settings,
    phase: GamePhase,
    state: Option<GameState>,
    input: InputState,
    clock: FrameClock,
    countdown: Option<PeriodicTimer>,
    accelerator: Option<PeriodicTimer>,
}

impl Round {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            settings: Settings::default(),
            phase: GamePhase::Idle,
            state: None,
            input: InputState::new(),
            clock: FrameClock::new(),
            countdown: None,
            accelerator: None,
        }
    }

    /// Begin a fresh round
    ///
    /// Any round still in progress is abandoned without a result.
    pub fn start(&mut self, settings: &Settings, area: PlayArea, seed: u64) {
        self.cancel_timers();
        if self.state.take().is_some() {
            log::warn!("Starting a new round over one still in progress");
        }

        self.settings = settings.sanitized();
        self.state = Some(GameState::new(
            seed,
            self.tuning.clone(),
            area,
            self.settings.duration_secs,
            self.settings.skin,
        ));
        self.input.clear();
        self.clock.reset();
        self.countdown = Some(PeriodicTimer::new(COUNTDOWN_INTERVAL_MS));
        self.accelerator = Some(PeriodicTimer::new(self.tuning.accel_interval_ms));
        self.phase = GamePhase::Running;

        log::info!(
            "Round started: seed {}, {}s, shoot key {}, area {}x{}",
            seed,
            self.settings.duration_secs,
            self.settings.shoot_key.as_str(),
            area.width,
            area.height
        );
    }

    /// Advance the round to host time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        if self.phase != GamePhase::Running {
            return FrameOutcome::default();
        }
        let Some(state) = self.state.as_mut() else {
            return FrameOutcome::default();
        };

        // Timers follow host time; only the simulation step is capped
        let step = self.clock.advance(now_ms);

        if let Some(accelerator) = self.accelerator.as_mut() {
            for _ in 0..accelerator.advance(step.elapsed_ms) {
                difficulty::accelerate(state);
            }
            if difficulty::at_cap(state) {
                log::debug!("Difficulty at cap, accelerator stopped");
                self.accelerator = None;
            }
        }

        if let Some(countdown) = self.countdown.as_mut() {
            let fired = countdown.advance(step.elapsed_ms);
            state.time_left = state.time_left.saturating_sub(fired);
            if state.time_left == 0 {
                state.phase = GamePhase::TimedOut;
                log::info!("Time up");
            }
        }

        if state.phase == GamePhase::Running {
            let input = self.input.snapshot();
            tick(state, &input, step.dt);
        }

        let events = state.take_events();
        let over = end_reason(state).map(|reason| self.finish(reason));
        FrameOutcome { events, over }
    }

    /// Terminal handoff; only reachable while a state exists
    fn finish(&mut self, reason: EndReason) -> RoundOver {
        self.cancel_timers();
        self.input.clear();
        self.phase = reason.phase();

        let score = self.state.take().map_or(0, |s| s.score);
        let over = RoundOver::new(reason, score);
        log::info!("Round over: {:?}, score {} ({})", reason, score, over.message);
        over
    }

    /// Abandon the round without producing a result
    pub fn abort(&mut self) {
        if self.state.take().is_some() {
            log::info!("Round aborted");
        }
        self.cancel_timers();
        self.input.clear();
        self.phase = GamePhase::Idle;
    }

    /// Drop both periodic timers; safe to call any number of times
    pub fn cancel_timers(&mut self) {
        self.countdown = None;
        self.accelerator = None;
    }

    pub fn timers_active(&self) -> usize {
        self.countdown.is_some() as usize + self.accelerator.is_some() as usize
    }

    /// Key press; ignored unless the round is running
    pub fn key_down(&mut self, key: Key) -> bool {
        if !self.is_running() {
            return false;
        }
        self.input.key_down(key, self.settings.shoot_key);
        true
    }

    /// Key release; ignored unless the round is running
    pub fn key_up(&mut self, key: Key) -> bool {
        if !self.is_running() {
            return false;
        }
        self.input.key_up(key, self.settings.shoot_key);
        true
    }

    /// Track a new play-area size
    ///
    /// Placed enemies are not reflowed; only bounds used from now on change.
    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(state) = self.state.as_mut() {
            state.area = PlayArea::new(width, height);
            log::debug!("Play area resized to {}x{}", state.area.width, state.area.height);
        }
    }

    /// Running, with lives, living enemies and time left
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
            && self.state.as_ref().is_some_and(|s| end_reason(s).is_none())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Mutable access for hosts and tests that stage scenarios
    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Terminal reason, if the state should no longer be simulated
///
/// Trusts the phase set by the simulation first, then falls back to the
/// raw counters so a round can never keep running on zero lives or time.
fn end_reason(state: &GameState) -> Option<EndReason> {
    match state.phase {
        GamePhase::Won => return Some(EndReason::Won),
        GamePhase::Lost => return Some(EndReason::Lost),
        GamePhase::TimedOut => return Some(EndReason::TimedOut),
        GamePhase::Idle | GamePhase::Running => {}
    }
    if state.lives == 0 {
        Some(EndReason::Lost)
    } else if !state.any_enemy_alive() {
        Some(EndReason::Won)
    } else if state.time_left == 0 {
        Some(EndReason::TimedOut)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ShootKey;
    use crate::sim::{EnemyShot, Rect};

    fn started(duration_secs: u32) -> Round {
        let mut round = Round::new(Tuning::default());
        let settings = Settings {
            duration_secs,
            ..Settings::default()
        };
        round.start(&settings, PlayArea::new(800.0, 600.0), 42);
        round
    }

    /// Step the round at 60 fps until it ends or `max_frames` pass
    fn run_frames(round: &mut Round, start_ms: f64, max_frames: u32) -> (f64, Option<RoundOver>) {
        let mut now = start_ms;
        for _ in 0..max_frames {
            now += 1000.0 / 60.0;
            if let Some(over) = round.frame(now).over {
                return (now, Some(over));
            }
        }
        (now, None)
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(RoundOver::new(EndReason::Lost, 500).message, "You Lost!");
        assert_eq!(RoundOver::new(EndReason::Won, 250).message, "Champion!");
        assert_eq!(RoundOver::new(EndReason::TimedOut, 100).message, "Winner!");
        assert_eq!(RoundOver::new(EndReason::TimedOut, 99).message, "You can do better");
        assert!(RoundOver::new(EndReason::TimedOut, 100).is_win());
        assert!(!RoundOver::new(EndReason::TimedOut, 40).is_win());
    }

    #[test]
    fn test_start_sanitizes_and_arms_timers() {
        let round = started(30);
        assert_eq!(round.phase(), GamePhase::Running);
        assert_eq!(round.settings().duration_secs, 120);
        assert_eq!(round.state().map(|s| s.time_left), Some(120));
        assert_eq!(round.timers_active(), 2);
        assert!(round.is_running());
    }

    #[test]
    fn test_restart_does_not_stack_timers() {
        let mut round = started(120);
        round.frame(0.0);
        round.frame(500.0);
        round.start(&Settings::default(), PlayArea::new(800.0, 600.0), 43);
        assert_eq!(round.timers_active(), 2);

        // One countdown second per 1000 ms, not two
        round.frame(1000.0);
        round.frame(1100.0);
        assert_eq!(round.state().map(|s| s.time_left), Some(120));
        for i in 1..=10 {
            round.frame(1100.0 + i as f64 * 100.0);
        }
        assert_eq!(round.state().map(|s| s.time_left), Some(119));
    }

    #[test]
    fn test_timeout_with_low_score() {
        let mut round = started(120);
        round.frame(0.0);
        if let Some(state) = round.state_mut() {
            state.score = 40;
            state.time_left = 1;
            state.lives = 250;
        }

        let (_, over) = run_frames(&mut round, 0.0, 120);
        let over = over.unwrap();
        assert_eq!(over.reason, EndReason::TimedOut);
        assert_eq!(over.message, "You can do better");
        assert_eq!(round.phase(), GamePhase::TimedOut);
        assert!(round.state().is_none());
        assert_eq!(round.timers_active(), 0);
    }

    #[test]
    fn test_slow_host_times_out_on_host_clock() {
        let mut round = started(120);
        round.frame(0.0);
        if let Some(state) = round.state_mut() {
            state.lives = u8::MAX;
        }

        // 4 fps: every frame is past the simulation cap
        let mut ended_at = None;
        for i in 1..=481 {
            let now = i as f64 * 250.0;
            if let Some(over) = round.frame(now).over {
                ended_at = Some((now, over.reason));
                break;
            }
            if i == 240 {
                assert_eq!(round.state().map(|s| s.time_left), Some(60));
            }
        }

        let (now, reason) = ended_at.unwrap();
        assert_eq!(reason, EndReason::TimedOut);
        assert_eq!(now, 120_000.0);
        assert_eq!(round.timers_active(), 0);
    }

    #[test]
    fn test_lost_reported_exactly_once() {
        let mut round = started(120);
        round.frame(0.0);
        if let Some(state) = round.state_mut() {
            state.lives = 1;
            // Two eggs on the ship: only the first one is counted
            for dx in [0.0, 10.0] {
                let id = state.next_entity_id();
                let ship = state.player.rect;
                state.enemy_shots.push(EnemyShot {
                    id,
                    rect: Rect::new(ship.left() + dx, ship.top() - 20.0, 20.0, 28.0),
                    vy: 0.0,
                    rotation: 0.0,
                    spent: false,
                });
            }
        }

        let (now, over) = run_frames(&mut round, 0.0, 10);
        assert_eq!(over.unwrap().reason, EndReason::Lost);

        // Later frames see a finished round
        let (_, again) = run_frames(&mut round, now, 120);
        assert!(again.is_none());
        assert_eq!(round.phase(), GamePhase::Lost);
    }

    #[test]
    fn test_accelerator_runs_to_cap_then_stops() {
        let mut round = started(120);
        round.frame(0.0);
        if let Some(state) = round.state_mut() {
            state.lives = 250;
        }

        let mut now = 0.0;
        for _ in 0..(30 * 10) {
            now += 100.0;
            round.frame(now);
            if round.phase() != GamePhase::Running {
                break;
            }
        }
        let state = round.state().unwrap();
        assert_eq!(state.accel_steps, 4);
        // Countdown only
        assert_eq!(round.timers_active(), 1);
    }

    #[test]
    fn test_key_events_dropped_when_not_running() {
        let mut round = Round::new(Tuning::default());
        assert!(!round.key_down(Key::Space));

        let mut round = started(120);
        assert!(round.key_down(Key::Left));
        round.abort();
        assert!(!round.key_down(Key::Space));
        assert!(!round.key_up(Key::Left));
        assert_eq!(round.phase(), GamePhase::Idle);
        assert_eq!(round.timers_active(), 0);
    }

    #[test]
    fn test_shoot_key_from_settings() {
        let mut round = Round::new(Tuning::default());
        let settings = Settings {
            shoot_key: ShootKey::Letter('F'),
            ..Settings::default()
        };
        round.start(&settings, PlayArea::new(800.0, 600.0), 1);
        round.frame(0.0);

        round.key_down(Key::Space);
        round.frame(16.0);
        assert_eq!(round.state().map(|s| s.player_shots.len()), Some(0));

        round.key_down(Key::from_name("f"));
        round.frame(32.0);
        assert_eq!(round.state().map(|s| s.player_shots.len()), Some(1));
    }

    #[test]
    fn test_resize_to_zero_does_not_panic() {
        let mut round = started(120);
        round.frame(0.0);
        round.resize(0.0, 0.0);
        for i in 1..30 {
            round.frame(i as f64 * 16.0);
        }
        if let Some(state) = round.state() {
            assert!(state.formation.offset.is_finite());
            assert!(state.player.rect.pos.x.is_finite());
        }
    }
}
