use egg_invaders::input::Key;
use egg_invaders::round::{EndReason, Round, RoundOver};
use egg_invaders::sim::{GameEvent, GamePhase, PlayArea};
use egg_invaders::{Settings, Tuning};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn start(seed: u64) -> Round {
    let mut round = Round::new(Tuning::default());
    round.start(&Settings::default(), PlayArea::new(800.0, 600.0), seed);
    round.frame(0.0);
    round
}

/// Keep the round alive through any number of egg hits
fn make_invulnerable(round: &mut Round) {
    if let Some(state) = round.state_mut() {
        state.lives = u8::MAX;
    }
}

// ── full clear ────────────────────────────────────────────────────────────────

#[test]
fn full_clear_wins_with_every_row_scored() {
    let mut round = start(2024);
    make_invulnerable(&mut round);

    let mut now = 0.0;
    let mut over: Option<RoundOver> = None;
    let mut destroyed = Vec::new();

    for frame in 0..(60 * 120) {
        // Park the ship under the front-most living enemy
        if let Some(state) = round.state_mut() {
            let target = state
                .living_enemies()
                .map(|e| state.enemy_rect(e))
                .max_by(|a, b| a.bottom().total_cmp(&b.bottom()));
            if let Some(target) = target {
                state.player.rect.pos.x = target.center_x() - state.player.rect.size.x / 2.0;
            }
        }
        if frame % 2 == 0 {
            round.key_down(Key::Space);
        } else {
            round.key_up(Key::Space);
        }

        now += FRAME_MS;
        let outcome = round.frame(now);
        destroyed.extend(outcome.events.iter().filter_map(|e| match e {
            GameEvent::EnemyDestroyed { row, points } => Some((*row, *points)),
            _ => None,
        }));
        if outcome.over.is_some() {
            over = outcome.over;
            break;
        }
    }

    let over = over.expect("round should end");
    assert_eq!(over.reason, EndReason::Won);
    assert_eq!(over.message, "Champion!");
    // 5 columns * (20 + 15 + 10 + 5)
    assert_eq!(over.score, 250);
    assert_eq!(over.score, Tuning::default().full_clear_score());

    assert_eq!(destroyed.len(), 20);
    for row in 0..4u32 {
        let in_row = destroyed.iter().filter(|(r, _)| *r == row).count();
        assert_eq!(in_row, 5);
    }
    assert!(destroyed.iter().all(|(row, points)| *points == (4 - *row as u64) * 5));

    assert_eq!(round.phase(), GamePhase::Won);
    assert_eq!(round.timers_active(), 0);
    assert!(!round.key_down(Key::Space));
}

// ── timeout ───────────────────────────────────────────────────────────────────

#[test]
fn idle_player_times_out_with_try_harder_message() {
    let mut round = start(7);
    make_invulnerable(&mut round);

    let mut now = 0.0;
    let mut over = None;
    let mut steps = 0;
    for _ in 0..(60 * 125) {
        now += FRAME_MS;
        let outcome = round.frame(now);
        steps += outcome
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::DifficultyRaised { .. }))
            .count();
        if outcome.over.is_some() {
            over = outcome.over;
            break;
        }
    }

    let over = over.expect("round should time out");
    assert_eq!(over.reason, EndReason::TimedOut);
    assert_eq!(over.score, 0);
    assert_eq!(over.message, "You can do better");
    assert!(!over.is_win());
    assert_eq!(steps, 4);
    // Two minutes of play
    assert!(now >= 119_000.0 && now <= 121_000.0);
}

// ── enemy fire rate ───────────────────────────────────────────────────────────

#[test]
fn eggs_never_spawn_closer_than_the_interval() {
    let mut round = start(99);
    make_invulnerable(&mut round);

    let mut spawns = Vec::new();
    let mut now = 0.0;
    for i in 0..(60 * 12) {
        // Irregular frame pacing, including stalls past the cap
        now += match i % 7 {
            0 => 5.0,
            3 => 140.0,
            _ => FRAME_MS,
        };
        let outcome = round.frame(now);
        spawns.extend(outcome.events.iter().filter_map(|e| match e {
            GameEvent::EnemyFired { at_ms, .. } => Some(*at_ms),
            _ => None,
        }));
        assert!(outcome.over.is_none());
    }

    assert!(spawns.len() >= 10, "only {} eggs spawned", spawns.len());
    for pair in spawns.windows(2) {
        assert!(pair[1] - pair[0] >= 800.0, "eggs {:?} too close", pair);
    }
}

// ── determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_inputs_same_round() {
    let run = |seed: u64| {
        let mut round = start(seed);
        let mut log = Vec::new();
        let mut now = 0.0;
        for i in 0..600u32 {
            match i % 40 {
                0 => {
                    round.key_down(Key::Left);
                }
                10 => {
                    round.key_up(Key::Left);
                    round.key_down(Key::Space);
                }
                11 => {
                    round.key_up(Key::Space);
                }
                20 => {
                    round.key_down(Key::Right);
                }
                30 => {
                    round.key_up(Key::Right);
                }
                _ => {}
            }
            now += FRAME_MS;
            let outcome = round.frame(now);
            log.extend(outcome.events);
            if outcome.over.is_some() {
                break;
            }
        }
        (log, round.state().map(|s| (s.score, s.lives, s.player.rect)))
    };

    assert_eq!(run(5), run(5));
}
