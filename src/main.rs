//! Egg Invaders entry point
//!
//! Runs one headless round driven by a simple autopilot:
//!
//! ```text
//! egg-invaders [player] [settings.json] [history.json]
//! ```
//!
//! Set `RUST_LOG=debug` to see every shot, hit and difficulty step.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use egg_invaders::audio::LogSink;
use egg_invaders::render::{Hud, draw_list};
use egg_invaders::round::RoundOver;
use egg_invaders::session::{Screen, ScreenRouter, Session};
use egg_invaders::sim::{GameState, PlayArea};
use egg_invaders::{Settings, ShootKey, Tuning};

const PLAY_WIDTH: f32 = 800.0;
const PLAY_HEIGHT: f32 = 600.0;
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Logs screen changes instead of showing them
struct ConsoleRouter;

impl ScreenRouter for ConsoleRouter {
    fn show(&mut self, screen: Screen) {
        log::info!("Screen: {}", screen.id());
    }

    fn round_over(&mut self, over: &RoundOver) {
        println!("{}\nScore: {}", over.message, over.score);
    }
}

/// Steering decision for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Steer {
    Left,
    Right,
    Hold,
}

/// Chases the front-most enemy column and sidesteps falling eggs
#[derive(Debug, Default)]
struct Autopilot {
    left_held: bool,
    right_held: bool,
    trigger_held: bool,
}

impl Autopilot {
    fn decide(state: &GameState) -> (Steer, bool) {
        let ship = state.player.rect;
        let cx = ship.center_x();

        // Dodge the closest egg that would land on the ship
        let threat = state
            .enemy_shots
            .iter()
            .filter(|e| e.rect.bottom() <= ship.top() && ship.top() - e.rect.bottom() < 160.0)
            .filter(|e| e.rect.right() > ship.left() - 12.0 && e.rect.left() < ship.right() + 12.0)
            .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));
        if let Some(egg) = threat {
            let room_right = state.area.width - ship.right();
            let steer = if egg.rect.center_x() < cx && room_right > ship.size.x {
                Steer::Right
            } else if ship.left() > ship.size.x {
                Steer::Left
            } else {
                Steer::Right
            };
            return (steer, false);
        }

        let target = state
            .living_enemies()
            .map(|e| state.enemy_rect(e))
            .max_by(|a, b| {
                a.bottom()
                    .total_cmp(&b.bottom())
                    .then((b.center_x() - cx).abs().total_cmp(&(a.center_x() - cx).abs()))
            });
        let Some(target) = target else {
            return (Steer::Hold, false);
        };

        let dx = target.center_x() - cx;
        let steer = if dx < -4.0 {
            Steer::Left
        } else if dx > 4.0 {
            Steer::Right
        } else {
            Steer::Hold
        };
        (steer, dx.abs() < target.size.x / 2.0)
    }

    fn drive<R: ScreenRouter>(&mut self, session: &mut Session<R, LogSink>, shoot: &str) {
        let Some(state) = session.round.state() else {
            return;
        };
        let (steer, fire) = Self::decide(state);

        let want_left = steer == Steer::Left;
        let want_right = steer == Steer::Right;
        if want_left != self.left_held {
            self.left_held = want_left;
            toggle(session, "ArrowLeft", want_left);
        }
        if want_right != self.right_held {
            self.right_held = want_right;
            toggle(session, "ArrowRight", want_right);
        }

        // Release every other frame so each shot is a fresh edge
        if self.trigger_held {
            self.trigger_held = false;
            session.key_up(shoot);
        } else if fire {
            self.trigger_held = true;
            session.key_down(shoot);
        }
    }
}

fn toggle<R: ScreenRouter>(session: &mut Session<R, LogSink>, key: &str, down: bool) {
    if down {
        session.key_down(key);
    } else {
        session.key_up(key);
    }
}

/// Key name the input layer maps back onto the trigger
fn trigger_name(key: ShootKey) -> String {
    match key {
        ShootKey::Space => " ".to_string(),
        ShootKey::Letter(c) => c.to_string(),
    }
}

fn main() {
    env_logger::init();
    log::info!("Egg Invaders (headless) starting...");

    let mut args = std::env::args().skip(1);
    let player = args.next().unwrap_or_else(|| "pilot".to_string());
    let settings = args
        .next()
        .map(|p| Settings::load_or_default(&PathBuf::from(p)))
        .unwrap_or_default();
    let history_path = args.next().map(PathBuf::from);

    let mut session = Session::new(Tuning::default(), ConsoleRouter, LogSink::new());
    if let Some(path) = &history_path {
        session = session.with_history_file(path);
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    session.login(&player);
    if !session.start_round(&settings, PlayArea::new(PLAY_WIDTH, PLAY_HEIGHT), seed) {
        return;
    }

    let shoot = trigger_name(session.round.settings().shoot_key);
    let mut autopilot = Autopilot::default();
    let mut hud = None;
    let mut now = 0.0;
    let max_frames = (session.round.settings().duration_secs as u64 + 5) * 60;

    for frame in 0..max_frames {
        autopilot.drive(&mut session, &shoot);
        if let Some(over) = session.frame(now) {
            log::info!("Round finished after {} frames", frame);
            if over.is_win() {
                log::info!("Outcome framed as a win");
            }
            break;
        }
        if let Some(state) = session.round.state() {
            if frame % 600 == 0 {
                log::info!(
                    "t={}s: {} draw commands, {} eggs in flight",
                    frame / 60,
                    draw_list(state).len(),
                    state.enemy_shots.len()
                );
            }
            hud = Some(Hud::from_state(state));
        }
        now += FRAME_MS;
    }

    if let Some(hud) = hud {
        println!("{} | {} | {}", hud.score, hud.lives, hud.time);
    }
    log::info!(
        "{} sounds triggered, theme playing: {}",
        session.sound.played(),
        session.sound.theme_playing()
    );
    if let Some(best) = session.history.best(&player) {
        println!("Best for {}: {}", player, best);
    }
}
