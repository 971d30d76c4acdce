//! A player's session: login state, screen flow, sound and score history
//!
//! The session is the only place a round touches the outside world. Screens
//! and sound playback stay behind traits so hosts (and tests) plug in their own.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::audio::{SoundEffect, SoundSink};
use crate::highscores::ScoreHistory;
use crate::input::Key;
use crate::round::{Round, RoundOver};
use crate::settings::Settings;
use crate::sim::PlayArea;
use crate::tuning::Tuning;

/// Full-page panels the host can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Welcome,
    Login,
    Config,
    Game,
    Scores,
}

impl Screen {
    /// Element id a web host would toggle
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::Login => "login",
            Screen::Config => "config",
            Screen::Game => "game",
            Screen::Scores => "scores",
        }
    }
}

/// Receives screen changes and round results
pub trait ScreenRouter {
    fn show(&mut self, screen: Screen);
    fn round_over(&mut self, over: &RoundOver);
}

pub struct Session<R: ScreenRouter, S: SoundSink> {
    pub round: Round,
    pub router: R,
    pub sound: S,
    pub history: ScoreHistory,
    history_path: Option<PathBuf>,
    player: Option<String>,
}

impl<R: ScreenRouter, S: SoundSink> Session<R, S> {
    pub fn new(tuning: Tuning, router: R, sound: S) -> Self {
        Self {
            round: Round::new(tuning),
            router,
            sound,
            history: ScoreHistory::new(),
            history_path: None,
            player: None,
        }
    }

    /// Back the history with a JSON file, saved after every round
    pub fn with_history_file(mut self, path: &Path) -> Self {
        self.history = ScoreHistory::load_or_default(path);
        self.history_path = Some(path.to_path_buf());
        self
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    /// Mark `name` as the current player and move on to configuration
    pub fn login(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            log::warn!("Rejected empty player name");
            return false;
        }
        self.player = Some(name.to_string());
        log::info!("Player {} logged in", name);
        self.router.show(Screen::Config);
        true
    }

    /// Stop any round, forget the player's history and return to the welcome screen
    pub fn logout(&mut self) {
        self.stop_round();
        if let Some(player) = self.player.take() {
            self.history.clear_player(&player);
            self.persist_history();
            log::info!("Player {} logged out", player);
        }
        self.router.show(Screen::Welcome);
    }

    /// Switch screens from navigation; leaving the game abandons the round
    pub fn navigate(&mut self, screen: Screen) {
        self.stop_round();
        self.router.show(screen);
    }

    /// Start a round for the current player
    ///
    /// Without a logged-in player nothing starts and the login screen is shown.
    pub fn start_round(&mut self, settings: &Settings, area: PlayArea, seed: u64) -> bool {
        if self.player.is_none() {
            log::warn!("Cannot start a round without a player");
            self.router.show(Screen::Login);
            return false;
        }
        self.sound.play(SoundEffect::ThemeStop);
        self.round.start(settings, area, seed);
        self.router.show(Screen::Game);
        self.sound.play(SoundEffect::ThemeStart);
        true
    }

    pub fn key_down(&mut self, name: &str) -> bool {
        self.round.key_down(Key::from_name(name))
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        self.round.key_up(Key::from_name(name))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.round.resize(width, height);
    }

    /// Drive one frame and dispatch its sounds and result
    pub fn frame(&mut self, now_ms: f64) -> Option<RoundOver> {
        let outcome = self.round.frame(now_ms);
        for event in &outcome.events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.sound.play(effect);
            }
        }

        let over = outcome.over?;
        self.sound.play(SoundEffect::ThemeStop);
        self.sound.play(SoundEffect::for_outcome(&over));
        if let Some(player) = &self.player {
            self.history.record(player, over.score, unix_millis());
            self.persist_history();
        }
        self.router.round_over(&over);
        self.router.show(Screen::Config);
        Some(over)
    }

    fn stop_round(&mut self) {
        self.sound.play(SoundEffect::ThemeStop);
        self.round.abort();
    }

    fn persist_history(&self) {
        let Some(path) = &self.history_path else {
            return;
        };
        if let Err(e) = self.history.save(path) {
            log::warn!("Failed to save score history: {}", e);
        }
    }
}

fn unix_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingSink;
    use crate::round::EndReason;
    use crate::sim::GamePhase;

    #[derive(Debug, Default)]
    struct TestRouter {
        screens: Vec<Screen>,
        results: Vec<RoundOver>,
    }

    impl ScreenRouter for TestRouter {
        fn show(&mut self, screen: Screen) {
            self.screens.push(screen);
        }

        fn round_over(&mut self, over: &RoundOver) {
            self.results.push(over.clone());
        }
    }

    fn session() -> Session<TestRouter, RecordingSink> {
        Session::new(Tuning::default(), TestRouter::default(), RecordingSink::default())
    }

    fn area() -> PlayArea {
        PlayArea::new(800.0, 600.0)
    }

    #[test]
    fn test_start_requires_player() {
        let mut session = session();
        assert!(!session.start_round(&Settings::default(), area(), 1));
        assert_eq!(session.router.screens, vec![Screen::Login]);
        assert_eq!(session.round.phase(), GamePhase::Idle);

        assert!(!session.login("   "));
        assert!(session.login("ada"));
        assert!(session.start_round(&Settings::default(), area(), 1));
        assert_eq!(session.router.screens.last(), Some(&Screen::Game));
        assert_eq!(session.sound.effects.last(), Some(&SoundEffect::ThemeStart));
    }

    #[test]
    fn test_round_over_records_and_routes() {
        let mut session = session();
        session.login("ada");
        session.start_round(&Settings::default(), area(), 1);
        session.frame(0.0);
        if let Some(state) = session.round.state_mut() {
            state.score = 130;
            state.time_left = 1;
            state.lives = 250;
        }

        let mut now = 0.0;
        let mut over = None;
        for _ in 0..120 {
            now += 1000.0 / 60.0;
            over = session.frame(now);
            if over.is_some() {
                break;
            }
        }

        let over = over.unwrap();
        assert_eq!(over.reason, EndReason::TimedOut);
        assert_eq!(over.message, "Winner!");
        assert_eq!(session.router.results, vec![over]);
        assert_eq!(session.router.screens.last(), Some(&Screen::Config));
        assert_eq!(session.history.best("ada"), Some(130));

        let tail = &session.sound.effects[session.sound.effects.len() - 2..];
        assert_eq!(tail, &[SoundEffect::ThemeStop, SoundEffect::RoundWon]);
    }

    #[test]
    fn test_shots_make_sound() {
        let mut session = session();
        session.login("ada");
        session.start_round(&Settings::default(), area(), 1);
        session.frame(0.0);
        assert!(session.key_down(" "));
        session.frame(16.0);
        assert!(session.sound.effects.contains(&SoundEffect::PlayerShoot));
    }

    #[test]
    fn test_logout_stops_round_and_clears_history() {
        let mut session = session();
        session.login("ada");
        session.history.record("ada", 80, 1.0);
        session.history.record("bob", 90, 1.0);
        session.start_round(&Settings::default(), area(), 1);

        session.logout();
        assert_eq!(session.player(), None);
        assert_eq!(session.round.phase(), GamePhase::Idle);
        assert_eq!(session.round.timers_active(), 0);
        assert!(session.history.entries("ada").is_empty());
        assert_eq!(session.history.best("bob"), Some(90));
        assert_eq!(session.router.screens.last(), Some(&Screen::Welcome));
        assert_eq!(session.sound.effects.last(), Some(&SoundEffect::ThemeStop));
        assert!(!session.key_down("ArrowLeft"));
    }

    #[test]
    fn test_navigate_abandons_round() {
        let mut session = session();
        session.login("ada");
        session.start_round(&Settings::default(), area(), 1);
        session.navigate(Screen::Scores);
        assert!(session.round.state().is_none());
        assert!(session.frame(1000.0).is_none());
        assert!(session.router.results.is_empty());
        assert_eq!(Screen::Scores.id(), "scores");
    }
}
