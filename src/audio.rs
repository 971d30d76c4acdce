//! Sound triggers
//!
//! The core only decides *when* a sound plays. Playback belongs to whatever
//! implements `SoundSink` on the host side.

use crate::round::RoundOver;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fired a bullet
    PlayerShoot,
    /// Egg hit the ship
    PlayerHit,
    /// Enemy destroyed
    EnemyHit,
    /// Round ended with a win framing
    RoundWon,
    /// Round ended with a loss framing
    RoundLost,
    /// Looping music starts with the round
    ThemeStart,
    /// Music stops when the round ends or the player leaves
    ThemeStop,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerFired => Some(SoundEffect::PlayerShoot),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHit),
            GameEvent::EnemyDestroyed { .. } => Some(SoundEffect::EnemyHit),
            GameEvent::EnemyFired { .. } | GameEvent::DifficultyRaised { .. } => None,
        }
    }

    /// Closing sting for a finished round
    pub fn for_outcome(over: &RoundOver) -> Self {
        if over.is_win() {
            SoundEffect::RoundWon
        } else {
            SoundEffect::RoundLost
        }
    }

    /// Asset file a host would play
    pub fn asset(&self) -> Option<&'static str> {
        match self {
            SoundEffect::PlayerShoot => Some("shooting.mp3"),
            SoundEffect::PlayerHit | SoundEffect::EnemyHit => Some("chickenDeath.mp3"),
            SoundEffect::ThemeStart => Some("theme.mp3"),
            SoundEffect::RoundWon | SoundEffect::RoundLost | SoundEffect::ThemeStop => None,
        }
    }
}

/// Fire-and-forget sound output
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Logs sounds instead of playing them (headless runs)
#[derive(Debug, Clone)]
pub struct LogSink {
    muted: bool,
    theme_playing: bool,
    played: u64,
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink {
    pub fn new() -> Self {
        Self {
            muted: false,
            theme_playing: false,
            played: 0,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn theme_playing(&self) -> bool {
        self.theme_playing
    }

    /// Effects accepted while unmuted
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        match effect {
            SoundEffect::ThemeStart => self.theme_playing = true,
            // Stopping is honoured even while muted
            SoundEffect::ThemeStop => self.theme_playing = false,
            _ => {}
        }
        if self.muted {
            return;
        }
        self.played += 1;
        match effect.asset() {
            Some(asset) => log::debug!("Sound {:?} ({})", effect, asset),
            None => log::debug!("Sound {:?}", effect),
        }
    }
}

/// Records every effect in order
#[cfg(test)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub effects: Vec<SoundEffect>,
}

#[cfg(test)]
impl SoundSink for RecordingSink {
    fn play(&mut self, effect: SoundEffect) {
        self.effects.push(effect);
    }
}
