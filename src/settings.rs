//! Round configuration chosen on the config screen
//!
//! Persisted as JSON next to the score history. Invalid values are corrected,
//! never rejected: a round always starts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_DURATION_SECS;
use crate::error::{Result, StoreError};
use crate::input::Key;

/// Key that fires the player's weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ShootKey {
    #[default]
    Space,
    /// An upper-case ASCII letter
    Letter(char),
}

impl ShootKey {
    pub fn as_str(&self) -> String {
        match self {
            ShootKey::Space => "Space".to_string(),
            ShootKey::Letter(c) => c.to_string(),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("space") {
            return Some(ShootKey::Space);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Some(ShootKey::Letter(c.to_ascii_uppercase()))
            }
            _ => None,
        }
    }

    /// Whether a key event is this trigger
    pub fn matches(&self, key: &Key) -> bool {
        match (self, key) {
            (ShootKey::Space, Key::Space) => true,
            (ShootKey::Letter(c), Key::Char(k)) => c == k,
            _ => false,
        }
    }
}

impl From<String> for ShootKey {
    fn from(s: String) -> Self {
        ShootKey::from_str(&s).unwrap_or_else(|| {
            log::warn!("Unknown shoot key {:?}, using Space", s);
            ShootKey::Space
        })
    }
}

impl From<ShootKey> for String {
    fn from(key: ShootKey) -> Self {
        key.as_str()
    }
}

/// Player ship sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShipSkin {
    #[default]
    Blue,
    Red,
    Orange,
}

impl ShipSkin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipSkin::Blue => "Blue",
            ShipSkin::Red => "Red",
            ShipSkin::Orange => "Orange",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" | "spaceship_blue.png" => Some(ShipSkin::Blue),
            "red" | "spaceship_red.png" => Some(ShipSkin::Red),
            "orange" | "spaceship_orange.png" => Some(ShipSkin::Orange),
            _ => None,
        }
    }

    /// Sprite asset for the renderer
    pub fn sprite(&self) -> &'static str {
        match self {
            ShipSkin::Blue => "spaceship_blue.png",
            ShipSkin::Red => "spaceship_red.png",
            ShipSkin::Orange => "spaceship_orange.png",
        }
    }
}

/// Configuration for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Weapon trigger
    pub shoot_key: ShootKey,
    /// Round length in seconds (at least `MIN_DURATION_SECS`)
    pub duration_secs: u32,
    /// Ship sprite
    pub skin: ShipSkin,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shoot_key: ShootKey::Space,
            duration_secs: MIN_DURATION_SECS,
            skin: ShipSkin::Blue,
        }
    }
}

impl Settings {
    /// Copy with every value brought into range
    pub fn sanitized(&self) -> Self {
        let mut settings = self.clone();
        if settings.duration_secs < MIN_DURATION_SECS {
            log::warn!(
                "Duration {}s below minimum, clamping to {}s",
                settings.duration_secs,
                MIN_DURATION_SECS
            );
            settings.duration_secs = MIN_DURATION_SECS;
        }
        settings
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shoot_key_parsing() {
        assert_eq!(ShootKey::from_str("Space"), Some(ShootKey::Space));
        assert_eq!(ShootKey::from_str("space"), Some(ShootKey::Space));
        assert_eq!(ShootKey::from_str("f"), Some(ShootKey::Letter('F')));
        assert_eq!(ShootKey::from_str("F"), Some(ShootKey::Letter('F')));
        assert_eq!(ShootKey::from_str(""), None);
        assert_eq!(ShootKey::from_str("7"), None);
        assert_eq!(ShootKey::from_str("AB"), None);
    }

    #[test]
    fn test_shoot_key_matches() {
        assert!(ShootKey::Space.matches(&Key::Space));
        assert!(ShootKey::Letter('K').matches(&Key::from_name("k")));
        assert!(!ShootKey::Letter('K').matches(&Key::Space));
    }

    #[test]
    fn test_duration_clamped() {
        let settings = Settings {
            duration_secs: 30,
            ..Default::default()
        };
        assert_eq!(settings.sanitized().duration_secs, MIN_DURATION_SECS);

        let settings = Settings {
            duration_secs: 300,
            ..Default::default()
        };
        assert_eq!(settings.sanitized().duration_secs, 300);
    }

    #[test]
    fn test_json_missing_and_bad_key() {
        let settings: Settings = serde_json::from_str(r#"{"duration_secs": 200}"#).unwrap();
        assert_eq!(settings.shoot_key, ShootKey::Space);
        assert_eq!(settings.duration_secs, 200);

        let settings: Settings = serde_json::from_str(r#"{"shoot_key": "??"}"#).unwrap();
        assert_eq!(settings.shoot_key, ShootKey::Space);

        let settings: Settings =
            serde_json::from_str(r#"{"shoot_key": "x", "skin": "Red"}"#).unwrap();
        assert_eq!(settings.shoot_key, ShootKey::Letter('X'));
        assert_eq!(settings.skin, ShipSkin::Red);
    }

    #[test]
    fn test_roundtrip_keeps_letter_key() {
        let settings = Settings {
            shoot_key: ShootKey::Letter('Q'),
            duration_secs: 180,
            skin: ShipSkin::Orange,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains(r#""shoot_key":"Q""#));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_skin_lookup() {
        assert_eq!(ShipSkin::from_str("spaceship_red.png"), Some(ShipSkin::Red));
        assert_eq!(ShipSkin::from_str("ORANGE"), Some(ShipSkin::Orange));
        assert_eq!(ShipSkin::from_str("green"), None);
        assert_eq!(ShipSkin::Blue.sprite(), "spaceship_blue.png");
    }
}
