//! Per-player score history
//!
//! Entries are kept in the order they were recorded; rankings are computed
//! when read. Persisted as JSON.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// A single finished round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Final score
    pub score: u64,
    /// Unix timestamp (ms) when the round ended
    pub timestamp: f64,
}

/// Score history keyed by player name
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct ScoreHistory {
    players: BTreeMap<String, Vec<ScoreEntry>>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result for `player`
    ///
    /// Returns the rank the score holds in that player's history (1-indexed).
    pub fn record(&mut self, player: &str, score: u64, timestamp: f64) -> usize {
        let entries = self.players.entry(player.to_string()).or_default();
        entries.push(ScoreEntry { score, timestamp });
        // Equal scores rank after earlier ones
        let rank = entries.iter().filter(|e| e.score >= score).count();
        log::info!("Recorded score {} for {} (rank {})", score, player, rank);
        rank
    }

    /// Entries in the order they were recorded
    pub fn entries(&self, player: &str) -> &[ScoreEntry] {
        self.players.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entries sorted by descending score, ties in recording order
    pub fn ranked(&self, player: &str) -> Vec<ScoreEntry> {
        let mut entries = self.entries(player).to_vec();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }

    /// Get the top score (if any)
    pub fn best(&self, player: &str) -> Option<u64> {
        self.entries(player).iter().map(|e| e.score).max()
    }

    /// Rank a new score would take without recording it (1-indexed)
    pub fn potential_rank(&self, player: &str, score: u64) -> usize {
        self.entries(player).iter().filter(|e| e.score >= score).count() + 1
    }

    /// Forget everything recorded for `player`
    pub fn clear_player(&mut self, player: &str) -> bool {
        let removed = self.players.remove(player).is_some();
        if removed {
            log::info!("Cleared score history for {}", player);
        }
        removed
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.players.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.players.values().all(Vec::is_empty)
    }

    /// Load history from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let history: ScoreHistory = serde_json::from_str(&json)?;
        log::info!(
            "Loaded score history for {} players",
            history.players.len()
        );
        Ok(history)
    }

    /// Load history, starting fresh when the file is missing or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(history) => history,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No score history found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable score history {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Save history as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Score history saved ({} players)", self.players.len());
        Ok(())
    }
}
