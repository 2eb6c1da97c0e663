//! Boundaries the game core talks through: storage and audio.
//!
//! The encounter controller only ever calls these traits. Implementations
//! may fail; the controller logs the failure and keeps playing.

use super::leaderboard::{best_time, rank, recent_history, LeaderboardKind};
use super::settings::{Difficulty, Settings};
use crate::character::Character;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for io::Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Io(inner) => inner,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CombatResult {
    Victory,
    Defeat,
}

impl fmt::Display for CombatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatResult::Victory => f.pad("Victory"),
            CombatResult::Defeat => f.pad("Defeat"),
        }
    }
}

/// A character as it sits in storage, with the stage to resume from.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCharacter {
    pub character: Character,
    pub stage: u32,
    pub last_saved: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombatRecord {
    pub player_name: String,
    pub enemy_name: String,
    pub stage: u32,
    pub result: CombatResult,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub run_id: String,
    pub player_name: String,
    pub completion_seconds: f64,
    pub total_damage: u64,
    pub enemies_defeated: u32,
    pub difficulty: Difficulty,
    pub run_date: i64,
}

pub trait PersistencePort {
    /// Insert or overwrite the save for `character.name`.
    fn save_character(&mut self, character: &Character, stage: u32) -> StoreResult<()>;

    fn load_character(&self, name: &str) -> StoreResult<Option<SavedCharacter>>;

    fn record_combat_result(&mut self, record: &CombatRecord) -> StoreResult<()>;

    fn record_leaderboard_entry(&mut self, entry: &LeaderboardEntry) -> StoreResult<()>;

    fn load_settings(&self) -> StoreResult<Settings>;
}

/// One row of the save browser.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSummary {
    pub name: String,
    pub level: u32,
    pub stage: u32,
    pub last_saved: i64,
}

/// Read-mostly queries behind the save browser, history and leaderboard screens.
pub trait SaveBrowser: PersistencePort {
    /// Most recently saved first, at most `SAVE_LIST_LIMIT`.
    fn list_saves(&self) -> StoreResult<Vec<SaveSummary>>;

    /// Removes the save and that player's combat history. Returns false if
    /// there was no save.
    fn delete_save(&mut self, name: &str) -> StoreResult<bool>;

    fn save_settings(&mut self, settings: &Settings) -> StoreResult<()>;

    fn all_combat_records(&self) -> StoreResult<Vec<CombatRecord>>;

    fn all_leaderboard_entries(&self) -> StoreResult<Vec<LeaderboardEntry>>;

    fn combat_history(&self, name: &str, limit: usize) -> StoreResult<Vec<CombatRecord>> {
        Ok(recent_history(&self.all_combat_records()?, name, limit))
    }

    fn leaderboard(&self, kind: LeaderboardKind) -> StoreResult<Vec<LeaderboardEntry>> {
        Ok(rank(&self.all_leaderboard_entries()?, kind))
    }

    fn player_best_time(&self, name: &str) -> StoreResult<Option<f64>> {
        Ok(best_time(&self.all_leaderboard_entries()?, name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Attack,
    Victory,
    Defeat,
}

pub trait AudioPort {
    fn play(&mut self, cue: SoundCue);

    fn play_stage_music(&mut self, stage: u32);

    fn stop_music(&mut self);
}

/// Audio that goes nowhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioPort for SilentAudio {
    fn play(&mut self, _cue: SoundCue) {}

    fn play_stage_music(&mut self, _stage: u32) {}

    fn stop_music(&mut self) {}
}

/// Writes every cue to the trace log; the terminal build has no mixer.
#[derive(Debug, Default, Clone)]
pub struct LoggedAudio {
    now_playing: Option<u32>,
}

impl LoggedAudio {
    pub fn now_playing(&self) -> Option<u32> {
        self.now_playing
    }
}

impl AudioPort for LoggedAudio {
    fn play(&mut self, cue: SoundCue) {
        debug!(?cue, "sound cue");
    }

    fn play_stage_music(&mut self, stage: u32) {
        debug!(stage, "stage music");
        self.now_playing = Some(stage);
    }

    fn stop_music(&mut self) {
        if let Some(stage) = self.now_playing.take() {
            debug!(stage, "music stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_messages() {
        let err = StoreError::Unavailable("disk gone".to_string());
        assert_eq!(err.to_string(), "Store unavailable: disk gone");

        let io_err: StoreError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(io_err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_logged_audio_tracks_music() {
        let mut audio = LoggedAudio::default();
        audio.play_stage_music(2);
        assert_eq!(audio.now_playing(), Some(2));
        audio.stop_music();
        assert_eq!(audio.now_playing(), None);
    }

    #[test]
    fn test_combat_result_display() {
        assert_eq!(CombatResult::Victory.to_string(), "Victory");
        assert_eq!(CombatResult::Defeat.to_string(), "Defeat");
    }
}
