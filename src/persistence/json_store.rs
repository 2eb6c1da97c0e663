//! Pretty-printed JSON files under `~/.streets/`.
//!
//! ```text
//! ~/.streets/
//!   characters/<sanitized name>.json
//!   combat_history.json
//!   leaderboard.json
//!   settings.json
//! ```

use super::ports::{
    CombatRecord, LeaderboardEntry, PersistencePort, SaveBrowser, SaveSummary, SavedCharacter,
    StoreError, StoreResult,
};
use super::settings::Settings;
use crate::character::Character;
use crate::constants::{SAVE_LIST_LIMIT, SAVE_VERSION};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CHARACTERS_DIR: &str = "characters";
const HISTORY_FILE: &str = "combat_history.json";
const LEADERBOARD_FILE: &str = "leaderboard.json";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Serialize, Deserialize)]
struct CharacterSaveData {
    version: u32,
    stage: u32,
    last_saved: i64,
    character: Character,
}

pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Opens (and creates if needed) `~/.streets`.
    pub fn new() -> io::Result<Self> {
        Self::at(data_dir()?)
    }

    pub fn at(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(CHARACTERS_DIR))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True if some save already occupies the file `name` would be written to.
    pub fn save_file_taken(&self, name: &str) -> bool {
        self.character_path(name).exists()
    }

    fn character_path(&self, name: &str) -> PathBuf {
        self.root
            .join(CHARACTERS_DIR)
            .join(format!("{}.json", sanitize_name(name)))
    }

    fn read_save(path: &Path) -> StoreResult<CharacterSaveData> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Different names can share a file stem; only an exact name match counts.
    fn read_own_save(&self, name: &str) -> StoreResult<Option<CharacterSaveData>> {
        let path = self.character_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let data = Self::read_save(&path)?;
        if data.character.name != name {
            debug!(requested = name, stored = %data.character.name, "save belongs to another name");
            return Ok(None);
        }
        Ok(Some(data))
    }

    /// A missing file reads as an empty list.
    fn read_list<T: DeserializeOwned>(&self, file: &str) -> StoreResult<Vec<T>> {
        let path = self.root.join(file);
        match fs::read_to_string(&path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// A corrupt list is moved to `<file>.corrupt` and a new one started.
    fn append<T: Serialize + DeserializeOwned>(&self, file: &str, item: T) -> StoreResult<()> {
        let path = self.root.join(file);
        let mut items: Vec<T> = match self.read_list(file) {
            Ok(items) => items,
            Err(StoreError::Serialization(e)) => {
                let backup = self.root.join(format!("{}.corrupt", file));
                warn!(path = %path.display(), error = %e, "unreadable list, starting a new one");
                fs::rename(&path, &backup)?;
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        items.push(item);
        self.write_json(&path, &items)
    }
}

impl PersistencePort for JsonStore {
    fn save_character(&mut self, character: &Character, stage: u32) -> StoreResult<()> {
        let data = CharacterSaveData {
            version: SAVE_VERSION,
            stage,
            last_saved: Utc::now().timestamp(),
            character: character.clone(),
        };
        self.write_json(&self.character_path(&character.name), &data)?;
        debug!(name = %character.name, stage, "character saved");
        Ok(())
    }

    fn load_character(&self, name: &str) -> StoreResult<Option<SavedCharacter>> {
        let Some(data) = self.read_own_save(name)? else {
            return Ok(None);
        };
        let mut character = data.character;
        character.normalize();
        Ok(Some(SavedCharacter {
            character,
            stage: data.stage,
            last_saved: data.last_saved,
        }))
    }

    fn record_combat_result(&mut self, record: &CombatRecord) -> StoreResult<()> {
        self.append(HISTORY_FILE, record.clone())
    }

    fn record_leaderboard_entry(&mut self, entry: &LeaderboardEntry) -> StoreResult<()> {
        self.append(LEADERBOARD_FILE, entry.clone())
    }

    /// Falls back to defaults when the file is missing.
    fn load_settings(&self) -> StoreResult<Settings> {
        match fs::read_to_string(self.root.join(SETTINGS_FILE)) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SaveBrowser for JsonStore {
    fn list_saves(&self) -> StoreResult<Vec<SaveSummary>> {
        let mut saves = Vec::new();

        for entry in fs::read_dir(self.root.join(CHARACTERS_DIR))? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match Self::read_save(&path) {
                Ok(data) => saves.push(SaveSummary {
                    name: data.character.name,
                    level: data.character.level,
                    stage: data.stage,
                    last_saved: data.last_saved,
                }),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable save"),
            }
        }

        saves.sort_by(|a, b| b.last_saved.cmp(&a.last_saved));
        saves.truncate(SAVE_LIST_LIMIT);
        Ok(saves)
    }

    fn delete_save(&mut self, name: &str) -> StoreResult<bool> {
        if self.read_own_save(name)?.is_none() {
            return Ok(false);
        }
        fs::remove_file(self.character_path(name))?;

        let mut history: Vec<CombatRecord> = self.read_list(HISTORY_FILE)?;
        history.retain(|r| r.player_name != name);
        self.write_json(&self.root.join(HISTORY_FILE), &history)?;
        Ok(true)
    }

    fn save_settings(&mut self, settings: &Settings) -> StoreResult<()> {
        self.write_json(&self.root.join(SETTINGS_FILE), settings)
    }

    fn all_combat_records(&self) -> StoreResult<Vec<CombatRecord>> {
        self.read_list(HISTORY_FILE)
    }

    fn all_leaderboard_entries(&self) -> StoreResult<Vec<LeaderboardEntry>> {
        self.read_list(LEADERBOARD_FILE)
    }
}

pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(".streets"))
}

/// File stem for a character name: lowercase, spaces to underscores.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
