use super::ports::{
    CombatRecord, LeaderboardEntry, PersistencePort, SaveBrowser, SaveSummary, SavedCharacter,
    StoreError, StoreResult,
};
use super::settings::Settings;
use crate::character::Character;
use crate::constants::SAVE_LIST_LIMIT;
use chrono::Utc;
use std::collections::HashMap;

/// Keeps everything in process memory.
///
/// Setting `fail_writes` makes every mutating call return
/// `StoreError::Unavailable`, which is how callers' best-effort handling is
/// exercised.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub saves: HashMap<String, SavedCharacter>,
    pub history: Vec<CombatRecord>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub settings: Settings,
    pub fail_writes: bool,
    /// Write order per name; timestamps alone tie within a second.
    save_order: HashMap<String, u64>,
    next_order: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn saved_stage(&self, name: &str) -> Option<u32> {
        self.saves.get(name).map(|s| s.stage)
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes {
            Err(StoreError::Unavailable("memory store is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

impl PersistencePort for MemoryStore {
    fn save_character(&mut self, character: &Character, stage: u32) -> StoreResult<()> {
        self.check_writable()?;
        self.next_order += 1;
        self.save_order.insert(character.name.clone(), self.next_order);
        self.saves.insert(
            character.name.clone(),
            SavedCharacter {
                character: character.clone(),
                stage,
                last_saved: Utc::now().timestamp(),
            },
        );
        Ok(())
    }

    fn load_character(&self, name: &str) -> StoreResult<Option<SavedCharacter>> {
        Ok(self.saves.get(name).cloned())
    }

    fn record_combat_result(&mut self, record: &CombatRecord) -> StoreResult<()> {
        self.check_writable()?;
        self.history.push(record.clone());
        Ok(())
    }

    fn record_leaderboard_entry(&mut self, entry: &LeaderboardEntry) -> StoreResult<()> {
        self.check_writable()?;
        self.leaderboard.push(entry.clone());
        Ok(())
    }

    fn load_settings(&self) -> StoreResult<Settings> {
        Ok(self.settings)
    }
}

impl SaveBrowser for MemoryStore {
    fn list_saves(&self) -> StoreResult<Vec<SaveSummary>> {
        let mut saves: Vec<(u64, SaveSummary)> = self
            .saves
            .iter()
            .map(|(name, s)| {
                let order = self.save_order.get(name).copied().unwrap_or(0);
                let summary = SaveSummary {
                    name: s.character.name.clone(),
                    level: s.character.level,
                    stage: s.stage,
                    last_saved: s.last_saved,
                };
                (order, summary)
            })
            .collect();
        saves.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(saves
            .into_iter()
            .take(SAVE_LIST_LIMIT)
            .map(|(_, summary)| summary)
            .collect())
    }

    fn delete_save(&mut self, name: &str) -> StoreResult<bool> {
        self.check_writable()?;
        let existed = self.saves.remove(name).is_some();
        self.save_order.remove(name);
        if existed {
            self.history.retain(|r| r.player_name != name);
        }
        Ok(existed)
    }

    fn save_settings(&mut self, settings: &Settings) -> StoreResult<()> {
        self.check_writable()?;
        self.settings = *settings;
        Ok(())
    }

    fn all_combat_records(&self) -> StoreResult<Vec<CombatRecord>> {
        Ok(self.history.clone())
    }

    fn all_leaderboard_entries(&self) -> StoreResult<Vec<LeaderboardEntry>> {
        Ok(self.leaderboard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::ports::CombatResult;

    #[test]
    fn test_save_is_upsert() {
        let mut store = MemoryStore::new();
        let mut hero = Character::new("Ada", 1, 100, 5, 2);
        store.save_character(&hero, 1).unwrap();
        hero.level = 2;
        store.save_character(&hero, 2).unwrap();

        assert_eq!(store.saves.len(), 1);
        let loaded = store.load_character("Ada").unwrap().unwrap();
        assert_eq!(loaded.character.level, 2);
        assert_eq!(loaded.stage, 2);
    }

    #[test]
    fn test_missing_character_is_none() {
        let store = MemoryStore::new();
        assert!(store.load_character("ghost").unwrap().is_none());
    }

    #[test]
    fn test_list_saves_most_recent_first() {
        let mut store = MemoryStore::new();
        store.save_character(&Character::new("First", 1, 100, 5, 2), 1).unwrap();
        store.save_character(&Character::new("Second", 1, 100, 5, 2), 2).unwrap();

        store.save_character(&Character::new("First", 2, 100, 5, 2), 2).unwrap();

        let list = store.list_saves().unwrap();
        assert_eq!(list[0].name, "First");
        assert_eq!(list[1].name, "Second");
    }

    #[test]
    fn test_last_saved_is_wall_clock() {
        let mut store = MemoryStore::new();
        let before = Utc::now().timestamp();
        for i in 0..5 {
            store.save_character(&Character::new("Ada", 1, 100, 5, 2), i).unwrap();
        }
        let saved = store.load_character("Ada").unwrap().unwrap();
        assert!(saved.last_saved >= before);
        assert!(saved.last_saved <= Utc::now().timestamp());
    }

    #[test]
    fn test_delete_removes_history() {
        let mut store = MemoryStore::new();
        store.save_character(&Character::new("Ada", 1, 100, 5, 2), 1).unwrap();
        store
            .record_combat_result(&CombatRecord {
                player_name: "Ada".to_string(),
                enemy_name: "Bandit".to_string(),
                stage: 1,
                result: CombatResult::Victory,
                timestamp: 1,
            })
            .unwrap();

        assert!(store.delete_save("Ada").unwrap());
        assert!(store.history.is_empty());
        assert!(!store.delete_save("Ada").unwrap());
    }

    #[test]
    fn test_failing_store_rejects_writes() {
        let mut store = MemoryStore::failing();
        let result = store.save_character(&Character::new("Ada", 1, 100, 5, 2), 1);
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert!(store.load_settings().is_ok());
    }
}
