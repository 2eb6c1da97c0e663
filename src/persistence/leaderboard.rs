use super::ports::{CombatRecord, LeaderboardEntry};
use crate::constants::LEADERBOARD_LIMIT;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderboardKind {
    #[default]
    Fastest,
    Damage,
    Kills,
}

impl LeaderboardKind {
    pub fn parse(s: &str) -> Option<LeaderboardKind> {
        match s.trim().to_lowercase().as_str() {
            "fastest" | "time" => Some(LeaderboardKind::Fastest),
            "damage" => Some(LeaderboardKind::Damage),
            "kills" | "enemies" => Some(LeaderboardKind::Kills),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LeaderboardKind::Fastest => "Fastest Completions",
            LeaderboardKind::Damage => "Highest Damage",
            LeaderboardKind::Kills => "Most Enemies Defeated",
        }
    }
}

/// Top entries for one board. Ties keep insertion order.
pub fn rank(entries: &[LeaderboardEntry], kind: LeaderboardKind) -> Vec<LeaderboardEntry> {
    let mut ranked = entries.to_vec();
    match kind {
        LeaderboardKind::Fastest => ranked.sort_by(|a, b| {
            a.completion_seconds
                .partial_cmp(&b.completion_seconds)
                .unwrap_or(Ordering::Equal)
        }),
        LeaderboardKind::Damage => ranked.sort_by(|a, b| b.total_damage.cmp(&a.total_damage)),
        LeaderboardKind::Kills => {
            ranked.sort_by(|a, b| b.enemies_defeated.cmp(&a.enemies_defeated))
        }
    }
    ranked.truncate(LEADERBOARD_LIMIT);
    ranked
}

pub fn best_time(entries: &[LeaderboardEntry], player_name: &str) -> Option<f64> {
    entries
        .iter()
        .filter(|e| e.player_name == player_name)
        .map(|e| e.completion_seconds)
        .fold(None, |best, t| match best {
            Some(b) if b <= t => Some(b),
            _ => Some(t),
        })
}

/// Most recent results for one player, newest first.
pub fn recent_history(records: &[CombatRecord], player_name: &str, limit: usize) -> Vec<CombatRecord> {
    let mut mine: Vec<CombatRecord> = records
        .iter()
        .filter(|r| r.player_name == player_name)
        .cloned()
        .collect();
    // stable sort keeps later appends ahead within the same second
    mine.reverse();
    mine.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    mine.truncate(limit);
    mine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::ports::CombatResult;
    use crate::persistence::settings::Difficulty;

    fn entry(name: &str, seconds: f64, damage: u64, kills: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            run_id: format!("run-{}", name),
            player_name: name.to_string(),
            completion_seconds: seconds,
            total_damage: damage,
            enemies_defeated: kills,
            difficulty: Difficulty::Normal,
            run_date: 0,
        }
    }

    #[test]
    fn test_rank_fastest_ascending() {
        let entries = vec![entry("a", 90.0, 10, 3), entry("b", 45.5, 5, 3), entry("c", 60.0, 50, 3)];
        let ranked = rank(&entries, LeaderboardKind::Fastest);
        let names: Vec<_> = ranked.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_damage_descending() {
        let entries = vec![entry("a", 90.0, 10, 3), entry("b", 45.5, 5, 3), entry("c", 60.0, 50, 3)];
        let ranked = rank(&entries, LeaderboardKind::Damage);
        assert_eq!(ranked[0].player_name, "c");
        assert_eq!(ranked[2].player_name, "b");
    }

    #[test]
    fn test_rank_truncates_to_ten() {
        let entries: Vec<_> = (0..15)
            .map(|i| entry(&format!("p{}", i), i as f64, i, 3))
            .collect();
        assert_eq!(rank(&entries, LeaderboardKind::Kills).len(), 10);
    }

    #[test]
    fn test_best_time() {
        let entries = vec![entry("a", 90.0, 0, 3), entry("b", 10.0, 0, 3), entry("a", 70.0, 0, 3)];
        assert_eq!(best_time(&entries, "a"), Some(70.0));
        assert_eq!(best_time(&entries, "nobody"), None);
    }

    #[test]
    fn test_recent_history_newest_first() {
        let record = |enemy: &str, ts: i64| CombatRecord {
            player_name: "Ada".to_string(),
            enemy_name: enemy.to_string(),
            stage: 1,
            result: CombatResult::Victory,
            timestamp: ts,
        };
        let records = vec![record("Bandit", 1), record("Kidnapper", 5), record("Politician", 5)];
        let recent = recent_history(&records, "Ada", 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].enemy_name, "Politician");
        assert_eq!(recent[1].enemy_name, "Kidnapper");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(LeaderboardKind::parse("Damage"), Some(LeaderboardKind::Damage));
        assert_eq!(LeaderboardKind::parse("kills"), Some(LeaderboardKind::Kills));
        assert_eq!(LeaderboardKind::parse("speed"), None);
    }
}
