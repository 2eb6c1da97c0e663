use serde::{Deserialize, Serialize};
use std::fmt;

/// The three fights of a run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Stage {
    #[default]
    Forest,
    City,
    Final,
}

impl Stage {
    pub fn all() -> [Stage; 3] {
        [Stage::Forest, Stage::City, Stage::Final]
    }

    /// 1-based number as stored in saves and history.
    pub fn number(&self) -> u32 {
        match self {
            Stage::Forest => 1,
            Stage::City => 2,
            Stage::Final => 3,
        }
    }

    /// Out-of-range numbers from old or hand-edited saves restart the run.
    pub fn from_number(n: u32) -> Stage {
        match n {
            2 => Stage::City,
            3 => Stage::Final,
            _ => Stage::Forest,
        }
    }

    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Forest => Some(Stage::City),
            Stage::City => Some(Stage::Final),
            Stage::Final => None,
        }
    }

    pub fn is_final(&self) -> bool {
        self.next().is_none()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Forest => "Forest",
            Stage::City => "City",
            Stage::Final => "Final",
        }
    }

    pub fn intro(&self, enemy_name: &str) -> String {
        match self {
            Stage::Forest => format!(
                "🌳 You spawned in the thick Forests of Nigeria\nA wild {} blocks your path!",
                enemy_name
            ),
            Stage::City => format!(
                "🏙️ You escaped the forest, but the city is dangerous!\nA {} confronts you!",
                enemy_name
            ),
            Stage::Final => format!(
                "🏛️ FINAL LEVEL: The {}\nThe most dangerous foe... Your last stand!",
                enemy_name
            ),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}: {}", self.number(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FINAL_STAGE;

    #[test]
    fn test_numbering_round_trips() {
        for stage in Stage::all() {
            assert_eq!(Stage::from_number(stage.number()), stage);
        }
        assert_eq!(Stage::Final.number(), FINAL_STAGE);
    }

    #[test]
    fn test_bad_numbers_restart() {
        assert_eq!(Stage::from_number(0), Stage::Forest);
        assert_eq!(Stage::from_number(9), Stage::Forest);
    }

    #[test]
    fn test_progression() {
        assert_eq!(Stage::Forest.next(), Some(Stage::City));
        assert_eq!(Stage::City.next(), Some(Stage::Final));
        assert!(Stage::Final.is_final());
        assert!(!Stage::Forest.is_final());
    }

    #[test]
    fn test_intro_names_enemy() {
        let intro = Stage::City.intro("Kidnapper");
        assert!(intro.contains("A Kidnapper confronts you!"));
        assert!(Stage::Final.intro("Politician").starts_with("🏛️ FINAL LEVEL: The Politician"));
    }
}
