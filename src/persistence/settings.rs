use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty only scales enemy HP.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
    }

    pub fn hp_multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Enemies have 75% HP",
            Difficulty::Normal => "Standard difficulty",
            Difficulty::Hard => "Enemies have 150% HP",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Difficulty> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Next setting in the Easy -> Normal -> Hard -> Easy cycle.
    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Sound,
    Music,
    ScreenEffects,
}

impl Toggle {
    pub fn parse(s: &str) -> Option<Toggle> {
        match s.trim().to_lowercase().as_str() {
            "sound" => Some(Toggle::Sound),
            "music" => Some(Toggle::Music),
            "effects" | "screen_effects" => Some(Toggle::ScreenEffects),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "enabled")]
    pub sound_enabled: bool,
    #[serde(default = "enabled")]
    pub music_enabled: bool,
    #[serde(default = "enabled")]
    pub screen_effects: bool,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            screen_effects: true,
            difficulty: Difficulty::Normal,
        }
    }
}

impl Settings {
    /// Flips one switch and returns its new value.
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let flag = match toggle {
            Toggle::Sound => &mut self.sound_enabled,
            Toggle::Music => &mut self.music_enabled,
            Toggle::ScreenEffects => &mut self.screen_effects,
        };
        *flag = !*flag;
        *flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers() {
        assert_eq!(Difficulty::Easy.hp_multiplier(), 0.75);
        assert_eq!(Difficulty::Normal.hp_multiplier(), 1.0);
        assert_eq!(Difficulty::Hard.hp_multiplier(), 1.5);
    }

    #[test]
    fn test_difficulty_cycle() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Normal);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("nightmare"), None);
    }

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.sound_enabled && s.music_enabled && s.screen_effects);
        assert_eq!(s.difficulty, Difficulty::Normal);
    }

    #[test]
    fn test_toggle() {
        let mut s = Settings::default();
        assert!(!s.toggle(Toggle::Music));
        assert!(!s.music_enabled);
        assert!(s.toggle(Toggle::Music));
        assert!(!s.toggle(Toggle::ScreenEffects));
        assert!(s.sound_enabled);
    }

    #[test]
    fn test_partial_settings_file_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"difficulty":"Hard"}"#).unwrap();
        assert_eq!(s.difficulty, Difficulty::Hard);
        assert!(s.sound_enabled);
    }
}
