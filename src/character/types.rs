use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Weapon carried by a character. Drives base damage and special gating.
///
/// `Improvised` is what any unrecognised weapon name in a save deserialises
/// to; it carries the fallback numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum Weapon {
    Juju,
    #[default]
    Cutlass,
    Gun,
    Improvised,
}

impl Weapon {
    /// The three weapons a new player can be issued.
    pub fn all() -> [Weapon; 3] {
        [Weapon::Juju, Weapon::Cutlass, Weapon::Gun]
    }

    pub fn base_damage(&self) -> u32 {
        match self {
            Weapon::Juju => 5,
            Weapon::Cutlass => 2,
            Weapon::Gun => 10,
            Weapon::Improvised => 2,
        }
    }

    /// Basic-attack damage that must pile up before a special is allowed.
    pub fn special_threshold(&self) -> u32 {
        match self {
            Weapon::Juju => 25,
            Weapon::Cutlass => 10,
            Weapon::Gun => 50,
            Weapon::Improvised => 30,
        }
    }

    pub fn special_names(&self) -> &'static [&'static str] {
        match self {
            Weapon::Cutlass => &["BENIN RAMPAGE", "LAGOS ATTACK", "BARAWO BARAGE"],
            Weapon::Juju => &["OGUN STRIKE", "SANGO FATAL", "AMADIOHA SPAWN"],
            Weapon::Gun => &["BARRAGE", "AK47 FIESTA", "MK 419 BARRAGE"],
            Weapon::Improvised => &["BASIC STRIKE"],
        }
    }

    pub fn from_name(name: &str) -> Weapon {
        match name.trim() {
            "Juju" => Weapon::Juju,
            "Cutlass" => Weapon::Cutlass,
            "Gun" => Weapon::Gun,
            _ => Weapon::Improvised,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weapon::Juju => "Juju",
            Weapon::Cutlass => "Cutlass",
            Weapon::Gun => "Gun",
            Weapon::Improvised => "Improvised",
        }
    }
}

impl From<String> for Weapon {
    fn from(name: String) -> Self {
        Weapon::from_name(&name)
    }
}

impl From<Weapon> for String {
    fn from(weapon: Weapon) -> Self {
        weapon.name().to_string()
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cosmetic archetype. Decides starting stats and skills, nothing else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CharClass {
    #[default]
    Citizen,
    Soldier,
    Police,
}

impl CharClass {
    pub fn all() -> [CharClass; 3] {
        [CharClass::Citizen, CharClass::Soldier, CharClass::Police]
    }

    /// Starting (max_hp, attack, defense).
    pub fn base_stats(&self) -> (u32, u32, u32) {
        match self {
            CharClass::Citizen => (100, 5, 2),
            CharClass::Soldier => (120, 7, 3),
            CharClass::Police => (110, 6, 4),
        }
    }

    pub fn sprite(&self) -> &'static str {
        match self {
            CharClass::Citizen => "hero.png",
            CharClass::Soldier => "soldier.png",
            CharClass::Police => "police.png",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharClass::Citizen => "Citizen",
            CharClass::Soldier => "Soldier",
            CharClass::Police => "Police",
        }
    }

    pub fn parse(s: &str) -> Option<CharClass> {
        match s.trim().to_lowercase().as_str() {
            "citizen" => Some(CharClass::Citizen),
            "soldier" => Some(CharClass::Soldier),
            "police" => Some(CharClass::Police),
            _ => None,
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn default_mult() -> f64 {
    1.0
}

/// A named ability a character knows.
///
/// Serialised with a `type` tag so saves read `{"type": "damage", "power": 8, "mult": 1.5}`.
/// A missing tag reads as `damage`; an unrecognised one reads as `Inert`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Skill {
    Damage {
        power: u32,
        mult: f64,
    },
    Heal {
        power: u32,
        scale: f64,
    },
    /// Known by name but does nothing when used.
    Inert,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum SkillKind {
    #[default]
    Damage,
    Heal,
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct SkillRecord {
    #[serde(rename = "type", default)]
    kind: SkillKind,
    #[serde(default)]
    power: u32,
    #[serde(default = "default_mult")]
    mult: f64,
    #[serde(default)]
    scale: f64,
}

impl From<SkillRecord> for Skill {
    fn from(record: SkillRecord) -> Self {
        match record.kind {
            SkillKind::Damage => Skill::Damage {
                power: record.power,
                mult: record.mult,
            },
            SkillKind::Heal => Skill::Heal {
                power: record.power,
                scale: record.scale,
            },
            SkillKind::Other => Skill::Inert,
        }
    }
}

impl<'de> Deserialize<'de> for Skill {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SkillRecord::deserialize(deserializer).map(Skill::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillOutcomeKind {
    Damage,
    Heal,
    /// The skill is known but has no effect.
    NoEffect,
    /// The user doesn't know the skill. Nothing changed.
    Unknown,
}

/// Structured result of `Character::use_skill`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillOutcome {
    pub kind: SkillOutcomeKind,
    pub message: String,
    /// Damage dealt or HP healed; 0 for `Unknown`.
    pub effect: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_tables() {
        assert_eq!(Weapon::Juju.base_damage(), 5);
        assert_eq!(Weapon::Cutlass.base_damage(), 2);
        assert_eq!(Weapon::Gun.base_damage(), 10);
        assert_eq!(Weapon::Improvised.base_damage(), 2);

        assert_eq!(Weapon::Juju.special_threshold(), 25);
        assert_eq!(Weapon::Cutlass.special_threshold(), 10);
        assert_eq!(Weapon::Gun.special_threshold(), 50);
        assert_eq!(Weapon::Improvised.special_threshold(), 30);
    }

    #[test]
    fn test_special_names() {
        for weapon in Weapon::all() {
            assert_eq!(weapon.special_names().len(), 3);
        }
        assert_eq!(Weapon::Improvised.special_names(), &["BASIC STRIKE"]);
    }

    #[test]
    fn test_unknown_weapon_deserializes_to_fallback() {
        let weapon: Weapon = serde_json::from_str("\"Slingshot\"").unwrap();
        assert_eq!(weapon, Weapon::Improvised);
        let weapon: Weapon = serde_json::from_str("\"Gun\"").unwrap();
        assert_eq!(weapon, Weapon::Gun);
        assert_eq!(serde_json::to_string(&Weapon::Juju).unwrap(), "\"Juju\"");
    }

    #[test]
    fn test_default_weapon_is_cutlass() {
        assert_eq!(Weapon::default(), Weapon::Cutlass);
        assert_eq!(CharClass::default(), CharClass::Citizen);
    }

    #[test]
    fn test_class_parse() {
        assert_eq!(CharClass::parse("Soldier"), Some(CharClass::Soldier));
        assert_eq!(CharClass::parse(" police "), Some(CharClass::Police));
        assert_eq!(CharClass::parse("wizard"), None);
    }

    #[test]
    fn test_skill_json_shape() {
        let skill: Skill =
            serde_json::from_str(r#"{"type":"damage","power":8,"mult":1.5}"#).unwrap();
        assert_eq!(
            skill,
            Skill::Damage {
                power: 8,
                mult: 1.5
            }
        );

        let heal: Skill = serde_json::from_str(r#"{"type":"heal","power":10}"#).unwrap();
        assert_eq!(
            heal,
            Skill::Heal {
                power: 10,
                scale: 0.0
            }
        );
    }

    #[test]
    fn test_skill_without_type_reads_as_damage() {
        let skill: Skill = serde_json::from_str(r#"{"power":8,"mult":1.5}"#).unwrap();
        assert_eq!(
            skill,
            Skill::Damage {
                power: 8,
                mult: 1.5
            }
        );

        let bare: Skill = serde_json::from_str("{}").unwrap();
        assert_eq!(
            bare,
            Skill::Damage {
                power: 0,
                mult: 1.0
            }
        );
    }

    #[test]
    fn test_unrecognised_skill_type_is_inert() {
        let skill: Skill = serde_json::from_str(r#"{"type":"buff","power":3}"#).unwrap();
        assert_eq!(skill, Skill::Inert);
        assert_eq!(serde_json::to_string(&Skill::Inert).unwrap(), r#"{"type":"inert"}"#);
    }
}
