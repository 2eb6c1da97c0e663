use super::types::{CharClass, Skill, SkillOutcome, SkillOutcomeKind, Weapon};
use crate::constants::*;
use crate::dice::{pick, Dice};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A combatant: the player, a restored save, or a throwaway enemy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(default)]
    pub char_class: CharClass,
    #[serde(default)]
    pub weapon: Weapon,
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "default_xp_to_next")]
    pub xp_to_next: u32,
    #[serde(default)]
    pub skills: BTreeMap<String, Skill>,
    #[serde(default)]
    pub damage_dealt: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
}

fn default_xp_to_next() -> u32 {
    STARTING_XP_TO_NEXT
}

/// Damage of a basic attack before it lands: weapon + roll - defense, never below 1.
pub fn basic_attack_damage(weapon_damage: u32, roll: u32, defense: u32) -> u32 {
    (weapon_damage + roll).saturating_sub(defense).max(1)
}

/// Damage of a damage-type skill: floor(attack * mult + power) - defense, never below 1.
pub fn skill_damage(attack: u32, mult: f64, power: u32, defense: u32) -> u32 {
    let raw = (attack as f64 * mult + power as f64).floor().max(0.0) as u32;
    raw.saturating_sub(defense).max(1)
}

/// HP restored by a heal-type skill: floor(power + level * scale).
pub fn skill_heal(power: u32, level: u32, scale: f64) -> u32 {
    (power as f64 + level as f64 * scale).floor().max(0.0) as u32
}

impl Character {
    /// Full-health character with Cutlass/Citizen defaults and no skills.
    pub fn new(name: impl Into<String>, level: u32, max_hp: u32, attack: u32, defense: u32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            name: name.into(),
            level: level.max(1),
            hp: max_hp,
            max_hp,
            attack,
            defense,
            char_class: CharClass::default(),
            weapon: Weapon::default(),
            xp: 0,
            xp_to_next: STARTING_XP_TO_NEXT,
            skills: BTreeMap::new(),
            damage_dealt: 0,
            sprite: None,
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = weapon;
        self
    }

    pub fn with_class(mut self, char_class: CharClass) -> Self {
        self.char_class = char_class;
        self
    }

    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    pub fn with_skill(mut self, name: impl Into<String>, skill: Skill) -> Self {
        self.skills.insert(name.into(), skill);
        self
    }

    /// Repairs a restored character so the stat invariants hold again.
    pub fn normalize(&mut self) {
        self.level = self.level.max(1);
        self.max_hp = self.max_hp.max(1);
        self.hp = self.hp.min(self.max_hp);
        // xp_to_next never legitimately drops below the starting curve value
        self.xp_to_next = self.xp_to_next.max(STARTING_XP_TO_NEXT);
        if self.xp >= self.xp_to_next {
            self.gain_xp(0);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn restore_full_hp(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn weapon_damage(&self) -> u32 {
        self.weapon.base_damage()
    }

    pub fn special_threshold(&self) -> u32 {
        self.weapon.special_threshold()
    }

    pub fn special_ability_names(&self) -> &'static [&'static str] {
        self.weapon.special_names()
    }

    /// Rolls a d6 and strikes `target` with the weapon. Returns damage dealt.
    pub fn basic_attack(&mut self, target: &mut Character, dice: &mut impl Dice) -> u32 {
        let roll = dice.roll(1, ATTACK_DIE_SIDES);
        let damage = basic_attack_damage(self.weapon_damage(), roll, target.defense);
        self.land_hit(target, damage);
        damage
    }

    /// Guaranteed hit for double weapon damage. Returns the flavor name used and the damage.
    pub fn special_attack(
        &mut self,
        target: &mut Character,
        dice: &mut impl Dice,
    ) -> (&'static str, u32) {
        let ability = *pick(dice, self.special_ability_names());
        let damage = self.weapon_damage() * SPECIAL_DAMAGE_MULTIPLIER;
        self.land_hit(target, damage);
        (ability, damage)
    }

    pub fn use_skill(&mut self, skill_name: &str, target: &mut Character) -> SkillOutcome {
        let Some(skill) = self.skills.get(skill_name).copied() else {
            return SkillOutcome {
                kind: SkillOutcomeKind::Unknown,
                message: format!(
                    "{} tried to use {} but doesn't know it.",
                    self.name, skill_name
                ),
                effect: 0,
            };
        };

        match skill {
            Skill::Damage { power, mult } => {
                let damage = skill_damage(self.attack, mult, power, target.defense);
                self.land_hit(target, damage);
                SkillOutcome {
                    kind: SkillOutcomeKind::Damage,
                    message: format!("{} used {} for {} damage!", self.name, skill_name, damage),
                    effect: damage,
                }
            }
            Skill::Heal { power, scale } => {
                let amount = skill_heal(power, self.level, scale);
                self.heal(amount);
                SkillOutcome {
                    kind: SkillOutcomeKind::Heal,
                    message: format!("{} used {} and healed {} HP!", self.name, skill_name, amount),
                    effect: amount,
                }
            }
            Skill::Inert => SkillOutcome {
                kind: SkillOutcomeKind::NoEffect,
                message: format!("{} used {} but nothing happened.", self.name, skill_name),
                effect: 0,
            },
        }
    }

    /// Adds XP and levels up as many times as it covers. Returns true if any level was gained.
    pub fn gain_xp(&mut self, amount: u32) -> bool {
        self.xp = self.xp.saturating_add(amount);
        let mut leveled = false;
        while self.xp >= self.xp_to_next {
            self.xp -= self.xp_to_next;
            self.level_up();
            leveled = true;
        }
        leveled
    }

    /// Raises every stat and fully heals.
    pub fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.max_hp = self.max_hp.saturating_add(LEVEL_UP_MAX_HP);
        self.attack = self.attack.saturating_add(LEVEL_UP_ATTACK);
        self.defense = self.defense.saturating_add(LEVEL_UP_DEFENSE);
        self.hp = self.max_hp;
        let next = self.xp_to_next as u64 * XP_CURVE_NUMERATOR as u64 / XP_CURVE_DENOMINATOR as u64;
        self.xp_to_next = next.clamp(1, u32::MAX as u64) as u32;
    }

    fn land_hit(&mut self, target: &mut Character, damage: u32) {
        target.take_damage(damage);
        self.damage_dealt += damage as u64;
    }
}
