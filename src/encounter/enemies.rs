use super::stage::Stage;
use crate::character::Character;
use crate::dice::{pick, Dice};
use crate::persistence::Difficulty;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub level: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub sprite: &'static str,
}

const FOREST: &[EnemyTemplate] = &[
    EnemyTemplate {
        name: "Bandit",
        level: 1,
        hp: 100,
        attack: 4,
        defense: 2,
        sprite: "bandit.png",
    },
    EnemyTemplate {
        name: "Area Boy",
        level: 1,
        hp: 90,
        attack: 5,
        defense: 1,
        sprite: "bandit.png",
    },
];

const CITY: &[EnemyTemplate] = &[
    EnemyTemplate {
        name: "Kidnapper",
        level: 2,
        hp: 150,
        attack: 6,
        defense: 3,
        sprite: "kidnapper.png",
    },
    EnemyTemplate {
        name: "Armed Robber",
        level: 2,
        hp: 140,
        attack: 7,
        defense: 2,
        sprite: "kidnapper.png",
    },
];

const FINAL: &[EnemyTemplate] = &[EnemyTemplate {
    name: "Politician",
    level: 3,
    hp: 200,
    attack: 8,
    defense: 4,
    sprite: "politician.png",
}];

pub fn templates(stage: Stage) -> &'static [EnemyTemplate] {
    match stage {
        Stage::Forest => FOREST,
        Stage::City => CITY,
        Stage::Final => FINAL,
    }
}

/// Used whenever a template cannot produce a living enemy.
pub fn fallback_enemy() -> Character {
    Character::new("Enemy", 1, 100, 5, 2)
}

impl EnemyTemplate {
    /// `None` when scaling leaves the enemy with no HP.
    pub fn build(&self, difficulty: Difficulty) -> Option<Character> {
        let scaled = (self.hp as f64 * difficulty.hp_multiplier()).floor();
        if !scaled.is_finite() || scaled < 1.0 || scaled > u32::MAX as f64 {
            return None;
        }
        Some(
            Character::new(self.name, self.level, scaled as u32, self.attack, self.defense)
                .with_sprite(self.sprite),
        )
    }
}

/// Picks one of the stage's enemies and scales its HP. Never fails.
pub fn create_enemy(stage: Stage, difficulty: Difficulty, dice: &mut impl Dice) -> Character {
    let template = pick(dice, templates(stage));
    match template.build(difficulty) {
        Some(enemy) => enemy,
        None => {
            warn!(template = template.name, ?difficulty, "enemy template unusable, using fallback");
            fallback_enemy()
        }
    }
}
