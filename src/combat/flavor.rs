//! Enemy taunts picked at random after each player action. Purely cosmetic.

use crate::dice::{pick, Dice};

/// Enemies with their own taunt tables. Everyone else shares `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Bandit,
    Kidnapper,
    Politician,
    Other,
}

impl EnemyKind {
    pub fn from_name(name: &str) -> EnemyKind {
        match name {
            "Bandit" => EnemyKind::Bandit,
            "Kidnapper" => EnemyKind::Kidnapper,
            "Politician" => EnemyKind::Politician,
            _ => EnemyKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    AttackHit,
    AttackMissed,
    DefendHeld,
    DefendBroken,
}

pub fn reactions(kind: EnemyKind, reaction: Reaction) -> &'static [&'static str] {
    use EnemyKind::*;
    use Reaction::*;

    match (kind, reaction) {
        (Bandit, AttackHit) => &["💢 You no fit kill me!", "🤬 You dey try me!"],
        (Kidnapper, AttackHit) => &["😤 I no fit die!", "🔥 I go move your family!"],
        (Politician, AttackHit) => &["🎭 You are a fool!", "💼 I belong to the people!"],
        (Other, AttackHit) => &["😡 Arrgh!"],

        (Bandit, AttackMissed) => &["😆 Odeshi! You missed!", "🤣 Miss tire!"],
        (Kidnapper, AttackMissed) => &["😂 I go move your family!", "💀 Slow motion attack!"],
        (Politician, AttackMissed) => &["🎪 I belong to the people!", "🎯 Miss!"],
        (Other, AttackMissed) => &["😂 You missed!"],

        (Bandit, DefendHeld) => &["🛡️ You no wan die abi?", "😤 Sharp boy!"],
        (Kidnapper, DefendHeld) => &["🙅 You go still die", "⚡ But I go find you!"],
        (Politician, DefendHeld) => &["🎭 It is better you fall now", "💼 This won't save you!"],
        (Other, DefendHeld) => &["😠 Hmph!"],

        (Bandit, DefendBroken) => &["😱 Wallahi, I go kill you!!", "💥 See as you scatter!"],
        (Kidnapper, DefendBroken) => &[
            "😈 How much ransom dem go pay for you",
            "🔗 You go see pepper!",
        ],
        (Politician, DefendBroken) => &["🎯 Na me dey here", "💀 Power overwhelms you!"],
        (Other, DefendBroken) => &["💥 Boom!"],
    }
}

pub fn random_reaction(enemy_name: &str, reaction: Reaction, dice: &mut impl Dice) -> &'static str {
    *pick(dice, reactions(EnemyKind::from_name(enemy_name), reaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn test_known_enemy_kinds() {
        assert_eq!(EnemyKind::from_name("Bandit"), EnemyKind::Bandit);
        assert_eq!(EnemyKind::from_name("Kidnapper"), EnemyKind::Kidnapper);
        assert_eq!(EnemyKind::from_name("Politician"), EnemyKind::Politician);
        assert_eq!(EnemyKind::from_name("Area Boy"), EnemyKind::Other);
        assert_eq!(EnemyKind::from_name("bandit"), EnemyKind::Other);
    }

    #[test]
    fn test_every_table_non_empty() {
        let kinds = [
            EnemyKind::Bandit,
            EnemyKind::Kidnapper,
            EnemyKind::Politician,
            EnemyKind::Other,
        ];
        let outcomes = [
            Reaction::AttackHit,
            Reaction::AttackMissed,
            Reaction::DefendHeld,
            Reaction::DefendBroken,
        ];
        for kind in kinds {
            for outcome in outcomes {
                assert!(!reactions(kind, outcome).is_empty());
            }
        }
    }

    #[test]
    fn test_fallback_reaction() {
        let mut dice = ScriptedDice::new();
        assert_eq!(
            random_reaction("Armed Robber", Reaction::AttackHit, &mut dice),
            "😡 Arrgh!"
        );
        assert_eq!(
            random_reaction("Enemy", Reaction::DefendBroken, &mut dice),
            "💥 Boom!"
        );
    }

    #[test]
    fn test_pick_uses_dice() {
        let mut dice = ScriptedDice::new().with_picks(&[1]);
        assert_eq!(
            random_reaction("Politician", Reaction::AttackMissed, &mut dice),
            "🎯 Miss!"
        );
    }
}
