use serde::{Deserialize, Serialize};

/// Which side won an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Enemy,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Player => "player",
            Winner::Enemy => "enemy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatStatus {
    Ongoing,
    PlayerWon,
    EnemyWon,
}

impl CombatStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, CombatStatus::Ongoing)
    }

    pub fn winner(&self) -> Option<Winner> {
        match self {
            CombatStatus::Ongoing => None,
            CombatStatus::PlayerWon => Some(Winner::Player),
            CombatStatus::EnemyWon => Some(Winner::Enemy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Defend,
    Special,
    EnemyTurn,
}

/// What one action did.
///
/// `amount` is the damage the action dealt to its target when it succeeded,
/// or the flat damage the player took when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub action: CombatAction,
    pub success: bool,
    pub amount: u32,
    pub message: String,
}

impl TurnOutcome {
    /// Damage the player inflicted on the enemy with this action.
    pub fn damage_to_enemy(&self) -> u32 {
        match self.action {
            CombatAction::Attack | CombatAction::Special if self.success => self.amount,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_winner() {
        assert_eq!(CombatStatus::Ongoing.winner(), None);
        assert_eq!(CombatStatus::PlayerWon.winner(), Some(Winner::Player));
        assert_eq!(CombatStatus::EnemyWon.winner(), Some(Winner::Enemy));
        assert!(!CombatStatus::Ongoing.is_over());
        assert!(CombatStatus::EnemyWon.is_over());
    }

    #[test]
    fn test_damage_to_enemy() {
        let hit = TurnOutcome {
            action: CombatAction::Attack,
            success: true,
            amount: 6,
            message: String::new(),
        };
        let miss = TurnOutcome {
            success: false,
            amount: 2,
            ..hit.clone()
        };
        let counter = TurnOutcome {
            action: CombatAction::EnemyTurn,
            success: true,
            amount: 4,
            message: String::new(),
        };
        assert_eq!(hit.damage_to_enemy(), 6);
        assert_eq!(miss.damage_to_enemy(), 0);
        assert_eq!(counter.damage_to_enemy(), 0);
    }
}
