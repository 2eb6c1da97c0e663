use super::flavor::{random_reaction, Reaction};
use super::types::{CombatAction, CombatStatus, TurnOutcome, Winner};
use crate::character::Character;
use crate::constants::*;
use crate::dice::Dice;
use tracing::debug;

/// One encounter between the player and a single enemy.
///
/// Every player action appends to the log and bumps the turn counter. The
/// enemy's counter-attack appends to the log but leaves the counter alone.
#[derive(Debug, Clone)]
pub struct Combat {
    player: Character,
    enemy: Character,
    log: Vec<String>,
    turn_count: u32,
    player_defended: bool,
}

impl Combat {
    pub fn new(player: Character, enemy: Character) -> Self {
        Self {
            player,
            enemy,
            log: Vec::new(),
            turn_count: 0,
            player_defended: false,
        }
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Character {
        &mut self.player
    }

    pub fn enemy(&self) -> &Character {
        &self.enemy
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn player_defended(&self) -> bool {
        self.player_defended
    }

    /// 90% to strike with the weapon; a miss costs the player 2 HP.
    pub fn player_attack(&mut self, dice: &mut impl Dice) -> TurnOutcome {
        let roll = dice.roll(1, 100);

        let outcome = if roll > ACTION_FAIL_CEILING {
            let damage = self.player.basic_attack(&mut self.enemy, dice);
            let reaction = random_reaction(&self.enemy.name, Reaction::AttackHit, dice);
            TurnOutcome {
                action: CombatAction::Attack,
                success: true,
                amount: damage,
                message: format!("✅ You attacked! {} damage dealt!\n{}", damage, reaction),
            }
        } else {
            self.player.take_damage(MISS_SELF_DAMAGE);
            let reaction = random_reaction(&self.enemy.name, Reaction::AttackMissed, dice);
            TurnOutcome {
                action: CombatAction::Attack,
                success: false,
                amount: MISS_SELF_DAMAGE,
                message: format!("❌ Attack FAILED! -{} HP\n{}", MISS_SELF_DAMAGE, reaction),
            }
        };

        debug!(roll, success = outcome.success, amount = outcome.amount, "player attack");
        self.record_player_turn(outcome)
    }

    /// 90% to brace for the next enemy turn; a fumble costs the player 5 HP.
    pub fn player_defend(&mut self, dice: &mut impl Dice) -> TurnOutcome {
        let roll = dice.roll(1, 100);

        let outcome = if roll > ACTION_FAIL_CEILING {
            self.player_defended = true;
            let reaction = random_reaction(&self.enemy.name, Reaction::DefendHeld, dice);
            TurnOutcome {
                action: CombatAction::Defend,
                success: true,
                amount: 0,
                message: format!(
                    "🛡️ DEFENSE SUCCESSFUL! You blocked the attack!\n{}",
                    reaction
                ),
            }
        } else {
            self.player.take_damage(FAILED_DEFEND_SELF_DAMAGE);
            let reaction = random_reaction(&self.enemy.name, Reaction::DefendBroken, dice);
            TurnOutcome {
                action: CombatAction::Defend,
                success: false,
                amount: FAILED_DEFEND_SELF_DAMAGE,
                message: format!(
                    "❌ DEFENSE FAILED! -{} HP\n{}",
                    FAILED_DEFEND_SELF_DAMAGE, reaction
                ),
            }
        };

        debug!(roll, success = outcome.success, "player defend");
        self.record_player_turn(outcome)
    }

    /// Guaranteed hit. Whether the player may use it is decided by the caller.
    pub fn player_special_attack(&mut self, dice: &mut impl Dice) -> TurnOutcome {
        let (ability, damage) = self.player.special_attack(&mut self.enemy, dice);
        debug!(ability, damage, "player special");
        self.record_player_turn(TurnOutcome {
            action: CombatAction::Special,
            success: true,
            amount: damage,
            message: format!(
                "⚡ SPECIAL ABILITY: {}!\n💥 {} damage dealt! (GUARANTEED HIT)",
                ability, damage
            ),
        })
    }

    /// Flat counter-attack that ignores defense: 1-2 if the player braced, else 2-6.
    pub fn enemy_turn(&mut self, dice: &mut impl Dice) -> TurnOutcome {
        let damage = if self.player_defended {
            dice.roll(ENEMY_DEFENDED_DAMAGE_MIN, ENEMY_DEFENDED_DAMAGE_MAX)
        } else {
            dice.roll(ENEMY_DAMAGE_MIN, ENEMY_DAMAGE_MAX)
        };
        self.player_defended = false;
        self.player.take_damage(damage);

        debug!(enemy = %self.enemy.name, damage, "enemy turn");
        let outcome = TurnOutcome {
            action: CombatAction::EnemyTurn,
            success: true,
            amount: damage,
            message: format!("🔥 {} counter-attacks for {} damage!", self.enemy.name, damage),
        };
        self.log.push(outcome.message.clone());
        outcome
    }

    /// Player death is checked first, so it wins a simultaneous knockout.
    pub fn status(&self) -> CombatStatus {
        if !self.player.is_alive() {
            CombatStatus::EnemyWon
        } else if !self.enemy.is_alive() {
            CombatStatus::PlayerWon
        } else {
            CombatStatus::Ongoing
        }
    }

    pub fn is_over(&self) -> (bool, Option<Winner>) {
        let status = self.status();
        (status.is_over(), status.winner())
    }

    /// XP for beating this enemy: 25 per enemy level plus 5-15 bonus.
    pub fn reward_xp_for_enemy(&self, dice: &mut impl Dice) -> u32 {
        let base = self.enemy.level * XP_PER_ENEMY_LEVEL;
        base + dice.roll(XP_BONUS_MIN, XP_BONUS_MAX)
    }

    fn record_player_turn(&mut self, outcome: TurnOutcome) -> TurnOutcome {
        self.log.push(outcome.message.clone());
        self.turn_count += 1;
        outcome
    }
}
