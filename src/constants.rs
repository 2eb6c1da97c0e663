// Turn timing
pub const ENEMY_TURN_DELAY_MS: u64 = 500;
pub const INPUT_POLL_MS: u64 = 50;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;

// Hit and defend rolls are d100; anything above this succeeds (90%)
pub const ACTION_FAIL_CEILING: u32 = 10;
pub const MISS_SELF_DAMAGE: u32 = 2;
pub const FAILED_DEFEND_SELF_DAMAGE: u32 = 5;

// Player basic attack die
pub const ATTACK_DIE_SIDES: u32 = 6;

// Enemy counter-attack ranges (inclusive)
pub const ENEMY_DAMAGE_MIN: u32 = 2;
pub const ENEMY_DAMAGE_MAX: u32 = 6;
pub const ENEMY_DEFENDED_DAMAGE_MIN: u32 = 1;
pub const ENEMY_DEFENDED_DAMAGE_MAX: u32 = 2;

// Victory rewards
pub const XP_PER_ENEMY_LEVEL: u32 = 25;
pub const XP_BONUS_MIN: u32 = 5;
pub const XP_BONUS_MAX: u32 = 15;

// Leveling
pub const STARTING_XP_TO_NEXT: u32 = 50;
// xp_to_next grows by 13/10 per level, truncated
pub const XP_CURVE_NUMERATOR: u32 = 13;
pub const XP_CURVE_DENOMINATOR: u32 = 10;
pub const LEVEL_UP_MAX_HP: u32 = 5;
pub const LEVEL_UP_ATTACK: u32 = 1;
pub const LEVEL_UP_DEFENSE: u32 = 1;

// Special ability gating
pub const SPECIAL_USES_PER_STAGE: u32 = 3;
pub const SPECIAL_DAMAGE_MULTIPLIER: u32 = 2;

// Flee
pub const FLEE_SUCCESS_CHANCE: f64 = 0.6;

// Run structure
pub const FINAL_STAGE: u32 = 3;

// Persistence
pub const SAVE_VERSION: u32 = 1;
pub const SAVE_LIST_LIMIT: usize = 10;
pub const HISTORY_DEFAULT_LIMIT: usize = 10;
pub const LEADERBOARD_LIMIT: usize = 10;

// Character names
pub const MAX_NAME_LENGTH: usize = 15;

// Battle screen
pub const MESSAGE_TAIL_LINES: usize = 6;
