// Energy
pub const ENERGY_MAX: u32 = 100;
pub const ENERGY_REGEN_FRACTION: f64 = 0.25;
pub const STARTING_ENERGY: u32 = 0;
pub const CHARGED_STRIKE_MULTIPLIER: f64 = 1.5;

// Damage formula: max(1, atk * ATTACK_FACTOR - def * DEFENSE_FACTOR)
pub const ATTACK_FACTOR: u32 = 10;
pub const DEFENSE_FACTOR: u32 = 5;
pub const MIN_DAMAGE: u32 = 1;
pub const CRIT_CHANCE_PER_SPD: f64 = 0.005;
pub const CRIT_MULTIPLIER: u32 = 2;

// Hit points
pub const HP_MULTIPLIER: u32 = 50;
pub const SAMURAI_HP_MULTIPLIER: u32 = 60;
pub const ENEMY_HP_MULTIPLIER: u32 = 50;

// Starting character
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_GOLD: u64 = 100;
pub const STARTING_STAT_POINTS: u32 = 10;
pub const STARTING_EXP_TO_NEXT: u64 = 50;

// Leveling: exp_to_next = floor(exp_to_next * FACTOR + FLAT)
pub const EXP_CURVE_FACTOR: f64 = 1.4;
pub const EXP_CURVE_FLAT: f64 = 10.0;
pub const LEVEL_UP_STAT_POINTS: u32 = 3;
pub const LEVEL_UP_SKILL_POINTS: u32 = 1;
/// (hp, atk, def, spd) added to base stats per level.
pub const LEVEL_UP_STAT_GAINS: (u32, u32, u32, u32) = (10, 2, 2, 1);

// Stat shop
pub const BASE_STAT_COST: u64 = 100;
pub const STAT_COST_GROWTH: f64 = 1.15;

// Equipment: bonus = round(base_stat * (item_stat + floor(level * SCALING)) / DIVISOR)
pub const ITEM_LEVEL_SCALING: f64 = 0.5;
pub const EQUIPMENT_BONUS_DIVISOR: f64 = 100.0;

// Abilities
pub const MAX_LOADOUT_SIZE: usize = 6;
pub const OFFER_SLOTS: usize = 3;

// Enemy generation
pub const ENEMY_LEVEL_SPREAD: i64 = 1;
pub const ENEMY_TOTAL_PER_LEVEL: u32 = 5;
pub const ENEMY_STAT_VARIANCE: f64 = 0.05;

// Loss penalty
pub const BOSS_LOSS_GOLD_PENALTY: f64 = 0.2;

// Drone companion
pub const DRONE_DAMAGE_PER_ATK: u32 = 4;
pub const DRONE_BASE_CRIT_CHANCE: f64 = 0.05;
pub const OVERCLOCK_MULTIPLIER: u32 = 3;
pub const HOLO_DECOY_ATTACKS: u32 = 2;
