//! Enemy templates and the enemy generator.

use crate::character::{Combatant, Stats};
use crate::core::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Static enemy definition. Regular templates are rescaled to the player;
/// bosses are used verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub stats: Stats,
    pub gold: u64,
    pub exp: u64,
    /// Minimum player level to challenge a boss; also its level.
    pub required_level: u32,
}

const fn template(
    name: &'static str,
    stats: (u32, u32, u32, u32),
    gold: u64,
    exp: u64,
    required_level: u32,
) -> EnemyTemplate {
    EnemyTemplate {
        name,
        stats: Stats::new(stats.0, stats.1, stats.2, stats.3),
        gold,
        exp,
        required_level,
    }
}

pub const DUNGEON_ENEMIES: [EnemyTemplate; 16] = [
    template("Gang Thug", (70, 10, 6, 8), 20, 15, 0),
    template("Security Drone", (90, 14, 10, 10), 30, 22, 0),
    template("Cyber Assassin", (110, 18, 12, 12), 50, 35, 0),
    template("Cyber-Hound Alpha", (130, 20, 14, 14), 60, 40, 0),
    template("Rogue AI Core", (150, 22, 16, 16), 70, 45, 0),
    template("Augmented Enforcer", (170, 24, 18, 18), 80, 50, 0),
    template("Shadow Syndicate Leader", (190, 26, 20, 20), 90, 55, 0),
    template("Bio-Engineered Horror", (210, 28, 22, 22), 100, 60, 0),
    template("Data Wraith", (230, 30, 24, 24), 110, 65, 0),
    template("Mech-Warrior Prototype", (250, 32, 26, 26), 120, 70, 0),
    template("Neural Overlord", (270, 34, 28, 28), 130, 75, 0),
    template("Toxic Sludge Beast", (290, 36, 30, 30), 140, 80, 0),
    template("Plasma Golem", (310, 38, 32, 32), 150, 85, 0),
    template("Vortex Sentinel", (330, 40, 34, 34), 160, 90, 0),
    template("Chrono-Assassin", (350, 42, 36, 36), 170, 95, 0),
    template("Quantum Disruptor", (370, 44, 38, 38), 180, 100, 0),
];

/// Bosses in the order they must be defeated.
pub const BOSS_ENEMIES: [EnemyTemplate; 5] = [
    template("Chrome Reaper", (150, 16, 8, 8), 250, 120, 3),
    template("Corporate Enforcer X-9", (190, 22, 12, 10), 400, 220, 6),
    template("Neon Hydra", (230, 28, 16, 14), 600, 350, 9),
    template("The Architect", (270, 34, 20, 18), 850, 520, 12),
    template("Omega Singularity", (320, 40, 24, 22), 1200, 750, 15),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub level: u32,
    pub stats: Stats,
    max_hp: u32,
    hp: u32,
    pub gold: u64,
    pub exp: u64,
    pub is_boss: bool,
}

impl Enemy {
    /// Full-health enemy with `max_hp = stats.hp * 50`.
    pub fn new(name: impl Into<String>, level: u32, stats: Stats, gold: u64, exp: u64) -> Self {
        let max_hp = stats.hp.saturating_mul(ENEMY_HP_MULTIPLIER);
        Self {
            name: name.into(),
            level,
            stats,
            max_hp,
            hp: max_hp,
            gold,
            exp,
            is_boss: false,
        }
    }

    pub fn boss(template: &EnemyTemplate) -> Self {
        let mut enemy = Self::new(
            template.name,
            template.required_level,
            template.stats,
            template.gold,
            template.exp,
        );
        enemy.is_boss = true;
        enemy
    }

    pub(crate) fn apply_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn stats(&self) -> Stats {
        self.stats
    }

    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }
}

/// Enemy level: the player's level shifted by -1, 0 or +1, never below 1.
pub fn roll_enemy_level(player_level: u32, rng: &mut impl Rng) -> u32 {
    let offset = rng.gen_range(-ENEMY_LEVEL_SPREAD..=ENEMY_LEVEL_SPREAD);
    (player_level as i64 + offset).max(1) as u32
}

/// Stat total a regular enemy of `enemy_level` is scaled to.
pub fn target_stat_total(player_starting_total: u32, enemy_level: u32) -> u32 {
    player_starting_total + enemy_level.saturating_sub(1) * ENEMY_TOTAL_PER_LEVEL
}

/// Unrounded scaled stat: `base * factor * (1 + variance)`.
pub fn scaled_stat(base: u32, factor: f64, variance: f64) -> f64 {
    base as f64 * factor * (1.0 + variance)
}

/// Build a full-health enemy from a template.
///
/// # Arguments
/// * `template` - Enemy template
/// * `player_level` - Current player level
/// * `player_starting_total` - Stat total of the player's archetype at level 1
/// * `is_boss` - Bosses keep their template stats and level
/// * `rng` - Random number generator
pub fn generate_enemy(
    template: &EnemyTemplate,
    player_level: u32,
    player_starting_total: u32,
    is_boss: bool,
    rng: &mut impl Rng,
) -> Enemy {
    if is_boss {
        return Enemy::boss(template);
    }

    let level = roll_enemy_level(player_level, rng);
    let target = target_stat_total(player_starting_total, level);
    let factor = target as f64 / template.stats.total().max(1) as f64;

    let mut roll = |base: u32| -> u32 {
        let variance = rng.gen_range(-ENEMY_STAT_VARIANCE..=ENEMY_STAT_VARIANCE);
        scaled_stat(base, factor, variance).round().max(1.0) as u32
    };
    let stats = Stats::new(
        roll(template.stats.hp),
        roll(template.stats.atk),
        roll(template.stats.def),
        roll(template.stats.spd),
    );
    let gold = (template.gold as f64 * factor).round().max(1.0) as u64;
    let exp = (template.exp as f64 * factor).round().max(1.0) as u64;

    debug!(
        enemy = template.name,
        level,
        target,
        factor,
        ?stats,
        "enemy generated"
    );
    Enemy::new(template.name, level, stats, gold, exp)
}

/// Pick a uniformly random dungeon template.
pub fn random_dungeon_template(rng: &mut impl Rng) -> &'static EnemyTemplate {
    &DUNGEON_ENEMIES[rng.gen_range(0..DUNGEON_ENEMIES.len())]
}
