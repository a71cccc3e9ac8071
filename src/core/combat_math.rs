//! Shared combat math functions for battles and the simulator.
//!
//! These pure functions calculate combat outcomes without side effects.

use super::constants::*;
use rand::Rng;

/// Result of a single attack calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// Damage dealt (after crit multiplier if applicable).
    pub damage: u32,
    /// Whether this attack was a critical hit.
    pub is_crit: bool,
}

/// Base damage of one hit before multipliers.
///
/// # Arguments
/// * `atk` - Attacker's effective ATK
/// * `def` - Defender's effective DEF
///
/// # Returns
/// `max(1, atk * 10 - def * 5)`
pub fn hit_damage(atk: u32, def: u32) -> u32 {
    atk.saturating_mul(ATTACK_FACTOR)
        .saturating_sub(def.saturating_mul(DEFENSE_FACTOR))
        .max(MIN_DAMAGE)
}

/// Scale a hit by an ability multiplier, rounding to the nearest point.
/// Never drops below the minimum damage.
pub fn scale_damage(base: u32, multiplier: f64) -> u32 {
    let scaled = (base as f64 * multiplier).round();
    if scaled >= u32::MAX as f64 {
        u32::MAX
    } else {
        (scaled as u32).max(MIN_DAMAGE)
    }
}

/// Crit chance granted by a base SPD value.
pub fn crit_chance(spd: u32) -> f64 {
    spd as f64 * CRIT_CHANCE_PER_SPD
}

/// Roll for critical hit.
///
/// # Arguments
/// * `chance` - Probability in `[0, 1]`; values above 1 always crit
/// * `rng` - Random number generator
///
/// # Returns
/// true if crit, false otherwise
pub fn roll_crit(chance: f64, rng: &mut impl Rng) -> bool {
    if chance <= 0.0 {
        return false;
    }
    rng.gen::<f64>() < chance
}

/// Roll a crit on a prepared hit and double it when it lands.
pub fn resolve_attack(damage: u32, chance: f64, rng: &mut impl Rng) -> AttackResult {
    let is_crit = roll_crit(chance, rng);
    let damage = if is_crit {
        damage.saturating_mul(CRIT_MULTIPLIER)
    } else {
        damage
    };
    AttackResult { damage, is_crit }
}

/// Energy after one round of regeneration, capped at the maximum.
pub fn regen_energy(current: u32) -> u32 {
    let regen = (ENERGY_MAX as f64 * ENERGY_REGEN_FRACTION).round() as u32;
    current.saturating_add(regen).min(ENERGY_MAX)
}

/// Current HP as a fraction of max HP.
pub fn hp_ratio(hp: u32, max_hp: u32) -> f64 {
    if max_hp == 0 {
        return 0.0;
    }
    hp as f64 / max_hp as f64
}

/// Apply a signed delta to a stat, flooring at zero.
pub fn apply_delta(value: u32, delta: i64) -> u32 {
    (value as i64 + delta).clamp(0, u32::MAX as i64) as u32
}
