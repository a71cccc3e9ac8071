//! Combat drone that fights alongside a Techie.

use crate::core::combat_math::resolve_attack;
use crate::core::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One drone hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroneStrike {
    pub damage: u32,
    pub is_crit: bool,
    pub overclocked: bool,
}

/// Outcome of a drone tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanionTick {
    /// Knocked offline; `turns_left` after this tick.
    Offline { turns_left: u32 },
    Attacked(Vec<DroneStrike>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionState {
    pub damage: u32,
    pub crit_chance: f64,
    pub overclock_charges: u32,
    pub critical_loop: bool,
    pub holo_decoy_rounds: u32,
    pub disabled_turns: u32,
}

impl CompanionState {
    /// Fresh drone scaled off its owner's ATK.
    pub fn new(owner_atk: u32) -> Self {
        Self {
            damage: owner_atk.saturating_mul(DRONE_DAMAGE_PER_ATK).max(1),
            crit_chance: DRONE_BASE_CRIT_CHANCE,
            overclock_charges: 0,
            critical_loop: false,
            holo_decoy_rounds: 0,
            disabled_turns: 0,
        }
    }

    /// Permanently scale drone damage for this battle.
    pub fn boost(&mut self, factor: f64) {
        self.damage = ((self.damage as f64 * factor).round() as u32).max(1);
    }

    /// Run one drone turn. The caller applies the returned hits in order.
    pub fn tick(&mut self, rng: &mut impl Rng) -> CompanionTick {
        if self.disabled_turns > 0 {
            self.disabled_turns -= 1;
            debug!(turns_left = self.disabled_turns, "drone offline");
            return CompanionTick::Offline {
                turns_left: self.disabled_turns,
            };
        }

        let mut attacks = if self.holo_decoy_rounds > 0 {
            HOLO_DECOY_ATTACKS
        } else {
            1
        };
        let mut loop_used = false;
        let mut strikes = Vec::new();

        while attacks > 0 {
            attacks -= 1;

            let overclocked = self.overclock_charges > 0;
            let mut damage = self.damage;
            if overclocked {
                self.overclock_charges -= 1;
                damage = damage.saturating_mul(OVERCLOCK_MULTIPLIER);
            }

            let hit = resolve_attack(damage, self.crit_chance, rng);
            if hit.is_crit && self.critical_loop && !loop_used {
                loop_used = true;
                attacks += 1;
            }
            strikes.push(DroneStrike {
                damage: hit.damage,
                is_crit: hit.is_crit,
                overclocked,
            });
        }

        self.holo_decoy_rounds = self.holo_decoy_rounds.saturating_sub(1);
        debug!(hits = strikes.len(), "drone attacked");
        CompanionTick::Attacked(strikes)
    }
}
