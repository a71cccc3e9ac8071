//! Per-playthrough statistics.

use crate::character::{Archetype, Combatant, Player};
use crate::combat::{BattleResult, Settlement};
use serde::Serialize;

/// Statistics from a single simulated playthrough.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub archetype: Archetype,
    pub battles: u32,
    pub wins: u32,
    pub losses: u32,
    pub timeouts: u32,
    pub boss_attempts: u32,
    pub bosses_defeated: u32,
    pub total_rounds: u64,
    pub gold_lost_to_bosses: u64,
    pub final_level: u32,
    pub final_gold: u64,
    pub abilities_owned: usize,
}

impl RunStats {
    pub fn new(archetype: Archetype) -> Self {
        Self {
            archetype,
            battles: 0,
            wins: 0,
            losses: 0,
            timeouts: 0,
            boss_attempts: 0,
            bosses_defeated: 0,
            total_rounds: 0,
            gold_lost_to_bosses: 0,
            final_level: 1,
            final_gold: 0,
            abilities_owned: 1,
        }
    }

    /// Fold one settled battle into the totals.
    pub fn record(&mut self, settlement: &Settlement) {
        self.battles += 1;
        self.total_rounds += settlement.rounds as u64;
        if settlement.was_boss {
            self.boss_attempts += 1;
        }
        match settlement.result {
            Some(BattleResult::Win) => {
                self.wins += 1;
                if settlement.was_boss {
                    self.bosses_defeated += 1;
                }
            }
            Some(BattleResult::Lose) => {
                self.losses += 1;
                self.gold_lost_to_bosses += settlement.gold_lost;
            }
            None => self.timeouts += 1,
        }
    }

    /// Snapshot the player's end state.
    pub fn finish(&mut self, player: &Player) {
        self.final_level = player.level();
        self.final_gold = player.gold();
        self.abilities_owned = player.abilities().len();
    }

    pub fn win_rate(&self) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        self.wins as f64 / self.battles as f64
    }

    pub fn avg_rounds(&self) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.battles as f64
    }
}
