//! A play session: the player between battles plus boss-ladder progress.

use crate::character::{Combatant, Player};
use crate::combat::{
    random_dungeon_template, start_battle, BattleResult, BattleState, EnemyTemplate, Settlement,
    BOSS_ENEMIES,
};
use crate::core::error::SessionError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub player: Player,
    /// Index into the boss ladder of the next boss to fight.
    current_boss_index: usize,
    battles_won: u32,
    battles_lost: u32,
}

impl GameSession {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            current_boss_index: 0,
            battles_won: 0,
            battles_lost: 0,
        }
    }

    pub fn current_boss_index(&self) -> usize {
        self.current_boss_index
    }

    pub fn bosses_defeated(&self) -> usize {
        self.current_boss_index
    }

    pub fn battles_won(&self) -> u32 {
        self.battles_won
    }

    pub fn battles_lost(&self) -> u32 {
        self.battles_lost
    }

    /// Next boss on the ladder, if any remain.
    pub fn current_boss(&self) -> Option<&'static EnemyTemplate> {
        BOSS_ENEMIES.get(self.current_boss_index)
    }

    /// Whether the next boss can be challenged right now.
    pub fn can_challenge_boss(&self) -> bool {
        self.current_boss()
            .is_some_and(|boss| self.player.level() >= boss.required_level)
    }

    /// Fight a random dungeon enemy scaled to the player.
    pub fn start_dungeon_battle(&self, rng: &mut impl Rng) -> BattleState {
        let template = random_dungeon_template(rng);
        start_battle(self.player.clone(), template, false, rng)
    }

    /// Fight the next boss on the ladder.
    pub fn start_boss_battle(&self, rng: &mut impl Rng) -> Result<BattleState, SessionError> {
        let boss = self.current_boss().ok_or(SessionError::AllBossesDefeated)?;
        if self.player.level() < boss.required_level {
            return Err(SessionError::BossLocked {
                boss: boss.name.to_string(),
                required: boss.required_level,
                level: self.player.level(),
            });
        }
        Ok(start_battle(self.player.clone(), boss, true, rng))
    }

    /// Settle a battle and take the player back. A boss win advances the ladder.
    pub fn finish_battle(&mut self, battle: BattleState) -> Settlement {
        let (player, settlement) = battle.settle();
        self.player = player;

        match settlement.result {
            Some(BattleResult::Win) => {
                self.battles_won += 1;
                if settlement.was_boss {
                    self.current_boss_index += 1;
                    info!(
                        boss = %settlement.enemy,
                        defeated = self.current_boss_index,
                        "boss defeated"
                    );
                }
            }
            Some(BattleResult::Lose) => self.battles_lost += 1,
            None => {}
        }
        settlement
    }

    /// Drop an unfinished battle. The session's player is left as it was.
    pub fn abandon_battle(&mut self, battle: BattleState) {
        battle.abandon();
    }
}
