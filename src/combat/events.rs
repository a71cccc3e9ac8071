//! Battle events emitted for the presentation layer.

use super::ability::AbilityId;
use super::status::StatusKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    Win,
    Lose,
}

/// What dealt a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Ability(AbilityId),
    EnemyAttack,
    Drone,
    Status(StatusKind),
}

/// Everything a renderer needs to animate one step of the battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    AbilityUsed {
        ability: AbilityId,
        cost: u32,
        echoed: bool,
    },
    Damage {
        target: Side,
        /// HP actually removed, so overkill is not reported.
        amount: u32,
        is_crit: bool,
        source: DamageSource,
    },
    Heal {
        target: Side,
        amount: u32,
    },
    /// The enemy winds up; `charged` means a full-energy heavy strike.
    EnemyTelegraph {
        charged: bool,
    },
    /// A stunned side loses its action.
    TurnSkipped {
        side: Side,
    },
    /// Ghost Step swallowed an attack.
    AttackNegated,
    DroneOffline {
        turns_left: u32,
    },
    StatusApplied {
        kind: StatusKind,
        target: Side,
        remaining: Option<u32>,
    },
    StatusExpired {
        kind: StatusKind,
        target: Side,
    },
    EnergyChanged {
        player: u32,
        enemy: u32,
    },
    BattleEnded {
        result: BattleResult,
    },
}

impl BattleEvent {
    /// Damage dealt to `side` by this event, if any.
    pub fn damage_to(&self, side: Side) -> Option<u32> {
        match self {
            BattleEvent::Damage { target, amount, .. } if *target == side => Some(*amount),
            _ => None,
        }
    }
}
