//! Error types for rejected player actions.
//!
//! Every rejection leaves the game state untouched; the error is the only
//! observable effect.

use crate::character::archetype::Archetype;
use crate::combat::ability::AbilityId;

/// Reasons an in-battle action is refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the battle is already over")]
    BattleOver,

    #[error("it is not the player's turn")]
    NotPlayersTurn,

    #[error("{0} is not in the current offer")]
    NotOffered(AbilityId),

    #[error("{ability} is on cooldown for {remaining} more round(s)")]
    OnCooldown { ability: AbilityId, remaining: u32 },

    #[error("{ability} costs {cost} energy but only {available} is available")]
    InsufficientEnergy {
        ability: AbilityId,
        cost: u32,
        available: u32,
    },
}

/// Reasons a progression or shop action is refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("not enough gold: need {cost}, have {available}")]
    InsufficientGold { cost: u64, available: u64 },

    #[error("unknown stat `{0}`")]
    UnknownStat(String),

    #[error("unknown item `{0}`")]
    UnknownItem(String),

    #[error("{0} is already owned")]
    AlreadyOwned(String),

    #[error("{0} is not owned")]
    NotOwned(String),

    #[error("requires level {required}, current level is {level}")]
    LevelTooLow { required: u32, level: u32 },

    #[error("{ability} is not available to the {archetype}")]
    WrongArchetype {
        ability: AbilityId,
        archetype: Archetype,
    },

    #[error("loadout is full ({0} abilities)")]
    LoadoutFull(usize),

    #[error("{0} is already in the loadout")]
    AlreadyInLoadout(AbilityId),

    #[error("{0} is not in the loadout")]
    NotInLoadout(AbilityId),

    #[error("the basic ability cannot leave the loadout")]
    BasicAbilityLocked,
}

/// Reasons an encounter cannot start.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("every boss has already been defeated")]
    AllBossesDefeated,

    #[error("{boss} requires level {required}, current level is {level}")]
    BossLocked {
        boss: String,
        required: u32,
        level: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_messages() {
        let err = ActionError::InsufficientEnergy {
            ability: AbilityId::EchoLoop,
            cost: 50,
            available: 25,
        };
        assert_eq!(
            err.to_string(),
            "Echo Loop costs 50 energy but only 25 is available"
        );
        assert_eq!(
            ActionError::NotOffered(AbilityId::GlitchPulse).to_string(),
            "Glitch Pulse is not in the current offer"
        );
    }

    #[test]
    fn test_progression_error_messages() {
        let err = ProgressionError::WrongArchetype {
            ability: AbilityId::Bloodbath,
            archetype: Archetype::Techie,
        };
        assert_eq!(err.to_string(), "Bloodbath is not available to the Techie");
        assert_eq!(
            ProgressionError::UnknownStat("luck".to_string()).to_string(),
            "unknown stat `luck`"
        );
    }
}
