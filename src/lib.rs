//! Cyberbattle - Turn-Based Combat Engine Library
//!
//! Character progression, enemy generation, abilities, status effects and a
//! step-driven battle state machine. Rendering and input are left to the
//! caller; the engine only consumes actions and emits `BattleEvent`s.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod simulator;

pub use character::{Archetype, Combatant, Player, StatKey, Stats};
pub use combat::{start_battle, AbilityId, BattleEvent, BattleResult, BattleState, Phase};
pub use crate::core::{ActionError, GameSession, ProgressionError, SessionError};
