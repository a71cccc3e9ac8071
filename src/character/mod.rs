//! Player character: archetypes, stats, progression and the shop.

pub mod archetype;
pub mod combatant;
pub mod player;
pub mod stats;

pub use archetype::*;
pub use combatant::*;
pub use player::*;
pub use stats::*;
