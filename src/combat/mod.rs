//! Turn-based battle engine: abilities, enemies, status effects, the drone
//! companion and the round state machine.

pub mod ability;
pub mod battle;
pub mod companion;
mod effects;
pub mod enemy;
pub mod events;
pub mod offer;
pub mod status;

pub use ability::*;
pub use battle::*;
pub use companion::*;
pub use enemy::*;
pub use events::*;
pub use offer::*;
pub use status::*;
