//! Balance constants, shared combat math, errors and the game session.

pub mod combat_math;
pub mod constants;
pub mod error;
pub mod session;

pub use constants::*;
pub use error::*;
pub use session::*;
