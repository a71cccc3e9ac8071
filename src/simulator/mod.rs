//! Battle balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of automated characters through the real battle engine to
//! compare archetypes:
//! - Win rates and battle length
//! - Level and gold pacing
//! - How far each class climbs the boss ladder

mod config;
mod report;
mod run_stats;
mod runner;

pub use config::SimConfig;
pub use report::{ClassSummary, SimReport};
pub use run_stats::RunStats;
pub use runner::{choose_ability, fight, go_shopping, run_simulation, simulate_single_run};
