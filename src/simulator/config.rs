//! Simulation configuration.

use crate::character::Archetype;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated playthroughs per archetype
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Archetypes to simulate
    pub archetypes: Vec<Archetype>,

    /// Battles fought per playthrough
    pub battles_per_run: u32,

    /// Rounds before a battle is abandoned as a timeout
    pub max_rounds_per_battle: u32,

    /// Whether to challenge bosses once eligible
    pub challenge_bosses: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            archetypes: Archetype::all().to_vec(),
            battles_per_run: 60,
            max_rounds_per_battle: 100,
            challenge_bosses: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a balance smoke test
    pub fn quick_balance_check() -> Self {
        Self {
            num_runs: 25,
            battles_per_run: 20,
            ..Default::default()
        }
    }

    /// One archetype only
    pub fn single_class(archetype: Archetype) -> Self {
        Self {
            archetypes: vec![archetype],
            ..Default::default()
        }
    }

    /// Long runs that aim to clear the whole boss ladder
    pub fn full_ladder() -> Self {
        Self {
            num_runs: 50,
            battles_per_run: 250,
            ..Default::default()
        }
    }
}
