use super::stats::Stats;
use crate::combat::ability::AbilityId;
use crate::core::constants::{HP_MULTIPLIER, SAMURAI_HP_MULTIPLIER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playable character classes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Archetype {
    Netrunner,
    StreetSamurai,
    Techie,
}

impl Archetype {
    pub fn all() -> [Archetype; 3] {
        [
            Archetype::Netrunner,
            Archetype::StreetSamurai,
            Archetype::Techie,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Netrunner => "Netrunner",
            Archetype::StreetSamurai => "Street Samurai",
            Archetype::Techie => "Techie",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Archetype::Netrunner => "Hacker who shreds defenses and bends the fight's tempo.",
            Archetype::StreetSamurai => "Chromed blade fighter built for crits and attrition.",
            Archetype::Techie => "Engineer fighting alongside an upgradable combat drone.",
        }
    }

    /// Base stats of a fresh level 1 character.
    pub fn base_stats(&self) -> Stats {
        match self {
            Archetype::Netrunner => Stats::new(120, 12, 4, 11),
            Archetype::StreetSamurai => Stats::new(120, 16, 6, 5),
            Archetype::Techie => Stats::new(120, 10, 12, 5),
        }
    }

    /// Sum of the starting stats; anchors enemy scaling.
    pub fn starting_stat_total(&self) -> u32 {
        self.base_stats().total()
    }

    pub fn hp_multiplier(&self) -> u32 {
        match self {
            Archetype::StreetSamurai => SAMURAI_HP_MULTIPLIER,
            _ => HP_MULTIPLIER,
        }
    }

    pub fn has_drone(&self) -> bool {
        matches!(self, Archetype::Techie)
    }

    /// Free, cooldown-less attack every character owns from the start.
    pub fn basic_ability(&self) -> AbilityId {
        match self {
            Archetype::Netrunner => AbilityId::DataSpike,
            Archetype::StreetSamurai => AbilityId::BladeStrike,
            Archetype::Techie => AbilityId::ShockBaton,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_totals() {
        assert_eq!(Archetype::Netrunner.starting_stat_total(), 147);
        assert_eq!(Archetype::StreetSamurai.starting_stat_total(), 147);
        assert_eq!(Archetype::Techie.starting_stat_total(), 147);
    }

    #[test]
    fn test_samurai_has_higher_hp_multiplier() {
        assert_eq!(Archetype::StreetSamurai.hp_multiplier(), 60);
        assert_eq!(Archetype::Netrunner.hp_multiplier(), 50);
        assert_eq!(Archetype::Techie.hp_multiplier(), 50);
    }

    #[test]
    fn test_only_techie_has_drone() {
        let with_drone: Vec<_> = Archetype::all()
            .into_iter()
            .filter(|a| a.has_drone())
            .collect();
        assert_eq!(with_drone, vec![Archetype::Techie]);
    }

    #[test]
    fn test_basic_ability_belongs_to_archetype() {
        for archetype in Archetype::all() {
            let basic = archetype.basic_ability().spec();
            assert_eq!(basic.archetype, archetype);
            assert_eq!(basic.cost, 0);
            assert_eq!(basic.cooldown, 0);
        }
    }
}
