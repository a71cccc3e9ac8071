use crate::core::error::ProgressionError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const NUM_STATS: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StatKey {
    Hp,
    Atk,
    Def,
    Spd,
}

impl StatKey {
    pub fn all() -> [StatKey; NUM_STATS] {
        [StatKey::Hp, StatKey::Atk, StatKey::Def, StatKey::Spd]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            StatKey::Hp => "HP",
            StatKey::Atk => "ATK",
            StatKey::Def => "DEF",
            StatKey::Spd => "SPD",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StatKey::Hp => 0,
            StatKey::Atk => 1,
            StatKey::Def => 2,
            StatKey::Spd => 3,
        }
    }
}

impl FromStr for StatKey {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hp" => Ok(StatKey::Hp),
            "atk" => Ok(StatKey::Atk),
            "def" => Ok(StatKey::Def),
            "spd" => Ok(StatKey::Spd),
            _ => Err(ProgressionError::UnknownStat(s.to_string())),
        }
    }
}

/// The four combat stats shared by players and enemies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
}

impl Stats {
    pub const fn new(hp: u32, atk: u32, def: u32, spd: u32) -> Self {
        Self { hp, atk, def, spd }
    }

    pub fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Atk => self.atk,
            StatKey::Def => self.def,
            StatKey::Spd => self.spd,
        }
    }

    pub fn add(&mut self, key: StatKey, amount: u32) {
        let slot = match key {
            StatKey::Hp => &mut self.hp,
            StatKey::Atk => &mut self.atk,
            StatKey::Def => &mut self.def,
            StatKey::Spd => &mut self.spd,
        };
        *slot = slot.saturating_add(amount);
    }

    /// Component-wise sum.
    pub fn plus(&self, other: &Stats) -> Stats {
        Stats {
            hp: self.hp.saturating_add(other.hp),
            atk: self.atk.saturating_add(other.atk),
            def: self.def.saturating_add(other.def),
            spd: self.spd.saturating_add(other.spd),
        }
    }

    pub fn total(&self) -> u32 {
        self.hp + self.atk + self.def + self.spd
    }
}
