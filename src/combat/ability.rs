//! Ability catalog.
//!
//! Abilities are plain data: an energy cost, a cooldown, shop metadata and an
//! ordered list of [`Effect`] commands. The battle resolves the commands in
//! order (see `combat::effects`), so every ability can be exercised in
//! isolation against a hand-built `BattleState`.

use crate::character::archetype::Archetype;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single command an ability performs when it resolves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Hit the enemy for `round(base_hit * multiplier)`, crit chance raised by `crit_bonus`.
    Strike { multiplier: f64, crit_bonus: f64 },
    /// Hit whose multiplier starts at `start` and grows by `step` per use, up to `cap`.
    RampingStrike { start: f64, step: f64, cap: f64 },
    /// Hit gaining `bonus_per_step` of its multiplier for every 10 HP-ratio points the player leads by.
    LeadScaledStrike { multiplier: f64, bonus_per_step: f64 },
    /// Compounding enemy DEF reduction for the rest of the battle.
    ShredDefense { fraction: f64 },
    /// Timed enemy DEF reduction.
    WeakenDefense { fraction: f64, rounds: u32 },
    /// Move a share of the enemy's ATK to the player for a few rounds.
    HijackAttack { fraction: f64, rounds: u32 },
    /// Lower the player's own DEF for a few rounds.
    ExposeSelf { fraction: f64, rounds: u32 },
    StunSelf { rounds: u32 },
    StunEnemy { rounds: u32 },
    /// Damage over time: `round(atk * atk_factor + enemy_max_hp * max_hp_fraction)` per round.
    Residual {
        atk_factor: f64,
        max_hp_fraction: f64,
        rounds: u32,
    },
    /// Delayed strike that goes off after `delay` rounds.
    ArmDetonation { multiplier: f64, delay: u32 },
    /// The next ability resolves twice.
    Echo,
    Heal { fraction: f64 },
    HealOverTime { fraction: f64, rounds: u32 },
    /// Halve incoming damage for the next `turns` enemy attacks.
    Guard { turns: u32 },
    /// Negate the next incoming hit.
    GhostStep,
    /// Gain a growing ATK bonus every round for the rest of the battle.
    Ramp { fraction: f64 },
    /// One-shot crit bonus for the next strike.
    Focus { crit_bonus: f64 },
    BoostDrone { factor: f64 },
    OverclockDrone { charges: u32 },
    SharpenDrone { crit_chance: f64 },
    CriticalLoop,
    HoloDecoy { rounds: u32 },
    DisableDrone { rounds: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityId {
    // Netrunner
    DataSpike,
    TrojanSpike,
    EchoLoop,
    FirewallPatch,
    GlitchPulse,
    StatHijack,
    OverloadAttack,
    SystemCrash,
    OmegaDataStrike,
    // Street Samurai
    BladeStrike,
    Bloodbath,
    LastStand,
    PerfectFocus,
    Heartpiercer,
    GhostStep,
    UnrelentingAssault,
    OmegaBladeStrike,
    // Techie
    ShockBaton,
    DroneBoost,
    GuardMode,
    Overclock,
    TargetingMatrix,
    AutoMedkit,
    HoloDecoy,
    CriticalLoop,
    EmpBurst,
    OmegaDroneStrike,
}

/// Immutable ability definition.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilitySpec {
    pub id: AbilityId,
    pub name: &'static str,
    pub archetype: Archetype,
    /// Energy spent on use.
    pub cost: u32,
    /// Rounds the ability stays out of the offer after use.
    pub cooldown: u32,
    /// Gold price in the shop.
    pub price: u64,
    pub required_level: u32,
    pub description: &'static str,
    pub effects: &'static [Effect],
}

impl AbilitySpec {
    pub fn is_basic(&self) -> bool {
        self.archetype.basic_ability() == self.id
    }

    /// Whether resolving this ability arms Echo Loop rather than consuming it.
    pub fn arms_echo(&self) -> bool {
        self.effects.contains(&Effect::Echo)
    }
}

pub static NETRUNNER_ABILITIES: [AbilitySpec; 9] = [
    AbilitySpec {
        id: AbilityId::DataSpike,
        name: "Data Spike",
        archetype: Archetype::Netrunner,
        cost: 0,
        cooldown: 0,
        price: 0,
        required_level: 0,
        description: "Basic hack. Each hit shreds 5% of the target's DEF for the battle.",
        effects: &[
            Effect::Strike {
                multiplier: 1.0,
                crit_bonus: 0.0,
            },
            Effect::ShredDefense { fraction: 0.05 },
        ],
    },
    AbilitySpec {
        id: AbilityId::TrojanSpike,
        name: "Trojan Spike",
        archetype: Archetype::Netrunner,
        cost: 20,
        cooldown: 1,
        price: 150,
        required_level: 2,
        description: "Starts weak at 0.5x and grows 0.4x stronger with every use, up to 3x.",
        effects: &[Effect::RampingStrike {
            start: 0.5,
            step: 0.4,
            cap: 3.0,
        }],
    },
    AbilitySpec {
        id: AbilityId::EchoLoop,
        name: "Echo Loop",
        archetype: Archetype::Netrunner,
        cost: 50,
        cooldown: 2,
        price: 200,
        required_level: 3,
        description: "The next ability executes twice.",
        effects: &[Effect::Echo],
    },
    AbilitySpec {
        id: AbilityId::FirewallPatch,
        name: "Firewall Patch",
        archetype: Archetype::Netrunner,
        cost: 40,
        cooldown: 4,
        price: 250,
        required_level: 4,
        description: "Restores 20% of max HP.",
        effects: &[Effect::Heal { fraction: 0.2 }],
    },
    AbilitySpec {
        id: AbilityId::GlitchPulse,
        name: "Glitch Pulse",
        archetype: Archetype::Netrunner,
        cost: 40,
        cooldown: 3,
        price: 300,
        required_level: 5,
        description: "Corrupts the target for ATK x5 plus 3% of its max HP each round for 2 rounds.",
        effects: &[Effect::Residual {
            atk_factor: 5.0,
            max_hp_fraction: 0.03,
            rounds: 2,
        }],
    },
    AbilitySpec {
        id: AbilityId::StatHijack,
        name: "Stat Hijack",
        archetype: Archetype::Netrunner,
        cost: 35,
        cooldown: 4,
        price: 400,
        required_level: 7,
        description: "Steals 15% of the target's ATK for 3 rounds.",
        effects: &[Effect::HijackAttack {
            fraction: 0.15,
            rounds: 3,
        }],
    },
    AbilitySpec {
        id: AbilityId::OverloadAttack,
        name: "Overload Attack",
        archetype: Archetype::Netrunner,
        cost: 60,
        cooldown: 1,
        price: 500,
        required_level: 9,
        description: "Deals 3x damage, then the feedback stuns you for a round.",
        effects: &[
            Effect::Strike {
                multiplier: 3.0,
                crit_bonus: 0.0,
            },
            Effect::StunSelf { rounds: 1 },
        ],
    },
    AbilitySpec {
        id: AbilityId::SystemCrash,
        name: "System Crash",
        archetype: Archetype::Netrunner,
        cost: 70,
        cooldown: 5,
        price: 700,
        required_level: 12,
        description: "A light hit that locks the target out of its next attack.",
        effects: &[
            Effect::Strike {
                multiplier: 0.5,
                crit_bonus: 0.0,
            },
            Effect::StunEnemy { rounds: 1 },
        ],
    },
    AbilitySpec {
        id: AbilityId::OmegaDataStrike,
        name: "Omega Data Strike",
        archetype: Archetype::Netrunner,
        cost: 80,
        cooldown: 6,
        price: 1000,
        required_level: 15,
        description: "Plants a payload that detonates for 4x damage after 2 rounds.",
        effects: &[Effect::ArmDetonation {
            multiplier: 4.0,
            delay: 2,
        }],
    },
];

pub static SAMURAI_ABILITIES: [AbilitySpec; 8] = [
    AbilitySpec {
        id: AbilityId::BladeStrike,
        name: "Blade Strike",
        archetype: Archetype::StreetSamurai,
        cost: 0,
        cooldown: 0,
        price: 0,
        required_level: 0,
        description: "Basic slash with +30% crit chance.",
        effects: &[Effect::Strike {
            multiplier: 1.0,
            crit_bonus: 0.3,
        }],
    },
    AbilitySpec {
        id: AbilityId::Bloodbath,
        name: "Bloodbath",
        archetype: Archetype::StreetSamurai,
        cost: 40,
        cooldown: 2,
        price: 150,
        required_level: 2,
        description: "1.5x hit, +25% for every 10 points of HP lead over the target.",
        effects: &[Effect::LeadScaledStrike {
            multiplier: 1.5,
            bonus_per_step: 0.25,
        }],
    },
    AbilitySpec {
        id: AbilityId::LastStand,
        name: "Last Stand",
        archetype: Archetype::StreetSamurai,
        cost: 45,
        cooldown: 3,
        price: 200,
        required_level: 3,
        description: "Deals 2x damage but drops your DEF by 25% for the round.",
        effects: &[
            Effect::Strike {
                multiplier: 2.0,
                crit_bonus: 0.0,
            },
            Effect::ExposeSelf {
                fraction: 0.25,
                rounds: 1,
            },
        ],
    },
    AbilitySpec {
        id: AbilityId::PerfectFocus,
        name: "Perfect Focus",
        archetype: Archetype::StreetSamurai,
        cost: 30,
        cooldown: 4,
        price: 300,
        required_level: 5,
        description: "Your next strike gains +50% crit chance.",
        effects: &[Effect::Focus { crit_bonus: 0.5 }],
    },
    AbilitySpec {
        id: AbilityId::Heartpiercer,
        name: "Heartpiercer",
        archetype: Archetype::StreetSamurai,
        cost: 50,
        cooldown: 3,
        price: 400,
        required_level: 7,
        description: "1.5x hit that cuts the target's DEF by 30% for 2 rounds.",
        effects: &[
            Effect::Strike {
                multiplier: 1.5,
                crit_bonus: 0.0,
            },
            Effect::WeakenDefense {
                fraction: 0.3,
                rounds: 2,
            },
        ],
    },
    AbilitySpec {
        id: AbilityId::GhostStep,
        name: "Ghost Step",
        archetype: Archetype::StreetSamurai,
        cost: 35,
        cooldown: 4,
        price: 500,
        required_level: 9,
        description: "The next incoming attack misses completely.",
        effects: &[Effect::GhostStep],
    },
    AbilitySpec {
        id: AbilityId::UnrelentingAssault,
        name: "Unrelenting Assault",
        archetype: Archetype::StreetSamurai,
        cost: 60,
        cooldown: 8,
        price: 700,
        required_level: 12,
        description: "Gain 5% ATK every round for the rest of the battle.",
        effects: &[Effect::Ramp { fraction: 0.05 }],
    },
    AbilitySpec {
        id: AbilityId::OmegaBladeStrike,
        name: "Omega Blade Strike",
        archetype: Archetype::StreetSamurai,
        cost: 80,
        cooldown: 6,
        price: 1000,
        required_level: 15,
        description: "Marks the target; the cut lands for 4x damage after 2 rounds.",
        effects: &[Effect::ArmDetonation {
            multiplier: 4.0,
            delay: 2,
        }],
    },
];

pub static TECHIE_ABILITIES: [AbilitySpec; 10] = [
    AbilitySpec {
        id: AbilityId::ShockBaton,
        name: "Shock Baton",
        archetype: Archetype::Techie,
        cost: 0,
        cooldown: 0,
        price: 0,
        required_level: 0,
        description: "Basic melee zap.",
        effects: &[Effect::Strike {
            multiplier: 1.0,
            crit_bonus: 0.0,
        }],
    },
    AbilitySpec {
        id: AbilityId::DroneBoost,
        name: "Drone Boost",
        archetype: Archetype::Techie,
        cost: 30,
        cooldown: 3,
        price: 150,
        required_level: 2,
        description: "Permanently raises drone damage by 50% for this battle.",
        effects: &[Effect::BoostDrone { factor: 1.5 }],
    },
    AbilitySpec {
        id: AbilityId::GuardMode,
        name: "Guard Mode",
        archetype: Archetype::Techie,
        cost: 35,
        cooldown: 4,
        price: 200,
        required_level: 3,
        description: "Halves damage from the next 2 enemy attacks.",
        effects: &[Effect::Guard { turns: 2 }],
    },
    AbilitySpec {
        id: AbilityId::Overclock,
        name: "Overclock",
        archetype: Archetype::Techie,
        cost: 40,
        cooldown: 4,
        price: 300,
        required_level: 5,
        description: "The drone's next 2 attacks deal triple damage.",
        effects: &[Effect::OverclockDrone { charges: 2 }],
    },
    AbilitySpec {
        id: AbilityId::TargetingMatrix,
        name: "Targeting Matrix",
        archetype: Archetype::Techie,
        cost: 30,
        cooldown: 4,
        price: 350,
        required_level: 6,
        description: "Raises drone crit chance by 25%.",
        effects: &[Effect::SharpenDrone { crit_chance: 0.25 }],
    },
    AbilitySpec {
        id: AbilityId::AutoMedkit,
        name: "Auto-Medkit",
        archetype: Archetype::Techie,
        cost: 40,
        cooldown: 5,
        price: 400,
        required_level: 7,
        description: "Heals 8% of max HP at the end of each of the next 3 rounds.",
        effects: &[Effect::HealOverTime {
            fraction: 0.08,
            rounds: 3,
        }],
    },
    AbilitySpec {
        id: AbilityId::HoloDecoy,
        name: "Holo Decoy",
        archetype: Archetype::Techie,
        cost: 50,
        cooldown: 4,
        price: 500,
        required_level: 9,
        description: "A hologram doubles the drone's attacks for 2 rounds.",
        effects: &[Effect::HoloDecoy { rounds: 2 }],
    },
    AbilitySpec {
        id: AbilityId::CriticalLoop,
        name: "Critical Loop",
        archetype: Archetype::Techie,
        cost: 45,
        cooldown: 6,
        price: 600,
        required_level: 11,
        description: "Drone crits trigger one bonus attack per round.",
        effects: &[Effect::CriticalLoop],
    },
    AbilitySpec {
        id: AbilityId::EmpBurst,
        name: "EMP Burst",
        archetype: Archetype::Techie,
        cost: 60,
        cooldown: 5,
        price: 700,
        required_level: 12,
        description: "Stuns the target for a round but knocks your drone offline too.",
        effects: &[
            Effect::Strike {
                multiplier: 1.0,
                crit_bonus: 0.0,
            },
            Effect::StunEnemy { rounds: 1 },
            Effect::DisableDrone { rounds: 1 },
        ],
    },
    AbilitySpec {
        id: AbilityId::OmegaDroneStrike,
        name: "Omega Drone Strike",
        archetype: Archetype::Techie,
        cost: 80,
        cooldown: 6,
        price: 1000,
        required_level: 15,
        description: "Calls in a strike that lands for 4x damage after 2 rounds.",
        effects: &[Effect::ArmDetonation {
            multiplier: 4.0,
            delay: 2,
        }],
    },
];

/// Every ability an archetype can learn, basic attack first.
pub fn catalog(archetype: Archetype) -> &'static [AbilitySpec] {
    match archetype {
        Archetype::Netrunner => &NETRUNNER_ABILITIES,
        Archetype::StreetSamurai => &SAMURAI_ABILITIES,
        Archetype::Techie => &TECHIE_ABILITIES,
    }
}

impl AbilityId {
    pub fn all() -> impl Iterator<Item = AbilityId> {
        Archetype::all()
            .into_iter()
            .flat_map(|a| catalog(a).iter().map(|spec| spec.id))
    }

    pub fn spec(self) -> &'static AbilitySpec {
        match self {
            AbilityId::DataSpike => &NETRUNNER_ABILITIES[0],
            AbilityId::TrojanSpike => &NETRUNNER_ABILITIES[1],
            AbilityId::EchoLoop => &NETRUNNER_ABILITIES[2],
            AbilityId::FirewallPatch => &NETRUNNER_ABILITIES[3],
            AbilityId::GlitchPulse => &NETRUNNER_ABILITIES[4],
            AbilityId::StatHijack => &NETRUNNER_ABILITIES[5],
            AbilityId::OverloadAttack => &NETRUNNER_ABILITIES[6],
            AbilityId::SystemCrash => &NETRUNNER_ABILITIES[7],
            AbilityId::OmegaDataStrike => &NETRUNNER_ABILITIES[8],
            AbilityId::BladeStrike => &SAMURAI_ABILITIES[0],
            AbilityId::Bloodbath => &SAMURAI_ABILITIES[1],
            AbilityId::LastStand => &SAMURAI_ABILITIES[2],
            AbilityId::PerfectFocus => &SAMURAI_ABILITIES[3],
            AbilityId::Heartpiercer => &SAMURAI_ABILITIES[4],
            AbilityId::GhostStep => &SAMURAI_ABILITIES[5],
            AbilityId::UnrelentingAssault => &SAMURAI_ABILITIES[6],
            AbilityId::OmegaBladeStrike => &SAMURAI_ABILITIES[7],
            AbilityId::ShockBaton => &TECHIE_ABILITIES[0],
            AbilityId::DroneBoost => &TECHIE_ABILITIES[1],
            AbilityId::GuardMode => &TECHIE_ABILITIES[2],
            AbilityId::Overclock => &TECHIE_ABILITIES[3],
            AbilityId::TargetingMatrix => &TECHIE_ABILITIES[4],
            AbilityId::AutoMedkit => &TECHIE_ABILITIES[5],
            AbilityId::HoloDecoy => &TECHIE_ABILITIES[6],
            AbilityId::CriticalLoop => &TECHIE_ABILITIES[7],
            AbilityId::EmpBurst => &TECHIE_ABILITIES[8],
            AbilityId::OmegaDroneStrike => &TECHIE_ABILITIES[9],
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ability the player has learned, with its own cooldown counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedAbility {
    pub id: AbilityId,
    pub cooldown_remaining: u32,
}

impl OwnedAbility {
    pub fn new(id: AbilityId) -> Self {
        Self {
            id,
            cooldown_remaining: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }
}
