//! Status effect ledger.
//!
//! Every timed or one-shot battle modifier lives here as a tagged
//! [`StatusEffect`], at most one per [`StatusKind`]. Each kind is advanced by
//! exactly one phase of the round (see [`StatusKind::phase`]). Stat changes are
//! derived from the active entries, so dropping an entry undoes its change.

use super::events::Side;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    GlitchPulse,
    StatHijack,
    GuardMode,
    LastStand,
    Heartpiercer,
    DefenseShred,
    EnemyStun,
    PlayerStun,
    OmegaStrike,
    AutoMedkit,
    UnrelentingAssault,
    EchoLoop,
    GhostStep,
    PerfectFocus,
    TrojanSpike,
}

/// Which phase advances or consumes a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    /// Generic pass after the enemy acts.
    RoundEnd,
    /// Consumed when the enemy attacks.
    EnemyAction,
    /// Consumed when the player resolves an ability.
    PlayerAction,
    /// Consumed after energy regeneration.
    AfterRegen,
    /// Lasts the whole battle.
    Never,
}

/// What a round-end status does when the generic pass reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pulse {
    EveryRound,
    OnExpiry,
    Accumulate,
    Silent,
}

impl StatusKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::GlitchPulse => "Glitch Pulse",
            StatusKind::StatHijack => "Stat Hijack",
            StatusKind::GuardMode => "Guard Mode",
            StatusKind::LastStand => "Last Stand",
            StatusKind::Heartpiercer => "Heartpiercer",
            StatusKind::DefenseShred => "Defense Shred",
            StatusKind::EnemyStun => "Stunned",
            StatusKind::PlayerStun => "Stunned",
            StatusKind::OmegaStrike => "Omega Strike",
            StatusKind::AutoMedkit => "Auto-Medkit",
            StatusKind::UnrelentingAssault => "Unrelenting Assault",
            StatusKind::EchoLoop => "Echo Loop",
            StatusKind::GhostStep => "Ghost Step",
            StatusKind::PerfectFocus => "Perfect Focus",
            StatusKind::TrojanSpike => "Trojan Spike",
        }
    }

    pub fn phase(&self) -> TickPhase {
        match self {
            StatusKind::GlitchPulse
            | StatusKind::StatHijack
            | StatusKind::LastStand
            | StatusKind::Heartpiercer
            | StatusKind::OmegaStrike
            | StatusKind::AutoMedkit
            | StatusKind::UnrelentingAssault => TickPhase::RoundEnd,
            StatusKind::GuardMode | StatusKind::GhostStep | StatusKind::EnemyStun => {
                TickPhase::EnemyAction
            }
            StatusKind::EchoLoop | StatusKind::PerfectFocus => TickPhase::PlayerAction,
            StatusKind::PlayerStun => TickPhase::AfterRegen,
            StatusKind::DefenseShred | StatusKind::TrojanSpike => TickPhase::Never,
        }
    }

    /// The side the status sits on.
    pub fn bearer(&self) -> Side {
        match self {
            StatusKind::GlitchPulse
            | StatusKind::Heartpiercer
            | StatusKind::DefenseShred
            | StatusKind::EnemyStun
            | StatusKind::OmegaStrike => Side::Enemy,
            _ => Side::Player,
        }
    }

    fn pulse(&self) -> Pulse {
        match self {
            StatusKind::GlitchPulse | StatusKind::AutoMedkit => Pulse::EveryRound,
            StatusKind::OmegaStrike => Pulse::OnExpiry,
            StatusKind::UnrelentingAssault => Pulse::Accumulate,
            _ => Pulse::Silent,
        }
    }
}

/// One active status.
///
/// `magnitude` is kind-specific: damage per round, a heal fraction, a flat
/// stat amount, a crit bonus or a multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Rounds or turns left; `None` until consumed or the battle ends.
    pub remaining: Option<u32>,
    pub magnitude: f64,
    pub stacks: u32,
}

impl StatusEffect {
    pub fn timed(kind: StatusKind, rounds: u32, magnitude: f64) -> Self {
        Self {
            kind,
            remaining: Some(rounds),
            magnitude,
            stacks: 0,
        }
    }

    pub fn lasting(kind: StatusKind, magnitude: f64) -> Self {
        Self {
            kind,
            remaining: None,
            magnitude,
            stacks: 0,
        }
    }
}

/// Output of the round-end pass, in ledger order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusTick {
    /// The status does its per-round (or final) work with this snapshot.
    Fired(StatusEffect),
    Expired(StatusKind),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusLedger {
    effects: Vec<StatusEffect>,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub(crate) fn get_mut(&mut self, kind: StatusKind) -> Option<&mut StatusEffect> {
        self.effects.iter_mut().find(|e| e.kind == kind)
    }

    pub fn is_active(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Insert a status, replacing any entry of the same kind.
    pub fn apply(&mut self, effect: StatusEffect) {
        match self.get_mut(effect.kind) {
            Some(existing) => *existing = effect,
            None => self.effects.push(effect),
        }
    }

    /// Add turns to a timed status, creating it if absent.
    pub fn extend(&mut self, kind: StatusKind, turns: u32) {
        match self.get_mut(kind) {
            Some(existing) => {
                existing.remaining = Some(existing.remaining.unwrap_or(0) + turns);
            }
            None => self.effects.push(StatusEffect::timed(kind, turns, 0.0)),
        }
    }

    /// Remove a status outright, returning it.
    pub fn take(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    /// Spend one turn of a timed status. The entry is dropped when it reaches zero.
    ///
    /// # Returns
    /// The status after the decrement, or `None` if it was not active.
    pub fn decrement(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        let effect = &mut self.effects[index];
        if let Some(remaining) = effect.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        let snapshot = *effect;
        if snapshot.remaining == Some(0) {
            self.effects.remove(index);
        }
        Some(snapshot)
    }

    /// Advance every round-end status exactly once.
    pub fn tick_round_end(&mut self) -> Vec<StatusTick> {
        let mut ticks = Vec::new();

        for effect in self
            .effects
            .iter_mut()
            .filter(|e| e.kind.phase() == TickPhase::RoundEnd)
        {
            let pulse = effect.kind.pulse();
            if pulse == Pulse::Accumulate {
                effect.stacks += 1;
            }
            if let Some(remaining) = effect.remaining.as_mut() {
                *remaining = remaining.saturating_sub(1);
            }
            let expired = effect.remaining == Some(0);

            match pulse {
                Pulse::EveryRound | Pulse::Accumulate => ticks.push(StatusTick::Fired(*effect)),
                Pulse::OnExpiry if expired => ticks.push(StatusTick::Fired(*effect)),
                Pulse::OnExpiry | Pulse::Silent => {}
            }
            if expired {
                ticks.push(StatusTick::Expired(effect.kind));
            }
        }

        self.effects.retain(|e| e.remaining != Some(0));
        ticks
    }

    /// Flat ATK change for `side` from hijacks and ramps.
    pub fn attack_delta(&self, side: Side) -> i64 {
        let hijack = self
            .get(StatusKind::StatHijack)
            .map_or(0, |e| e.magnitude as i64);
        match side {
            Side::Player => {
                let ramp = self
                    .get(StatusKind::UnrelentingAssault)
                    .map_or(0, |e| (e.magnitude * e.stacks as f64).round() as i64);
                hijack + ramp
            }
            Side::Enemy => -hijack,
        }
    }

    /// Flat DEF change for `side`, given its unmodified DEF.
    pub fn defense_delta(&self, side: Side, base_def: u32) -> i64 {
        match side {
            Side::Player => -self
                .get(StatusKind::LastStand)
                .map_or(0, |e| e.magnitude as i64),
            Side::Enemy => {
                // Shredding never takes DEF below 1.
                let shred = self.get(StatusKind::DefenseShred).map_or(0, |e| {
                    let kept = base_def as f64 * (1.0 - e.magnitude).powi(e.stacks as i32);
                    base_def as i64 - (kept.round() as i64).max(base_def.min(1) as i64)
                });
                let pierce = self
                    .get(StatusKind::Heartpiercer)
                    .map_or(0, |e| e.magnitude as i64);
                -(shred + pierce)
            }
        }
    }
}
