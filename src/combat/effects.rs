//! Resolution of ability [`Effect`] commands against a battle.

use super::ability::{AbilityId, Effect};
use super::battle::BattleState;
use super::events::{BattleEvent, DamageSource, Side};
use super::status::{StatusEffect, StatusKind};
use crate::character::Combatant;
use crate::core::combat_math::{crit_chance, hit_damage, resolve_attack, scale_damage};
use rand::Rng;

/// Apply one effect of `ability` to the battle, appending events.
pub fn apply_effect(
    battle: &mut BattleState,
    ability: AbilityId,
    effect: &Effect,
    rng: &mut impl Rng,
    events: &mut Vec<BattleEvent>,
) {
    let source = DamageSource::Ability(ability);

    match *effect {
        Effect::Strike {
            multiplier,
            crit_bonus,
        } => {
            strike(battle, source, multiplier, crit_bonus, true, rng, events);
        }
        Effect::RampingStrike { start, step, cap } => {
            let multiplier = battle
                .status
                .get(StatusKind::TrojanSpike)
                .map_or(start, |e| e.magnitude);
            strike(battle, source, multiplier, 0.0, true, rng, events);
            battle.status.apply(StatusEffect::lasting(
                StatusKind::TrojanSpike,
                (multiplier + step).min(cap),
            ));
        }
        Effect::LeadScaledStrike {
            multiplier,
            bonus_per_step,
        } => {
            let steps = lead_steps(battle);
            let multiplier = multiplier * (1.0 + bonus_per_step * steps as f64);
            strike(battle, source, multiplier, 0.0, true, rng, events);
        }
        Effect::ShredDefense { fraction } => {
            let stacks = battle
                .status
                .get(StatusKind::DefenseShred)
                .map_or(0, |e| e.stacks)
                + 1;
            battle.status.apply(StatusEffect {
                kind: StatusKind::DefenseShred,
                remaining: None,
                magnitude: fraction,
                stacks,
            });
            if stacks == 1 {
                applied(events, StatusKind::DefenseShred, None);
            }
        }
        Effect::WeakenDefense { fraction, rounds } => {
            let amount = (battle.enemy.stats.def as f64 * fraction).round();
            apply_timed(battle, StatusKind::Heartpiercer, rounds, amount, events);
        }
        Effect::HijackAttack { fraction, rounds } => {
            let amount = (battle.enemy.stats.atk as f64 * fraction).round();
            apply_timed(battle, StatusKind::StatHijack, rounds, amount, events);
        }
        Effect::ExposeSelf { fraction, rounds } => {
            let amount = (battle.player.stats().def as f64 * fraction).round();
            apply_timed(battle, StatusKind::LastStand, rounds, amount, events);
        }
        Effect::StunSelf { rounds } => stun(battle, StatusKind::PlayerStun, rounds, events),
        Effect::StunEnemy { rounds } => stun(battle, StatusKind::EnemyStun, rounds, events),
        Effect::Residual {
            atk_factor,
            max_hp_fraction,
            rounds,
        } => {
            let per_round = (battle.player_atk() as f64 * atk_factor
                + battle.enemy.max_hp() as f64 * max_hp_fraction)
                .round();
            apply_timed(battle, StatusKind::GlitchPulse, rounds, per_round, events);
        }
        Effect::ArmDetonation { multiplier, delay } => {
            apply_timed(battle, StatusKind::OmegaStrike, delay, multiplier, events);
        }
        Effect::Echo => {
            battle
                .status
                .apply(StatusEffect::lasting(StatusKind::EchoLoop, 0.0));
            applied(events, StatusKind::EchoLoop, None);
        }
        Effect::Heal { fraction } => {
            let amount = (battle.player.max_hp() as f64 * fraction).round() as u32;
            let healed = battle.player.restore_hp(amount);
            events.push(BattleEvent::Heal {
                target: Side::Player,
                amount: healed,
            });
        }
        Effect::HealOverTime { fraction, rounds } => {
            apply_timed(battle, StatusKind::AutoMedkit, rounds, fraction, events);
        }
        Effect::Guard { turns } => {
            apply_timed(battle, StatusKind::GuardMode, turns, 0.0, events);
        }
        Effect::GhostStep => {
            battle
                .status
                .apply(StatusEffect::lasting(StatusKind::GhostStep, 0.0));
            applied(events, StatusKind::GhostStep, None);
        }
        Effect::Ramp { fraction } => {
            if !battle.status.is_active(StatusKind::UnrelentingAssault) {
                let step = (battle.player.stats().atk as f64 * fraction).round().max(1.0);
                battle
                    .status
                    .apply(StatusEffect::lasting(StatusKind::UnrelentingAssault, step));
                applied(events, StatusKind::UnrelentingAssault, None);
            }
        }
        Effect::Focus { crit_bonus } => {
            battle
                .status
                .apply(StatusEffect::lasting(StatusKind::PerfectFocus, crit_bonus));
            applied(events, StatusKind::PerfectFocus, None);
        }
        Effect::BoostDrone { factor } => {
            if let Some(drone) = battle.companion.as_mut() {
                drone.boost(factor);
            }
        }
        Effect::OverclockDrone { charges } => {
            if let Some(drone) = battle.companion.as_mut() {
                drone.overclock_charges += charges;
            }
        }
        Effect::SharpenDrone { crit_chance } => {
            if let Some(drone) = battle.companion.as_mut() {
                drone.crit_chance += crit_chance;
            }
        }
        Effect::CriticalLoop => {
            if let Some(drone) = battle.companion.as_mut() {
                drone.critical_loop = true;
            }
        }
        Effect::HoloDecoy { rounds } => {
            if let Some(drone) = battle.companion.as_mut() {
                drone.holo_decoy_rounds = drone.holo_decoy_rounds.max(rounds);
            }
        }
        Effect::DisableDrone { rounds } => {
            if let Some(drone) = battle.companion.as_mut() {
                drone.disabled_turns += rounds;
                events.push(BattleEvent::DroneOffline {
                    turns_left: drone.disabled_turns,
                });
            }
        }
    }
}

/// Set off an armed Omega Strike.
pub fn detonate(
    battle: &mut BattleState,
    multiplier: f64,
    rng: &mut impl Rng,
    events: &mut Vec<BattleEvent>,
) {
    strike(
        battle,
        DamageSource::Status(StatusKind::OmegaStrike),
        multiplier,
        0.0,
        false,
        rng,
        events,
    );
}

/// One player hit on the enemy. Consumes Perfect Focus when `use_focus` is set.
fn strike(
    battle: &mut BattleState,
    source: DamageSource,
    multiplier: f64,
    crit_bonus: f64,
    use_focus: bool,
    rng: &mut impl Rng,
    events: &mut Vec<BattleEvent>,
) {
    let base = hit_damage(battle.player_atk(), battle.enemy_def());
    let mut chance = crit_chance(battle.player.base_stats().spd) + crit_bonus;
    if use_focus {
        if let Some(focus) = battle.status.take(StatusKind::PerfectFocus) {
            chance += focus.magnitude;
            events.push(BattleEvent::StatusExpired {
                kind: StatusKind::PerfectFocus,
                target: Side::Player,
            });
        }
    }

    let hit = resolve_attack(scale_damage(base, multiplier), chance, rng);
    let dealt = battle.enemy.apply_damage(hit.damage);
    events.push(BattleEvent::Damage {
        target: Side::Enemy,
        amount: dealt,
        is_crit: hit.is_crit,
        source,
    });
}

/// Whole 10-point steps by which the player's HP percentage leads the enemy's.
fn lead_steps(battle: &BattleState) -> u32 {
    let percent = |hp: u32, max: u32| {
        if max == 0 {
            0.0
        } else {
            hp as f64 * 100.0 / max as f64
        }
    };
    let lead = percent(battle.player.hp(), battle.player.max_hp())
        - percent(battle.enemy.hp(), battle.enemy.max_hp());
    if lead <= 0.0 {
        0
    } else {
        (lead / 10.0).floor() as u32
    }
}

fn apply_timed(
    battle: &mut BattleState,
    kind: StatusKind,
    rounds: u32,
    magnitude: f64,
    events: &mut Vec<BattleEvent>,
) {
    battle
        .status
        .apply(StatusEffect::timed(kind, rounds, magnitude));
    applied(events, kind, Some(rounds));
}

fn stun(battle: &mut BattleState, kind: StatusKind, rounds: u32, events: &mut Vec<BattleEvent>) {
    battle.status.extend(kind, rounds);
    let remaining = battle.status.get(kind).and_then(|e| e.remaining);
    applied(events, kind, remaining);
}

fn applied(events: &mut Vec<BattleEvent>, kind: StatusKind, remaining: Option<u32>) {
    events.push(BattleEvent::StatusApplied {
        kind,
        target: kind.bearer(),
        remaining,
    });
}
