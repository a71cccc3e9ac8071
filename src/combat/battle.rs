//! Turn resolution state machine.
//!
//! A round runs `PlayerChoosing -> (player acts) -> CompanionTick ->
//! EnemyTelegraph -> EnemyActing -> StatusResolution -> CooldownTick`, then
//! back to `PlayerChoosing`. A stunned player instead sits through one extra
//! enemy cycle (`Stunned*` phases). The end check runs after every step that
//! can change HP; once a result is set the machine is `Finished`.
//!
//! The player's decision enters through [`BattleState::choose_ability`]; every
//! other phase advances one at a time through [`BattleState::step`], so a
//! renderer can pace the battle and abandon it between steps.

use super::ability::AbilityId;
use super::companion::{CompanionState, CompanionTick};
use super::effects;
use super::enemy::{generate_enemy, Enemy, EnemyTemplate};
use super::events::{BattleEvent, BattleResult, DamageSource, Side};
use super::offer::{AbilityOffer, OfferQueue};
use super::status::{StatusKind, StatusLedger, StatusTick};
use crate::character::{Combatant, Player};
use crate::core::combat_math::{
    apply_delta, crit_chance, hit_damage, regen_energy, resolve_attack, scale_damage,
};
use crate::core::constants::*;
use crate::core::error::ActionError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting on `choose_ability`.
    PlayerChoosing,
    CompanionTick,
    EnemyTelegraph,
    EnemyActing,
    StatusResolution,
    /// Cooldowns and energy regeneration, then the player stun check.
    CooldownTick,
    StunnedTelegraph,
    StunnedEnemyActing,
    StunnedCompanionTick,
    Finished,
}

/// Outcome applied to the player when a battle is settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// `None` when the battle was left unfinished.
    pub result: Option<BattleResult>,
    pub enemy: String,
    pub was_boss: bool,
    pub rounds: u32,
    pub gold_gained: u64,
    pub gold_lost: u64,
    pub exp_gained: u64,
    pub levels_gained: u32,
}

/// Everything one battle needs. Owns the player for its duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub(crate) player: Player,
    pub(crate) enemy: Enemy,
    pub(crate) turn: Turn,
    pub(crate) phase: Phase,
    pub(crate) player_energy: u32,
    pub(crate) enemy_energy: u32,
    pub(crate) status: StatusLedger,
    pub(crate) companion: Option<CompanionState>,
    pub(crate) queue: OfferQueue,
    pub(crate) offer: AbilityOffer,
    /// Set by the telegraph when the enemy will spend a full bar.
    pub(crate) charged_strike: bool,
    pub(crate) round: u32,
    pub(crate) battle_started: bool,
    pub(crate) result: Option<BattleResult>,
}

/// Generate an enemy from `template` and open a battle against it.
pub fn start_battle(
    player: Player,
    template: &EnemyTemplate,
    is_boss: bool,
    rng: &mut impl Rng,
) -> BattleState {
    let enemy = generate_enemy(
        template,
        player.level(),
        player.archetype.starting_stat_total(),
        is_boss,
        rng,
    );
    BattleState::new(player, enemy, rng)
}

impl BattleState {
    /// Open a battle against a prepared enemy. The player is healed to full
    /// and every cooldown is cleared.
    pub fn new(mut player: Player, enemy: Enemy, rng: &mut impl Rng) -> Self {
        player.prepare_for_battle();
        let companion = player
            .archetype
            .has_drone()
            .then(|| CompanionState::new(player.stats().atk));
        let queue = OfferQueue::shuffled(player.loadout(), rng);

        info!(
            player = %player.name,
            archetype = %player.archetype,
            enemy = %enemy.name,
            enemy_level = enemy.level,
            boss = enemy.is_boss,
            "battle started"
        );

        let mut battle = Self {
            player,
            enemy,
            turn: Turn::Player,
            phase: Phase::PlayerChoosing,
            player_energy: STARTING_ENERGY,
            enemy_energy: STARTING_ENERGY,
            status: StatusLedger::new(),
            companion,
            queue,
            offer: AbilityOffer::empty(),
            charged_strike: false,
            round: 1,
            battle_started: true,
            result: None,
        };
        battle.refresh_offer();
        battle
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_energy(&self) -> u32 {
        self.player_energy
    }

    pub fn enemy_energy(&self) -> u32 {
        self.enemy_energy
    }

    pub fn status(&self) -> &StatusLedger {
        &self.status
    }

    pub fn companion(&self) -> Option<&CompanionState> {
        self.companion.as_ref()
    }

    pub fn offer(&self) -> &AbilityOffer {
        &self.offer
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn battle_started(&self) -> bool {
        self.battle_started
    }

    pub fn result(&self) -> Option<BattleResult> {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Player ATK with hijacks and ramps applied.
    pub fn player_atk(&self) -> u32 {
        apply_delta(
            self.player.stats().atk,
            self.status.attack_delta(Side::Player),
        )
    }

    /// Player DEF with Last Stand applied.
    pub fn player_def(&self) -> u32 {
        let def = self.player.stats().def;
        apply_delta(def, self.status.defense_delta(Side::Player, def))
    }

    pub fn enemy_atk(&self) -> u32 {
        apply_delta(self.enemy.stats.atk, self.status.attack_delta(Side::Enemy))
    }

    /// Enemy DEF after shreds and Heartpiercer.
    pub fn enemy_def(&self) -> u32 {
        let def = self.enemy.stats.def;
        apply_delta(def, self.status.defense_delta(Side::Enemy, def))
    }

    /// Real-time hook for presentation layers. Battles are purely turn driven.
    pub fn tick(&mut self, elapsed: Duration) {
        trace!(elapsed_ms = elapsed.as_millis() as u64, "battle tick ignored");
    }

    /// Resolve the player's action for this round.
    ///
    /// Checks, in order: battle over, whose turn it is, offer membership,
    /// cooldown, energy. A rejected action changes nothing.
    pub fn choose_ability(
        &mut self,
        id: AbilityId,
        rng: &mut impl Rng,
    ) -> Result<Vec<BattleEvent>, ActionError> {
        if self.result.is_some() {
            return Err(ActionError::BattleOver);
        }
        if self.phase != Phase::PlayerChoosing || self.turn != Turn::Player {
            return Err(ActionError::NotPlayersTurn);
        }
        if !self.offer.contains(id) {
            return Err(ActionError::NotOffered(id));
        }
        let remaining = self.player.cooldown_remaining(id).unwrap_or(0);
        if remaining > 0 {
            return Err(ActionError::OnCooldown {
                ability: id,
                remaining,
            });
        }
        let spec = id.spec();
        if spec.cost > self.player_energy {
            return Err(ActionError::InsufficientEnergy {
                ability: id,
                cost: spec.cost,
                available: self.player_energy,
            });
        }

        let mut events = Vec::new();
        self.player_energy -= spec.cost;
        self.player.start_cooldown(id);
        debug!(ability = spec.name, cost = spec.cost, round = self.round, "ability used");
        events.push(BattleEvent::AbilityUsed {
            ability: id,
            cost: spec.cost,
            echoed: false,
        });
        self.run_effects(id, rng, &mut events);

        if !spec.arms_echo() && self.status.take(StatusKind::EchoLoop).is_some() {
            debug!(ability = spec.name, "echo loop repeats ability");
            events.push(BattleEvent::AbilityUsed {
                ability: id,
                cost: 0,
                echoed: true,
            });
            self.run_effects(id, rng, &mut events);
            events.push(BattleEvent::StatusExpired {
                kind: StatusKind::EchoLoop,
                target: Side::Player,
            });
        }

        events.push(self.energy_event());
        self.turn = Turn::Enemy;
        self.phase = Phase::CompanionTick;
        self.end_check(&mut events);
        Ok(events)
    }

    /// Advance one phase. Does nothing while waiting on the player or once
    /// the battle is finished.
    pub fn step(&mut self, rng: &mut impl Rng) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        let phase = self.phase;
        match phase {
            Phase::PlayerChoosing | Phase::Finished => return events,
            Phase::CompanionTick => {
                self.companion_tick(rng, &mut events);
                self.phase = Phase::EnemyTelegraph;
            }
            Phase::EnemyTelegraph => {
                self.telegraph(&mut events);
                self.phase = Phase::EnemyActing;
            }
            Phase::EnemyActing => {
                self.enemy_attack(rng, &mut events);
                self.phase = Phase::StatusResolution;
            }
            Phase::StatusResolution => {
                self.resolve_statuses(rng, &mut events);
                self.phase = Phase::CooldownTick;
            }
            Phase::CooldownTick => {
                self.cooldown_tick(&mut events);
                if let Some(stun) = self.status.decrement(StatusKind::PlayerStun) {
                    debug!(round = self.round, "player stunned, enemy acts again");
                    events.push(BattleEvent::TurnSkipped { side: Side::Player });
                    if stun.remaining == Some(0) {
                        events.push(BattleEvent::StatusExpired {
                            kind: StatusKind::PlayerStun,
                            target: Side::Player,
                        });
                    }
                    self.phase = Phase::StunnedTelegraph;
                } else {
                    self.begin_player_turn();
                }
            }
            Phase::StunnedTelegraph => {
                self.telegraph(&mut events);
                self.phase = Phase::StunnedEnemyActing;
            }
            Phase::StunnedEnemyActing => {
                self.enemy_attack(rng, &mut events);
                self.phase = Phase::StunnedCompanionTick;
            }
            Phase::StunnedCompanionTick => {
                self.companion_tick(rng, &mut events);
                self.begin_player_turn();
            }
        }
        debug!(from = ?phase, to = ?self.phase, "phase advanced");
        self.end_check(&mut events);
        events
    }

    /// Step until the player must choose again or the battle ends.
    pub fn resolve_round(&mut self, rng: &mut impl Rng) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        while !matches!(self.phase, Phase::PlayerChoosing | Phase::Finished) {
            events.extend(self.step(rng));
        }
        events
    }

    /// Choose an ability and resolve the rest of the round.
    pub fn play_turn(
        &mut self,
        id: AbilityId,
        rng: &mut impl Rng,
    ) -> Result<Vec<BattleEvent>, ActionError> {
        let mut events = self.choose_ability(id, rng)?;
        events.extend(self.resolve_round(rng));
        Ok(events)
    }

    /// Hand the player back with the outcome applied.
    ///
    /// Win pays the enemy's gold and experience. Losing to a boss costs 20%
    /// of the player's gold. Anything else leaves the player unchanged.
    pub fn settle(self) -> (Player, Settlement) {
        let mut player = self.player;
        let mut settlement = Settlement {
            result: self.result,
            enemy: self.enemy.name.clone(),
            was_boss: self.enemy.is_boss,
            rounds: self.round,
            gold_gained: 0,
            gold_lost: 0,
            exp_gained: 0,
            levels_gained: 0,
        };

        match self.result {
            Some(BattleResult::Win) => {
                player.add_gold(self.enemy.gold);
                settlement.gold_gained = self.enemy.gold;
                settlement.exp_gained = self.enemy.exp;
                settlement.levels_gained = player.gain_exp(self.enemy.exp);
            }
            Some(BattleResult::Lose) if self.enemy.is_boss => {
                settlement.gold_lost = player.lose_gold_fraction(BOSS_LOSS_GOLD_PENALTY);
            }
            Some(BattleResult::Lose) | None => {}
        }

        info!(
            result = ?settlement.result,
            enemy = %settlement.enemy,
            rounds = settlement.rounds,
            gold_gained = settlement.gold_gained,
            gold_lost = settlement.gold_lost,
            exp = settlement.exp_gained,
            "battle settled"
        );
        (player, settlement)
    }

    /// Leave the battle without a result. The player keeps everything.
    pub fn abandon(self) -> Player {
        info!(enemy = %self.enemy.name, round = self.round, "battle abandoned");
        self.player
    }

    fn run_effects(&mut self, id: AbilityId, rng: &mut impl Rng, events: &mut Vec<BattleEvent>) {
        for effect in id.spec().effects {
            effects::apply_effect(self, id, effect, rng, events);
        }
    }

    fn refresh_offer(&mut self) {
        let player = &self.player;
        let basic = player.archetype.basic_ability();
        self.offer = self
            .queue
            .next_offer(basic, |id| player.is_ready(id));
    }

    fn begin_player_turn(&mut self) {
        self.round += 1;
        self.turn = Turn::Player;
        self.phase = Phase::PlayerChoosing;
        self.refresh_offer();
    }

    fn energy_event(&self) -> BattleEvent {
        BattleEvent::EnergyChanged {
            player: self.player_energy,
            enemy: self.enemy_energy,
        }
    }

    fn companion_tick(&mut self, rng: &mut impl Rng, events: &mut Vec<BattleEvent>) {
        let Some(drone) = self.companion.as_mut() else {
            return;
        };
        match drone.tick(rng) {
            CompanionTick::Offline { turns_left } => {
                events.push(BattleEvent::DroneOffline { turns_left });
            }
            CompanionTick::Attacked(strikes) => {
                for strike in strikes {
                    let dealt = self.enemy.apply_damage(strike.damage);
                    events.push(BattleEvent::Damage {
                        target: Side::Enemy,
                        amount: dealt,
                        is_crit: strike.is_crit,
                        source: DamageSource::Drone,
                    });
                }
            }
        }
    }

    fn telegraph(&mut self, events: &mut Vec<BattleEvent>) {
        let stunned = self.status.is_active(StatusKind::EnemyStun);
        self.charged_strike = !stunned && self.enemy_energy >= ENERGY_MAX;
        events.push(BattleEvent::EnemyTelegraph {
            charged: self.charged_strike,
        });
    }

    fn enemy_attack(&mut self, rng: &mut impl Rng, events: &mut Vec<BattleEvent>) {
        let charged = std::mem::take(&mut self.charged_strike);

        if let Some(stun) = self.status.decrement(StatusKind::EnemyStun) {
            debug!(enemy = %self.enemy.name, "enemy stunned");
            events.push(BattleEvent::TurnSkipped { side: Side::Enemy });
            if stun.remaining == Some(0) {
                events.push(BattleEvent::StatusExpired {
                    kind: StatusKind::EnemyStun,
                    target: Side::Enemy,
                });
            }
            return;
        }

        let mut damage = hit_damage(self.enemy_atk(), self.player_def());
        if charged {
            self.enemy_energy = 0;
            damage = scale_damage(damage, CHARGED_STRIKE_MULTIPLIER);
            events.push(self.energy_event());
        }
        let hit = resolve_attack(damage, crit_chance(self.enemy.stats.spd), rng);
        let mut damage = hit.damage;

        let negated = self.status.take(StatusKind::GhostStep).is_some();
        if negated {
            damage = 0;
            events.push(BattleEvent::AttackNegated);
            events.push(BattleEvent::StatusExpired {
                kind: StatusKind::GhostStep,
                target: Side::Player,
            });
        }
        if let Some(guard) = self.status.decrement(StatusKind::GuardMode) {
            if damage > 0 {
                damage = (damage / 2).max(MIN_DAMAGE);
            }
            if guard.remaining == Some(0) {
                events.push(BattleEvent::StatusExpired {
                    kind: StatusKind::GuardMode,
                    target: Side::Player,
                });
            }
        }

        if !negated {
            let dealt = self.player.apply_damage(damage);
            events.push(BattleEvent::Damage {
                target: Side::Player,
                amount: dealt,
                is_crit: hit.is_crit,
                source: DamageSource::EnemyAttack,
            });
        }
    }

    fn resolve_statuses(&mut self, rng: &mut impl Rng, events: &mut Vec<BattleEvent>) {
        for tick in self.status.tick_round_end() {
            match tick {
                StatusTick::Fired(effect) => match effect.kind {
                    StatusKind::GlitchPulse => {
                        let amount = self.enemy.apply_damage(effect.magnitude.round() as u32);
                        events.push(BattleEvent::Damage {
                            target: Side::Enemy,
                            amount,
                            is_crit: false,
                            source: DamageSource::Status(StatusKind::GlitchPulse),
                        });
                    }
                    StatusKind::AutoMedkit => {
                        let amount =
                            (self.player.max_hp() as f64 * effect.magnitude).round() as u32;
                        let healed = self.player.restore_hp(amount);
                        events.push(BattleEvent::Heal {
                            target: Side::Player,
                            amount: healed,
                        });
                    }
                    StatusKind::OmegaStrike => {
                        effects::detonate(self, effect.magnitude, rng, events);
                    }
                    _ => {}
                },
                StatusTick::Expired(kind) => {
                    debug!(status = kind.name(), "status expired");
                    events.push(BattleEvent::StatusExpired {
                        kind,
                        target: kind.bearer(),
                    });
                }
            }
        }
    }

    fn cooldown_tick(&mut self, events: &mut Vec<BattleEvent>) {
        self.player.tick_cooldowns();
        self.player_energy = regen_energy(self.player_energy);
        self.enemy_energy = regen_energy(self.enemy_energy);
        events.push(self.energy_event());
    }

    fn end_check(&mut self, events: &mut Vec<BattleEvent>) {
        if self.result.is_some() {
            return;
        }
        let result = if !self.enemy.is_alive() {
            BattleResult::Win
        } else if !self.player.is_alive() {
            BattleResult::Lose
        } else {
            return;
        };

        self.result = Some(result);
        self.phase = Phase::Finished;
        info!(?result, round = self.round, enemy = %self.enemy.name, "battle ended");
        events.push(BattleEvent::BattleEnded { result });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Archetype, Stats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const PLAYER_STATS: Stats = Stats::new(120, 12, 4, 0);

    fn player(archetype: Archetype, extra: &[AbilityId]) -> Player {
        let mut player = Player::new("Tester", archetype);
        player.gain_exp(100_000);
        for &id in extra {
            player.buy_ability(id).unwrap();
        }
        player.with_base_stats(PLAYER_STATS)
    }

    fn battle(archetype: Archetype, extra: &[AbilityId], enemy: Stats) -> (BattleState, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let enemy = Enemy::new("Target", 1, enemy, 30, 40);
        let battle = BattleState::new(player(archetype, extra), enemy, &mut rng);
        (battle, rng)
    }

    fn enemy_hits(events: &[BattleEvent]) -> usize {
        events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    BattleEvent::Damage {
                        source: DamageSource::EnemyAttack,
                        ..
                    }
                )
            })
            .count()
    }

    #[test]
    fn test_battle_starts_waiting_on_player() {
        let (battle, _) = battle(Archetype::Netrunner, &[], Stats::new(100, 10, 6, 0));
        assert_eq!(battle.phase(), Phase::PlayerChoosing);
        assert_eq!(battle.turn(), Turn::Player);
        assert_eq!(battle.round(), 1);
        assert_eq!(battle.player_energy(), STARTING_ENERGY);
        assert!(battle.battle_started());
        assert!(battle.companion().is_none());
        assert!(battle.offer().contains(AbilityId::DataSpike));
        assert_eq!(battle.player().hp(), battle.player().max_hp());
    }

    #[test]
    fn test_basic_attack_damage() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(100, 10, 6, 0));
        let events = battle.choose_ability(AbilityId::DataSpike, &mut rng).unwrap();
        let dealt: Vec<u32> = events
            .iter()
            .filter_map(|e| e.damage_to(Side::Enemy))
            .collect();
        assert_eq!(dealt, vec![90]);
        assert_eq!(battle.enemy().hp(), 5000 - 90);
        assert_eq!(battle.phase(), Phase::CompanionTick);
        assert_eq!(battle.turn(), Turn::Enemy);
    }

    #[test]
    fn test_lethal_hit_wins_before_enemy_acts() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(1, 50, 6, 0));
        let events = battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();

        assert_eq!(battle.result(), Some(BattleResult::Win));
        assert_eq!(battle.phase(), Phase::Finished);
        assert_eq!(enemy_hits(&events), 0);
        assert_eq!(
            events.last(),
            Some(&BattleEvent::BattleEnded {
                result: BattleResult::Win
            })
        );
        assert!(battle.step(&mut rng).is_empty());
        assert_eq!(
            battle.choose_ability(AbilityId::DataSpike, &mut rng),
            Err(ActionError::BattleOver)
        );
    }

    #[test]
    fn test_boss_loss_costs_a_fifth_of_gold() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(1000, 1000, 6, 0));
        battle.enemy.is_boss = true;
        battle.player.add_gold(900);

        battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        assert_eq!(battle.result(), Some(BattleResult::Lose));

        let (player, settlement) = battle.settle();
        assert_eq!(player.gold(), 800);
        assert_eq!(settlement.gold_lost, 200);
        assert!(settlement.was_boss);
    }

    #[test]
    fn test_regular_loss_costs_nothing() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(1000, 1000, 6, 0));
        battle.player.add_gold(900);
        battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();

        let (player, settlement) = battle.settle();
        assert_eq!(settlement.result, Some(BattleResult::Lose));
        assert_eq!(player.gold(), 1000);
        assert_eq!(settlement.gold_lost, 0);
    }

    #[test]
    fn test_win_pays_gold_and_exp() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(1, 50, 6, 0));
        let gold_before = battle.player().gold();
        battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();

        let (player, settlement) = battle.settle();
        assert_eq!(player.gold(), gold_before + 30);
        assert_eq!(settlement.gold_gained, 30);
        assert_eq!(settlement.exp_gained, 40);
    }

    #[test]
    fn test_abandon_keeps_player_unchanged() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(100, 10, 6, 0));
        let gold = battle.player().gold();
        battle.choose_ability(AbilityId::DataSpike, &mut rng).unwrap();
        battle.step(&mut rng);

        let player = battle.abandon();
        assert_eq!(player.gold(), gold);
    }

    #[test]
    fn test_self_stun_gives_enemy_two_attacks() {
        let (mut battle, mut rng) = battle(
            Archetype::Netrunner,
            &[AbilityId::OverloadAttack],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = 60;
        assert!(battle.offer().contains(AbilityId::OverloadAttack));

        let events = battle.play_turn(AbilityId::OverloadAttack, &mut rng).unwrap();
        assert_eq!(enemy_hits(&events), 2);
        assert!(events.contains(&BattleEvent::TurnSkipped { side: Side::Player }));
        assert_eq!(battle.phase(), Phase::PlayerChoosing);
        assert_eq!(battle.player_energy(), 25);
        assert!(!battle.status().is_active(StatusKind::PlayerStun));

        let events = battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        assert_eq!(enemy_hits(&events), 1);
    }

    #[test]
    fn test_insufficient_energy_changes_nothing() {
        let (mut battle, mut rng) = battle(
            Archetype::Netrunner,
            &[AbilityId::EchoLoop],
            Stats::new(100, 10, 6, 0),
        );
        battle.player_energy = 10;
        let before = battle.clone();

        assert_eq!(
            battle.choose_ability(AbilityId::EchoLoop, &mut rng),
            Err(ActionError::InsufficientEnergy {
                ability: AbilityId::EchoLoop,
                cost: 50,
                available: 10
            })
        );
        assert_eq!(battle, before);
    }

    #[test]
    fn test_rejects_unoffered_and_out_of_turn() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(100, 10, 6, 0));
        assert_eq!(
            battle.choose_ability(AbilityId::SystemCrash, &mut rng),
            Err(ActionError::NotOffered(AbilityId::SystemCrash))
        );

        battle.choose_ability(AbilityId::DataSpike, &mut rng).unwrap();
        assert_eq!(
            battle.choose_ability(AbilityId::DataSpike, &mut rng),
            Err(ActionError::NotPlayersTurn)
        );
    }

    #[test]
    fn test_cooldown_hides_ability_from_offer() {
        let (mut battle, mut rng) = battle(
            Archetype::Netrunner,
            &[AbilityId::TrojanSpike],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;

        battle.play_turn(AbilityId::TrojanSpike, &mut rng).unwrap();
        assert_eq!(battle.player().cooldown_remaining(AbilityId::TrojanSpike), Some(1));
        assert!(!battle.offer().contains(AbilityId::TrojanSpike));

        battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        assert_eq!(battle.player().cooldown_remaining(AbilityId::TrojanSpike), Some(0));
        assert!(battle.offer().contains(AbilityId::TrojanSpike));
    }

    #[test]
    fn test_stat_hijack_reverses_after_three_rounds() {
        let (mut battle, mut rng) = battle(
            Archetype::Netrunner,
            &[AbilityId::StatHijack],
            Stats::new(1000, 40, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;

        battle.play_turn(AbilityId::StatHijack, &mut rng).unwrap();
        assert_eq!(battle.player_atk(), 18);
        assert_eq!(battle.enemy_atk(), 34);

        battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        assert_eq!(battle.player_atk(), 12);
        assert_eq!(battle.enemy_atk(), 40);
        assert!(!battle.status().is_active(StatusKind::StatHijack));
    }

    #[test]
    fn test_overkill_reports_hp_actually_removed() {
        let (mut weak_enemy, mut rng) =
            battle(Archetype::Netrunner, &[], Stats::new(1, 10, 6, 0));
        let events = weak_enemy.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        let dealt: Vec<u32> = events
            .iter()
            .filter_map(|e| e.damage_to(Side::Enemy))
            .collect();
        assert_eq!(dealt, vec![50], "a 90 hit on 50 HP removes 50");

        let (mut brute, mut rng) =
            battle(Archetype::Netrunner, &[], Stats::new(1000, 1000, 6, 0));
        let events = brute.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        let taken: Vec<u32> = events
            .iter()
            .filter_map(|e| e.damage_to(Side::Player))
            .collect();
        assert_eq!(taken, vec![6000]);
        assert_eq!(brute.result(), Some(BattleResult::Lose));
    }

    #[test]
    fn test_last_stand_def_drop_lasts_one_round() {
        let (mut battle, mut rng) = battle(
            Archetype::StreetSamurai,
            &[AbilityId::LastStand],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;

        // DEF 4 -> 3 for the enemy's attack: 100 - 15
        let events = battle.play_turn(AbilityId::LastStand, &mut rng).unwrap();
        assert!(events.iter().any(|e| e.damage_to(Side::Player) == Some(85)));
        assert!(events.contains(&BattleEvent::StatusExpired {
            kind: StatusKind::LastStand,
            target: Side::Player,
        }));
        assert!(!battle.status().is_active(StatusKind::LastStand));
        assert_eq!(battle.player_def(), 4);

        let events = battle.play_turn(AbilityId::BladeStrike, &mut rng).unwrap();
        assert!(events.iter().any(|e| e.damage_to(Side::Player) == Some(80)));
    }

    #[test]
    fn test_heartpiercer_def_cut_reverses_after_two_rounds() {
        let (mut battle, mut rng) = battle(
            Archetype::StreetSamurai,
            &[AbilityId::Heartpiercer],
            Stats::new(1000, 10, 10, 0),
        );
        battle.player_energy = ENERGY_MAX;

        // The strike lands before the cut: round((120 - 50) * 1.5)
        let events = battle.play_turn(AbilityId::Heartpiercer, &mut rng).unwrap();
        assert_eq!(events.iter().find_map(|e| e.damage_to(Side::Enemy)), Some(105));
        assert_eq!(battle.enemy_def(), 7);

        battle.play_turn(AbilityId::BladeStrike, &mut rng).unwrap();
        assert_eq!(battle.enemy_def(), 10);
        assert!(!battle.status().is_active(StatusKind::Heartpiercer));
    }

    #[test]
    fn test_auto_medkit_heals_each_round_end() {
        let (mut battle, mut rng) = battle(
            Archetype::Techie,
            &[AbilityId::AutoMedkit],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;
        battle.player.apply_damage(2000);
        let heal = BattleEvent::Heal {
            target: Side::Player,
            amount: 480,
        };

        let events = battle.play_turn(AbilityId::AutoMedkit, &mut rng).unwrap();
        assert!(events.contains(&heal));
        assert_eq!(battle.player().hp(), 6000 - 2000 - 80 + 480);

        for _ in 0..2 {
            let events = battle.play_turn(AbilityId::ShockBaton, &mut rng).unwrap();
            assert!(events.contains(&heal));
        }
        assert!(!battle.status().is_active(StatusKind::AutoMedkit));

        let events = battle.play_turn(AbilityId::ShockBaton, &mut rng).unwrap();
        assert!(!events.iter().any(|e| matches!(e, BattleEvent::Heal { .. })));
    }

    #[test]
    fn test_unrelenting_assault_ramps_every_round() {
        let (mut battle, mut rng) = battle(
            Archetype::StreetSamurai,
            &[AbilityId::UnrelentingAssault],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;

        battle.play_turn(AbilityId::UnrelentingAssault, &mut rng).unwrap();
        assert_eq!(battle.player_atk(), 13);
        battle.play_turn(AbilityId::BladeStrike, &mut rng).unwrap();
        assert_eq!(battle.player_atk(), 14);
        battle.play_turn(AbilityId::BladeStrike, &mut rng).unwrap();
        assert_eq!(battle.player_atk(), 15);
        assert!(battle.status().is_active(StatusKind::UnrelentingAssault));
    }

    #[test]
    fn test_emp_burst_stuns_enemy_and_grounds_drone() {
        let (mut battle, mut rng) = battle(
            Archetype::Techie,
            &[AbilityId::EmpBurst],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;
        battle.companion.as_mut().unwrap().crit_chance = 0.0;
        let drone_hits = |events: &[BattleEvent]| {
            events
                .iter()
                .filter(|e| {
                    matches!(
                        e,
                        BattleEvent::Damage {
                            source: DamageSource::Drone,
                            ..
                        }
                    )
                })
                .count()
        };

        let events = battle.play_turn(AbilityId::EmpBurst, &mut rng).unwrap();
        assert_eq!(enemy_hits(&events), 0);
        assert!(events.contains(&BattleEvent::TurnSkipped { side: Side::Enemy }));
        assert_eq!(drone_hits(&events), 0);
        assert!(events.contains(&BattleEvent::DroneOffline { turns_left: 0 }));

        let events = battle.play_turn(AbilityId::ShockBaton, &mut rng).unwrap();
        assert_eq!(enemy_hits(&events), 1);
        assert_eq!(drone_hits(&events), 1);
    }

    #[test]
    fn test_enemy_damage_formula() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(1000, 10, 6, 0));
        let events = battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        let taken: Vec<u32> = events
            .iter()
            .filter_map(|e| e.damage_to(Side::Player))
            .collect();
        assert_eq!(taken, vec![80]);
        assert_eq!(battle.player().hp(), battle.player().max_hp() - 80);
    }

    #[test]
    fn test_enemy_stun_skips_attack() {
        let (mut battle, mut rng) = battle(
            Archetype::Netrunner,
            &[AbilityId::SystemCrash],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;

        let events = battle.play_turn(AbilityId::SystemCrash, &mut rng).unwrap();
        assert_eq!(enemy_hits(&events), 0);
        assert!(events.contains(&BattleEvent::TurnSkipped { side: Side::Enemy }));
        assert!(!battle.status().is_active(StatusKind::EnemyStun));
    }

    #[test]
    fn test_ghost_step_negates_one_hit() {
        let (mut battle, mut rng) = battle(
            Archetype::StreetSamurai,
            &[AbilityId::GhostStep],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;

        let events = battle.play_turn(AbilityId::GhostStep, &mut rng).unwrap();
        assert!(events.contains(&BattleEvent::AttackNegated));
        assert_eq!(enemy_hits(&events), 0);
        assert_eq!(battle.player().hp(), battle.player().max_hp());

        let events = battle.play_turn(AbilityId::BladeStrike, &mut rng).unwrap();
        assert_eq!(enemy_hits(&events), 1);
    }

    #[test]
    fn test_guard_mode_halves_for_two_attacks() {
        let (mut battle, mut rng) = battle(
            Archetype::Techie,
            &[AbilityId::GuardMode],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;

        let events = battle.play_turn(AbilityId::GuardMode, &mut rng).unwrap();
        assert!(events.iter().any(|e| e.damage_to(Side::Player) == Some(40)));
        let events = battle.play_turn(AbilityId::ShockBaton, &mut rng).unwrap();
        assert!(events.iter().any(|e| e.damage_to(Side::Player) == Some(40)));
        assert!(!battle.status().is_active(StatusKind::GuardMode));
        let events = battle.play_turn(AbilityId::ShockBaton, &mut rng).unwrap();
        assert!(events.iter().any(|e| e.damage_to(Side::Player) == Some(80)));
    }

    #[test]
    fn test_drone_attacks_once_per_round() {
        let (mut battle, mut rng) = battle(Archetype::Techie, &[], Stats::new(1000, 10, 6, 0));
        battle.companion.as_mut().unwrap().crit_chance = 0.0;

        let events = battle.play_turn(AbilityId::ShockBaton, &mut rng).unwrap();
        let drone_hits: Vec<&BattleEvent> = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    BattleEvent::Damage {
                        source: DamageSource::Drone,
                        ..
                    }
                )
            })
            .collect();
        assert_eq!(drone_hits.len(), 1);
        assert_eq!(drone_hits[0].damage_to(Side::Enemy), Some(48));
    }

    #[test]
    fn test_glitch_pulse_ticks_twice() {
        let (mut battle, mut rng) = battle(
            Archetype::Netrunner,
            &[AbilityId::GlitchPulse],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;

        let residual = |events: &[BattleEvent]| {
            events
                .iter()
                .filter(|e| {
                    matches!(
                        e,
                        BattleEvent::Damage {
                            source: DamageSource::Status(StatusKind::GlitchPulse),
                            ..
                        }
                    )
                })
                .count()
        };

        let first = battle.play_turn(AbilityId::GlitchPulse, &mut rng).unwrap();
        let second = battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        let third = battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        assert_eq!(residual(&first), 1);
        assert_eq!(residual(&second), 1);
        assert_eq!(residual(&third), 0);
    }

    #[test]
    fn test_echo_loop_repeats_next_ability() {
        let (mut battle, mut rng) = battle(
            Archetype::Netrunner,
            &[AbilityId::EchoLoop],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;

        battle.play_turn(AbilityId::EchoLoop, &mut rng).unwrap();
        assert!(battle.status().is_active(StatusKind::EchoLoop));

        let events = battle.choose_ability(AbilityId::DataSpike, &mut rng).unwrap();
        let hits = events
            .iter()
            .filter(|e| e.damage_to(Side::Enemy).is_some())
            .count();
        assert_eq!(hits, 2);
        assert!(!battle.status().is_active(StatusKind::EchoLoop));
    }

    #[test]
    fn test_omega_detonates_after_delay() {
        let (mut battle, mut rng) = battle(
            Archetype::Netrunner,
            &[AbilityId::OmegaDataStrike],
            Stats::new(1000, 10, 6, 0),
        );
        battle.player_energy = ENERGY_MAX;
        let omega = |events: &[BattleEvent]| {
            events.iter().any(|e| {
                matches!(
                    e,
                    BattleEvent::Damage {
                        source: DamageSource::Status(StatusKind::OmegaStrike),
                        ..
                    }
                )
            })
        };

        let first = battle.play_turn(AbilityId::OmegaDataStrike, &mut rng).unwrap();
        assert!(!omega(&first));
        let second = battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        assert!(omega(&second));
    }

    #[test]
    fn test_charged_strike_at_full_energy() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(1000, 10, 6, 0));
        battle.enemy_energy = ENERGY_MAX;

        let events = battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        assert!(events.contains(&BattleEvent::EnemyTelegraph { charged: true }));
        assert!(events.iter().any(|e| e.damage_to(Side::Player) == Some(120)));
        assert_eq!(battle.enemy_energy(), 25);
    }

    #[test]
    fn test_energy_regenerates_and_caps() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(1000, 1, 6, 0));
        for _ in 0..6 {
            battle.play_turn(AbilityId::DataSpike, &mut rng).unwrap();
        }
        assert_eq!(battle.player_energy(), ENERGY_MAX);
        assert_eq!(battle.round(), 7);
    }

    #[test]
    fn test_step_by_step_matches_phase_order() {
        let (mut battle, mut rng) = battle(Archetype::Netrunner, &[], Stats::new(1000, 10, 6, 0));
        battle.choose_ability(AbilityId::DataSpike, &mut rng).unwrap();

        let mut phases = vec![battle.phase()];
        while battle.phase() != Phase::PlayerChoosing {
            battle.step(&mut rng);
            phases.push(battle.phase());
        }
        assert_eq!(
            phases,
            vec![
                Phase::CompanionTick,
                Phase::EnemyTelegraph,
                Phase::EnemyActing,
                Phase::StatusResolution,
                Phase::CooldownTick,
                Phase::PlayerChoosing,
            ]
        );
    }

    #[test]
    fn test_tick_is_a_no_op() {
        let (mut battle, _) = battle(Archetype::Netrunner, &[], Stats::new(100, 10, 6, 0));
        let before = battle.clone();
        battle.tick(Duration::from_millis(250));
        assert_eq!(battle, before);
    }

    #[test]
    fn test_start_battle_generates_enemy() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let template = &crate::combat::enemy::DUNGEON_ENEMIES[0];
        let battle = start_battle(Player::new("Tester", Archetype::Techie), template, false, &mut rng);
        assert_eq!(battle.enemy().name, template.name);
        assert!(!battle.enemy().is_boss);
        assert!(battle.companion().is_some());
    }
}
