//! Main simulation runner.
//!
//! Drives real `GameSession`s and `BattleState`s with an automatic player, so
//! simulated results follow the same rules as interactive play.

use super::config::SimConfig;
use super::report::SimReport;
use super::run_stats::RunStats;
use crate::character::{Archetype, Player, StatKey};
use crate::combat::{catalog, AbilityId, BattleState};
use crate::core::error::ProgressionError;
use crate::core::session::GameSession;
use crate::items::{shop_items, EquipmentSlot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize * config.archetypes.len());

    for run_idx in 0..config.num_runs {
        // One RNG per run, shared by every archetype in it
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        for &archetype in &config.archetypes {
            let run = simulate_single_run(archetype, config, &mut rng);
            if config.verbosity >= 2 {
                println!(
                    "Run {}/{} {:<15} - Level {}, W/L/T {}/{}/{}, Bosses {}, Gold {}",
                    run_idx + 1,
                    config.num_runs,
                    archetype.name(),
                    run.final_level,
                    run.wins,
                    run.losses,
                    run.timeouts,
                    run.bosses_defeated,
                    run.final_gold
                );
            }
            all_runs.push(run);
        }
    }

    SimReport::from_runs(all_runs, config)
}

/// Play one character from level 1 through `battles_per_run` battles.
pub fn simulate_single_run(archetype: Archetype, config: &SimConfig, rng: &mut impl Rng) -> RunStats {
    let mut session = GameSession::new(Player::new(format!("Sim {}", archetype.name()), archetype));
    let mut stats = RunStats::new(archetype);

    for _ in 0..config.battles_per_run {
        go_shopping(&mut session.player);

        let mut battle = if config.challenge_bosses && session.can_challenge_boss() {
            match session.start_boss_battle(rng) {
                Ok(battle) => battle,
                Err(err) => {
                    warn!(%err, "boss challenge refused");
                    session.start_dungeon_battle(rng)
                }
            }
        } else {
            session.start_dungeon_battle(rng)
        };

        fight(&mut battle, config.max_rounds_per_battle, rng);
        let settlement = session.finish_battle(battle);
        stats.record(&settlement);
    }

    stats.finish(&session.player);
    stats
}

/// Auto-play a battle until it ends or runs out of rounds.
pub fn fight(battle: &mut BattleState, max_rounds: u32, rng: &mut impl Rng) {
    while !battle.is_over() && battle.round() <= max_rounds {
        let choice = choose_ability(battle);
        if let Err(err) = battle.play_turn(choice, rng) {
            warn!(%err, ability = %choice, "auto-player action rejected");
            break;
        }
    }
    if !battle.is_over() {
        debug!(round = battle.round(), "battle timed out");
    }
}

/// Most expensive offered ability that is ready and affordable.
pub fn choose_ability(battle: &BattleState) -> AbilityId {
    let basic = battle.player().archetype.basic_ability();
    battle
        .offer()
        .abilities()
        .filter(|id| {
            battle.player().is_ready(*id) && id.spec().cost <= battle.player_energy()
        })
        .max_by_key(|id| id.spec().cost)
        .unwrap_or(basic)
}

/// Spend points and gold between battles: stats, then gear, then abilities.
pub fn go_shopping(player: &mut Player) {
    let priorities = stat_priorities(player.archetype);
    let mut next = 0;
    while player.stat_points() > 0 {
        if player.spend_stat(priorities[next % priorities.len()]).is_err() {
            break;
        }
        next += 1;
    }

    for slot in EquipmentSlot::all() {
        for template in shop_items(slot).iter().rev() {
            match player.buy_item(template) {
                Ok(_) | Err(ProgressionError::AlreadyOwned(_)) => break,
                Err(_) => {}
            }
        }
    }

    for spec in catalog(player.archetype) {
        if !spec.is_basic() && !player.owns_ability(spec.id) {
            let _ = player.buy_ability(spec.id);
        }
    }
}

fn stat_priorities(archetype: Archetype) -> &'static [StatKey] {
    match archetype {
        Archetype::Netrunner => &[StatKey::Atk, StatKey::Atk, StatKey::Hp],
        Archetype::StreetSamurai => &[StatKey::Atk, StatKey::Hp, StatKey::Spd],
        Archetype::Techie => &[StatKey::Def, StatKey::Atk, StatKey::Hp],
    }
}
