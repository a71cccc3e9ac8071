//! Integration test: Enemy Generation
//!
//! Level rolls, stat-total scaling with ±5% variance, reward scaling and
//! boss templates.

use cyberbattle::combat::{
    generate_enemy, random_dungeon_template, roll_enemy_level, target_stat_total, BOSS_ENEMIES,
    DUNGEON_ENEMIES,
};
use cyberbattle::core::constants::ENEMY_HP_MULTIPLIER;
use cyberbattle::{Archetype, Combatant};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =========================================================================
// Levels
// =========================================================================

#[test]
fn test_enemy_level_within_one_of_player() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for player_level in [1, 2, 7, 15] {
        for _ in 0..200 {
            let level = roll_enemy_level(player_level, &mut rng);
            assert!(level >= 1, "enemy level never drops below 1");
            assert!(
                level + 1 >= player_level && level <= player_level + 1,
                "level {level} too far from player level {player_level}"
            );
        }
    }
}

#[test]
fn test_target_total_grows_five_per_level() {
    let start = Archetype::Netrunner.starting_stat_total();
    assert_eq!(target_stat_total(start, 1), start);
    assert_eq!(target_stat_total(start, 4), start + 15);
}

// =========================================================================
// Stat scaling
// =========================================================================

#[test]
fn test_every_stat_within_five_percent_of_scaled_value() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let start = Archetype::StreetSamurai.starting_stat_total();

    for template in DUNGEON_ENEMIES.iter() {
        for _ in 0..20 {
            let enemy = generate_enemy(template, 5, start, false, &mut rng);
            let factor =
                target_stat_total(start, enemy.level) as f64 / template.stats.total() as f64;

            for (base, rolled) in [
                (template.stats.hp, enemy.stats.hp),
                (template.stats.atk, enemy.stats.atk),
                (template.stats.def, enemy.stats.def),
                (template.stats.spd, enemy.stats.spd),
            ] {
                let exact = base as f64 * factor;
                let low = (exact * 0.95).round().max(1.0) as u32;
                let high = (exact * 1.05).round().max(1.0) as u32;
                assert!(
                    (low..=high).contains(&rolled),
                    "{}: rolled {rolled}, expected {low}..={high}",
                    template.name
                );
            }
            assert_eq!(enemy.max_hp(), enemy.stats.hp * ENEMY_HP_MULTIPLIER);
            assert_eq!(enemy.hp(), enemy.max_hp());
            assert!(!enemy.is_boss);
        }
    }
}

#[test]
fn test_rewards_scale_with_stat_factor() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let template = &DUNGEON_ENEMIES[0];
    let start = Archetype::Techie.starting_stat_total();
    let enemy = generate_enemy(template, 1, start, false, &mut rng);

    let factor = target_stat_total(start, enemy.level) as f64 / template.stats.total() as f64;
    assert_eq!(enemy.gold, (template.gold as f64 * factor).round() as u64);
    assert_eq!(enemy.exp, (template.exp as f64 * factor).round() as u64);
}

// =========================================================================
// Bosses
// =========================================================================

#[test]
fn test_bosses_keep_template_stats() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for boss in BOSS_ENEMIES.iter() {
        let enemy = generate_enemy(boss, 1, 100, true, &mut rng);
        assert!(enemy.is_boss);
        assert_eq!(enemy.stats, boss.stats);
        assert_eq!(enemy.level, boss.required_level);
        assert_eq!(enemy.gold, boss.gold);
        assert_eq!(enemy.exp, boss.exp);
    }
}

#[test]
fn test_boss_ladder_requirements_increase() {
    assert!(BOSS_ENEMIES
        .windows(2)
        .all(|pair| pair[0].required_level < pair[1].required_level));
}

#[test]
fn test_random_template_comes_from_dungeon_pool() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..50 {
        let template = random_dungeon_template(&mut rng);
        assert!(DUNGEON_ENEMIES.iter().any(|t| t.name == template.name));
    }
}
