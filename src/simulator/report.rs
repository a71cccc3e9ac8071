//! Simulation report generation.

use super::config::SimConfig;
use super::run_stats::RunStats;
use crate::character::Archetype;
use crate::combat::BOSS_ENEMIES;
use serde::Serialize;

/// Averages for one archetype across all of its runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    pub archetype: Archetype,
    pub runs: u32,
    pub win_rate: f64,
    pub avg_rounds_per_battle: f64,
    pub avg_final_level: f64,
    pub avg_final_gold: f64,
    pub avg_bosses_defeated: f64,
    /// Runs that beat every boss on the ladder.
    pub full_clears: u32,
    pub total_timeouts: u32,
}

impl ClassSummary {
    fn from_runs(archetype: Archetype, runs: &[&RunStats]) -> Self {
        let count = runs.len().max(1) as f64;
        let avg = |f: &dyn Fn(&RunStats) -> f64| runs.iter().map(|r| f(r)).sum::<f64>() / count;

        let battles: u32 = runs.iter().map(|r| r.battles).sum();
        let wins: u32 = runs.iter().map(|r| r.wins).sum();
        let rounds: u64 = runs.iter().map(|r| r.total_rounds).sum();

        Self {
            archetype,
            runs: runs.len() as u32,
            win_rate: wins as f64 / battles.max(1) as f64,
            avg_rounds_per_battle: rounds as f64 / battles.max(1) as f64,
            avg_final_level: avg(&|r| r.final_level as f64),
            avg_final_gold: avg(&|r| r.final_gold as f64),
            avg_bosses_defeated: avg(&|r| r.bosses_defeated as f64),
            full_clears: runs
                .iter()
                .filter(|r| r.bosses_defeated as usize >= BOSS_ENEMIES.len())
                .count() as u32,
            total_timeouts: runs.iter().map(|r| r.timeouts).sum(),
        }
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub seed: Option<u64>,
    pub battles_per_run: u32,
    pub classes: Vec<ClassSummary>,

    // Individual run stats for detailed analysis
    pub runs: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, config: &SimConfig) -> Self {
        let classes = config
            .archetypes
            .iter()
            .map(|&archetype| {
                let mine: Vec<&RunStats> = runs.iter().filter(|r| r.archetype == archetype).collect();
                ClassSummary::from_runs(archetype, &mine)
            })
            .collect();

        Self {
            num_runs: config.num_runs,
            seed: config.seed,
            battles_per_run: config.battles_per_run,
            classes,
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} per class, {} battles each\n\n",
            self.num_runs, self.battles_per_run
        ));

        report.push_str("── CLASSES ──────────────────────────────────────────────────────\n");
        report.push_str("  Class            Win%   Rounds   Level    Gold   Bosses  Clears\n");
        report.push_str("  ───────────────  ─────  ──────   ─────   ─────   ──────  ──────\n");
        for class in &self.classes {
            report.push_str(&format!(
                "  {:<15}  {:>5.1}  {:>6.1}   {:>5.1}  {:>6.0}   {:>6.2}  {:>6}\n",
                class.archetype.name(),
                class.win_rate * 100.0,
                class.avg_rounds_per_battle,
                class.avg_final_level,
                class.avg_final_gold,
                class.avg_bosses_defeated,
                class.full_clears
            ));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        for class in &self.classes {
            let rating = if class.win_rate > 0.95 {
                "TOO EASY - Rarely loses"
            } else if class.win_rate > 0.75 {
                "GOOD - Challenging but fair"
            } else if class.win_rate > 0.5 {
                "HARD - Loses often"
            } else {
                "TOO HARD - Loses most fights"
            };
            report.push_str(&format!("  {:<15}  {}\n", class.archetype.name(), rating));
            if class.total_timeouts > 0 {
                report.push_str(&format!(
                    "  ⚠️  {} battles timed out - stalemates?\n",
                    class.total_timeouts
                ));
            }
        }

        if let (Some(best), Some(worst)) = (
            self.classes
                .iter()
                .max_by(|a, b| a.win_rate.total_cmp(&b.win_rate)),
            self.classes
                .iter()
                .min_by(|a, b| a.win_rate.total_cmp(&b.win_rate)),
        ) {
            let spread = (best.win_rate - worst.win_rate) * 100.0;
            if spread > 15.0 {
                report.push_str(&format!(
                    "  ⚠️  {} outperforms {} by {:.1} points\n",
                    best.archetype.name(),
                    worst.archetype.name(),
                    spread
                ));
            }
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
