use super::stats::Stats;
use crate::core::combat_math::hp_ratio;

/// Read access shared by both sides of a battle.
///
/// HP only changes through the battle itself, so the trait exposes no
/// mutators; damage and healing go through crate-internal methods.
pub trait Combatant {
    fn name(&self) -> &str;
    fn level(&self) -> u32;
    /// Current stats including equipment.
    fn stats(&self) -> Stats;
    fn hp(&self) -> u32;
    fn max_hp(&self) -> u32;

    fn is_alive(&self) -> bool {
        self.hp() > 0
    }

    fn hp_ratio(&self) -> f64 {
        hp_ratio(self.hp(), self.max_hp())
    }
}
