//! The player character: stats, leveling, the stat/item/ability shop and loadout.

use super::archetype::Archetype;
use super::combatant::Combatant;
use super::stats::{StatKey, Stats, NUM_STATS};
use crate::combat::ability::{AbilityId, OwnedAbility};
use crate::core::constants::*;
use crate::core::error::ProgressionError;
use crate::items::{find_item, Equipment, EquipmentSlot, Inventory, Item, ItemTemplate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How a purchase was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payment {
    StatPoint,
    SkillPoint,
    Gold(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub archetype: Archetype,
    level: u32,
    base_stats: Stats,
    /// Always `base_stats` plus equipment; rebuilt by `update_stats`.
    stats: Stats,
    max_hp: u32,
    hp: u32,
    gold: u64,
    exp: u64,
    exp_to_next: u64,
    stat_points: u32,
    skill_points: u32,
    stat_costs: [u64; NUM_STATS],
    equipment: Equipment,
    inventory: Inventory,
    abilities: Vec<OwnedAbility>,
    loadout: Vec<AbilityId>,
}

impl Player {
    pub fn new(name: impl Into<String>, archetype: Archetype) -> Self {
        let base_stats = archetype.base_stats();
        let basic = archetype.basic_ability();
        let mut player = Self {
            name: name.into(),
            archetype,
            level: STARTING_LEVEL,
            base_stats,
            stats: base_stats,
            max_hp: 0,
            hp: 0,
            gold: STARTING_GOLD,
            exp: 0,
            exp_to_next: STARTING_EXP_TO_NEXT,
            stat_points: STARTING_STAT_POINTS,
            skill_points: 0,
            stat_costs: [BASE_STAT_COST; NUM_STATS],
            equipment: Equipment::new(),
            inventory: Inventory::default(),
            abilities: vec![OwnedAbility::new(basic)],
            loadout: vec![basic],
        };
        player.update_stats();
        player.hp = player.max_hp;
        player
    }

    /// Replace the base stats, e.g. for a custom character or a scripted test.
    pub fn with_base_stats(mut self, base_stats: Stats) -> Self {
        self.base_stats = base_stats;
        self.update_stats();
        self.hp = self.max_hp;
        self
    }

    pub fn base_stats(&self) -> Stats {
        self.base_stats
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn exp(&self) -> u64 {
        self.exp
    }

    pub fn exp_to_next(&self) -> u64 {
        self.exp_to_next
    }

    pub fn stat_points(&self) -> u32 {
        self.stat_points
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    /// Gold price of the next purchase of `key` once stat points run out.
    pub fn stat_cost(&self, key: StatKey) -> u64 {
        self.stat_costs[key.index()]
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn abilities(&self) -> &[OwnedAbility] {
        &self.abilities
    }

    pub fn loadout(&self) -> &[AbilityId] {
        &self.loadout
    }

    pub fn owns_ability(&self, id: AbilityId) -> bool {
        self.abilities.iter().any(|a| a.id == id)
    }

    /// Owned and off cooldown.
    pub fn is_ready(&self, id: AbilityId) -> bool {
        self.abilities
            .iter()
            .find(|a| a.id == id)
            .is_some_and(OwnedAbility::is_ready)
    }

    pub fn cooldown_remaining(&self, id: AbilityId) -> Option<u32> {
        self.abilities
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.cooldown_remaining)
    }

    /// Stat bonus granted by whatever sits in `slot`.
    ///
    /// Weapons add to ATK, armor adds to HP:
    /// `round(base_stat * (item_stat + floor(level * 0.5)) / 100)`.
    pub fn equipment_bonus(&self, slot: EquipmentSlot) -> u32 {
        let Some(item) = self.equipment.get(slot) else {
            return 0;
        };
        let base = match slot {
            EquipmentSlot::Weapon => self.base_stats.atk,
            EquipmentSlot::Armor => self.base_stats.hp,
        };
        (base as f64 * item.stat_at_level(self.level) as f64 / EQUIPMENT_BONUS_DIVISOR).round()
            as u32
    }

    /// Rebuild derived stats from base stats and equipment. Idempotent.
    pub fn update_stats(&mut self) {
        let mut stats = self.base_stats;
        stats.add(StatKey::Atk, self.equipment_bonus(EquipmentSlot::Weapon));
        stats.add(StatKey::Hp, self.equipment_bonus(EquipmentSlot::Armor));
        self.stats = stats;
        self.max_hp = stats.hp.saturating_mul(self.archetype.hp_multiplier());
        self.hp = self.hp.min(self.max_hp);
    }

    /// Add experience, leveling up as many times as it covers.
    ///
    /// # Returns
    /// Number of levels gained.
    pub fn gain_exp(&mut self, amount: u64) -> u32 {
        self.exp += amount;
        let mut levels = 0;

        while self.exp >= self.exp_to_next {
            self.exp -= self.exp_to_next;
            self.level += 1;
            levels += 1;
            self.stat_points += LEVEL_UP_STAT_POINTS;
            self.skill_points += LEVEL_UP_SKILL_POINTS;
            self.exp_to_next =
                (self.exp_to_next as f64 * EXP_CURVE_FACTOR + EXP_CURVE_FLAT).floor() as u64;

            let (hp, atk, def, spd) = LEVEL_UP_STAT_GAINS;
            self.base_stats = self.base_stats.plus(&Stats::new(hp, atk, def, spd));
            self.update_stats();
            self.hp = self.max_hp;
            self.auto_equip_best();

            info!(
                player = %self.name,
                level = self.level,
                exp_to_next = self.exp_to_next,
                "level up"
            );
        }

        levels
    }

    /// Equip the strongest owned weapon and armor for the current level.
    /// Keeps the current item on ties.
    pub fn auto_equip_best(&mut self) {
        for slot in EquipmentSlot::all() {
            let Some(best) = self.inventory.best_for(slot, self.level) else {
                continue;
            };
            let better = match self.equipment.get(slot) {
                Some(current) => best.stat_at_level(self.level) > current.stat_at_level(self.level),
                None => true,
            };
            if better {
                debug!(slot = slot.name(), item = %best.name, "auto-equipped");
                let best = best.clone();
                self.equipment.set(slot, Some(best));
            }
        }
        self.update_stats();
    }

    /// Raise one base stat by 1, paying with a stat point or, failing that, gold.
    pub fn spend_stat(&mut self, key: StatKey) -> Result<Payment, ProgressionError> {
        let payment = if self.stat_points > 0 {
            self.stat_points -= 1;
            Payment::StatPoint
        } else {
            let cost = self.stat_costs[key.index()];
            if self.gold < cost {
                return Err(ProgressionError::InsufficientGold {
                    cost,
                    available: self.gold,
                });
            }
            self.gold -= cost;
            self.stat_costs[key.index()] = (cost as f64 * STAT_COST_GROWTH).floor() as u64;
            Payment::Gold(cost)
        };

        self.base_stats.add(key, 1);
        self.update_stats();
        debug!(stat = key.abbrev(), ?payment, "stat raised");
        Ok(payment)
    }

    /// [`Player::spend_stat`] keyed by a stat name such as `"atk"`.
    pub fn spend_stat_named(&mut self, key: &str) -> Result<Payment, ProgressionError> {
        let key: StatKey = key.parse()?;
        self.spend_stat(key)
    }

    /// Buy an item from the shop.
    ///
    /// # Returns
    /// Whether the new item was equipped (empty slot or a stronger item).
    pub fn buy_item(&mut self, template: &ItemTemplate) -> Result<bool, ProgressionError> {
        if self.inventory.owns(template.name) {
            return Err(ProgressionError::AlreadyOwned(template.name.to_string()));
        }
        if self.level < template.required_level {
            return Err(ProgressionError::LevelTooLow {
                required: template.required_level,
                level: self.level,
            });
        }
        if self.gold < template.base_cost {
            return Err(ProgressionError::InsufficientGold {
                cost: template.base_cost,
                available: self.gold,
            });
        }

        self.gold -= template.base_cost;
        let item = Item::from_template(template);
        let better = match self.equipment.get(template.slot) {
            Some(current) => item.stat_at_level(self.level) > current.stat_at_level(self.level),
            None => true,
        };
        self.inventory.add(item.clone());
        if better {
            self.equipment.set(template.slot, Some(item));
            self.update_stats();
        }

        debug!(item = template.name, equipped = better, gold = self.gold, "item bought");
        Ok(better)
    }

    pub fn buy_item_named(&mut self, name: &str) -> Result<bool, ProgressionError> {
        let template =
            find_item(name).ok_or_else(|| ProgressionError::UnknownItem(name.to_string()))?;
        self.buy_item(template)
    }

    /// Equip an owned item by name.
    pub fn equip(&mut self, name: &str) -> Result<(), ProgressionError> {
        let item = self
            .inventory
            .find(name)
            .cloned()
            .ok_or_else(|| ProgressionError::NotOwned(name.to_string()))?;
        self.equipment.set(item.slot, Some(item));
        self.update_stats();
        Ok(())
    }

    /// Learn an ability, paying with a skill point or, failing that, its gold price.
    /// Joins the loadout when there is room.
    pub fn buy_ability(&mut self, id: AbilityId) -> Result<Payment, ProgressionError> {
        let spec = id.spec();
        if spec.archetype != self.archetype {
            return Err(ProgressionError::WrongArchetype {
                ability: id,
                archetype: self.archetype,
            });
        }
        if self.owns_ability(id) {
            return Err(ProgressionError::AlreadyOwned(spec.name.to_string()));
        }
        if self.level < spec.required_level {
            return Err(ProgressionError::LevelTooLow {
                required: spec.required_level,
                level: self.level,
            });
        }

        let payment = if self.skill_points > 0 {
            self.skill_points -= 1;
            Payment::SkillPoint
        } else if self.gold >= spec.price {
            self.gold -= spec.price;
            Payment::Gold(spec.price)
        } else {
            return Err(ProgressionError::InsufficientGold {
                cost: spec.price,
                available: self.gold,
            });
        };

        self.abilities.push(OwnedAbility::new(id));
        if self.loadout.len() < MAX_LOADOUT_SIZE {
            self.loadout.push(id);
        }
        debug!(ability = spec.name, ?payment, "ability learned");
        Ok(payment)
    }

    pub fn add_to_loadout(&mut self, id: AbilityId) -> Result<(), ProgressionError> {
        if !self.owns_ability(id) {
            return Err(ProgressionError::NotOwned(id.name().to_string()));
        }
        if self.loadout.contains(&id) {
            return Err(ProgressionError::AlreadyInLoadout(id));
        }
        if self.loadout.len() >= MAX_LOADOUT_SIZE {
            return Err(ProgressionError::LoadoutFull(MAX_LOADOUT_SIZE));
        }
        self.loadout.push(id);
        Ok(())
    }

    pub fn remove_from_loadout(&mut self, id: AbilityId) -> Result<(), ProgressionError> {
        if id == self.archetype.basic_ability() {
            return Err(ProgressionError::BasicAbilityLocked);
        }
        let index = self
            .loadout
            .iter()
            .position(|&entry| entry == id)
            .ok_or(ProgressionError::NotInLoadout(id))?;
        self.loadout.remove(index);
        Ok(())
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Remove `floor(gold * fraction)` gold and return how much was lost.
    pub(crate) fn lose_gold_fraction(&mut self, fraction: f64) -> u64 {
        let lost = (self.gold as f64 * fraction).floor() as u64;
        self.gold -= lost.min(self.gold);
        lost
    }

    /// Full HP, fresh stats and no cooldowns.
    pub(crate) fn prepare_for_battle(&mut self) {
        self.update_stats();
        self.hp = self.max_hp;
        for ability in &mut self.abilities {
            ability.cooldown_remaining = 0;
        }
    }

    pub(crate) fn start_cooldown(&mut self, id: AbilityId) {
        if let Some(ability) = self.abilities.iter_mut().find(|a| a.id == id) {
            ability.cooldown_remaining = id.spec().cooldown + 1;
        }
    }

    pub(crate) fn tick_cooldowns(&mut self) {
        for ability in &mut self.abilities {
            ability.cooldown_remaining = ability.cooldown_remaining.saturating_sub(1);
        }
    }

    /// Returns the HP actually lost.
    pub(crate) fn apply_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Returns the HP actually restored.
    pub(crate) fn restore_hp(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn stats(&self) -> Stats {
        self.stats
    }

    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }
}
