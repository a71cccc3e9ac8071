use super::types::{EquipmentSlot, Item};
use serde::{Deserialize, Serialize};

/// Items currently worn. An empty slot means fists or rags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = item,
            EquipmentSlot::Armor => self.armor = item,
        }
    }

    /// Display name for a slot, falling back to fists/rags.
    pub fn name_in(&self, slot: EquipmentSlot) -> &str {
        self.get(slot)
            .as_ref()
            .map_or(slot.empty_name(), |item| item.name.as_str())
    }
}

/// Everything the player has bought, worn or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub weapons: Vec<Item>,
    pub armors: Vec<Item>,
}

impl Inventory {
    pub fn items(&self, slot: EquipmentSlot) -> &[Item] {
        match slot {
            EquipmentSlot::Weapon => &self.weapons,
            EquipmentSlot::Armor => &self.armors,
        }
    }

    pub fn add(&mut self, item: Item) {
        match item.slot {
            EquipmentSlot::Weapon => self.weapons.push(item),
            EquipmentSlot::Armor => self.armors.push(item),
        }
    }

    pub fn owns(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn find(&self, name: &str) -> Option<&Item> {
        self.weapons
            .iter()
            .chain(self.armors.iter())
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Strongest owned item for a slot at the given level. Earlier purchases win ties.
    pub fn best_for(&self, slot: EquipmentSlot, level: u32) -> Option<&Item> {
        let mut best: Option<&Item> = None;
        for item in self.items(slot) {
            if best.map_or(true, |b| item.stat_at_level(level) > b.stat_at_level(level)) {
                best = Some(item);
            }
        }
        best
    }
}
