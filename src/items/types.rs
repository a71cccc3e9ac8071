use crate::core::constants::ITEM_LEVEL_SCALING;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 2] {
        [EquipmentSlot::Weapon, EquipmentSlot::Armor]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
        }
    }

    /// What an empty slot is shown as.
    pub fn empty_name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Fists",
            EquipmentSlot::Armor => "Rags",
        }
    }
}

/// Static shop entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTemplate {
    pub name: &'static str,
    pub slot: EquipmentSlot,
    pub base_cost: u64,
    /// Weapon ATK or armor DEF rating at level 0.
    pub base_bonus: u32,
    pub required_level: u32,
}

/// An owned piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub slot: EquipmentSlot,
    pub base_bonus: u32,
    pub required_level: u32,
}

impl Item {
    pub fn from_template(template: &ItemTemplate) -> Self {
        Self {
            name: template.name.to_string(),
            slot: template.slot,
            base_bonus: template.base_bonus,
            required_level: template.required_level,
        }
    }

    /// Item rating for a wearer of the given level.
    pub fn stat_at_level(&self, level: u32) -> u32 {
        self.base_bonus + (level as f64 * ITEM_LEVEL_SCALING).floor() as u32
    }
}
