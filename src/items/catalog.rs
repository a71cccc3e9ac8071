//! Shop inventory of weapons and armor.

use super::types::{EquipmentSlot, ItemTemplate};

const fn weapon(name: &'static str, base_cost: u64, atk: u32, level: u32) -> ItemTemplate {
    ItemTemplate {
        name,
        slot: EquipmentSlot::Weapon,
        base_cost,
        base_bonus: atk,
        required_level: level,
    }
}

const fn armor(name: &'static str, base_cost: u64, def: u32, level: u32) -> ItemTemplate {
    ItemTemplate {
        name,
        slot: EquipmentSlot::Armor,
        base_cost,
        base_bonus: def,
        required_level: level,
    }
}

pub const WEAPON_ITEMS: [ItemTemplate; 8] = [
    weapon("Rusty Blade", 50, 6, 0),
    weapon("Scrap Pistol", 90, 10, 3),
    weapon("Energy Baton", 150, 14, 6),
    weapon("Plasma Rifle", 220, 18, 9),
    weapon("Monowire Whip", 300, 22, 12),
    weapon("Pulse Cannon", 400, 26, 15),
    weapon("Nano-Katana", 550, 30, 18),
    weapon("Singularity Gun", 750, 35, 21),
];

pub const ARMOR_ITEMS: [ItemTemplate; 8] = [
    armor("Scavenger Vest", 40, 4, 0),
    armor("Reinforced Jacket", 80, 8, 3),
    armor("Ballistic Weave", 140, 12, 6),
    armor("Exo-Plate Armor", 200, 16, 9),
    armor("Chitin Plating", 280, 20, 12),
    armor("Reactive Shield", 380, 24, 15),
    armor("Stealth Suit", 520, 28, 18),
    armor("Aegis Sentinel", 700, 32, 21),
];

pub fn shop_items(slot: EquipmentSlot) -> &'static [ItemTemplate] {
    match slot {
        EquipmentSlot::Weapon => &WEAPON_ITEMS,
        EquipmentSlot::Armor => &ARMOR_ITEMS,
    }
}

/// Case-insensitive lookup across both shop lists.
pub fn find_item(name: &str) -> Option<&'static ItemTemplate> {
    WEAPON_ITEMS
        .iter()
        .chain(ARMOR_ITEMS.iter())
        .find(|t| t.name.eq_ignore_ascii_case(name))
}
