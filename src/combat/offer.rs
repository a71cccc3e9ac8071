//! Per-round ability offer.
//!
//! Slot 0 always holds the basic attack. The remaining slots are dealt
//! round-robin from a queue of the other loadout entries, shuffled once per
//! battle, skipping anything on cooldown.

use super::ability::AbilityId;
use crate::core::constants::OFFER_SLOTS;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferSlot {
    Ability(AbilityId),
    /// Inert placeholder when nothing is ready.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityOffer {
    pub slots: [OfferSlot; OFFER_SLOTS],
}

impl AbilityOffer {
    pub fn empty() -> Self {
        Self {
            slots: [OfferSlot::Empty; OFFER_SLOTS],
        }
    }

    pub fn contains(&self, id: AbilityId) -> bool {
        self.slots.contains(&OfferSlot::Ability(id))
    }

    pub fn abilities(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            OfferSlot::Ability(id) => Some(*id),
            OfferSlot::Empty => None,
        })
    }
}

/// Shuffled draw order with a persistent cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferQueue {
    order: Vec<AbilityId>,
    cursor: usize,
}

impl OfferQueue {
    /// Queue every loadout entry except the basic attack in slot 0.
    pub fn shuffled(loadout: &[AbilityId], rng: &mut impl Rng) -> Self {
        let mut order: Vec<AbilityId> = loadout.iter().skip(1).copied().collect();
        order.shuffle(rng);
        Self { order, cursor: 0 }
    }

    pub fn order(&self) -> &[AbilityId] {
        &self.order
    }

    /// Draw up to `count` distinct ready abilities, advancing the cursor past
    /// every entry examined. Looks at each entry at most once per call.
    pub fn draw(&mut self, count: usize, is_ready: impl Fn(AbilityId) -> bool) -> Vec<AbilityId> {
        let mut drawn = Vec::with_capacity(count);
        if self.order.is_empty() {
            return drawn;
        }

        for _ in 0..self.order.len() {
            if drawn.len() == count {
                break;
            }
            let id = self.order[self.cursor];
            self.cursor = (self.cursor + 1) % self.order.len();
            if is_ready(id) {
                drawn.push(id);
            }
        }
        drawn
    }

    /// Build the next offer: the basic attack plus fresh draws.
    pub fn next_offer(
        &mut self,
        basic: AbilityId,
        is_ready: impl Fn(AbilityId) -> bool,
    ) -> AbilityOffer {
        let mut offer = AbilityOffer::empty();
        offer.slots[0] = OfferSlot::Ability(basic);
        for (slot, id) in offer.slots[1..]
            .iter_mut()
            .zip(self.draw(OFFER_SLOTS - 1, is_ready))
        {
            *slot = OfferSlot::Ability(id);
        }
        offer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn loadout() -> Vec<AbilityId> {
        vec![
            AbilityId::DataSpike,
            AbilityId::TrojanSpike,
            AbilityId::EchoLoop,
            AbilityId::GlitchPulse,
            AbilityId::StatHijack,
        ]
    }

    #[test]
    fn test_queue_excludes_basic() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let queue = OfferQueue::shuffled(&loadout(), &mut rng);
        assert_eq!(queue.order().len(), 4);
        assert!(!queue.order().contains(&AbilityId::DataSpike));
    }

    #[test]
    fn test_round_robin_covers_everything() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut queue = OfferQueue::shuffled(&loadout(), &mut rng);
        let first = queue.draw(2, |_| true);
        let second = queue.draw(2, |_| true);
        let mut all: Vec<_> = first.into_iter().chain(second).collect();
        all.sort_by_key(|id| *id as u8);
        let mut expected = loadout()[1..].to_vec();
        expected.sort_by_key(|id| *id as u8);
        assert_eq!(all, expected);
    }

    #[test]
    fn test_draw_skips_unready_and_never_duplicates() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut queue = OfferQueue::shuffled(&loadout(), &mut rng);
        let drawn = queue.draw(2, |id| id == AbilityId::EchoLoop);
        assert_eq!(drawn, vec![AbilityId::EchoLoop]);
    }

    #[test]
    fn test_offer_basic_in_slot_zero_and_empty_fill() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut queue = OfferQueue::shuffled(&[AbilityId::DataSpike], &mut rng);
        let offer = queue.next_offer(AbilityId::DataSpike, |_| true);
        assert_eq!(offer.slots[0], OfferSlot::Ability(AbilityId::DataSpike));
        assert_eq!(offer.slots[1], OfferSlot::Empty);
        assert_eq!(offer.slots[2], OfferSlot::Empty);
        assert!(offer.contains(AbilityId::DataSpike));
        assert_eq!(offer.abilities().count(), 1);
    }

    #[test]
    fn test_offer_with_single_extra_fills_one_slot() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut queue =
            OfferQueue::shuffled(&[AbilityId::DataSpike, AbilityId::EchoLoop], &mut rng);
        let offer = queue.next_offer(AbilityId::DataSpike, |_| true);
        assert_eq!(offer.slots[1], OfferSlot::Ability(AbilityId::EchoLoop));
        assert_eq!(offer.slots[2], OfferSlot::Empty);
    }
}
