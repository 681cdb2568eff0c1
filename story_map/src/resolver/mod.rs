//! Assignment Resolver - picks the free slot nearest to a drop target.

use story_cards::Point;

use crate::registry::SlotRegistry;

/// Find the free slot whose anchor is nearest to `target`.
///
/// Slots are scanned in ascending index order and only a strictly closer slot
/// replaces the current best, so equal Euclidean distances resolve to the
/// lowest index. A slot whose anchor gives no usable distance ranks as
/// infinitely far. Returns `None` when every slot is occupied.
pub fn nearest_free_slot(target: Point, registry: &SlotRegistry) -> Option<usize> {
    let mut nearest: Option<(usize, f64)> = None;

    for slot in registry.slots().iter().filter(|slot| !slot.is_occupied()) {
        let distance = match target.distance(slot.anchor()) {
            d if d.is_nan() => f64::INFINITY,
            d => d,
        };
        let closer = match nearest {
            None => true,
            Some((_, best)) => distance < best,
        };
        if closer {
            nearest = Some((slot.index(), distance));
        }
    }

    nearest.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_cards::Card;

    fn registry_at(anchors: &[(f64, f64)]) -> SlotRegistry {
        SlotRegistry::new(anchors.iter().map(|&(x, y)| Point::new(x, y)))
    }

    #[test]
    fn test_picks_nearest_anchor() {
        let registry = registry_at(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        assert_eq!(nearest_free_slot(Point::new(1.0, 1.0), &registry), Some(0));
        assert_eq!(nearest_free_slot(Point::new(9.0, 2.0), &registry), Some(1));
        assert_eq!(nearest_free_slot(Point::new(-3.0, 8.0), &registry), Some(2));
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let registry = registry_at(&[(5.0, 5.0), (0.0, 0.0), (2.0, 0.0)]);
        // (1, 0) is exactly 1 away from slots 1 and 2
        assert_eq!(nearest_free_slot(Point::new(1.0, 0.0), &registry), Some(1));
    }

    #[test]
    fn test_skips_occupied_slots() {
        let mut registry = registry_at(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        registry.set_occupant(0, Some(Card::new(1))).unwrap();

        // (4, 4) is equidistant from the two remaining slots
        assert_eq!(nearest_free_slot(Point::new(4.0, 4.0), &registry), Some(1));
        assert_eq!(nearest_free_slot(Point::new(1.0, 1.0), &registry), Some(1));
    }

    #[test]
    fn test_full_registry() {
        let mut registry = registry_at(&[(0.0, 0.0), (10.0, 0.0)]);
        registry.set_occupant(0, Some(Card::new(1))).unwrap();
        registry.set_occupant(1, Some(Card::new(2))).unwrap();

        assert_eq!(nearest_free_slot(Point::ORIGIN, &registry), None);
    }

    #[test]
    fn test_unusable_anchor_first_does_not_win() {
        let registry = registry_at(&[(f64::NAN, 0.0), (0.0, 0.0)]);
        assert_eq!(nearest_free_slot(Point::new(0.0, 0.0), &registry), Some(1));
    }

    #[test]
    fn test_unusable_anchor_later_is_skipped() {
        let registry = registry_at(&[(0.0, 0.0), (f64::NAN, f64::NAN)]);
        assert_eq!(nearest_free_slot(Point::new(3.0, 0.0), &registry), Some(0));
    }

    #[test]
    fn test_only_unusable_anchors_fall_to_lowest_index() {
        let mut registry = registry_at(&[(5.0, 5.0), (f64::NAN, 0.0), (0.0, f64::NAN)]);
        registry.set_occupant(0, Some(Card::new(1))).unwrap();
        assert_eq!(nearest_free_slot(Point::ORIGIN, &registry), Some(1));
    }

    #[test]
    fn test_empty_registry() {
        let registry = SlotRegistry::with_slot_count(0);
        assert_eq!(nearest_free_slot(Point::ORIGIN, &registry), None);
    }
}
