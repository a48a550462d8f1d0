//! Slot ranking.
//!
//! | Priority | Key | Better |
//! |----------|-----|--------|
//! | 1 | blocked count | fewer |
//! | 2 | red count | fewer |
//! | 3 | total score | higher |
//! | 4 | green count | higher |
//!
//! Full ties keep their input order.

use std::cmp::{Ordering, Reverse};

use crate::aggregate::SlotResult;

/// Compare two slots by meeting-friendliness; `Less` means `a` ranks first.
pub fn compare_slots(a: &SlotResult, b: &SlotResult) -> Ordering {
    rank_key(a).cmp(&rank_key(b))
}

fn rank_key(slot: &SlotResult) -> (usize, usize, Reverse<i64>, Reverse<usize>) {
    (
        slot.counts.blocked,
        slot.counts.red,
        Reverse(slot.total_score),
        Reverse(slot.counts.green),
    )
}

/// Return the slots ordered best first. The input is left untouched.
pub fn rank_slots(slots: &[SlotResult]) -> Vec<SlotResult> {
    let mut ranked = slots.to_vec();
    // sort_by is stable
    ranked.sort_by(compare_slots);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::SlotCounts;
    use proptest::prelude::*;

    fn slot(utc: u32, score: i64, green: usize, red: usize, blocked: usize) -> SlotResult {
        SlotResult {
            utc_start_min: utc,
            total_score: score,
            counts: SlotCounts {
                green,
                yellow: 0,
                red,
                blocked,
            },
            participants_count: green + red + blocked,
            red_participants: None,
        }
    }

    fn order(slots: &[SlotResult]) -> Vec<u32> {
        slots.iter().map(|s| s.utc_start_min).collect()
    }

    #[test]
    fn fewer_blocked_beats_higher_score() {
        let slots = vec![slot(0, 90, 30, 0, 1), slot(30, -5, 0, 3, 0)];
        assert_eq!(order(&rank_slots(&slots)), [30, 0]);
    }

    #[test]
    fn fewer_red_beats_higher_score() {
        let slots = vec![slot(0, 12, 4, 1, 0), slot(30, 6, 2, 0, 0)];
        assert_eq!(order(&rank_slots(&slots)), [30, 0]);
    }

    #[test]
    fn higher_score_then_more_green() {
        let slots = vec![
            slot(0, 5, 1, 0, 0),
            slot(30, 6, 0, 0, 0),
            slot(60, 6, 2, 0, 0),
        ];
        assert_eq!(order(&rank_slots(&slots)), [60, 30, 0]);
    }

    #[test]
    fn ties_keep_input_order() {
        let slots = vec![
            slot(90, 6, 2, 0, 0),
            slot(0, 6, 2, 0, 0),
            slot(30, 9, 3, 0, 0),
            slot(60, 6, 2, 0, 0),
        ];
        assert_eq!(order(&rank_slots(&slots)), [30, 90, 0, 60]);
    }

    #[test]
    fn input_is_not_reordered() {
        let slots = vec![slot(0, 1, 0, 0, 0), slot(30, 9, 0, 0, 0)];
        let _ = rank_slots(&slots);
        assert_eq!(order(&slots), [0, 30]);
    }

    #[test]
    fn empty_input() {
        assert!(rank_slots(&[]).is_empty());
    }

    fn arb_slot() -> impl Strategy<Value = SlotResult> {
        (0u32..48, -300i64..30, 0usize..4, 0usize..4, 0usize..3)
            .prop_map(|(i, score, green, red, blocked)| slot(i * 30, score, green, red, blocked))
    }

    proptest! {
        #[test]
        fn ranking_is_idempotent(slots in prop::collection::vec(arb_slot(), 0..48)) {
            let once = rank_slots(&slots);
            let twice = rank_slots(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn ranked_blocked_counts_are_non_decreasing(slots in prop::collection::vec(arb_slot(), 0..48)) {
            let ranked = rank_slots(&slots);
            prop_assert!(ranked.windows(2).all(|w| w[0].counts.blocked <= w[1].counts.blocked));
            prop_assert_eq!(ranked.len(), slots.len());
        }
    }
}
