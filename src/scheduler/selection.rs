//! Picking and ordering the cards to study.

use crate::models::Schedulable;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Returns the cards that are due at `now`, in their original order.
///
/// A card is due when it has never been scheduled or its next review time is
/// not after `now`.
pub fn select_due_cards<C: Schedulable>(cards: &[C], now: DateTime<Utc>) -> Vec<&C> {
    cards
        .iter()
        .filter(|card| card.review_state().is_due(now))
        .collect()
}

/// Orders cards for presentation: never-studied cards first, then lowest
/// accuracy, then the longest since last review. Full ties keep input order.
pub fn prioritize<C: Schedulable>(mut cards: Vec<C>) -> Vec<C> {
    cards.sort_by(compare_priority);
    cards
}

/// Comparator behind [`prioritize`]. Missing accuracy counts as 0.
pub fn compare_priority<C: Schedulable>(a: &C, b: &C) -> Ordering {
    let a = a.review_state();
    let b = b.review_state();

    let studied = a.last_reviewed_at.is_some().cmp(&b.last_reviewed_at.is_some());
    if studied != Ordering::Equal {
        return studied;
    }

    let accuracy = a
        .accuracy_percent
        .unwrap_or(0.0)
        .total_cmp(&b.accuracy_percent.unwrap_or(0.0));
    if accuracy != Ordering::Equal {
        return accuracy;
    }

    match (a.last_reviewed_at, b.last_reviewed_at) {
        (Some(a_at), Some(b_at)) => a_at.cmp(&b_at),
        _ => Ordering::Equal,
    }
}
