//! Study progress statistics derived from review states.

use crate::models::{Difficulty, Schedulable};
use crate::scheduler::recommend_difficulty;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Study activity recorded for one calendar day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub study_minutes: u32,
    pub cards_reviewed: u32,
}

/// Number of consecutive study days ending today.
///
/// Days are walked newest first; the i-th entry must be exactly i days before
/// `today` and contain study time, otherwise counting stops.
pub fn study_streak(activity: &[DailyActivity], today: NaiveDate) -> u32 {
    let mut days: Vec<&DailyActivity> = activity.iter().collect();
    days.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0;
    for (i, day) in days.iter().enumerate() {
        let days_ago = (today - day.date).num_days();
        if days_ago == i as i64 && day.study_minutes > 0 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeckSummary {
    pub total_cards: usize,
    pub due_cards: usize,
    pub new_cards: usize,
    /// Mean accuracy of cards that have one.
    pub average_accuracy: Option<f64>,
    pub recommended_difficulty: Option<Difficulty>,
}

impl DeckSummary {
    pub fn from_cards<C: Schedulable>(cards: &[C], now: DateTime<Utc>) -> Self {
        let mut due_cards = 0;
        let mut new_cards = 0;
        let mut accuracy_sum = 0.0;
        let mut accuracy_count = 0usize;

        for card in cards {
            let state = card.review_state();
            if state.is_due(now) {
                due_cards += 1;
            }
            if state.is_new() {
                new_cards += 1;
            }
            if let Some(accuracy) = state.accuracy_percent {
                accuracy_sum += accuracy;
                accuracy_count += 1;
            }
        }

        let average_accuracy = (accuracy_count > 0).then(|| accuracy_sum / accuracy_count as f64);

        Self {
            total_cards: cards.len(),
            due_cards,
            new_cards,
            average_accuracy,
            recommended_difficulty: average_accuracy.map(recommend_difficulty),
        }
    }
}
