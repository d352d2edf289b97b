//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates review intervals based on recall quality:
//! - Each card has an ease factor (EF) that adjusts based on performance
//! - Quality grades 0-2: Reset interval and repetitions (card needs relearning)
//! - Quality grades 3-5: Increase interval progressively (1 day → 6 days → EF multiplier)
//! - EF is adjusted after every review, failed or not, and never falls below 1.3
//! - Interval growth uses the EF the card had *before* this review

use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::models::review_state::MIN_EASE_FACTOR;
use crate::models::{Quality, ReviewState};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

/// Result of grading one review.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewOutcome {
    pub state: ReviewState,
    pub next_review_at: DateTime<Utc>,
    pub interval_days: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Review state for a card that has just been created.
    pub fn initial_state(&self) -> ReviewState {
        ReviewState::with_ease_factor(self.config.initial_ease.max(self.minimum_ease()))
    }

    /// Configured ease floor, never below 1.3.
    pub fn minimum_ease(&self) -> f64 {
        if self.config.minimum_ease.is_finite() {
            self.config.minimum_ease.max(MIN_EASE_FACTOR)
        } else {
            MIN_EASE_FACTOR
        }
    }

    /// Calculates the next review according to the SM-2 algorithm.
    /// quality: 0-5 (0 = complete blackout, 5 = perfect response)
    ///
    /// Out-of-range grades are rejected. Corrupted input (ease below the
    /// floor, zero interval) is clamped before the update is applied.
    pub fn compute_next_review(
        &self,
        state: &ReviewState,
        quality: u8,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome, SchedulerError> {
        let quality = Quality::new(quality)?;

        let mut next = state.clone();
        let minimum_ease = self.minimum_ease();
        if next.normalize(minimum_ease) {
            warn!(
                ease_factor = state.ease_factor,
                interval_days = state.interval_days,
                "review state out of range, clamped before scheduling"
            );
        }

        let previous_ease = next.ease_factor;

        let (interval, repetitions) = if quality.is_successful() {
            let interval = match next.repetition_count {
                0 => 1,
                1 => 6,
                // `as` saturates, so runaway growth stops at u32::MAX
                _ => (next.interval_days as f64 * previous_ease).round() as u32,
            };
            (interval, next.repetition_count.saturating_add(1))
        } else {
            (1, 0)
        };

        let interval = match self.config.max_interval_days {
            Some(cap) => interval.min(cap),
            None => interval,
        };

        next.ease_factor = next_ease_factor(previous_ease, quality).max(minimum_ease);
        next.interval_days = interval.max(1);
        next.repetition_count = repetitions;

        let next_review_at = add_days(now, next.interval_days);
        next.last_reviewed_at = Some(now);
        next.next_review_at = Some(next_review_at);
        next.record_accuracy(quality.is_successful());

        debug!(
            quality = quality.value(),
            repetition_count = next.repetition_count,
            ease_factor = next.ease_factor,
            interval_days = next.interval_days,
            "computed next review"
        );

        Ok(ReviewOutcome {
            interval_days: next.interval_days,
            next_review_at,
            state: next,
        })
    }
}

/// Calculates the new review with the default scheduler settings.
pub fn compute_next_review(
    state: &ReviewState,
    quality: u8,
    now: DateTime<Utc>,
) -> Result<ReviewOutcome, SchedulerError> {
    Scheduler::default().compute_next_review(state, quality, now)
}

/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), before the floor is applied.
fn next_ease_factor(ease: f64, quality: Quality) -> f64 {
    let miss = 5.0 - quality.value() as f64;
    ease + (0.1 - miss * (0.08 + miss * 0.02))
}

fn add_days(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(days as i64))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
