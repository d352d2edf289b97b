//! Per-card review history used by the SM-2 scheduler.

use crate::error::SchedulerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Consecutive successful reviews since the last lapse.
    pub repetition_count: u32,
    pub ease_factor: f64,
    pub interval_days: u32,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// `None` means the card has never been scheduled and is due now.
    pub next_review_at: Option<DateTime<Utc>>,
    pub accuracy_percent: Option<f64>,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default)]
    pub correct_reviews: u32,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            repetition_count: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 1,
            last_reviewed_at: None,
            next_review_at: None,
            accuracy_percent: None,
            total_reviews: 0,
            correct_reviews: 0,
        }
    }
}

impl ReviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state with a custom starting ease, used when the scheduler is
    /// configured with a non-default initial ease.
    pub fn with_ease_factor(ease_factor: f64) -> Self {
        Self {
            ease_factor,
            ..Self::default()
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_review_at {
            None => true,
            Some(next) => next <= now,
        }
    }

    pub fn is_new(&self) -> bool {
        self.last_reviewed_at.is_none()
    }

    /// Strict check for callers that prefer to reject corrupted records.
    /// `min_ease` below 1.3 is treated as 1.3.
    pub fn validate(&self, min_ease: f64) -> Result<(), SchedulerError> {
        let min_ease = min_ease.max(MIN_EASE_FACTOR);
        if !self.ease_factor.is_finite() || self.ease_factor < min_ease {
            return Err(SchedulerError::InvalidState(format!(
                "ease factor {} is below the minimum of {}",
                self.ease_factor, min_ease
            )));
        }
        if self.interval_days < 1 {
            return Err(SchedulerError::InvalidState(
                "interval must be at least one day".to_string(),
            ));
        }
        if let Some(accuracy) = self.accuracy_percent {
            if !(0.0..=100.0).contains(&accuracy) {
                return Err(SchedulerError::InvalidState(format!(
                    "accuracy {accuracy} is outside 0-100"
                )));
            }
        }
        Ok(())
    }

    /// Clamps out-of-range fields back into their valid domain.
    /// Returns true if anything had to change. The ease floor never drops
    /// below 1.3, whatever `min_ease` says.
    pub fn normalize(&mut self, min_ease: f64) -> bool {
        let min_ease = min_ease.max(MIN_EASE_FACTOR);
        let mut changed = false;
        if !self.ease_factor.is_finite() || self.ease_factor < min_ease {
            self.ease_factor = if self.ease_factor.is_finite() {
                min_ease
            } else {
                DEFAULT_EASE_FACTOR.max(min_ease)
            };
            changed = true;
        }
        if self.interval_days < 1 {
            self.interval_days = 1;
            changed = true;
        }
        if let Some(accuracy) = self.accuracy_percent {
            let clamped = if accuracy.is_nan() {
                0.0
            } else {
                accuracy.clamp(0.0, 100.0)
            };
            if clamped != accuracy {
                self.accuracy_percent = Some(clamped);
                changed = true;
            }
        }
        changed
    }

    /// Counts one graded review towards the running accuracy.
    pub fn record_accuracy(&mut self, successful: bool) {
        self.total_reviews = self.total_reviews.saturating_add(1);
        if successful {
            self.correct_reviews = self.correct_reviews.saturating_add(1);
        }
        self.accuracy_percent =
            Some(self.correct_reviews as f64 / self.total_reviews as f64 * 100.0);
    }
}

/// Anything carrying a review state the scheduler can select and order.
pub trait Schedulable {
    fn review_state(&self) -> &ReviewState;
}

impl Schedulable for ReviewState {
    fn review_state(&self) -> &ReviewState {
        self
    }
}

impl<T: Schedulable + ?Sized> Schedulable for &T {
    fn review_state(&self) -> &ReviewState {
        (**self).review_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_default_state() {
        let state = ReviewState::new();
        assert_eq!(state.repetition_count, 0);
        assert_eq!(state.ease_factor, 2.5);
        assert_eq!(state.interval_days, 1);
        assert!(state.last_reviewed_at.is_none());
        assert!(state.next_review_at.is_none());
        assert!(state.is_new());
    }

    #[test]
    fn test_never_scheduled_is_due() {
        assert!(ReviewState::new().is_due(now()));
    }

    #[test]
    fn test_due_boundary() {
        let mut state = ReviewState::new();
        state.next_review_at = Some(now());
        assert!(state.is_due(now()));

        state.next_review_at = Some(now() + Duration::seconds(1));
        assert!(!state.is_due(now()));
    }

    #[test]
    fn test_validate_rejects_corrupted_state() {
        let mut state = ReviewState::new();
        state.ease_factor = 1.1;
        assert!(matches!(
            state.validate(MIN_EASE_FACTOR),
            Err(SchedulerError::InvalidState(_))
        ));

        let mut state = ReviewState::new();
        state.interval_days = 0;
        assert!(state.validate(MIN_EASE_FACTOR).is_err());

        assert!(ReviewState::new().validate(MIN_EASE_FACTOR).is_ok());
    }

    #[test]
    fn test_normalize_clamps() {
        let mut state = ReviewState::new();
        state.ease_factor = 0.4;
        state.interval_days = 0;
        state.accuracy_percent = Some(140.0);

        assert!(state.normalize(MIN_EASE_FACTOR));
        assert_eq!(state.ease_factor, MIN_EASE_FACTOR);
        assert_eq!(state.interval_days, 1);
        assert_eq!(state.accuracy_percent, Some(100.0));

        assert!(!state.normalize(MIN_EASE_FACTOR));
    }

    #[test]
    fn test_floor_below_minimum_is_ignored() {
        let mut state = ReviewState::new();
        state.ease_factor = 0.9;
        assert!(state.validate(0.5).is_err());

        assert!(state.normalize(0.5));
        assert_eq!(state.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_normalize_replaces_nan_ease() {
        let mut state = ReviewState::new();
        state.ease_factor = f64::NAN;
        assert!(state.normalize(MIN_EASE_FACTOR));
        assert_eq!(state.ease_factor, DEFAULT_EASE_FACTOR);
    }

    #[test]
    fn test_record_accuracy() {
        let mut state = ReviewState::new();
        state.record_accuracy(true);
        state.record_accuracy(false);
        state.record_accuracy(true);
        state.record_accuracy(true);

        assert_eq!(state.total_reviews, 4);
        assert_eq!(state.correct_reviews, 3);
        assert_eq!(state.accuracy_percent, Some(75.0));
    }

    #[test]
    fn test_counters_default_when_missing() {
        let json = r#"{
            "repetition_count": 2,
            "ease_factor": 2.36,
            "interval_days": 6,
            "last_reviewed_at": "2024-03-01T09:00:00Z",
            "next_review_at": "2024-03-07T09:00:00Z",
            "accuracy_percent": 80.0
        }"#;

        let state: ReviewState = serde_json::from_str(json).unwrap();
        assert_eq!(state.total_reviews, 0);
        assert_eq!(state.interval_days, 6);
        assert_eq!(state.next_review_at, Some(now() + Duration::days(6)));
    }
}
