//! Learning session management for spaced repetition practice.
//! Handles multi-round flashcard review with SM-2 scheduling.

use super::{Flashcard, LearningCard, Quality};
use crate::error::SchedulerError;
use crate::scheduler::{ReviewOutcome, Scheduler, prioritize, select_due_cards};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Manages a learning session with multiple review rounds.
/// Cards that aren't recalled (grade < 3) are repeated in subsequent rounds.
pub struct LearningSession {
    pub deck_name: String,
    pub all_cards: Vec<LearningCard>,
    pub current_round_cards: Vec<usize>,
    pub current_index: usize,
    pub show_answer: bool,
    pub round_number: usize,
    scheduler: Scheduler,
}

impl LearningSession {
    /// Creates a session over the given cards, in the given order.
    pub fn new(deck_name: String, cards: Vec<Flashcard>, scheduler: Scheduler) -> Self {
        let learning_cards: Vec<_> = cards.into_iter().map(LearningCard::new).collect();
        let indices: Vec<usize> = (0..learning_cards.len()).collect();

        Self {
            deck_name,
            all_cards: learning_cards,
            current_round_cards: indices,
            current_index: 0,
            show_answer: false,
            round_number: 1,
            scheduler,
        }
    }

    /// Creates a new learning session from the cards that are due at `now`,
    /// in priority order, keeping at most `limit` of them.
    pub fn from_due_cards(
        deck_name: String,
        cards: &[Flashcard],
        now: DateTime<Utc>,
        scheduler: Scheduler,
        limit: Option<usize>,
    ) -> Self {
        let mut planned: Vec<Flashcard> = prioritize(select_due_cards(cards, now))
            .into_iter()
            .cloned()
            .collect();
        if let Some(limit) = limit {
            planned.truncate(limit);
        }

        info!(
            deck = %deck_name,
            due = planned.len(),
            total = cards.len(),
            "planned learning session"
        );
        Self::new(deck_name, planned, scheduler)
    }

    /// The card to show next, or `None` once the session is completed.
    pub fn current_card(&self) -> Option<&LearningCard> {
        if self.is_completed() {
            return None;
        }
        self.current_round_cards
            .get(self.current_index)
            .and_then(|&idx| self.all_cards.get(idx))
    }

    pub fn toggle_answer(&mut self) {
        self.show_answer = !self.show_answer;
    }

    pub fn next_card(&mut self) {
        if self.current_index + 1 < self.current_round_cards.len() {
            self.current_index += 1;
            self.show_answer = false;
        } else {
            // End of round - check if there are cards to review
            self.start_next_round();
        }
    }

    /// Starts a new round with cards that weren't recalled (grade < 3).
    /// If no cards remain, the session is complete.
    fn start_next_round(&mut self) {
        let failed_indices: Vec<usize> = self
            .current_round_cards
            .iter()
            .copied()
            .filter(|&idx| {
                self.all_cards
                    .get(idx)
                    .map(|card| !card.is_learned)
                    .unwrap_or(false)
            })
            .collect();

        if !failed_indices.is_empty() {
            self.current_round_cards = failed_indices;
            self.current_index = 0;
            self.show_answer = false;
            self.round_number += 1;
            debug!(
                round = self.round_number,
                cards = self.current_round_cards.len(),
                "starting review round"
            );
        }
    }

    /// Grades the current card and updates its review state using SM-2.
    /// Cards with grade >= 3 are marked as learned for this session.
    /// A completed session grades nothing and returns `Ok(None)`.
    pub fn grade_current_card(
        &mut self,
        quality: u8,
        now: DateTime<Utc>,
    ) -> Result<Option<ReviewOutcome>, SchedulerError> {
        let successful = Quality::new(quality)?.is_successful();
        if self.is_completed() {
            return Ok(None);
        }
        let Some(&actual_idx) = self.current_round_cards.get(self.current_index) else {
            return Ok(None);
        };
        let Some(card) = self.all_cards.get_mut(actual_idx) else {
            return Ok(None);
        };

        let outcome = self
            .scheduler
            .compute_next_review(&card.flashcard.review, quality, now)?;

        if successful {
            card.mark_as_learned(now);
        } else {
            card.is_learned = false; // Will be repeated in next round
        }
        card.flashcard.review = outcome.state.clone();

        Ok(Some(outcome))
    }

    pub fn learned_count(&self) -> usize {
        self.current_round_cards
            .iter()
            .filter(|&&idx| {
                self.all_cards
                    .get(idx)
                    .map(|card| card.is_learned)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round_cards.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.learned_count()
    }

    /// Returns true when all cards have been recalled or the round is empty.
    pub fn is_completed(&self) -> bool {
        self.current_round_cards.is_empty() || self.learned_count() == self.total_count()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Review): {} cards to retry",
                self.round_number,
                self.total_count()
            )
        }
    }

    /// Hands the cards back, with their latest review state, for persisting.
    pub fn into_cards(self) -> Vec<Flashcard> {
        self.all_cards.into_iter().map(|card| card.flashcard).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewState;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 2, 18, 0, 0).unwrap()
    }

    fn deck_cards() -> Vec<Flashcard> {
        let mut studied = Flashcard::new("studied", "Capital of France?", "Paris");
        studied.review = ReviewState {
            last_reviewed_at: Some(now() - Duration::days(3)),
            next_review_at: Some(now() - Duration::days(1)),
            accuracy_percent: Some(40.0),
            ..ReviewState::default()
        };
        let mut not_due = Flashcard::new("not_due", "Capital of Spain?", "Madrid");
        not_due.review.next_review_at = Some(now() + Duration::days(4));
        let fresh = Flashcard::new("fresh", "Capital of Italy?", "Rome");

        vec![studied, not_due, fresh]
    }

    fn session() -> LearningSession {
        LearningSession::from_due_cards(
            "Geography".to_string(),
            &deck_cards(),
            now(),
            Scheduler::default(),
            None,
        )
    }

    fn current_id(session: &LearningSession) -> &str {
        session.current_card().unwrap().flashcard.id.as_str()
    }

    #[test]
    fn test_plans_due_cards_in_priority_order() {
        let session = session();
        assert_eq!(session.total_count(), 2);
        assert_eq!(current_id(&session), "fresh");
        assert_eq!(session.phase_message(), "Round 1: 2 cards");
    }

    #[test]
    fn test_limit_truncates_plan() {
        let session = LearningSession::from_due_cards(
            "Geography".to_string(),
            &deck_cards(),
            now(),
            Scheduler::default(),
            Some(1),
        );
        assert_eq!(session.total_count(), 1);
        assert_eq!(current_id(&session), "fresh");
    }

    #[test]
    fn test_failed_cards_repeat_in_next_round() {
        let mut session = session();

        session.grade_current_card(5, now()).unwrap();
        session.next_card();
        assert_eq!(current_id(&session), "studied");
        session.grade_current_card(1, now()).unwrap();
        assert_eq!(session.learned_count(), 1);
        assert!(!session.is_completed());

        session.next_card();
        assert_eq!(session.round_number, 2);
        assert_eq!(session.total_count(), 1);
        assert_eq!(current_id(&session), "studied");
        assert_eq!(session.phase_message(), "Round 2 (Review): 1 cards to retry");

        session.grade_current_card(4, now()).unwrap();
        assert!(session.is_completed());
        assert_eq!(session.remaining_count(), 0);
    }

    #[test]
    fn test_grading_updates_review_state() {
        let mut session = session();
        let outcome = session.grade_current_card(4, now()).unwrap().unwrap();

        assert_eq!(outcome.interval_days, 1);
        let cards = session.into_cards();
        let fresh = cards.iter().find(|card| card.id == "fresh").unwrap();
        assert_eq!(fresh.review.repetition_count, 1);
        assert_eq!(fresh.review.next_review_at, Some(now() + Duration::days(1)));
        assert_eq!(fresh.review.last_reviewed_at, Some(now()));
    }

    #[test]
    fn test_invalid_grade_leaves_card_untouched() {
        let mut session = session();
        let result = session.grade_current_card(9, now());

        assert!(matches!(result, Err(SchedulerError::InvalidQuality(_))));
        let card = session.current_card().unwrap();
        assert!(!card.is_learned);
        assert_eq!(card.flashcard.review, ReviewState::default());
    }

    #[test]
    fn test_completed_session_does_not_grade_again() {
        let mut session = LearningSession::new(
            "Single".to_string(),
            vec![Flashcard::new("a", "2 + 2?", "4")],
            Scheduler::default(),
        );

        session.grade_current_card(5, now()).unwrap();
        session.next_card();
        assert!(session.is_completed());
        assert!(session.current_card().is_none());

        assert!(session.grade_current_card(5, now()).unwrap().is_none());
        let cards = session.into_cards();
        assert_eq!(cards[0].review.repetition_count, 1);
        assert_eq!(cards[0].review.total_reviews, 1);
    }

    #[test]
    fn test_toggle_answer_resets_on_next_card() {
        let mut session = session();
        session.toggle_answer();
        assert!(session.show_answer);
        session.next_card();
        assert!(!session.show_answer);
    }

    #[test]
    fn test_empty_session_is_complete() {
        let mut session =
            LearningSession::new("Empty".to_string(), Vec::new(), Scheduler::default());
        assert!(session.is_completed());
        assert!(session.current_card().is_none());
        session.next_card();
        assert!(session.grade_current_card(5, now()).unwrap().is_none());
    }
}
