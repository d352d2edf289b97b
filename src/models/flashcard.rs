//! Flashcard is a question/answer pair with its review history.
use super::{ReviewState, Schedulable};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub review: ReviewState,
}

impl Flashcard {
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
            tags: Vec::new(),
            review: ReviewState::default(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_review(mut self, review: ReviewState) -> Self {
        self.review = review;
        self
    }
}

impl Schedulable for Flashcard {
    fn review_state(&self) -> &ReviewState {
        &self.review
    }
}
