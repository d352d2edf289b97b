//! Error types shared across the scheduler.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SchedulerError {
    #[error("invalid quality {0}: expected an integer grade from 0 to 5")]
    InvalidQuality(String),
    #[error("invalid review state: {0}")]
    InvalidState(String),
}
