//! Recall grade for a single review event.
//!
//! 0-2 means the card was not recalled (a lapse), 3-5 means it was recalled
//! with increasing confidence.

use crate::error::SchedulerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_QUALITY: u8 = 5;
pub const PASSING_QUALITY: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Result<Self, SchedulerError> {
        if value > MAX_QUALITY {
            return Err(SchedulerError::InvalidQuality(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// True for grades of 3 and above.
    pub fn is_successful(self) -> bool {
        self.0 >= PASSING_QUALITY
    }
}

impl TryFrom<u8> for Quality {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Quality {
    type Error = SchedulerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| SchedulerError::InvalidQuality(value.to_string()))
            .and_then(Self::new)
    }
}

impl TryFrom<f64> for Quality {
    type Error = SchedulerError;

    /// Rejects fractional and non-finite grades instead of rounding them.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite()
            || value.fract() != 0.0
            || !(0.0..=MAX_QUALITY as f64).contains(&value)
        {
            return Err(SchedulerError::InvalidQuality(value.to_string()));
        }
        Self::new(value as u8)
    }
}

impl FromStr for Quality {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(whole) = trimmed.parse::<i64>() {
            return Self::try_from(whole);
        }
        trimmed
            .parse::<f64>()
            .map_err(|_| SchedulerError::InvalidQuality(trimmed.to_string()))
            .and_then(Self::try_from)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
