use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::core::Word;

/// Source of "today" for daily resets.
///
/// Days are calendar dates with no time component, so every record made on the
/// same date compares equal regardless of when during the day it was written.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Calendar days in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

impl Clock for NaiveDate {
    fn today(&self) -> NaiveDate {
        *self
    }
}

/// The answer shared by every player for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWord {
    pub word: Word,
    pub date: NaiveDate,
}

impl DailyWord {
    pub fn new(word: Word, date: NaiveDate) -> Self {
        Self { word, date }
    }

    pub fn is_from(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}
