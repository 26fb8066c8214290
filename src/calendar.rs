use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{ContasError, Result};

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// The (month, year) pair an expense is filed under. `month` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthBucket {
    pub month: u32,
    pub year: i32,
}

impl MonthBucket {
    /// Bucket for the calendar month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month0(),
            year: date.year(),
        }
    }

    /// The calendar month after this one, rolling into January of the next year.
    pub fn following(self) -> Self {
        if self.month >= 11 {
            Self {
                month: 0,
                year: self.year + 1,
            }
        } else {
            Self {
                month: self.month + 1,
                year: self.year,
            }
        }
    }

    /// e.g. "Janeiro 2026"
    pub fn label(&self) -> String {
        let name = MONTH_NAMES.get(self.month as usize).copied().unwrap_or("?");
        format!("{name} {}", self.year)
    }

    /// Parse a `YYYY-MM` string (1-based month on input).
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || ContasError::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self {
            month: month - 1,
            year,
        })
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

/// The planning horizon: the month after the one `today` falls in.
pub fn next_month_from(today: NaiveDate) -> MonthBucket {
    MonthBucket::containing(today).following()
}

/// Next month relative to the local wall clock.
pub fn next_month() -> MonthBucket {
    next_month_from(Local::now().date_naive())
}
