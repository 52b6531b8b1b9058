//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type that bounds a payroll
//! calculation, together with the semi-monthly and monthly constructors used
//! to build standard periods.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date range that a payroll calculation covers.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::first_half(2026, 2).unwrap();
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 16).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period, rejecting a start after the end.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if start_date > end_date {
            return Err(EngineError::InvalidInput {
                field: "start_date".to_string(),
                message: format!("start {} is after end {}", start_date, end_date),
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days in the period.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// The whole calendar month. `None` for an invalid year or month.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end_date = last_day_of_month(year, month)?;
        Some(Self {
            start_date,
            end_date,
        })
    }

    /// Days 1 to 15 of the month.
    pub fn first_half(year: i32, month: u32) -> Option<Self> {
        Some(Self {
            start_date: NaiveDate::from_ymd_opt(year, month, 1)?,
            end_date: NaiveDate::from_ymd_opt(year, month, 15)?,
        })
    }

    /// Day 16 to the last day of the month.
    pub fn second_half(year: i32, month: u32) -> Option<Self> {
        Some(Self {
            start_date: NaiveDate::from_ymd_opt(year, month, 16)?,
            end_date: last_day_of_month(year, month)?,
        })
    }

    /// The calendar month containing `date`.
    pub fn month_containing(date: NaiveDate) -> Self {
        let start_date = date.with_day(1).unwrap_or(date);
        let end_date = last_day_of_month(date.year(), date.month()).unwrap_or(date);
        Self {
            start_date,
            end_date,
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
