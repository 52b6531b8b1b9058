//! Request types for the payroll API.
//!
//! Dates and times arrive as text and are parsed leniently: payroll ranges
//! fall back to the current month, while clock events reject bad input.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PayPeriod;
use crate::parsing::{parse_date, parse_time};

/// Request body for `/payroll` and `/payslip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee to calculate payroll for.
    pub employee_id: u32,
    /// Period start, `YYYY-MM-DD` or `MM/DD/YYYY`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Period end, `YYYY-MM-DD` or `MM/DD/YYYY`.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl PayrollRequest {
    /// Resolves the requested range.
    ///
    /// When either date is missing or unparseable, the calendar month
    /// containing `today` is used instead.
    pub fn resolve_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = self.start_date.as_deref().and_then(parse_date);
        let end = self.end_date.as_deref().and_then(parse_date);

        match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                let month = PayPeriod::month_containing(today);
                (month.start_date, month.end_date)
            }
        }
    }
}

/// Request body for `/attendance/clock-in` and `/attendance/clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The employee clocking in or out.
    pub employee_id: u32,
    /// Day of the clock event; today when omitted.
    #[serde(default)]
    pub date: Option<String>,
    /// Time of the clock event; now when omitted.
    #[serde(default)]
    pub time: Option<String>,
}

impl ClockRequest {
    /// Resolves the date and time, defaulting missing values to `now`.
    pub fn resolve(&self, now_date: NaiveDate, now_time: NaiveTime) -> EngineResult<(NaiveDate, NaiveTime)> {
        let date = match self.date.as_deref() {
            Some(text) => parse_date(text).ok_or_else(|| invalid("date", text))?,
            None => now_date,
        };
        let time = match self.time.as_deref() {
            Some(text) => parse_time(text).ok_or_else(|| invalid("time", text))?,
            None => now_time,
        };
        Ok((date, time))
    }
}

fn invalid(field: &str, value: &str) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: format!("cannot parse '{}'", value),
    }
}
