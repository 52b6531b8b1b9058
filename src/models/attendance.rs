//! Attendance model and related types.
//!
//! This module defines the [`AttendanceRecord`] stored per employee per day,
//! and the [`AttendanceMetrics`] derived from it by
//! [`calculate_attendance_metrics`](crate::calculation::calculate_attendance_metrics).

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Attendance outcome for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Both clock times recorded, clock-in on time.
    Present,
    /// Both clock times recorded, clock-in after the schedule start.
    Late,
    /// At least one clock time missing.
    Absent,
}

impl AttendanceStatus {
    /// Returns the upper-case label used on reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Late => "LATE",
            AttendanceStatus::Absent => "ABSENT",
        }
    }
}

/// One employee on one calendar date.
///
/// Either clock time may be missing: a record created at clock-in has no
/// `time_out` until the employee clocks out.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let record = AttendanceRecord::new(
///     10001,
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     NaiveTime::from_hms_opt(8, 0, 0),
///     None,
/// );
/// assert!(!record.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: u32,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Clock-in time, if recorded.
    #[serde(default)]
    pub time_in: Option<NaiveTime>,
    /// Clock-out time, if recorded.
    #[serde(default)]
    pub time_out: Option<NaiveTime>,
}

impl AttendanceRecord {
    /// Creates a new attendance record.
    pub fn new(
        employee_id: u32,
        date: NaiveDate,
        time_in: Option<NaiveTime>,
        time_out: Option<NaiveTime>,
    ) -> Self {
        Self {
            employee_id,
            date,
            time_in,
            time_out,
        }
    }

    /// The store key: at most one record exists per key.
    pub fn key(&self) -> (u32, NaiveDate) {
        (self.employee_id, self.date)
    }

    /// Returns true when both clock times are recorded.
    pub fn is_complete(&self) -> bool {
        self.time_in.is_some() && self.time_out.is_some()
    }

    /// Rejects a clock-out earlier than the clock-in.
    ///
    /// Records are same-day wall-clock spans, so an earlier clock-out cannot
    /// be interpreted as an overnight shift.
    pub fn validate(&self) -> EngineResult<()> {
        if let (Some(time_in), Some(time_out)) = (self.time_in, self.time_out) {
            if time_out < time_in {
                return Err(EngineError::InvalidInput {
                    field: "time_out".to_string(),
                    message: format!(
                        "clock-out {} is earlier than clock-in {} on {}",
                        time_out.format("%H:%M"),
                        time_in.format("%H:%M"),
                        self.date
                    ),
                });
            }
        }
        Ok(())
    }

    /// Clock-in formatted as `HH:MM`, or `N/A` when missing.
    pub fn formatted_time_in(&self) -> String {
        format_clock(self.time_in)
    }

    /// Clock-out formatted as `HH:MM`, or `N/A` when missing.
    pub fn formatted_time_out(&self) -> String {
        format_clock(self.time_out)
    }
}

fn format_clock(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Values derived from one attendance record against the work schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMetrics {
    /// Hours worked after the lunch deduction.
    pub total_hours: Decimal,
    /// Hours worked past the schedule end.
    pub overtime_hours: Decimal,
    /// Minutes clocked in after the schedule start.
    pub late_minutes: Decimal,
    /// Whether both clock times are recorded.
    pub is_complete: bool,
    /// Present, late or absent.
    pub status: AttendanceStatus,
}

impl AttendanceMetrics {
    /// Metrics for a record with a missing clock time.
    pub fn absent() -> Self {
        Self {
            total_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            late_minutes: Decimal::ZERO,
            is_complete: false,
            status: AttendanceStatus::Absent,
        }
    }
}

/// An attendance record paired with its derived metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// The stored record.
    pub record: AttendanceRecord,
    /// The metrics derived from it.
    pub metrics: AttendanceMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_time(time_str: &str) -> NaiveTime {
        NaiveTime::parse_from_str(time_str, "%H:%M").unwrap()
    }

    #[test]
    fn test_complete_record() {
        let record = AttendanceRecord::new(
            10001,
            make_date("2026-03-02"),
            Some(make_time("08:00")),
            Some(make_time("17:00")),
        );
        assert!(record.is_complete());
        assert_eq!(record.key(), (10001, make_date("2026-03-02")));
    }

    #[test]
    fn test_open_record_is_incomplete() {
        let record =
            AttendanceRecord::new(10001, make_date("2026-03-02"), Some(make_time("08:00")), None);
        assert!(!record.is_complete());
    }

    #[test]
    fn test_validate_accepts_missing_times() {
        let record = AttendanceRecord::new(10001, make_date("2026-03-02"), None, None);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_clock_out_before_clock_in() {
        let record = AttendanceRecord::new(
            10001,
            make_date("2026-03-02"),
            Some(make_time("17:00")),
            Some(make_time("08:00")),
        );

        match record.validate() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "time_out");
                assert!(message.contains("08:00"));
                assert!(message.contains("17:00"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_equal_times() {
        let record = AttendanceRecord::new(
            10001,
            make_date("2026-03-02"),
            Some(make_time("09:00")),
            Some(make_time("09:00")),
        );
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_formatted_times() {
        let record =
            AttendanceRecord::new(10001, make_date("2026-03-02"), Some(make_time("08:05")), None);
        assert_eq!(record.formatted_time_in(), "08:05");
        assert_eq!(record.formatted_time_out(), "N/A");
    }

    #[test]
    fn test_record_deserialization_with_missing_time_out() {
        let json = r#"{
            "employee_id": 10001,
            "date": "2026-03-02",
            "time_in": "08:00:00"
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.time_in, Some(make_time("08:00")));
        assert_eq!(record.time_out, None);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Late).unwrap(),
            "\"late\""
        );
        assert_eq!(AttendanceStatus::Absent.as_str(), "ABSENT");
    }

    #[test]
    fn test_absent_metrics_are_zero() {
        let metrics = AttendanceMetrics::absent();
        assert_eq!(metrics.total_hours, Decimal::ZERO);
        assert_eq!(metrics.overtime_hours, Decimal::ZERO);
        assert_eq!(metrics.late_minutes, Decimal::ZERO);
        assert_eq!(metrics.status, AttendanceStatus::Absent);
    }
}
