//! Attendance metrics calculation functionality.
//!
//! This module derives worked hours, overtime, lateness and status from a
//! single [`AttendanceRecord`] measured against the configured
//! [`WorkSchedule`]. It is the only place attendance status is derived.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::config::WorkSchedule;
use crate::models::{AttendanceEntry, AttendanceMetrics, AttendanceRecord, AttendanceStatus};

const MINUTES_PER_HOUR: i64 = 60;

/// Calculates the metrics for one attendance record.
///
/// - `total_hours`: minutes between clock-in and clock-out, less the lunch
///   break when the span is strictly longer than the lunch threshold, in hours.
/// - `late_minutes`: minutes clocked in after the schedule start.
/// - `overtime_hours`: hours clocked out after the schedule end.
///
/// All three are zero when either clock time is missing. A clock-out before
/// the clock-in yields a zero span.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_attendance_metrics;
/// use payroll_engine::config::WorkSchedule;
/// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let record = AttendanceRecord::new(
///     10001,
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     NaiveTime::from_hms_opt(9, 30, 0),
///     NaiveTime::from_hms_opt(18, 30, 0),
/// );
///
/// let metrics = calculate_attendance_metrics(&record, &WorkSchedule::default());
/// assert_eq!(metrics.total_hours, Decimal::from(8));
/// assert_eq!(metrics.late_minutes, Decimal::from(90));
/// assert_eq!(metrics.overtime_hours, Decimal::ONE);
/// assert_eq!(metrics.status, AttendanceStatus::Late);
/// ```
pub fn calculate_attendance_metrics(
    record: &AttendanceRecord,
    schedule: &WorkSchedule,
) -> AttendanceMetrics {
    let (Some(time_in), Some(time_out)) = (record.time_in, record.time_out) else {
        return AttendanceMetrics::absent();
    };

    let mut worked_minutes = minutes_after(time_out, time_in);
    if worked_minutes > schedule.lunch_threshold_minutes {
        worked_minutes -= schedule.lunch_break_minutes;
    }

    let late_minutes = minutes_after(time_in, schedule.start_time);
    let overtime_minutes = minutes_after(time_out, schedule.end_time);

    AttendanceMetrics {
        total_hours: minutes_to_hours(worked_minutes),
        overtime_hours: minutes_to_hours(overtime_minutes),
        late_minutes: Decimal::from(late_minutes),
        is_complete: true,
        status: status_for(time_in, schedule),
    }
}

/// Derives the status of a record without computing the other metrics.
pub fn attendance_status(record: &AttendanceRecord, schedule: &WorkSchedule) -> AttendanceStatus {
    match (record.time_in, record.time_out) {
        (Some(time_in), Some(_)) => status_for(time_in, schedule),
        _ => AttendanceStatus::Absent,
    }
}

/// Pairs a record with its metrics.
pub fn attendance_entry(record: AttendanceRecord, schedule: &WorkSchedule) -> AttendanceEntry {
    let metrics = calculate_attendance_metrics(&record, schedule);
    AttendanceEntry { record, metrics }
}

fn status_for(time_in: NaiveTime, schedule: &WorkSchedule) -> AttendanceStatus {
    if time_in > schedule.start_time {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}

/// Whole minutes from `earlier` to `later`, zero if `later` is not after `earlier`.
fn minutes_after(later: NaiveTime, earlier: NaiveTime) -> i64 {
    if later > earlier {
        (later - earlier).num_minutes()
    } else {
        0
    }
}

fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes.max(0)) / Decimal::from(MINUTES_PER_HOUR)
}
