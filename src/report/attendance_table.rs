//! Attendance table rendering.

use std::fmt;

use crate::models::PayrollSummary;

use super::format::format_quantity;

const RULE: &str = "------------------------------------------------------------------------";

/// One row per attendance entry plus a totals line.
///
/// Columns: date, time in, time out, hours, overtime hours, late minutes, status.
#[derive(Debug, Clone, Copy)]
pub struct AttendanceTable<'a>(pub &'a PayrollSummary);

impl fmt::Display for AttendanceTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;

        writeln!(
            f,
            "{:<12} | {:<8} | {:<8} | {:>6} | {:>8} | {:>6} | {:<8}",
            "Date", "Time In", "Time Out", "Hours", "OT Hours", "Late", "Status"
        )?;
        writeln!(f, "{}", RULE)?;

        for entry in &summary.entries {
            let record = &entry.record;
            let metrics = &entry.metrics;
            writeln!(
                f,
                "{:<12} | {:<8} | {:<8} | {:>6} | {:>8} | {:>6} | {:<8}",
                record.date.format("%m/%d/%Y").to_string(),
                record.formatted_time_in(),
                record.formatted_time_out(),
                format_quantity(metrics.total_hours),
                format_quantity(metrics.overtime_hours),
                metrics.late_minutes.normalize().to_string(),
                metrics.status.as_str()
            )?;
        }

        let totals = &summary.attendance;
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "{:<12} | {:<8} | {:<8} | {:>6} | {:>8} | {:>6} | {} days",
            "TOTAL",
            "",
            "",
            format_quantity(totals.total_hours),
            format_quantity(totals.overtime_hours),
            totals.late_minutes.normalize().to_string(),
            totals.days_present
        )
    }
}

/// Renders the [`AttendanceTable`] for a summary.
pub fn render_attendance_table(summary: &PayrollSummary) -> String {
    AttendanceTable(summary).to_string()
}
