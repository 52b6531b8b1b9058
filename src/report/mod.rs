//! Printed payroll reports.
//!
//! Renders a [`PayrollSummary`](crate::models::PayrollSummary) as a fixed-layout
//! text payslip and attendance table. Amounts are rounded to 2 decimals here
//! and nowhere else.

mod attendance_table;
mod format;
mod payslip;

pub use attendance_table::{AttendanceTable, render_attendance_table};
pub use format::{format_long_date, format_money, format_quantity};
pub use payslip::{Payslip, payslip_file_name, render_payslip_text, save_payslip};
