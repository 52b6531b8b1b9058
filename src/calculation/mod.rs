//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions: per-record attendance
//! metrics, allowance proration, capped statutory deductions, progressive
//! withholding tax, and the payroll aggregation that combines them.

mod allowance;
mod attendance_metrics;
mod payroll;
mod statutory_deduction;
mod withholding_tax;

pub use allowance::{AllowanceProrationResult, prorate_allowance, prorate_allowances};
pub use attendance_metrics::{attendance_entry, attendance_status, calculate_attendance_metrics};
pub use payroll::calculate_payroll;
pub use statutory_deduction::{
    StatutoryDeductionsResult, calculate_statutory_deductions, pagibig_deduction,
    philhealth_deduction, sss_deduction, statutory_deduction,
};
pub use withholding_tax::{WithholdingTaxResult, annual_tax, calculate_withholding_tax, withholding_tax};
