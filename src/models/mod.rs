//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod pay_period;
mod payroll_summary;

pub use attendance::{AttendanceEntry, AttendanceMetrics, AttendanceRecord, AttendanceStatus};
pub use employee::{EmployeeProfile, EmploymentStatus, GovernmentIds};
pub use pay_period::PayPeriod;
pub use payroll_summary::{AttendanceTotals, AuditStep, Deductions, Earnings, PayrollSummary};
