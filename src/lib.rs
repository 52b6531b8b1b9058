//! Attendance-driven payroll engine.
//!
//! This crate turns employee profiles and daily clock-in/clock-out records
//! into payroll summaries: worked hours, overtime and lateness per day,
//! prorated allowances, statutory contributions (SSS, PhilHealth, Pag-IBIG),
//! withholding tax and net pay, each step recorded in an audit trace.
//!
//! The [`engine::PayrollEngine`] ties the data sources in [`store`] to the
//! pure calculators in [`calculation`]; [`report`] renders the result as a
//! text payslip and [`api`] serves it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod parsing;
pub mod report;
pub mod store;
