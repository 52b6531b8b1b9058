//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load payroll configurations from YAML
//! files: the standard work schedule, pay rules, statutory contribution rates
//! and caps, and the withholding tax table.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Overtime rate: {}", config.pay().overtime_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionRule, Contributions, PayRules, PayrollConfig, ScheduleConfig, TaxBracket,
    TaxTable, WorkSchedule,
};
