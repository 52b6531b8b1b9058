//! Payroll engine.
//!
//! [`PayrollEngine`] resolves an employee and their attendance through the
//! store traits and runs [`calculate_payroll`] over the requested range.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::calculation::calculate_payroll;
use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::models::{EmployeeProfile, PayPeriod, PayrollSummary};
use crate::store::{AttendanceSource, EmployeeSource};

/// Calculates payroll from an employee source and an attendance source.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::engine::PayrollEngine;
/// use payroll_engine::models::EmployeeProfile;
/// use payroll_engine::store::{AttendanceStore, EmployeeStore};
/// use chrono::NaiveDate;
///
/// let profile: EmployeeProfile = serde_json::from_str(
///     r#"{"id": 10001, "last_name": "Reyes", "first_name": "Ana", "basic_salary": "22000"}"#,
/// ).unwrap();
/// let employees = EmployeeStore::from_employees(vec![profile]).unwrap();
/// let attendance = AttendanceStore::new();
///
/// let engine = PayrollEngine::new(&employees, &attendance, PayrollConfig::default()).unwrap();
/// let summary = engine
///     .calculate_payroll(
///         10001,
///         NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
///     )
///     .unwrap();
/// assert_eq!(summary.attendance.days_present, 0);
/// ```
#[derive(Debug, Clone)]
pub struct PayrollEngine<E, A> {
    employees: E,
    attendance: A,
    config: PayrollConfig,
}

impl<E: EmployeeSource, A: AttendanceSource> PayrollEngine<E, A> {
    /// Creates an engine over the given sources.
    ///
    /// Fails with `InvalidConfig` when `config` does not validate.
    pub fn new(employees: E, attendance: A, config: PayrollConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            employees,
            attendance,
            config,
        })
    }

    /// Returns the configuration the engine calculates with.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Calculates payroll for the employee with the given id over `[start, end]`.
    ///
    /// Fails with `InvalidInput` when `start` is after `end` and with
    /// `EmployeeNotFound` when the id is unknown.
    pub fn calculate_payroll(
        &self,
        employee_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<PayrollSummary> {
        let period = PayPeriod::new(start, end)?;
        let employee = self.employees.fetch_by_id(employee_id)?;
        Ok(self.calculate_for_period(&employee, &period))
    }

    /// Calculates payroll for a profile the caller already holds.
    pub fn calculate_payroll_for(
        &self,
        employee: &EmployeeProfile,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<PayrollSummary> {
        let period = PayPeriod::new(start, end)?;
        Ok(self.calculate_for_period(employee, &period))
    }

    fn calculate_for_period(&self, employee: &EmployeeProfile, period: &PayPeriod) -> PayrollSummary {
        let records = self.attendance.fetch_by_employee_and_range(
            employee.id,
            period.start_date,
            period.end_date,
        );
        debug!(
            employee_id = employee.id,
            start = %period.start_date,
            end = %period.end_date,
            records = records.len(),
            "Fetched attendance"
        );

        let summary = calculate_payroll(employee, period, &records, &self.config);

        info!(
            employee_id = employee.id,
            days_present = summary.attendance.days_present,
            gross_pay = %summary.earnings.gross_pay.round_dp(2),
            net_pay = %summary.net_pay.round_dp(2),
            "Payroll calculated"
        );
        summary
    }
}
