//! Employee model and related types.
//!
//! This module defines the [`EmployeeProfile`] struct and [`EmploymentStatus`]
//! enum for representing workers on the payroll.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollConfig;

/// Represents the employee's employment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Regular (permanent) employment.
    #[default]
    Regular,
    /// On probation.
    Probationary,
    /// Fixed-term contract.
    Contractual,
    /// Part-time employment.
    PartTime,
}

impl EmploymentStatus {
    /// Parses a status label, falling back to `Regular` for unknown values.
    ///
    /// Accepts variant names (`PART_TIME`) and display names (`Part-Time`) in any case.
    ///
    /// ```
    /// use payroll_engine::models::EmploymentStatus;
    ///
    /// assert_eq!(EmploymentStatus::from_label("part-time"), EmploymentStatus::PartTime);
    /// assert_eq!(EmploymentStatus::from_label("unknown"), EmploymentStatus::Regular);
    /// ```
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "probationary" => EmploymentStatus::Probationary,
            "contractual" => EmploymentStatus::Contractual,
            "parttime" => EmploymentStatus::PartTime,
            _ => EmploymentStatus::Regular,
        }
    }

    /// Returns the human-readable name printed on payslips.
    pub fn display_name(&self) -> &'static str {
        match self {
            EmploymentStatus::Regular => "Regular",
            EmploymentStatus::Probationary => "Probationary",
            EmploymentStatus::Contractual => "Contractual",
            EmploymentStatus::PartTime => "Part-Time",
        }
    }
}

/// Government registration numbers printed on the payslip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernmentIds {
    /// Social Security System number.
    #[serde(default)]
    pub sss: String,
    /// PhilHealth number.
    #[serde(default)]
    pub philhealth: String,
    /// Tax identification number.
    #[serde(default)]
    pub tin: String,
    /// Pag-IBIG number.
    #[serde(default)]
    pub pagibig: String,
}

/// Represents an employee and their monthly compensation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: u32,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Date of birth, if known.
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Employment status.
    #[serde(default)]
    pub status: EmploymentStatus,
    /// Immediate supervisor's name.
    #[serde(default)]
    pub supervisor: String,
    /// Government registration numbers.
    #[serde(default)]
    pub government_ids: GovernmentIds,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly rice subsidy.
    #[serde(default)]
    pub rice_subsidy: Decimal,
    /// Monthly phone allowance.
    #[serde(default)]
    pub phone_allowance: Decimal,
    /// Monthly clothing allowance.
    #[serde(default)]
    pub clothing_allowance: Decimal,
    /// Stored hourly rate; derived from the basic salary when absent.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

impl EmployeeProfile {
    /// Returns `"Last, First"` as printed on payslips.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// Returns `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the hourly rate used for overtime.
    ///
    /// Uses the stored rate when present, otherwise
    /// `basic_salary / working_days_per_month / regular_hours_per_day`.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::config::PayrollConfig;
    /// use payroll_engine::models::EmployeeProfile;
    /// use rust_decimal::Decimal;
    ///
    /// let employee: EmployeeProfile = serde_json::from_str(
    ///     r#"{"id": 1, "last_name": "Reyes", "first_name": "Ana", "basic_salary": "22000"}"#,
    /// ).unwrap();
    /// assert_eq!(employee.hourly_rate(&PayrollConfig::default()), Decimal::from(125));
    /// ```
    pub fn hourly_rate(&self, config: &PayrollConfig) -> Decimal {
        if let Some(rate) = self.hourly_rate {
            return rate;
        }
        let working_days = Decimal::from(config.pay.working_days_per_month);
        let hours_per_day = config.schedule.regular_hours_per_day;
        if working_days.is_zero() || hours_per_day.is_zero() {
            return Decimal::ZERO;
        }
        self.basic_salary / working_days / hours_per_day
    }

    /// Half the monthly basic salary.
    pub fn semi_monthly_rate(&self) -> Decimal {
        self.basic_salary / Decimal::from(2)
    }

    /// Sum of the three monthly allowances.
    pub fn monthly_allowances(&self) -> Decimal {
        self.rice_subsidy + self.phone_allowance + self.clothing_allowance
    }
}
