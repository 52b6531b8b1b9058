//! Payroll summary models.
//!
//! This module contains the [`PayrollSummary`] type and its associated
//! structures that capture every output of a payroll calculation: attendance
//! totals, earnings, deductions, net pay and the audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttendanceEntry, EmployeeProfile, PayPeriod};

/// Attendance sums over the pay period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTotals {
    /// Number of attendance records in the period.
    pub days_present: u32,
    /// Hours worked after lunch deductions.
    pub total_hours: Decimal,
    /// Hours worked past the schedule end.
    pub overtime_hours: Decimal,
    /// Minutes late across all records.
    pub late_minutes: Decimal,
}

/// Earnings breakdown.
///
/// `gross_pay` always equals `regular_pay + overtime_pay` plus the three
/// prorated allowances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    /// Monthly basic salary divided by working days per month.
    pub daily_rate: Decimal,
    /// Rate used for overtime before the overtime multiplier.
    pub hourly_rate: Decimal,
    /// Daily rate times days present.
    pub regular_pay: Decimal,
    /// Overtime hours times hourly rate times the overtime multiplier.
    pub overtime_pay: Decimal,
    /// Prorated rice subsidy.
    pub rice_subsidy: Decimal,
    /// Prorated phone allowance.
    pub phone_allowance: Decimal,
    /// Prorated clothing allowance.
    pub clothing_allowance: Decimal,
    /// Total earnings.
    pub gross_pay: Decimal,
}

impl Earnings {
    /// Sum of the three prorated allowances.
    pub fn allowances_total(&self) -> Decimal {
        self.rice_subsidy + self.phone_allowance + self.clothing_allowance
    }
}

/// Deductions breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Social-insurance contribution.
    pub sss: Decimal,
    /// Health-insurance contribution.
    pub philhealth: Decimal,
    /// Housing-fund contribution.
    pub pagibig: Decimal,
    /// Income tax withheld for the period.
    pub withholding_tax: Decimal,
    /// Statutory contributions plus withholding tax.
    pub total_deductions: Decimal,
}

impl Deductions {
    /// Sum of the three statutory contributions.
    pub fn statutory_total(&self) -> Decimal {
        self.sss + self.philhealth + self.pagibig
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
/// Steps carry no timestamps so identical inputs produce identical traces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete payroll result for one employee over one pay period.
///
/// Amounts are kept at full precision; rounding happens when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The employee the summary is for.
    pub employee: EmployeeProfile,
    /// The period covered.
    pub pay_period: PayPeriod,
    /// Currency label for rendering amounts.
    pub currency: String,
    /// Records in the period, sorted by date, with their metrics.
    pub entries: Vec<AttendanceEntry>,
    /// Attendance sums.
    pub attendance: AttendanceTotals,
    /// Earnings breakdown.
    pub earnings: Earnings,
    /// Deductions breakdown.
    pub deductions: Deductions,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
    /// Every calculation step in order.
    pub audit_trace: Vec<AuditStep>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_allowances_total() {
        let earnings = Earnings {
            rice_subsidy: dec("1500"),
            phone_allowance: dec("500"),
            clothing_allowance: dec("1000"),
            ..Earnings::default()
        };
        assert_eq!(earnings.allowances_total(), dec("3000"));
    }

    #[test]
    fn test_statutory_total_excludes_tax() {
        let deductions = Deductions {
            sss: dec("1125"),
            philhealth: dec("1800"),
            pagibig: dec("100"),
            withholding_tax: dec("2083.33"),
            total_deductions: dec("5108.33"),
        };
        assert_eq!(deductions.statutory_total(), dec("3025"));
    }

    #[test]
    fn test_default_totals_are_zero() {
        let totals = AttendanceTotals::default();
        assert_eq!(totals.days_present, 0);
        assert_eq!(totals.total_hours, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "statutory_sss".to_string(),
            rule_name: "SSS Contribution".to_string(),
            input: serde_json::json!({ "basic_salary": "30000" }),
            output: serde_json::json!({ "amount": "1125" }),
            reasoning: "Capped at 1125".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"rule_id\":\"statutory_sss\""));

        let deserialized: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(step, deserialized);
    }

    #[test]
    fn test_decimals_serialize_as_strings() {
        let deductions = Deductions {
            sss: dec("1125"),
            ..Deductions::default()
        };
        let json = serde_json::to_value(deductions).unwrap();
        assert_eq!(json["sss"], serde_json::json!("1125"));
    }
}
