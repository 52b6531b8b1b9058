//! Allowance proration functionality.
//!
//! Monthly fixed allowances (rice subsidy, phone and clothing) are paid in
//! proportion to the days present in the pay period.

use rust_decimal::Decimal;

use crate::models::{AuditStep, EmployeeProfile};

/// The result of prorating an employee's allowances, including the audit step.
#[derive(Debug, Clone)]
pub struct AllowanceProrationResult {
    /// Prorated rice subsidy.
    pub rice_subsidy: Decimal,
    /// Prorated phone allowance.
    pub phone_allowance: Decimal,
    /// Prorated clothing allowance.
    pub clothing_allowance: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl AllowanceProrationResult {
    /// Sum of the three prorated allowances.
    pub fn total(&self) -> Decimal {
        self.rice_subsidy + self.phone_allowance + self.clothing_allowance
    }
}

/// Prorates a monthly amount by days present.
///
/// Returns `(monthly / working_days_per_month) * days_present`, or zero when
/// no days are present or the month has no working days.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::prorate_allowance;
/// use rust_decimal::Decimal;
///
/// let amount = prorate_allowance(Decimal::from(2200), 22, 10);
/// assert_eq!(amount, Decimal::from(1000));
///
/// assert_eq!(prorate_allowance(Decimal::from(2200), 22, 0), Decimal::ZERO);
/// ```
pub fn prorate_allowance(monthly: Decimal, working_days_per_month: u32, days_present: u32) -> Decimal {
    if days_present == 0 || working_days_per_month == 0 {
        return Decimal::ZERO;
    }
    (monthly / Decimal::from(working_days_per_month)) * Decimal::from(days_present)
}

/// Prorates all three of an employee's allowances.
pub fn prorate_allowances(
    employee: &EmployeeProfile,
    working_days_per_month: u32,
    days_present: u32,
    step_number: u32,
) -> AllowanceProrationResult {
    let rice_subsidy = prorate_allowance(employee.rice_subsidy, working_days_per_month, days_present);
    let phone_allowance =
        prorate_allowance(employee.phone_allowance, working_days_per_month, days_present);
    let clothing_allowance =
        prorate_allowance(employee.clothing_allowance, working_days_per_month, days_present);

    let total = rice_subsidy + phone_allowance + clothing_allowance;

    let audit_step = AuditStep {
        step_number,
        rule_id: "allowance_proration".to_string(),
        rule_name: "Allowance Proration".to_string(),
        input: serde_json::json!({
            "monthly_rice_subsidy": employee.rice_subsidy.normalize().to_string(),
            "monthly_phone_allowance": employee.phone_allowance.normalize().to_string(),
            "monthly_clothing_allowance": employee.clothing_allowance.normalize().to_string(),
            "working_days_per_month": working_days_per_month,
            "days_present": days_present
        }),
        output: serde_json::json!({
            "rice_subsidy": rice_subsidy.round_dp(2).to_string(),
            "phone_allowance": phone_allowance.round_dp(2).to_string(),
            "clothing_allowance": clothing_allowance.round_dp(2).to_string(),
            "total": total.round_dp(2).to_string()
        }),
        reasoning: format!(
            "Monthly allowances {} / {} working days × {} days present = {}",
            employee.monthly_allowances().normalize(),
            working_days_per_month,
            days_present,
            total.round_dp(2)
        ),
    };

    AllowanceProrationResult {
        rice_subsidy,
        phone_allowance,
        clothing_allowance,
        audit_step,
    }
}
