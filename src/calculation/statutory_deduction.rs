//! Statutory deduction calculation functionality.
//!
//! Each government program deducts a fixed percentage of the full monthly
//! basic salary, capped at a fixed ceiling. Contributions are never prorated
//! by attendance.

use rust_decimal::Decimal;

use crate::config::{ContributionRule, Contributions};
use crate::models::AuditStep;

/// The result of calculating all statutory deductions, including audit steps.
#[derive(Debug, Clone)]
pub struct StatutoryDeductionsResult {
    /// Social-insurance contribution.
    pub sss: Decimal,
    /// Health-insurance contribution.
    pub philhealth: Decimal,
    /// Housing-fund contribution.
    pub pagibig: Decimal,
    /// One audit step per program, in the order SSS, PhilHealth, Pag-IBIG.
    pub audit_steps: Vec<AuditStep>,
}

impl StatutoryDeductionsResult {
    /// Sum of the three contributions.
    pub fn total(&self) -> Decimal {
        self.sss + self.philhealth + self.pagibig
    }
}

/// Returns `min(basic_salary * rule.rate, rule.cap)`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::statutory_deduction;
/// use payroll_engine::config::ContributionRule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rule = ContributionRule {
///     rate: Decimal::from_str("0.045").unwrap(),
///     cap: Decimal::from(1125),
/// };
///
/// assert_eq!(statutory_deduction(Decimal::from(20000), &rule), Decimal::from(900));
/// assert_eq!(statutory_deduction(Decimal::from(30000), &rule), Decimal::from(1125));
/// ```
pub fn statutory_deduction(basic_salary: Decimal, rule: &ContributionRule) -> Decimal {
    (basic_salary * rule.rate).min(rule.cap)
}

/// Social-insurance (SSS) contribution.
pub fn sss_deduction(basic_salary: Decimal, contributions: &Contributions) -> Decimal {
    statutory_deduction(basic_salary, &contributions.sss)
}

/// Health-insurance (PhilHealth) contribution.
pub fn philhealth_deduction(basic_salary: Decimal, contributions: &Contributions) -> Decimal {
    statutory_deduction(basic_salary, &contributions.philhealth)
}

/// Housing-fund (Pag-IBIG) contribution.
pub fn pagibig_deduction(basic_salary: Decimal, contributions: &Contributions) -> Decimal {
    statutory_deduction(basic_salary, &contributions.pagibig)
}

/// Calculates the three contributions and records an audit step for each.
pub fn calculate_statutory_deductions(
    basic_salary: Decimal,
    contributions: &Contributions,
    start_step_number: u32,
) -> StatutoryDeductionsResult {
    let programs = [
        ("sss", "SSS Contribution", &contributions.sss),
        ("philhealth", "PhilHealth Contribution", &contributions.philhealth),
        ("pagibig", "Pag-IBIG Contribution", &contributions.pagibig),
    ];

    let mut amounts = [Decimal::ZERO; 3];
    let mut audit_steps = Vec::with_capacity(programs.len());

    for (i, (program, rule_name, rule)) in programs.into_iter().enumerate() {
        let uncapped = basic_salary * rule.rate;
        let amount = statutory_deduction(basic_salary, rule);
        let cap_applied = uncapped > rule.cap;
        amounts[i] = amount;

        let reasoning = if cap_applied {
            format!(
                "{} × {} = {} (capped at {})",
                basic_salary.normalize(),
                rule.rate.normalize(),
                uncapped.normalize(),
                rule.cap.normalize()
            )
        } else {
            format!(
                "{} × {} = {}",
                basic_salary.normalize(),
                rule.rate.normalize(),
                amount.normalize()
            )
        };

        audit_steps.push(AuditStep {
            step_number: start_step_number + i as u32,
            rule_id: format!("statutory_{}", program),
            rule_name: rule_name.to_string(),
            input: serde_json::json!({
                "basic_salary": basic_salary.normalize().to_string(),
                "rate": rule.rate.normalize().to_string(),
                "cap": rule.cap.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": amount.normalize().to_string(),
                "cap_applied": cap_applied
            }),
            reasoning,
        });
    }

    let [sss, philhealth, pagibig] = amounts;

    StatutoryDeductionsResult {
        sss,
        philhealth,
        pagibig,
        audit_steps,
    }
}
