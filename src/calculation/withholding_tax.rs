//! Withholding tax calculation functionality.
//!
//! Per-period taxable income is annualized, taxed through the progressive
//! brackets of a [`TaxTable`], and the annual tax is spread back over the
//! pay periods of the year.

use rust_decimal::Decimal;

use crate::config::TaxTable;
use crate::models::AuditStep;

/// The result of calculating withholding tax, including the audit step.
#[derive(Debug, Clone)]
pub struct WithholdingTaxResult {
    /// Tax withheld for the period.
    pub tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Tax due on an annual income.
///
/// The bracket containing the income contributes its base tax plus its rate
/// applied to the income above its lower bound. Upper bounds are inclusive.
/// Income of zero or less is not taxed.
pub fn annual_tax(annual_income: Decimal, table: &TaxTable) -> Decimal {
    if annual_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let bases = table.derived_bases();
    let mut lower = Decimal::ZERO;

    for (bracket, base) in table.brackets.iter().zip(bases) {
        match bracket.up_to {
            Some(upper) if annual_income > upper => lower = upper,
            _ => return base + (annual_income - lower) * bracket.rate,
        }
    }

    // Only reachable with a table whose top bracket is bounded, which
    // validation rejects.
    Decimal::ZERO
}

/// Tax withheld from one period's taxable income.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::withholding_tax;
/// use payroll_engine::config::TaxTable;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// // 20000 × 24 = 480000, taxed at 30000 + 25% over 400000 = 50000 per year
/// let tax = withholding_tax(Decimal::from(20000), &TaxTable::default(), 24);
/// assert_eq!(tax.round_dp(2), Decimal::from_str("2083.33").unwrap());
/// ```
pub fn withholding_tax(taxable_income: Decimal, table: &TaxTable, pay_periods_per_year: u32) -> Decimal {
    if pay_periods_per_year == 0 {
        return Decimal::ZERO;
    }
    let periods = Decimal::from(pay_periods_per_year);
    annual_tax(taxable_income * periods, table) / periods
}

/// Calculates withholding tax and records the bracket applied.
pub fn calculate_withholding_tax(
    taxable_income: Decimal,
    table: &TaxTable,
    pay_periods_per_year: u32,
    step_number: u32,
) -> WithholdingTaxResult {
    let annualized = taxable_income * Decimal::from(pay_periods_per_year);
    let yearly = annual_tax(annualized, table);
    let tax = withholding_tax(taxable_income, table, pay_periods_per_year);

    let bracket_number = bracket_index(annualized, table).map(|i| i + 1);

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding_tax".to_string(),
        rule_name: "Withholding Tax".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.round_dp(2).to_string(),
            "pay_periods_per_year": pay_periods_per_year,
            "annualized_income": annualized.round_dp(2).to_string()
        }),
        output: serde_json::json!({
            "bracket": bracket_number,
            "annual_tax": yearly.round_dp(2).to_string(),
            "tax": tax.round_dp(2).to_string()
        }),
        reasoning: match bracket_number {
            Some(n) => format!(
                "{} × {} = {} annual income falls in bracket {}: annual tax {} / {} = {}",
                taxable_income.round_dp(2),
                pay_periods_per_year,
                annualized.round_dp(2),
                n,
                yearly.round_dp(2),
                pay_periods_per_year,
                tax.round_dp(2)
            ),
            None => "No positive taxable income - no tax withheld".to_string(),
        },
    };

    WithholdingTaxResult { tax, audit_step }
}

fn bracket_index(annual_income: Decimal, table: &TaxTable) -> Option<usize> {
    if annual_income <= Decimal::ZERO {
        return None;
    }
    table
        .brackets
        .iter()
        .position(|b| b.up_to.is_none_or(|upper| annual_income <= upper))
}
