//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every rate, cap, bracket
//! and schedule constant used by the calculators lives here, so a whole
//! jurisdiction or tax year can be swapped by passing a different
//! [`PayrollConfig`].

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The fixed daily schedule attendance is measured against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSchedule {
    /// Clock-in after this time counts as late.
    pub start_time: NaiveTime,
    /// Clock-out after this time counts as overtime.
    pub end_time: NaiveTime,
    /// Worked spans strictly longer than this many minutes have the lunch break deducted.
    pub lunch_threshold_minutes: i64,
    /// Length of the unpaid lunch break in minutes.
    pub lunch_break_minutes: i64,
    /// Regular hours in a working day, used to derive an hourly rate.
    pub regular_hours_per_day: Decimal,
}

impl Default for WorkSchedule {
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            lunch_threshold_minutes: 300,
            lunch_break_minutes: 60,
            regular_hours_per_day: Decimal::from(8),
        }
    }
}

/// Rules for turning attendance into pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRules {
    /// Working days in a standard month; divides monthly amounts into daily ones.
    pub working_days_per_month: u32,
    /// Multiplier applied to the hourly rate for overtime hours.
    pub overtime_rate: Decimal,
    /// Pay periods per year, used to annualize income for withholding tax.
    pub pay_periods_per_year: u32,
    /// Label printed in front of monetary amounts on payslips.
    pub currency: String,
}

impl Default for PayRules {
    fn default() -> Self {
        Self {
            working_days_per_month: 22,
            overtime_rate: Decimal::new(125, 2),
            pay_periods_per_year: 24,
            currency: "PHP".to_string(),
        }
    }
}

/// Schedule file structure (`schedule.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// The standard work schedule.
    pub schedule: WorkSchedule,
    /// Pay rules.
    pub pay: PayRules,
}

/// A capped percentage-of-salary contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRule {
    /// Fraction of the monthly basic salary (e.g. 0.045 for 4.5%).
    pub rate: Decimal,
    /// The contribution never exceeds this amount.
    pub cap: Decimal,
}

/// Statutory contribution rules (`contributions.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributions {
    /// Social-insurance fund (SSS).
    pub sss: ContributionRule,
    /// Health-insurance fund (PhilHealth).
    pub philhealth: ContributionRule,
    /// Housing fund (Pag-IBIG).
    pub pagibig: ContributionRule,
}

impl Default for Contributions {
    fn default() -> Self {
        Self {
            sss: ContributionRule {
                rate: Decimal::new(45, 3),
                cap: Decimal::from(1125),
            },
            philhealth: ContributionRule {
                rate: Decimal::new(4, 2),
                cap: Decimal::from(1800),
            },
            pagibig: ContributionRule {
                rate: Decimal::new(2, 2),
                cap: Decimal::from(100),
            },
        }
    }
}

/// One annual income tax bracket.
///
/// A bracket covers annual income from the previous bracket's `up_to`
/// (exclusive; zero for the first bracket) to its own `up_to` (inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound; `None` for the top bracket.
    pub up_to: Option<Decimal>,
    /// Marginal rate applied to income above the bracket's lower bound.
    pub rate: Decimal,
    /// Tax due at the bracket's lower bound. Optional in configuration; when
    /// present it must equal the tax due at the previous bracket's upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_tax: Option<Decimal>,
}

/// Progressive annual tax table (`tax_table.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTable {
    /// Brackets ordered by ascending upper bound.
    pub brackets: Vec<TaxBracket>,
}

impl TaxTable {
    /// Returns the tax due at each bracket's lower bound.
    ///
    /// The first base is zero; each following base is the previous base plus
    /// the previous bracket's full width taxed at its rate. This makes the
    /// tax function continuous at every boundary.
    pub fn derived_bases(&self) -> Vec<Decimal> {
        let mut bases = Vec::with_capacity(self.brackets.len());
        let mut base = Decimal::ZERO;
        let mut lower = Decimal::ZERO;

        for bracket in &self.brackets {
            bases.push(base);
            if let Some(upper) = bracket.up_to {
                base += (upper - lower) * bracket.rate;
                lower = upper;
            }
        }

        bases
    }

    /// Checks ordering, rates and any configured base taxes.
    pub fn validate(&self) -> EngineResult<()> {
        if self.brackets.is_empty() {
            return Err(invalid("tax table has no brackets"));
        }

        let last = self.brackets.len() - 1;
        let mut previous_upper = Decimal::ZERO;

        for (i, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} rate {} is outside 0..=1",
                    i + 1,
                    bracket.rate
                )));
            }

            match bracket.up_to {
                Some(upper) if i == last => {
                    return Err(invalid(format!(
                        "top bracket must be unbounded, found up_to {}",
                        upper
                    )));
                }
                Some(upper) if upper <= previous_upper => {
                    return Err(invalid(format!(
                        "bracket {} up_to {} must exceed {}",
                        i + 1,
                        upper,
                        previous_upper
                    )));
                }
                Some(upper) => previous_upper = upper,
                None if i != last => {
                    return Err(invalid(format!(
                        "only the top bracket may be unbounded, bracket {} is not",
                        i + 1
                    )));
                }
                None => {}
            }
        }

        for (i, (bracket, derived)) in self
            .brackets
            .iter()
            .zip(self.derived_bases())
            .enumerate()
        {
            if let Some(configured) = bracket.base_tax {
                if configured != derived {
                    return Err(invalid(format!(
                        "bracket {} base_tax {} does not match {} due at the previous bound",
                        i + 1,
                        configured,
                        derived
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for TaxTable {
    fn default() -> Self {
        let bracket = |up_to: Option<i64>, rate: Decimal| TaxBracket {
            up_to: up_to.map(Decimal::from),
            rate,
            base_tax: None,
        };

        Self {
            brackets: vec![
                bracket(Some(250_000), Decimal::ZERO),
                bracket(Some(400_000), Decimal::new(20, 2)),
                bracket(Some(800_000), Decimal::new(25, 2)),
                bracket(Some(2_000_000), Decimal::new(30, 2)),
                bracket(Some(8_000_000), Decimal::new(32, 2)),
                bracket(None, Decimal::new(35, 2)),
            ],
        }
    }
}

/// The complete payroll configuration.
///
/// `Default` yields the standard schedule (08:00-17:00), 22 working days,
/// 1.25 overtime, 24 pay periods, the three statutory contributions and the
/// six-bracket tax table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Standard work schedule.
    pub schedule: WorkSchedule,
    /// Pay rules.
    pub pay: PayRules,
    /// Statutory contribution rules.
    pub contributions: Contributions,
    /// Withholding tax table.
    pub tax_table: TaxTable,
}

impl PayrollConfig {
    /// Creates a configuration from its component parts.
    pub fn new(
        schedule: WorkSchedule,
        pay: PayRules,
        contributions: Contributions,
        tax_table: TaxTable,
    ) -> Self {
        Self {
            schedule,
            pay,
            contributions,
            tax_table,
        }
    }

    /// Validates every section.
    ///
    /// The calculators rely on this having passed: divisors are non-zero and
    /// the tax table is ordered and continuous.
    pub fn validate(&self) -> EngineResult<()> {
        if self.schedule.start_time >= self.schedule.end_time {
            return Err(invalid(format!(
                "schedule start {} must be before end {}",
                self.schedule.start_time, self.schedule.end_time
            )));
        }
        if self.schedule.lunch_threshold_minutes < 0 || self.schedule.lunch_break_minutes < 0 {
            return Err(invalid("lunch minutes must not be negative"));
        }
        if self.schedule.regular_hours_per_day <= Decimal::ZERO {
            return Err(invalid("regular_hours_per_day must be positive"));
        }
        if self.pay.working_days_per_month == 0 {
            return Err(invalid("working_days_per_month must be positive"));
        }
        if self.pay.pay_periods_per_year == 0 {
            return Err(invalid("pay_periods_per_year must be positive"));
        }
        if self.pay.overtime_rate < Decimal::ZERO {
            return Err(invalid("overtime_rate must not be negative"));
        }

        for (name, rule) in [
            ("sss", &self.contributions.sss),
            ("philhealth", &self.contributions.philhealth),
            ("pagibig", &self.contributions.pagibig),
        ] {
            if rule.rate < Decimal::ZERO || rule.cap < Decimal::ZERO {
                return Err(invalid(format!("{} rate and cap must not be negative", name)));
            }
        }

        self.tax_table.validate()
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}
