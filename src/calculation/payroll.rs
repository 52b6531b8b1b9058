//! Payroll aggregation.
//!
//! [`calculate_payroll`] turns one employee's attendance records for one pay
//! period into a [`PayrollSummary`]: attendance totals, earnings, statutory
//! deductions, withholding tax and net pay, with an audit step per rule.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::models::{
    AttendanceEntry, AttendanceRecord, AttendanceTotals, AuditStep, Deductions, Earnings,
    EmployeeProfile, PayPeriod, PayrollSummary,
};

use super::allowance::prorate_allowances;
use super::attendance_metrics::attendance_entry;
use super::statutory_deduction::calculate_statutory_deductions;
use super::withholding_tax::calculate_withholding_tax;

/// Calculates payroll for one employee over one pay period.
///
/// Records dated outside the period or belonging to another employee are
/// ignored. Every remaining record counts towards `days_present`, including
/// records with a missing clock time.
///
/// With no records in the period every amount in the summary is zero and no
/// statutory deductions are charged.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_payroll;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{AttendanceRecord, EmployeeProfile, PayPeriod};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let employee: EmployeeProfile = serde_json::from_str(
///     r#"{"id": 1, "last_name": "Reyes", "first_name": "Ana", "basic_salary": "22000"}"#,
/// ).unwrap();
/// let period = PayPeriod::first_half(2026, 3).unwrap();
/// let records = vec![AttendanceRecord::new(
///     1,
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     NaiveTime::from_hms_opt(8, 0, 0),
///     NaiveTime::from_hms_opt(17, 0, 0),
/// )];
///
/// let summary = calculate_payroll(&employee, &period, &records, &PayrollConfig::default());
/// assert_eq!(summary.attendance.days_present, 1);
/// assert_eq!(summary.earnings.regular_pay, Decimal::from(1000));
/// ```
pub fn calculate_payroll(
    employee: &EmployeeProfile,
    period: &PayPeriod,
    records: &[AttendanceRecord],
    config: &PayrollConfig,
) -> PayrollSummary {
    let mut audit_trace: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    // Step 1: Collect the employee's records in range
    let mut in_range: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.employee_id == employee.id && period.contains_date(r.date))
        .collect();
    in_range.sort_by_key(|r| r.date);
    let ignored = records.len() - in_range.len();

    let entries: Vec<AttendanceEntry> = in_range
        .into_iter()
        .map(|r| attendance_entry(r.clone(), &config.schedule))
        .collect();

    let attendance = sum_attendance(&entries);
    audit_trace.push(AuditStep {
        step_number,
        rule_id: "attendance_totals".to_string(),
        rule_name: "Attendance Totals".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "start_date": period.start_date.to_string(),
            "end_date": period.end_date.to_string(),
            "records_received": records.len(),
            "records_ignored": ignored
        }),
        output: serde_json::json!({
            "days_present": attendance.days_present,
            "total_hours": attendance.total_hours.round_dp(2).to_string(),
            "overtime_hours": attendance.overtime_hours.round_dp(2).to_string(),
            "late_minutes": attendance.late_minutes.normalize().to_string()
        }),
        reasoning: format!(
            "{} records in period counted as days present ({} ignored)",
            attendance.days_present, ignored
        ),
    });
    step_number += 1;

    if entries.is_empty() {
        audit_trace.push(AuditStep {
            step_number,
            rule_id: "empty_period".to_string(),
            rule_name: "Empty Pay Period".to_string(),
            input: serde_json::json!({ "days_present": 0 }),
            output: serde_json::json!({ "gross_pay": "0", "net_pay": "0" }),
            reasoning: "No attendance in period - no earnings and no deductions charged"
                .to_string(),
        });

        return PayrollSummary {
            employee: employee.clone(),
            pay_period: *period,
            currency: config.pay.currency.clone(),
            entries,
            attendance,
            earnings: Earnings::default(),
            deductions: Deductions::default(),
            net_pay: Decimal::ZERO,
            audit_trace,
        };
    }

    // Step 2: Regular pay
    let working_days = config.pay.working_days_per_month;
    let daily_rate = if working_days == 0 {
        Decimal::ZERO
    } else {
        employee.basic_salary / Decimal::from(working_days)
    };
    let regular_pay = daily_rate * Decimal::from(attendance.days_present);
    audit_trace.push(AuditStep {
        step_number,
        rule_id: "regular_pay".to_string(),
        rule_name: "Regular Pay".to_string(),
        input: serde_json::json!({
            "basic_salary": employee.basic_salary.normalize().to_string(),
            "working_days_per_month": working_days,
            "days_present": attendance.days_present
        }),
        output: serde_json::json!({
            "daily_rate": daily_rate.round_dp(2).to_string(),
            "regular_pay": regular_pay.round_dp(2).to_string()
        }),
        reasoning: format!(
            "{} / {} days = {} daily × {} days = {}",
            employee.basic_salary.normalize(),
            working_days,
            daily_rate.round_dp(2),
            attendance.days_present,
            regular_pay.round_dp(2)
        ),
    });
    step_number += 1;

    // Step 3: Overtime pay
    let hourly_rate = employee.hourly_rate(config);
    let overtime_rate = config.pay.overtime_rate;
    let overtime_pay = attendance.overtime_hours * hourly_rate * overtime_rate;
    audit_trace.push(AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "overtime_hours": attendance.overtime_hours.round_dp(2).to_string(),
            "hourly_rate": hourly_rate.round_dp(2).to_string(),
            "hourly_rate_source": if employee.hourly_rate.is_some() { "employee" } else { "derived" },
            "overtime_rate": overtime_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "overtime_pay": overtime_pay.round_dp(2).to_string()
        }),
        reasoning: format!(
            "{} hours × {} × {} = {}",
            attendance.overtime_hours.round_dp(2),
            hourly_rate.round_dp(2),
            overtime_rate.normalize(),
            overtime_pay.round_dp(2)
        ),
    });
    step_number += 1;

    // Step 4: Allowances
    let allowances = prorate_allowances(employee, working_days, attendance.days_present, step_number);
    let allowances_total = allowances.total();
    audit_trace.push(allowances.audit_step.clone());
    step_number += 1;

    // Step 5: Gross pay
    let gross_pay = regular_pay + overtime_pay + allowances_total;
    audit_trace.push(AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "regular_pay": regular_pay.round_dp(2).to_string(),
            "overtime_pay": overtime_pay.round_dp(2).to_string(),
            "allowances": allowances_total.round_dp(2).to_string()
        }),
        output: serde_json::json!({ "gross_pay": gross_pay.round_dp(2).to_string() }),
        reasoning: format!(
            "{} + {} + {} = {}",
            regular_pay.round_dp(2),
            overtime_pay.round_dp(2),
            allowances_total.round_dp(2),
            gross_pay.round_dp(2)
        ),
    });
    step_number += 1;

    // Step 6: Statutory deductions on the full monthly salary
    let statutory =
        calculate_statutory_deductions(employee.basic_salary, &config.contributions, step_number);
    let statutory_total = statutory.total();
    step_number += statutory.audit_steps.len() as u32;
    audit_trace.extend(statutory.audit_steps.iter().cloned());

    // Step 7: Withholding tax
    let taxable_income = gross_pay - statutory_total;
    let tax = calculate_withholding_tax(
        taxable_income,
        &config.tax_table,
        config.pay.pay_periods_per_year,
        step_number,
    );
    audit_trace.push(tax.audit_step);
    step_number += 1;

    // Step 8: Net pay
    let total_deductions = statutory_total + tax.tax;
    let net_pay = gross_pay - total_deductions;
    audit_trace.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.round_dp(2).to_string(),
            "total_deductions": total_deductions.round_dp(2).to_string()
        }),
        output: serde_json::json!({ "net_pay": net_pay.round_dp(2).to_string() }),
        reasoning: format!(
            "{} - {} = {}",
            gross_pay.round_dp(2),
            total_deductions.round_dp(2),
            net_pay.round_dp(2)
        ),
    });

    PayrollSummary {
        employee: employee.clone(),
        pay_period: *period,
        currency: config.pay.currency.clone(),
        entries,
        attendance,
        earnings: Earnings {
            daily_rate,
            hourly_rate,
            regular_pay,
            overtime_pay,
            rice_subsidy: allowances.rice_subsidy,
            phone_allowance: allowances.phone_allowance,
            clothing_allowance: allowances.clothing_allowance,
            gross_pay,
        },
        deductions: Deductions {
            sss: statutory.sss,
            philhealth: statutory.philhealth,
            pagibig: statutory.pagibig,
            withholding_tax: tax.tax,
            total_deductions,
        },
        net_pay,
        audit_trace,
    }
}

fn sum_attendance(entries: &[AttendanceEntry]) -> AttendanceTotals {
    entries.iter().fold(
        AttendanceTotals {
            days_present: entries.len() as u32,
            ..AttendanceTotals::default()
        },
        |mut totals, entry| {
            totals.total_hours += entry.metrics.total_hours;
            totals.overtime_hours += entry.metrics.overtime_hours;
            totals.late_minutes += entry.metrics.late_minutes;
            totals
        },
    )
}
