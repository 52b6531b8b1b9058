//! Plain-text payslip rendering and saving.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollSummary;

use super::attendance_table::AttendanceTable;
use super::format::{format_long_date, format_money, format_quantity};

const HEAVY_RULE: &str = "====================================================";
const LIGHT_RULE: &str = "----------------------------------------------------";

/// Fixed-layout text payslip for a summary.
///
/// Sections in order: pay period, employee, government numbers, attendance,
/// earnings, deductions and net pay.
#[derive(Debug, Clone, Copy)]
pub struct Payslip<'a>(pub &'a PayrollSummary);

impl fmt::Display for Payslip<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        let employee = &summary.employee;
        let ids = &employee.government_ids;
        let attendance = &summary.attendance;
        let earnings = &summary.earnings;
        let deductions = &summary.deductions;
        let money = |amount| format_money(amount, &summary.currency);

        writeln!(f, "{}", HEAVY_RULE)?;
        writeln!(f, "{:^52}", "EMPLOYEE PAYSLIP")?;
        writeln!(f, "{}", HEAVY_RULE)?;
        writeln!(
            f,
            "Pay Period: {} - {}",
            format_long_date(summary.pay_period.start_date),
            format_long_date(summary.pay_period.end_date)
        )?;

        writeln!(f, "\nEmployee Details:")?;
        writeln!(f, "ID:         {}", employee.id)?;
        writeln!(f, "Name:       {}", employee.display_name())?;
        writeln!(f, "Position:   {}", employee.position)?;
        writeln!(f, "Status:     {}", employee.status.display_name())?;
        writeln!(f, "Supervisor: {}", employee.supervisor)?;

        writeln!(f, "\nGovernment Numbers:")?;
        writeln!(f, "SSS:        {}", ids.sss)?;
        writeln!(f, "PhilHealth: {}", ids.philhealth)?;
        writeln!(f, "TIN:        {}", ids.tin)?;
        writeln!(f, "Pag-IBIG:   {}", ids.pagibig)?;

        writeln!(f, "\nAttendance Summary:")?;
        writeln!(f, "Days Present:       {} days", attendance.days_present)?;
        writeln!(
            f,
            "Total Hours Worked: {} hours",
            format_quantity(attendance.total_hours)
        )?;
        writeln!(
            f,
            "Overtime Hours:     {} hours",
            format_quantity(attendance.overtime_hours)
        )?;
        writeln!(
            f,
            "Late Minutes:       {} minutes",
            attendance.late_minutes.normalize()
        )?;

        if !summary.entries.is_empty() {
            writeln!(f, "\nDetailed Attendance Records:")?;
            write!(f, "{}", AttendanceTable(summary))?;
        }

        writeln!(f, "\nEarnings:")?;
        writeln!(f, "Daily Rate:         {}", money(earnings.daily_rate))?;
        writeln!(f, "Regular Pay:        {}", money(earnings.regular_pay))?;
        writeln!(f, "Overtime Pay:       {}", money(earnings.overtime_pay))?;
        writeln!(f, "Rice Subsidy:       {}", money(earnings.rice_subsidy))?;
        writeln!(f, "Phone Allowance:    {}", money(earnings.phone_allowance))?;
        writeln!(f, "Clothing Allowance: {}", money(earnings.clothing_allowance))?;
        writeln!(f, "Gross Pay:          {}", money(earnings.gross_pay))?;

        writeln!(f, "\nDeductions:")?;
        writeln!(f, "SSS:                {}", money(deductions.sss))?;
        writeln!(f, "PhilHealth:         {}", money(deductions.philhealth))?;
        writeln!(f, "Pag-IBIG:           {}", money(deductions.pagibig))?;
        writeln!(f, "Withholding Tax:    {}", money(deductions.withholding_tax))?;
        writeln!(f, "Total Deductions:   {}", money(deductions.total_deductions))?;

        writeln!(f, "\n{}", LIGHT_RULE)?;
        writeln!(f, "NET PAY:            {}", money(summary.net_pay))?;
        writeln!(f, "{}", HEAVY_RULE)?;
        writeln!(f, "{:^52}", "This is a system-generated payslip.")
    }
}

/// Renders the [`Payslip`] for a summary.
pub fn render_payslip_text(summary: &PayrollSummary) -> String {
    Payslip(summary).to_string()
}

/// File name for a saved payslip: `Payslip_<id>_<MMddyyyy>_<MMddyyyy>.txt`.
pub fn payslip_file_name(summary: &PayrollSummary) -> String {
    format!(
        "Payslip_{}_{}_{}.txt",
        summary.employee.id,
        summary.pay_period.start_date.format("%m%d%Y"),
        summary.pay_period.end_date.format("%m%d%Y")
    )
}

/// Writes the rendered payslip into `dir` and returns the file path.
pub fn save_payslip<P: AsRef<Path>>(summary: &PayrollSummary, dir: P) -> EngineResult<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| EngineError::DataAccess {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let path = dir.join(payslip_file_name(summary));
    fs::write(&path, render_payslip_text(summary)).map_err(|e| EngineError::DataAccess {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    info!(
        employee_id = summary.employee.id,
        path = %path.display(),
        "Saved payslip"
    );
    Ok(path)
}
