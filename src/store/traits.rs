//! Lookup contracts the payroll engine depends on.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, EmployeeProfile};

/// Resolves employee profiles by id.
pub trait EmployeeSource {
    /// Returns the employee with the given id, or `EmployeeNotFound`.
    fn fetch_by_id(&self, employee_id: u32) -> EngineResult<EmployeeProfile>;
}

/// Supplies attendance records for payroll.
pub trait AttendanceSource {
    /// Returns every record for the employee dated within `[start, end]`.
    fn fetch_by_employee_and_range(
        &self,
        employee_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceRecord>;
}

impl<T: EmployeeSource + ?Sized> EmployeeSource for &T {
    fn fetch_by_id(&self, employee_id: u32) -> EngineResult<EmployeeProfile> {
        (**self).fetch_by_id(employee_id)
    }
}

impl<T: AttendanceSource + ?Sized> AttendanceSource for &T {
    fn fetch_by_employee_and_range(
        &self,
        employee_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceRecord> {
        (**self).fetch_by_employee_and_range(employee_id, start, end)
    }
}
