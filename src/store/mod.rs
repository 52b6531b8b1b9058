//! Employee and attendance storage.
//!
//! The payroll engine reads through the [`EmployeeSource`] and
//! [`AttendanceSource`] traits. [`EmployeeStore`] and [`AttendanceStore`] are
//! the indexed in-memory implementations, persisted as JSON files.

mod attendance_store;
mod employee_store;
mod json;
mod traits;

pub use attendance_store::AttendanceStore;
pub use employee_store::EmployeeStore;
pub use traits::{AttendanceSource, EmployeeSource};
