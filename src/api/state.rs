//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::store::{AttendanceStore, EmployeeStore};

/// Shared application state.
///
/// Holds the loaded configuration and the two stores. Stores sit behind
/// `RwLock`s; clock events take the attendance write lock.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    employees: Arc<RwLock<EmployeeStore>>,
    attendance: Arc<RwLock<AttendanceStore>>,
    attendance_file: Option<Arc<PathBuf>>,
}

impl AppState {
    /// Creates application state over in-memory stores.
    pub fn new(config: ConfigLoader, employees: EmployeeStore, attendance: AttendanceStore) -> Self {
        Self {
            config: Arc::new(config),
            employees: Arc::new(RwLock::new(employees)),
            attendance: Arc::new(RwLock::new(attendance)),
            attendance_file: None,
        }
    }

    /// Saves the attendance store to `path` after every clock event.
    pub fn with_attendance_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.attendance_file = Some(Arc::new(path.into()));
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the employee store.
    pub fn employees(&self) -> &RwLock<EmployeeStore> {
        &self.employees
    }

    /// Returns the attendance store.
    pub fn attendance(&self) -> &RwLock<AttendanceStore> {
        &self.attendance
    }

    /// Where clock events are persisted, if anywhere.
    pub fn attendance_file(&self) -> Option<&PathBuf> {
        self.attendance_file.as_deref()
    }
}
