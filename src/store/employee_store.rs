//! Indexed in-memory employee store.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeProfile;

use super::json::{read_json, write_json};
use super::traits::EmployeeSource;

/// Employee profiles keyed by id.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmployeeProfile;
/// use payroll_engine::store::{EmployeeSource, EmployeeStore};
///
/// let profile: EmployeeProfile = serde_json::from_str(
///     r#"{"id": 0, "last_name": "Reyes", "first_name": "Ana", "basic_salary": "22000"}"#,
/// ).unwrap();
///
/// let mut store = EmployeeStore::new();
/// let id = store.add(profile).unwrap();
/// assert_eq!(id, 1);
/// assert_eq!(store.fetch_by_id(1).unwrap().last_name, "Reyes");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmployeeStore {
    employees: BTreeMap<u32, EmployeeProfile>,
}

impl EmployeeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from profiles with explicit ids.
    pub fn from_employees(
        employees: impl IntoIterator<Item = EmployeeProfile>,
    ) -> EngineResult<Self> {
        let mut store = Self::new();
        for employee in employees {
            store.insert(employee)?;
        }
        Ok(store)
    }

    /// Loads a JSON array of profiles.
    pub fn load_json<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let employees: Vec<EmployeeProfile> = read_json(path)?;
        let store = Self::from_employees(employees)?;
        debug!(path = %path.display(), count = store.len(), "Loaded employees");
        Ok(store)
    }

    /// Saves all profiles as a JSON array ordered by id.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> EngineResult<()> {
        let path = path.as_ref();
        let employees: Vec<&EmployeeProfile> = self.employees.values().collect();
        write_json(path, &employees)?;
        debug!(path = %path.display(), count = employees.len(), "Saved employees");
        Ok(())
    }

    /// The id the next [`add`](Self::add) will assign: highest id plus one, or 1.
    ///
    /// `None` once the highest id is `u32::MAX`.
    pub fn next_id(&self) -> Option<u32> {
        match self.employees.keys().next_back() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Adds a new employee under the next free id and returns it.
    ///
    /// The id on the given profile is ignored. Fails with `InvalidInput` when
    /// no id above the current highest is left.
    pub fn add(&mut self, mut employee: EmployeeProfile) -> EngineResult<u32> {
        let id = self.next_id().ok_or_else(|| EngineError::InvalidInput {
            field: "id".to_string(),
            message: format!("no employee id left above {}", u32::MAX),
        })?;
        employee.id = id;
        self.insert(employee)?;
        debug!(employee_id = id, "Added employee");
        Ok(id)
    }

    /// Inserts a profile under its own id.
    pub fn insert(&mut self, employee: EmployeeProfile) -> EngineResult<()> {
        if self.employees.contains_key(&employee.id) {
            return Err(EngineError::DuplicateEmployee {
                employee_id: employee.id,
            });
        }
        self.employees.insert(employee.id, employee);
        Ok(())
    }

    /// Replaces the profile with the same id.
    pub fn update(&mut self, employee: EmployeeProfile) -> EngineResult<()> {
        match self.employees.get_mut(&employee.id) {
            Some(existing) => {
                debug!(employee_id = employee.id, "Updated employee");
                *existing = employee;
                Ok(())
            }
            None => Err(EngineError::EmployeeNotFound {
                employee_id: employee.id,
            }),
        }
    }

    /// Removes and returns the profile with the given id.
    pub fn remove(&mut self, employee_id: u32) -> EngineResult<EmployeeProfile> {
        let removed = self
            .employees
            .remove(&employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;
        debug!(employee_id, "Removed employee");
        Ok(removed)
    }

    /// Returns the profile with the given id.
    pub fn get(&self, employee_id: u32) -> Option<&EmployeeProfile> {
        self.employees.get(&employee_id)
    }

    /// All profiles ordered by id.
    pub fn all(&self) -> impl Iterator<Item = &EmployeeProfile> {
        self.employees.values()
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl EmployeeSource for EmployeeStore {
    fn fetch_by_id(&self, employee_id: u32) -> EngineResult<EmployeeProfile> {
        self.get(employee_id)
            .cloned()
            .ok_or(EngineError::EmployeeNotFound { employee_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_test_employee(id: u32, last_name: &str) -> EmployeeProfile {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "last_name": last_name,
            "first_name": "Test",
            "basic_salary": "30000"
        }))
        .unwrap()
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("payroll-engine-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_add_to_empty_store_assigns_one() {
        let mut store = EmployeeStore::new();
        assert_eq!(store.add(create_test_employee(99, "Garcia")).unwrap(), 1);
        assert!(store.get(1).is_some());
        assert!(store.get(99).is_none());
    }

    #[test]
    fn test_add_assigns_max_plus_one() {
        let mut store = EmployeeStore::from_employees(vec![
            create_test_employee(10001, "Garcia"),
            create_test_employee(10005, "Lim"),
        ])
        .unwrap();

        assert_eq!(store.add(create_test_employee(0, "Aquino")).unwrap(), 10006);
    }

    #[test]
    fn test_add_after_max_id_is_rejected() {
        let mut store =
            EmployeeStore::from_employees(vec![create_test_employee(u32::MAX, "Garcia")]).unwrap();

        assert_eq!(store.next_id(), None);
        let result = store.add(create_test_employee(0, "Aquino"));

        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(u32::MAX).unwrap().last_name, "Garcia");
    }

    #[test]
    fn test_insert_duplicate_is_rejected() {
        let mut store = EmployeeStore::new();
        store.insert(create_test_employee(10001, "Garcia")).unwrap();

        match store.insert(create_test_employee(10001, "Lim")) {
            Err(EngineError::DuplicateEmployee { employee_id }) => assert_eq!(employee_id, 10001),
            other => panic!("Expected DuplicateEmployee, got {:?}", other),
        }
        assert_eq!(store.get(10001).unwrap().last_name, "Garcia");
    }

    #[test]
    fn test_update_replaces_profile() {
        let mut store = EmployeeStore::from_employees(vec![create_test_employee(1, "Garcia")]).unwrap();

        let mut updated = create_test_employee(1, "Garcia");
        updated.basic_salary = Decimal::from(45000);
        store.update(updated).unwrap();

        assert_eq!(store.get(1).unwrap().basic_salary, Decimal::from(45000));
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = EmployeeStore::new();
        assert!(matches!(
            store.update(create_test_employee(7, "Garcia")),
            Err(EngineError::EmployeeNotFound { employee_id: 7 })
        ));
    }

    #[test]
    fn test_remove() {
        let mut store = EmployeeStore::from_employees(vec![create_test_employee(1, "Garcia")]).unwrap();

        let removed = store.remove(1).unwrap();
        assert_eq!(removed.last_name, "Garcia");
        assert!(store.is_empty());
        assert!(store.remove(1).is_err());
    }

    #[test]
    fn test_fetch_by_id_not_found() {
        let store = EmployeeStore::new();
        assert!(matches!(
            store.fetch_by_id(42),
            Err(EngineError::EmployeeNotFound { employee_id: 42 })
        ));
    }

    #[test]
    fn test_all_is_ordered_by_id() {
        let store = EmployeeStore::from_employees(vec![
            create_test_employee(3, "C"),
            create_test_employee(1, "A"),
            create_test_employee(2, "B"),
        ])
        .unwrap();

        let ids: Vec<u32> = store.all().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_save_and_load_json() {
        let path = temp_path("employees.json");
        let store = EmployeeStore::from_employees(vec![
            create_test_employee(1, "Garcia"),
            create_test_employee(2, "Lim"),
        ])
        .unwrap();

        store.save_json(&path).unwrap();
        let loaded = EmployeeStore::load_json(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(2), store.get(2));
    }

    #[test]
    fn test_load_missing_file_is_data_access_error() {
        let result = EmployeeStore::load_json(temp_path("missing.json"));
        assert!(matches!(result, Err(EngineError::DataAccess { .. })));
    }

    #[test]
    fn test_load_with_duplicate_ids_fails() {
        let path = temp_path("employees.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let employees = vec![create_test_employee(1, "A"), create_test_employee(1, "B")];
        std::fs::write(&path, serde_json::to_string(&employees).unwrap()).unwrap();

        assert!(matches!(
            EmployeeStore::load_json(&path),
            Err(EngineError::DuplicateEmployee { employee_id: 1 })
        ));
    }
}
