//! Indexed in-memory attendance store.
//!
//! Records are keyed by `(employee_id, date)`, so at most one record exists
//! per employee per day and every edit is a replace-by-key.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::AttendanceRecord;

use super::json::{read_json, write_json};
use super::traits::AttendanceSource;

/// Attendance records keyed by employee and date.
#[derive(Debug, Clone, Default)]
pub struct AttendanceStore {
    records: BTreeMap<(u32, NaiveDate), AttendanceRecord>,
}

impl AttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from records; later records replace earlier ones with the same key.
    pub fn from_records(records: impl IntoIterator<Item = AttendanceRecord>) -> EngineResult<Self> {
        let mut store = Self::new();
        for record in records {
            store.upsert(record)?;
        }
        Ok(store)
    }

    /// Loads a JSON array of records.
    pub fn load_json<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let records: Vec<AttendanceRecord> = read_json(path)?;
        let store = Self::from_records(records)?;
        debug!(path = %path.display(), count = store.len(), "Loaded attendance records");
        Ok(store)
    }

    /// Saves all records as a JSON array ordered by employee and date.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> EngineResult<()> {
        let path = path.as_ref();
        let records: Vec<&AttendanceRecord> = self.records.values().collect();
        write_json(path, &records)?;
        debug!(path = %path.display(), count = records.len(), "Saved attendance records");
        Ok(())
    }

    /// Inserts a record or replaces the one with the same key.
    pub fn upsert(&mut self, record: AttendanceRecord) -> EngineResult<()> {
        record.validate()?;
        self.records.insert(record.key(), record);
        Ok(())
    }

    /// Replaces an existing record.
    pub fn update(&mut self, record: AttendanceRecord) -> EngineResult<()> {
        record.validate()?;
        match self.records.get_mut(&record.key()) {
            Some(existing) => {
                debug!(employee_id = record.employee_id, date = %record.date, "Updated attendance");
                *existing = record;
                Ok(())
            }
            None => Err(EngineError::AttendanceNotFound {
                employee_id: record.employee_id,
                date: record.date,
            }),
        }
    }

    /// Removes and returns the record for the employee on the date.
    pub fn remove(&mut self, employee_id: u32, date: NaiveDate) -> EngineResult<AttendanceRecord> {
        self.records
            .remove(&(employee_id, date))
            .ok_or(EngineError::AttendanceNotFound { employee_id, date })
    }

    /// Puts back a record captured with `get` before an edit.
    ///
    /// `None` removes whatever is stored under the key now.
    pub fn restore(&mut self, employee_id: u32, date: NaiveDate, previous: Option<AttendanceRecord>) {
        match previous {
            Some(record) => {
                self.records.insert((employee_id, date), record);
            }
            None => {
                self.records.remove(&(employee_id, date));
            }
        }
        debug!(employee_id, date = %date, "Restored attendance");
    }

    /// Returns the record for the employee on the date.
    pub fn get(&self, employee_id: u32, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.records.get(&(employee_id, date))
    }

    /// All of an employee's records ordered by date.
    pub fn for_employee(&self, employee_id: u32) -> Vec<AttendanceRecord> {
        self.records
            .range((employee_id, NaiveDate::MIN)..=(employee_id, NaiveDate::MAX))
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// Records a clock-in, creating an open record for the day.
    ///
    /// If a record already exists for the day it is returned unchanged.
    pub fn clock_in(
        &mut self,
        employee_id: u32,
        date: NaiveDate,
        time: NaiveTime,
    ) -> EngineResult<AttendanceRecord> {
        if let Some(existing) = self.get(employee_id, date) {
            debug!(employee_id, date = %date, "Already clocked in");
            return Ok(existing.clone());
        }

        let record = AttendanceRecord::new(employee_id, date, Some(time), None);
        self.upsert(record.clone())?;
        debug!(employee_id, date = %date, time = %time, "Clocked in");
        Ok(record)
    }

    /// Records a clock-out on the day's open record.
    ///
    /// Fails with `AttendanceNotFound` when there is no record for the day and
    /// with `InvalidInput` when `time` is before the clock-in. A record that
    /// already has a clock-out is returned unchanged.
    pub fn clock_out(
        &mut self,
        employee_id: u32,
        date: NaiveDate,
        time: NaiveTime,
    ) -> EngineResult<AttendanceRecord> {
        let existing = self
            .get(employee_id, date)
            .ok_or(EngineError::AttendanceNotFound { employee_id, date })?;

        if existing.time_out.is_some() {
            debug!(employee_id, date = %date, "Already clocked out");
            return Ok(existing.clone());
        }

        let record = AttendanceRecord {
            time_out: Some(time),
            ..existing.clone()
        };
        self.update(record.clone())?;
        debug!(employee_id, date = %date, time = %time, "Clocked out");
        Ok(record)
    }

    /// Whether the employee has both clocked in and out on the date.
    pub fn has_completed(&self, employee_id: u32, date: NaiveDate) -> bool {
        self.get(employee_id, date)
            .is_some_and(AttendanceRecord::is_complete)
    }

    /// All records ordered by employee and date.
    pub fn all(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.records.values()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AttendanceSource for AttendanceStore {
    fn fetch_by_employee_and_range(
        &self,
        employee_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceRecord> {
        if start > end {
            return Vec::new();
        }
        self.records
            .range((employee_id, start)..=(employee_id, end))
            .map(|(_, record)| record.clone())
            .collect()
    }
}
