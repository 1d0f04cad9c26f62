//! # Log Store
//!
//! The session's in-memory record collection, newest first.
//!
//! Each operation is a backend call followed by an `apply_*` step. The
//! async methods run both; the TUI runs the call on a spawned task and
//! routes the result through `update()`, which calls the same `apply_*`.
//! A failed call never touches the collection.
//!
//! ```text
//!  fetch:   idle ──▶ loading ──▶ idle (replaced | unchanged + error)
//!  create:  prepend returned record        | unchanged + error
//!  update:  replace matching id in place   | unchanged + error
//!  delete:  remove matching id             | unchanged + error
//! ```

use log::{debug, info, warn};

use crate::backend::{BackendError, FuelBackend, FuelLogForm, FuelLogRecord};

#[derive(Debug, Default, Clone)]
pub struct LogStore {
    records: Vec<FuelLogRecord>,
    is_loading: bool,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[FuelLogRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FuelLogRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    // ── Async operations ────────────────────────────────────────────────────

    pub async fn fetch(&mut self, backend: &dyn FuelBackend) -> Result<(), BackendError> {
        self.begin_fetch();
        let result = backend.fetch_records().await;
        self.apply_fetch(result)
    }

    pub async fn create(
        &mut self,
        backend: &dyn FuelBackend,
        form: &FuelLogForm,
    ) -> Result<&FuelLogRecord, BackendError> {
        let record = backend.create_record(form).await?;
        Ok(self.apply_created(record))
    }

    pub async fn update(
        &mut self,
        backend: &dyn FuelBackend,
        id: &str,
        form: &FuelLogForm,
    ) -> Result<(), BackendError> {
        let record = backend.update_record(id, form).await?;
        self.apply_updated(id, record);
        Ok(())
    }

    pub async fn delete(&mut self, backend: &dyn FuelBackend, id: &str) -> Result<(), BackendError> {
        backend.delete_record(id).await?;
        self.apply_deleted(id);
        Ok(())
    }

    // ── Apply steps ─────────────────────────────────────────────────────────

    pub fn begin_fetch(&mut self) {
        self.is_loading = true;
    }

    /// Finishes a fetch. Loading clears whether or not it succeeded.
    pub fn apply_fetch(
        &mut self,
        result: Result<Vec<FuelLogRecord>, BackendError>,
    ) -> Result<(), BackendError> {
        self.is_loading = false;
        match result {
            Ok(records) => {
                info!("Log store loaded {} records", records.len());
                self.records = records;
                Ok(())
            }
            Err(e) => {
                warn!("Fetch failed, keeping {} records: {}", self.records.len(), e);
                Err(e)
            }
        }
    }

    pub fn apply_created(&mut self, record: FuelLogRecord) -> &FuelLogRecord {
        debug!("Prepending record {}", record.id);
        self.records.insert(0, record);
        &self.records[0]
    }

    /// Replaces the record with `id`. Returns false if no record matched.
    pub fn apply_updated(&mut self, id: &str, record: FuelLogRecord) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                warn!("Updated record {} is not in the store", id);
                false
            }
        }
    }

    /// Removes the record with `id`. Returns false if no record matched.
    pub fn apply_deleted(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before != self.records.len()
    }
}
