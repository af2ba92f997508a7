//! In-memory appointment store keyed by calendar date.
//!
//! Each date maps to an ordered sequence of records. Order is insertion order:
//! `add` appends and `remove` deletes by index. Readers treat a missing key and
//! an empty sequence the same way and never fail.

use log::{debug, info};
use shared::{AppointmentRecord, DateKey};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentStore {
    appointments: BTreeMap<DateKey, Vec<AppointmentRecord>>,
}

impl AppointmentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the sample appointments the calendar screen starts with
    pub fn with_sample_data() -> Self {
        let mut store = Self::new();
        // Keys are statically valid, so the lookups cannot miss
        if let (Some(july_12), Some(july_13)) =
            (DateKey::from_ymd(2025, 7, 12), DateKey::from_ymd(2025, 7, 13))
        {
            store.add(july_12, AppointmentRecord::new("10:00", "Alice", "Checkup"));
            store.add(july_12, AppointmentRecord::new("14:00", "Bob", "Dental"));
            store.add(july_13, AppointmentRecord::new("09:30", "Charlie", "Surgery"));
        }
        store
    }

    /// Create a store seeded with arbitrary entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (DateKey, Vec<AppointmentRecord>)>,
    {
        Self { appointments: entries.into_iter().collect() }
    }

    /// Append a record to the end of the sequence for `date`.
    ///
    /// Record fields are not validated; empty strings are stored as given.
    pub fn add(&mut self, date: DateKey, record: AppointmentRecord) {
        info!("📅 Adding appointment on {}: {} with {} at {}", date, record.patient, record.appointment_type, record.time);
        self.appointments.entry(date).or_default().push(record);
    }

    /// Remove the record at `index` on `date`.
    ///
    /// Returns the removed record. An absent date or an out-of-range index is a
    /// no-op that returns `None`.
    pub fn remove(&mut self, date: DateKey, index: usize) -> Option<AppointmentRecord> {
        let Some(records) = self.appointments.get_mut(&date) else {
            debug!("Ignoring remove on {}: no appointments stored for that date", date);
            return None;
        };
        if index >= records.len() {
            debug!("Ignoring remove on {}: index {} out of bounds (len {})", date, index, records.len());
            return None;
        }

        let removed = records.remove(index);
        info!("📅 Removed appointment {} on {}: {} at {}", index, date, removed.patient, removed.time);
        Some(removed)
    }

    /// Records for `date` in insertion order; empty when nothing is stored
    pub fn get(&self, date: DateKey) -> &[AppointmentRecord] {
        self.appointments.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, date: DateKey) -> usize {
        self.get(date).len()
    }

    /// Dates holding at least one record, ascending
    pub fn dates(&self) -> Vec<DateKey> {
        self.appointments
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(date, _)| *date)
            .collect()
    }

    /// Total number of records across all dates
    pub fn total(&self) -> usize {
        self.appointments.values().map(Vec::len).sum()
    }
}
