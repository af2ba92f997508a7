//! Doctor/patient filtering shared by the month grid and the day list.
//!
//! Both constraints are exact, case-sensitive matches: the filter controls
//! offer a fixed set of names, so a record either carries the chosen name or
//! it does not.

use shared::{AppointmentRecord, FilterCriteria};

/// Whether a single record satisfies every active constraint
pub fn matches(record: &AppointmentRecord, criteria: &FilterCriteria) -> bool {
    let doctor_ok = criteria.active_doctor().map_or(true, |doctor| record.doctor() == doctor);
    let patient_ok = criteria.active_patient().map_or(true, |patient| record.patient == patient);
    doctor_ok && patient_ok
}

/// Stable filter: matching records keep their relative order
pub fn filter_appointments(records: &[AppointmentRecord], criteria: &FilterCriteria) -> Vec<AppointmentRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    records.iter().filter(|record| matches(record, criteria)).cloned().collect()
}
