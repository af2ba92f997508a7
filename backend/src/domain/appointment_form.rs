//! Appointment form handling for the add/remove modal.
//!
//! The modal collects raw time, patient and doctor strings. The only rule is
//! presence: every field must be non-empty. Values are stored exactly as
//! entered. A valid draft turns into an `AppointmentRecord` whose type label
//! is the chosen doctor.

use shared::{AppointmentFormValidation, AppointmentRecord, FormValidationError};

/// Modal-local form state; discarded when the modal closes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub time: String,
    pub patient: String,
    pub doctor: String,
}

impl AppointmentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filled(time: impl Into<String>, patient: impl Into<String>, doctor: impl Into<String>) -> Self {
        Self { time: time.into(), patient: patient.into(), doctor: doctor.into() }
    }

    pub fn clear(&mut self) {
        self.time.clear();
        self.patient.clear();
        self.doctor.clear();
    }

    pub fn validate(&self) -> AppointmentFormValidation {
        let mut errors = Vec::new();

        if self.time.is_empty() {
            errors.push(FormValidationError::MissingTime);
        }
        if self.patient.is_empty() {
            errors.push(FormValidationError::MissingPatient);
        }
        if self.doctor.is_empty() {
            errors.push(FormValidationError::MissingDoctor);
        }

        let record = errors
            .is_empty()
            .then(|| AppointmentRecord::new(self.time.as_str(), self.patient.as_str(), self.doctor.as_str()));

        AppointmentFormValidation {
            is_valid: errors.is_empty(),
            errors,
            record,
        }
    }

    /// The record this draft describes, or every missing field
    pub fn to_record(&self) -> Result<AppointmentRecord, Vec<FormValidationError>> {
        let validation = self.validate();
        validation.record.ok_or(validation.errors)
    }
}
