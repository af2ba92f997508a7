use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Doctor choices offered by the appointment form and the calendar filters
pub const DOCTORS: [&str; 3] = ["Dr. Smith", "Dr. Johnson", "Dr. Lee"];

/// Patient choices offered by the appointment form and the calendar filters
pub const PATIENTS: [&str; 4] = ["Alice", "Bob", "Charlie", "David"];

/// A calendar day in local time, rendered as `YYYY-MM-DD`.
///
/// This is the lookup key of the appointment store and the identifier
/// renderers send back on day clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

/// Error returned when a string is not a valid `YYYY-MM-DD` date
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateKeyError {
    #[error("Invalid date key '{0}': expected YYYY-MM-DD")]
    InvalidFormat(String),
    #[error("Date key '{0}' does not name a real calendar day")]
    NonexistentDate(String),
    #[error("Date {0} is outside the four-digit years 0000-9999")]
    OutOfRange(NaiveDate),
}

/// Years a key can carry and still round-trip through `YYYY-MM-DD`
const KEY_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

impl DateKey {
    /// Wrap `date`, or `None` when its year has more than four digits or is negative
    pub fn new(date: NaiveDate) -> Option<Self> {
        KEY_YEARS.contains(&date.year()).then_some(Self(date))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::new)
    }

    /// Today's date on the local clock
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse a strict `YYYY-MM-DD` string
    pub fn parse(input: &str) -> Result<Self, DateKeyError> {
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split('-').collect();
        let well_formed = parts.len() == 3
            && parts[0].len() == 4
            && parts[1].len() == 2
            && parts[2].len() == 2
            && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit()));
        if !well_formed {
            return Err(DateKeyError::InvalidFormat(input.to_string()));
        }

        let year = parts[0].parse::<i32>().map_err(|_| DateKeyError::InvalidFormat(input.to_string()))?;
        let month = parts[1].parse::<u32>().map_err(|_| DateKeyError::InvalidFormat(input.to_string()))?;
        let day = parts[2].parse::<u32>().map_err(|_| DateKeyError::InvalidFormat(input.to_string()))?;

        Self::from_ymd(year, month, day).ok_or_else(|| DateKeyError::NonexistentDate(input.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl TryFrom<NaiveDate> for DateKey {
    type Error = DateKeyError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::new(date).ok_or(DateKeyError::OutOfRange(date))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A single booked appointment.
///
/// `time` is free-form ("10:00", "09:00 AM") and never parsed; ordering within
/// a day is insertion order. `appointment_type` doubles as the doctor label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub time: String,
    pub patient: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    /// Display-only booking status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    /// Display-only priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<AppointmentPriority>,
}

impl AppointmentRecord {
    pub fn new(
        time: impl Into<String>,
        patient: impl Into<String>,
        appointment_type: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            patient: patient.into(),
            appointment_type: appointment_type.into(),
            status: None,
            priority: None,
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: AppointmentPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// The doctor/procedure label the filters match against
    pub fn doctor(&self) -> &str {
        &self.appointment_type
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentPriority {
    High,
    Medium,
    Low,
}

/// Optional doctor/patient narrowing applied to both calendar projections.
///
/// An empty string behaves exactly like `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub doctor: Option<String>,
    pub patient: Option<String>,
}

impl FilterCriteria {
    pub fn by_doctor(doctor: impl Into<String>) -> Self {
        Self { doctor: Some(doctor.into()), patient: None }
    }

    pub fn by_patient(patient: impl Into<String>) -> Self {
        Self { doctor: None, patient: Some(patient.into()) }
    }

    pub fn with_patient(mut self, patient: impl Into<String>) -> Self {
        self.patient = Some(patient.into());
        self
    }

    /// Doctor constraint, if one is actually set
    pub fn active_doctor(&self) -> Option<&str> {
        self.doctor.as_deref().filter(|d| !d.is_empty())
    }

    /// Patient constraint, if one is actually set
    pub fn active_patient(&self) -> Option<&str> {
        self.patient.as_deref().filter(|p| !p.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active_doctor().is_none() && self.active_patient().is_none()
    }

    pub fn clear(&mut self) {
        self.doctor = None;
        self.patient = None;
    }
}

/// Choices offered by the filter dropdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub doctors: Vec<String>,
    pub patients: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            doctors: DOCTORS.iter().map(|d| d.to_string()).collect(),
            patients: PATIENTS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// One slot of the 7-column month grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    /// Empty slot before the first day of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay(DayCell),
}

impl CalendarCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            CalendarCell::MonthDay(day) => Some(day),
            CalendarCell::PaddingBefore => None,
        }
    }

    pub fn is_padding(&self) -> bool {
        matches!(self, CalendarCell::PaddingBefore)
    }
}

/// Cell descriptor for a numbered day of the month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub date_key: DateKey,
    pub day_number: u32,
    pub is_today: bool,
    pub has_appointments: bool,
    /// Number of appointments surviving the active filters
    pub appointment_count: usize,
    /// Preview of the first few filtered appointments
    pub visible_appointments: Vec<AppointmentRecord>,
    /// Filtered appointments not shown in the preview
    pub overflow_count: usize,
}

/// A month laid out on a Sunday-first 7-column grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub first_day_of_week: u32, // 0 = Sunday, 1 = Monday, etc.
    pub leading_blanks: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(CalendarCell::as_day)
    }

    pub fn day(&self, day_number: u32) -> Option<&DayCell> {
        self.day_cells().find(|cell| cell.day_number == day_number)
    }

    /// Number of grid rows a renderer needs
    pub fn week_rows(&self) -> usize {
        self.cells.len().div_ceil(7)
    }
}

/// Filtered appointments of a single day, in store order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayList {
    pub date_key: DateKey,
    pub appointments: Vec<AppointmentRecord>,
}

impl DayList {
    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: i32,
    pub day: u32,
    pub formatted_date: String,
    pub iso_date: String,
}

/// Presence checks applied by the appointment form before submitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum FormValidationError {
    #[error("Time is required")]
    MissingTime,
    #[error("Patient is required")]
    MissingPatient,
    #[error("Doctor is required")]
    MissingDoctor,
}

/// Validation result for the appointment form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentFormValidation {
    pub is_valid: bool,
    pub errors: Vec<FormValidationError>,
    /// Record ready to be added when the form is valid
    pub record: Option<AppointmentRecord>,
}
