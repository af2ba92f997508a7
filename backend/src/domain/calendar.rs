//! Calendar domain logic for the appointment scheduler.
//!
//! This module builds the month grid the desktop calendar renders: a
//! Sunday-first, 7-column sequence of padding cells followed by one cell
//! descriptor per day of the month, each carrying that day's filtered
//! appointments. The renderer only draws what it receives.

use chrono::{Datelike, Days, Month, Months, NaiveDate};
use log::debug;
use shared::{AppointmentRecord, CalendarCell, CurrentDateResponse, DateKey, DayCell, FilterCriteria, MonthGrid};

use super::appointment_store::AppointmentStore;
use super::filter::filter_appointments;

/// Default number of appointments previewed inside a day cell
pub const DEFAULT_MAX_VISIBLE_APPOINTMENTS: usize = 3;

/// Calendar service that handles month grid generation and date arithmetic
#[derive(Debug, Clone)]
pub struct CalendarService {
    max_visible_appointments: usize,
}

impl CalendarService {
    pub fn new() -> Self {
        Self { max_visible_appointments: DEFAULT_MAX_VISIBLE_APPOINTMENTS }
    }

    pub fn with_max_visible(max_visible_appointments: usize) -> Self {
        Self { max_visible_appointments }
    }

    /// Generate the month grid containing `reference`, marking the real current date as today
    pub fn generate_month_grid(
        &self,
        reference: DateKey,
        store: &AppointmentStore,
        criteria: &FilterCriteria,
    ) -> MonthGrid {
        self.generate_month_grid_as_of(reference, store, criteria, DateKey::today())
    }

    /// Generate the month grid containing `reference` with an explicit "today"
    pub fn generate_month_grid_as_of(
        &self,
        reference: DateKey,
        store: &AppointmentStore,
        criteria: &FilterCriteria,
        today: DateKey,
    ) -> MonthGrid {
        let month = reference.month();
        let year = reference.year();
        let days_in_month = self.days_in_month(reference);
        let first_day = self.first_day_of_month(reference);

        debug!("🗓️ Generating month grid for {}/{}: {} days, first weekday {}", month, year, days_in_month, first_day);

        let mut cells = Vec::with_capacity((first_day + days_in_month) as usize);
        cells.extend((0..first_day).map(|_| CalendarCell::PaddingBefore));

        for day in 1..=days_in_month {
            let Some(date_key) = DateKey::from_ymd(year, month, day) else {
                continue;
            };
            let filtered = filter_appointments(store.get(date_key), criteria);
            cells.push(CalendarCell::MonthDay(self.build_day_cell(date_key, filtered, today)));
        }

        MonthGrid {
            month,
            year,
            month_name: self.month_name(month).unwrap_or_default().to_string(),
            first_day_of_week: first_day,
            leading_blanks: first_day,
            cells,
        }
    }

    fn build_day_cell(&self, date_key: DateKey, filtered: Vec<AppointmentRecord>, today: DateKey) -> DayCell {
        let appointment_count = filtered.len();
        let visible_appointments: Vec<AppointmentRecord> =
            filtered.into_iter().take(self.max_visible_appointments).collect();
        let overflow_count = appointment_count.saturating_sub(visible_appointments.len());

        DayCell {
            date_key,
            day_number: date_key.day(),
            is_today: date_key == today,
            has_appointments: appointment_count > 0,
            appointment_count,
            visible_appointments,
            overflow_count,
        }
    }

    /// Length of the month containing `date`
    pub fn days_in_month(&self, date: DateKey) -> u32 {
        let first = month_start(date);
        first
            .checked_add_months(Months::new(1))
            .map(|next| next.signed_duration_since(first).num_days() as u32)
            .unwrap_or(31)
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        NaiveDate::from_ymd_opt(year, 2, 29).is_some()
    }

    /// Weekday of the 1st of `date`'s month, 0 = Sunday
    pub fn first_day_of_month(&self, date: DateKey) -> u32 {
        month_start(date).weekday().num_days_from_sunday()
    }

    /// English month name for 1..=12
    pub fn month_name(&self, month: u32) -> Option<&'static str> {
        let month = u8::try_from(month).ok()?;
        Month::try_from(month).ok().map(|m| m.name())
    }

    /// Format a `YYYY-MM-DD` key for display, e.g. "July 12, 2025"
    pub fn format_date_for_display(&self, date_str: &str) -> String {
        match DateKey::parse(date_str) {
            Ok(key) => self.long_date(key),
            Err(_) => date_str.to_string(),
        }
    }

    fn long_date(&self, key: DateKey) -> String {
        format!("{} {}, {}", self.month_name(key.month()).unwrap_or_default(), key.day(), key.year())
    }

    /// First day of the month before `date`'s, if it is still a valid key
    pub fn previous_month(&self, date: DateKey) -> Option<DateKey> {
        month_start(date).checked_sub_months(Months::new(1)).and_then(DateKey::new)
    }

    /// First day of the month after `date`'s, if it is still a valid key
    pub fn next_month(&self, date: DateKey) -> Option<DateKey> {
        month_start(date).checked_add_months(Months::new(1)).and_then(DateKey::new)
    }

    pub fn get_current_date(&self) -> CurrentDateResponse {
        self.current_date_as_of(DateKey::today())
    }

    pub fn current_date_as_of(&self, today: DateKey) -> CurrentDateResponse {
        CurrentDateResponse {
            month: today.month(),
            year: today.year(),
            day: today.day(),
            formatted_date: self.long_date(today),
            iso_date: today.to_string(),
        }
    }
}

fn month_start(date: DateKey) -> NaiveDate {
    let date = date.date();
    date - Days::new(u64::from(date.day0()))
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}
