//! Single-day projection used by the mobile day view.

use shared::{DateKey, DayList, FilterCriteria};

use super::appointment_store::AppointmentStore;
use super::filter::filter_appointments;

/// Filtered appointments for `date`, in store order
pub fn day_list(date: DateKey, store: &AppointmentStore, criteria: &FilterCriteria) -> DayList {
    DayList {
        date_key: date,
        appointments: filter_appointments(store.get(date), criteria),
    }
}
