//! # Selection Controller
//!
//! Tracks which date the calendar screen is showing and which date, if any,
//! has its add/remove modal open. It is the single owner of the appointment
//! store: every mutation goes through the modal date held in the `Editing`
//! state, so add and remove can never target a stale date.
//!
//! ## States
//!
//! - **Idle**: no date selected
//! - **Viewing**: a date is active for the day list and month grid
//! - **Editing**: the modal for a date is open, with its own form draft
//!
//! Logging out consumes the controller and hands back the store for disposal.

use log::{info, warn};
use shared::{AppointmentRecord, DateKey, DayList, FilterCriteria, FormValidationError, MonthGrid};

use super::appointment_form::AppointmentDraft;
use super::appointment_store::AppointmentStore;
use super::calendar::CalendarService;
use super::day_list::day_list;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    Idle,
    Viewing {
        active_date: DateKey,
    },
    Editing {
        /// Date shown behind the modal; restored on close
        active_date: DateKey,
        /// Date whose appointments the modal edits
        modal_date: DateKey,
        draft: AppointmentDraft,
    },
}

impl SelectionState {
    pub fn name(&self) -> &'static str {
        match self {
            SelectionState::Idle => "idle",
            SelectionState::Viewing { .. } => "viewing",
            SelectionState::Editing { .. } => "editing",
        }
    }
}

/// Operations requested in a state that does not accept them
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot {operation} while {state}")]
    InvalidTransition { operation: &'static str, state: &'static str },
    #[error("Appointment form is incomplete: {0:?}")]
    IncompleteForm(Vec<FormValidationError>),
    #[error("Session has ended")]
    SessionEnded,
}

fn rejection(state: &SelectionState, operation: &'static str) -> TransitionError {
    warn!("Rejected {} while {}", operation, state.name());
    TransitionError::InvalidTransition { operation, state: state.name() }
}

#[derive(Debug)]
pub struct SelectionController {
    store: AppointmentStore,
    state: SelectionState,
    criteria: FilterCriteria,
    calendar: CalendarService,
}

impl SelectionController {
    /// Start in `Viewing` with today's local date active
    pub fn new(store: AppointmentStore) -> Self {
        Self::viewing(store, DateKey::today())
    }

    /// Start in `Viewing` with an explicit active date
    pub fn viewing(store: AppointmentStore, active_date: DateKey) -> Self {
        Self::with_state(store, SelectionState::Viewing { active_date })
    }

    /// Start with nothing selected
    pub fn idle(store: AppointmentStore) -> Self {
        Self::with_state(store, SelectionState::Idle)
    }

    fn with_state(store: AppointmentStore, state: SelectionState) -> Self {
        Self {
            store,
            state,
            criteria: FilterCriteria::default(),
            calendar: CalendarService::new(),
        }
    }

    pub fn with_calendar(mut self, calendar: CalendarService) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn store(&self) -> &AppointmentStore {
        &self.store
    }

    pub fn calendar(&self) -> &CalendarService {
        &self.calendar
    }

    /// Date driving the day list and month grid, if any
    pub fn active_date(&self) -> Option<DateKey> {
        match &self.state {
            SelectionState::Idle => None,
            SelectionState::Viewing { active_date } | SelectionState::Editing { active_date, .. } => Some(*active_date),
        }
    }

    /// Date whose modal is open, if any
    pub fn modal_date(&self) -> Option<DateKey> {
        match &self.state {
            SelectionState::Editing { modal_date, .. } => Some(*modal_date),
            _ => None,
        }
    }

    fn reject(&self, operation: &'static str) -> TransitionError {
        rejection(&self.state, operation)
    }

    /// Make `date` the active display date (calendar navigation, date picker)
    pub fn select_date(&mut self, date: DateKey) -> Result<(), TransitionError> {
        match self.state {
            SelectionState::Idle | SelectionState::Viewing { .. } => {
                info!("📅 Selected date {}", date);
                self.state = SelectionState::Viewing { active_date: date };
                Ok(())
            }
            SelectionState::Editing { .. } => Err(self.reject("select a date")),
        }
    }

    /// Open the modal for `date`
    pub fn day_click(&mut self, date: DateKey) -> Result<(), TransitionError> {
        match self.state {
            SelectionState::Viewing { active_date } => {
                info!("📅 Opening appointments modal for {}", date);
                self.state = SelectionState::Editing { active_date, modal_date: date, draft: AppointmentDraft::new() };
                Ok(())
            }
            _ => Err(self.reject("open a day")),
        }
    }

    /// Append `record` to the modal date; the modal stays open
    pub fn add(&mut self, record: AppointmentRecord) -> Result<(), TransitionError> {
        let date = self.modal_date().ok_or_else(|| self.reject("add an appointment"))?;
        self.store.add(date, record);
        Ok(())
    }

    /// Remove the record at `index` on the modal date; the modal stays open.
    ///
    /// Out-of-range indices are ignored and yield `Ok(None)`.
    pub fn remove(&mut self, index: usize) -> Result<Option<AppointmentRecord>, TransitionError> {
        let date = self.modal_date().ok_or_else(|| self.reject("remove an appointment"))?;
        Ok(self.store.remove(date, index))
    }

    /// Unfiltered appointments listed inside the open modal
    pub fn modal_appointments(&self) -> Result<&[AppointmentRecord], TransitionError> {
        let date = self.modal_date().ok_or_else(|| self.reject("list modal appointments"))?;
        Ok(self.store.get(date))
    }

    /// Form draft of the open modal
    pub fn draft_mut(&mut self) -> Result<&mut AppointmentDraft, TransitionError> {
        match &mut self.state {
            SelectionState::Editing { draft, .. } => Ok(draft),
            other => Err(rejection(other, "edit the appointment form")),
        }
    }

    /// Validate the draft, add it to the modal date and reset the form.
    ///
    /// An incomplete draft leaves both the store and the draft untouched.
    pub fn submit_draft(&mut self) -> Result<AppointmentRecord, TransitionError> {
        let (date, record) = match &mut self.state {
            SelectionState::Editing { modal_date, draft, .. } => {
                let record = draft.to_record().map_err(TransitionError::IncompleteForm)?;
                draft.clear();
                (*modal_date, record)
            }
            other => return Err(rejection(other, "submit the appointment form")),
        };

        self.store.add(date, record.clone());
        Ok(record)
    }

    /// Close the modal, discarding its form draft
    pub fn close(&mut self) -> Result<(), TransitionError> {
        match self.state {
            SelectionState::Editing { active_date, modal_date, .. } => {
                info!("📅 Closing appointments modal for {}", modal_date);
                self.state = SelectionState::Viewing { active_date };
                Ok(())
            }
            _ => Err(self.reject("close the modal")),
        }
    }

    /// Tear down the controller at session end, returning the store
    pub fn logout(self) -> AppointmentStore {
        info!("👋 Ending calendar session from {} state", self.state.name());
        self.store
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        info!("🔎 Filter set to doctor={:?} patient={:?}", criteria.active_doctor(), criteria.active_patient());
        self.criteria = criteria;
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
    }

    /// Date whose month the grid shows: the active date, or today when idle
    pub fn displayed_date(&self) -> DateKey {
        self.active_date().unwrap_or_else(DateKey::today)
    }

    /// Move the active date to the first day of the previous month
    pub fn previous_month(&mut self) -> Result<DateKey, TransitionError> {
        let target = self.calendar.previous_month(self.displayed_date());
        self.jump_to_month(target, "go to the previous month")
    }

    /// Move the active date to the first day of the next month
    pub fn next_month(&mut self) -> Result<DateKey, TransitionError> {
        let target = self.calendar.next_month(self.displayed_date());
        self.jump_to_month(target, "go to the next month")
    }

    fn jump_to_month(&mut self, target: Option<DateKey>, operation: &'static str) -> Result<DateKey, TransitionError> {
        let target = target.ok_or_else(|| self.reject(operation))?;
        if matches!(self.state, SelectionState::Editing { .. }) {
            return Err(self.reject(operation));
        }
        self.select_date(target)?;
        Ok(target)
    }

    pub fn go_to_today(&mut self) -> Result<DateKey, TransitionError> {
        let today = DateKey::today();
        self.select_date(today)?;
        Ok(today)
    }

    /// Month grid for the displayed month with the active filters
    pub fn month_grid(&self) -> MonthGrid {
        self.calendar.generate_month_grid(self.displayed_date(), &self.store, &self.criteria)
    }

    pub fn month_grid_as_of(&self, today: DateKey) -> MonthGrid {
        let reference = self.active_date().unwrap_or(today);
        self.calendar.generate_month_grid_as_of(reference, &self.store, &self.criteria, today)
    }

    /// Day list for the displayed date with the active filters
    pub fn day_list(&self) -> DayList {
        day_list(self.displayed_date(), &self.store, &self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn controller() -> SelectionController {
        SelectionController::viewing(AppointmentStore::with_sample_data(), key("2025-07-12"))
    }

    #[test]
    fn test_new_starts_viewing_today() {
        let controller = SelectionController::new(AppointmentStore::new());
        assert_eq!(controller.state(), &SelectionState::Viewing { active_date: DateKey::today() });
    }

    #[test]
    fn test_select_date_from_idle_and_viewing() {
        let mut controller = SelectionController::idle(AppointmentStore::new());
        assert_eq!(controller.active_date(), None);

        controller.select_date(key("2025-07-01")).unwrap();
        assert_eq!(controller.active_date(), Some(key("2025-07-01")));

        controller.select_date(key("2025-07-02")).unwrap();
        assert_eq!(controller.state(), &SelectionState::Viewing { active_date: key("2025-07-02") });
    }

    #[test]
    fn test_day_click_opens_modal() {
        let mut controller = controller();
        controller.day_click(key("2025-07-13")).unwrap();

        assert_eq!(controller.modal_date(), Some(key("2025-07-13")));
        assert_eq!(controller.active_date(), Some(key("2025-07-12")));
        assert_eq!(controller.modal_appointments().unwrap().len(), 1);
    }

    #[test]
    fn test_day_click_rejected_when_idle_or_editing() {
        let mut idle = SelectionController::idle(AppointmentStore::new());
        assert!(matches!(
            idle.day_click(key("2025-07-13")),
            Err(TransitionError::InvalidTransition { state: "idle", .. })
        ));

        let mut controller = controller();
        controller.day_click(key("2025-07-13")).unwrap();
        assert!(controller.day_click(key("2025-07-14")).is_err());
        assert_eq!(controller.modal_date(), Some(key("2025-07-13")));
    }

    #[test]
    fn test_add_and_remove_target_modal_date() {
        let mut controller = controller();
        controller.day_click(key("2025-07-12")).unwrap();

        controller.add(AppointmentRecord::new("16:00", "David", "Dr. Lee")).unwrap();
        let patients: Vec<&str> = controller.modal_appointments().unwrap().iter().map(|r| r.patient.as_str()).collect();
        assert_eq!(patients, vec!["Alice", "Bob", "David"]);

        let removed = controller.remove(0).unwrap();
        assert_eq!(removed.map(|r| r.patient), Some("Alice".to_string()));
        assert_eq!(controller.store().count(key("2025-07-12")), 2);

        // Stays open after both mutations
        assert!(matches!(controller.state(), SelectionState::Editing { .. }));
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut controller = controller();
        controller.day_click(key("2025-07-13")).unwrap();

        assert_eq!(controller.remove(5).unwrap(), None);
        assert_eq!(controller.store().count(key("2025-07-13")), 1);
    }

    #[test]
    fn test_mutations_rejected_outside_editing() {
        let mut controller = controller();
        let before = controller.store().clone();

        assert!(controller.add(AppointmentRecord::new("10:00", "Alice", "Dr. Smith")).is_err());
        assert!(controller.remove(0).is_err());
        assert!(controller.submit_draft().is_err());
        assert!(controller.close().is_err());
        assert_eq!(controller.store(), &before);
    }

    #[test]
    fn test_select_date_rejected_while_editing() {
        let mut controller = controller();
        controller.day_click(key("2025-07-13")).unwrap();
        assert!(controller.select_date(key("2025-08-01")).is_err());
        assert!(controller.next_month().is_err());
    }

    #[test]
    fn test_close_returns_to_viewing_and_discards_draft() {
        let mut controller = controller();
        controller.day_click(key("2025-07-20")).unwrap();
        controller.draft_mut().unwrap().patient = "Bob".to_string();

        controller.close().unwrap();
        assert_eq!(controller.state(), &SelectionState::Viewing { active_date: key("2025-07-12") });

        controller.day_click(key("2025-07-20")).unwrap();
        assert_eq!(controller.draft_mut().unwrap(), &AppointmentDraft::new());
    }

    #[test]
    fn test_submit_draft() {
        let mut controller = controller();
        controller.day_click(key("2025-07-20")).unwrap();

        *controller.draft_mut().unwrap() = AppointmentDraft::filled("10:30", "Charlie", "Dr. Johnson");
        let record = controller.submit_draft().unwrap();

        assert_eq!(record, AppointmentRecord::new("10:30", "Charlie", "Dr. Johnson"));
        assert_eq!(controller.store().get(key("2025-07-20")), &[record]);
        assert_eq!(controller.draft_mut().unwrap(), &AppointmentDraft::new());
    }

    #[test]
    fn test_incomplete_draft_is_not_added() {
        let mut controller = controller();
        controller.day_click(key("2025-07-20")).unwrap();
        controller.draft_mut().unwrap().time = "10:30".to_string();

        let err = controller.submit_draft().unwrap_err();
        assert_eq!(
            err,
            TransitionError::IncompleteForm(vec![FormValidationError::MissingPatient, FormValidationError::MissingDoctor])
        );
        assert!(controller.store().get(key("2025-07-20")).is_empty());
        assert_eq!(controller.draft_mut().unwrap().time, "10:30");
    }

    #[test]
    fn test_month_navigation() {
        let mut controller = SelectionController::viewing(AppointmentStore::new(), key("2025-12-15"));

        assert_eq!(controller.next_month().unwrap(), key("2026-01-01"));
        assert_eq!(controller.previous_month().unwrap(), key("2025-12-01"));
        assert_eq!(controller.previous_month().unwrap(), key("2025-11-01"));
        assert_eq!(controller.active_date(), Some(key("2025-11-01")));
    }

    #[test]
    fn test_month_navigation_stops_at_last_key_year() {
        let mut controller = SelectionController::viewing(AppointmentStore::new(), key("9999-12-20"));

        assert!(matches!(
            controller.next_month(),
            Err(TransitionError::InvalidTransition { operation: "go to the next month", .. })
        ));
        assert_eq!(controller.active_date(), Some(key("9999-12-20")));
        assert_eq!(controller.previous_month().unwrap(), key("9999-11-01"));
    }

    #[test]
    fn test_projections_follow_filter_and_active_date() {
        let mut controller = controller();

        let grid = controller.month_grid_as_of(key("2025-07-12"));
        assert_eq!(grid.month, 7);
        assert!(grid.day(12).unwrap().is_today);
        assert_eq!(grid.day(12).unwrap().appointment_count, 2);

        controller.set_filter(FilterCriteria::by_patient("Bob"));
        assert_eq!(controller.month_grid_as_of(key("2025-07-12")).day(12).unwrap().appointment_count, 1);
        assert_eq!(controller.day_list().appointments.len(), 1);

        controller.clear_filters();
        assert_eq!(controller.day_list().appointments.len(), 2);
    }

    #[test]
    fn test_logout_hands_back_store() {
        let mut controller = controller();
        controller.day_click(key("2025-07-12")).unwrap();
        controller.add(AppointmentRecord::new("18:00", "David", "Dr. Lee")).unwrap();

        let store = controller.logout();
        assert_eq!(store.count(key("2025-07-12")), 3);
    }
}
