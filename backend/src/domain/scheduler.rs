//! Scheduler facade used by the presentation layer.
//!
//! Combines the persisted session flags with the calendar screen's selection
//! controller. The calendar screen (and its seeded appointment store) exists
//! only while the user is signed in.
//!
//! Login, initial loading, add and remove wait for a fixed, configured delay
//! before applying their effect. There is no cancellation: once started, a
//! delayed operation completes as long as its future is polled to the end.

use log::info;
use shared::AppointmentRecord;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SchedulerConfig;
use crate::storage::{InMemorySessionStorage, SessionStorage, YamlSessionRepository};

use super::appointment_store::AppointmentStore;
use super::calendar::CalendarService;
use super::selection::{SelectionController, TransitionError};
use super::session::Session;

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct AppointmentScheduler {
    config: SchedulerConfig,
    session: Session,
    controller: Option<SelectionController>,
    loading: bool,
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl AppointmentScheduler {
    /// Open the scheduler with the storage named by `config`
    pub fn open(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        let storage: Arc<dyn SessionStorage> = match &config.session_file {
            Some(path) => Arc::new(YamlSessionRepository::new(path.clone())),
            None => Arc::new(InMemorySessionStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    /// Open the scheduler on explicit session storage
    pub fn with_storage(config: SchedulerConfig, storage: Arc<dyn SessionStorage>) -> Result<Self, SchedulerError> {
        let session = Session::init(storage)?;
        let mut scheduler = Self { config, session, controller: None, loading: false };
        if scheduler.session.is_authenticated() {
            scheduler.open_calendar();
        }
        Ok(scheduler)
    }

    fn open_calendar(&mut self) {
        info!("🗓️ Opening calendar screen with sample appointments");
        let calendar = CalendarService::with_max_visible(self.config.max_visible_appointments);
        self.controller = Some(SelectionController::new(AppointmentStore::with_sample_data()).with_calendar(calendar));
        self.loading = true;
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Whether the calendar screen is still in its simulated initial load
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn controller(&self) -> Result<&SelectionController, SchedulerError> {
        self.controller.as_ref().ok_or(SchedulerError::Transition(TransitionError::SessionEnded))
    }

    pub fn controller_mut(&mut self) -> Result<&mut SelectionController, SchedulerError> {
        self.controller.as_mut().ok_or(SchedulerError::Transition(TransitionError::SessionEnded))
    }

    /// Finish the calendar screen's initial load after the configured delay
    pub async fn load(&mut self) -> Result<(), SchedulerError> {
        self.controller()?;
        simulate_latency(self.config.initial_load_delay()).await;
        self.loading = false;
        Ok(())
    }

    /// Sign in after the configured delay and open the calendar screen.
    ///
    /// Credentials are checked by the caller before this is invoked.
    pub async fn login(&mut self) -> Result<(), SchedulerError> {
        simulate_latency(self.config.login_delay()).await;
        self.session.login()?;
        if self.controller.is_none() {
            self.open_calendar();
        }
        Ok(())
    }

    /// Clear the authentication flag and discard the calendar screen
    pub fn logout(&mut self) -> Result<(), SchedulerError> {
        self.session.logout()?;
        if let Some(controller) = self.controller.take() {
            let store = controller.logout();
            info!("Discarding {} in-memory appointments", store.total());
        }
        self.loading = false;
        Ok(())
    }

    pub fn toggle_dark_mode(&mut self) -> Result<bool, SchedulerError> {
        Ok(self.session.toggle_dark_mode()?)
    }

    /// Add `record` to the open modal's date after the configured delay
    pub async fn add_appointment(&mut self, record: AppointmentRecord) -> Result<(), SchedulerError> {
        self.ensure_editing("add an appointment")?;
        simulate_latency(self.config.action_delay()).await;
        self.controller_mut()?.add(record)?;
        Ok(())
    }

    /// Submit the open modal's form after the configured delay
    pub async fn submit_draft(&mut self) -> Result<AppointmentRecord, SchedulerError> {
        self.ensure_editing("submit the appointment form")?;
        simulate_latency(self.config.action_delay()).await;
        Ok(self.controller_mut()?.submit_draft()?)
    }

    /// Remove the record at `index` on the open modal's date after the configured delay
    pub async fn remove_appointment(&mut self, index: usize) -> Result<Option<AppointmentRecord>, SchedulerError> {
        self.ensure_editing("remove an appointment")?;
        simulate_latency(self.config.action_delay()).await;
        Ok(self.controller_mut()?.remove(index)?)
    }

    fn ensure_editing(&self, operation: &'static str) -> Result<(), SchedulerError> {
        let controller = self.controller()?;
        if controller.modal_date().is_none() {
            return Err(TransitionError::InvalidTransition { operation, state: controller.state().name() }.into());
        }
        Ok(())
    }
}

impl std::fmt::Debug for AppointmentScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppointmentScheduler")
            .field("session", &self.session)
            .field("calendar_open", &self.controller.is_some())
            .field("loading", &self.loading)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::AUTHENTICATED_KEY;
    use shared::DateKey;
    use std::time::Instant;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn signed_out() -> AppointmentScheduler {
        AppointmentScheduler::open(SchedulerConfig::without_delays()).unwrap()
    }

    #[tokio::test]
    async fn test_calendar_requires_login() {
        let mut scheduler = signed_out();
        assert!(!scheduler.is_authenticated());
        assert!(matches!(
            scheduler.controller(),
            Err(SchedulerError::Transition(TransitionError::SessionEnded))
        ));

        scheduler.login().await.unwrap();
        assert!(scheduler.is_authenticated());
        assert!(scheduler.is_loading());
        assert_eq!(scheduler.controller().unwrap().store().total(), 3);

        scheduler.load().await.unwrap();
        assert!(!scheduler.is_loading());
    }

    #[tokio::test]
    async fn test_restored_session_opens_calendar() {
        let storage = Arc::new(InMemorySessionStorage::with_values([(AUTHENTICATED_KEY, "true")]));
        let scheduler = AppointmentScheduler::with_storage(SchedulerConfig::without_delays(), storage).unwrap();

        assert!(scheduler.is_authenticated());
        assert!(scheduler.controller().is_ok());
    }

    #[tokio::test]
    async fn test_add_and_remove_through_modal() {
        let mut scheduler = signed_out();
        scheduler.login().await.unwrap();
        scheduler.controller_mut().unwrap().day_click(key("2025-07-12")).unwrap();

        scheduler.add_appointment(AppointmentRecord::new("16:00", "David", "Dr. Lee")).await.unwrap();
        assert_eq!(scheduler.controller().unwrap().store().count(key("2025-07-12")), 3);

        let removed = scheduler.remove_appointment(0).await.unwrap();
        assert_eq!(removed.map(|r| r.patient), Some("Alice".to_string()));
        assert_eq!(scheduler.remove_appointment(9).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mutation_without_open_modal_is_rejected() {
        let mut scheduler = signed_out();
        scheduler.login().await.unwrap();

        let result = scheduler.add_appointment(AppointmentRecord::new("16:00", "David", "Dr. Lee")).await;
        assert!(matches!(
            result,
            Err(SchedulerError::Transition(TransitionError::InvalidTransition { state: "viewing", .. }))
        ));
    }

    #[tokio::test]
    async fn test_logout_discards_calendar() {
        let mut scheduler = signed_out();
        scheduler.login().await.unwrap();
        scheduler.controller_mut().unwrap().day_click(key("2025-07-12")).unwrap();
        scheduler.add_appointment(AppointmentRecord::new("16:00", "David", "Dr. Lee")).await.unwrap();

        scheduler.logout().unwrap();
        assert!(!scheduler.is_authenticated());
        assert!(scheduler.controller().is_err());
        assert!(scheduler.remove_appointment(0).await.is_err());

        // A new login starts again from the sample data
        scheduler.login().await.unwrap();
        assert_eq!(scheduler.controller().unwrap().store().count(key("2025-07-12")), 2);
    }

    #[tokio::test]
    async fn test_action_delay_is_applied() {
        let config = SchedulerConfig { action_delay_ms: 20, ..SchedulerConfig::without_delays() };
        let mut scheduler = AppointmentScheduler::open(config).unwrap();
        scheduler.login().await.unwrap();
        scheduler.controller_mut().unwrap().day_click(key("2025-07-13")).unwrap();

        let started = Instant::now();
        scheduler.add_appointment(AppointmentRecord::new("11:00", "Bob", "Dr. Smith")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(scheduler.controller().unwrap().store().count(key("2025-07-13")), 2);
    }
}
