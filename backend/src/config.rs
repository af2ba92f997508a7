//! # Scheduler Configuration
//!
//! Tunables for the scheduler, stored as a YAML file.
//!
//! ```yaml
//! initial_load_delay_ms: 1000
//! login_delay_ms: 2500
//! action_delay_ms: 500
//! max_visible_appointments: 3
//! session_file: /home/user/.local/share/appointment-scheduler/session.yaml
//! ```
//!
//! The delays simulate network latency; they are unconditional sleeps.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::calendar::DEFAULT_MAX_VISIBLE_APPOINTMENTS;

const APP_DIRECTORY: &str = "appointment-scheduler";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Delay before the calendar screen reports itself loaded
    pub initial_load_delay_ms: u64,
    /// Delay before a login takes effect
    pub login_delay_ms: u64,
    /// Delay before an add or remove is applied
    pub action_delay_ms: u64,
    /// Appointments previewed per month grid cell
    pub max_visible_appointments: usize,
    /// YAML file for the persisted session flags; in-memory when unset
    pub session_file: Option<PathBuf>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_load_delay_ms: 1000,
            login_delay_ms: 2500,
            action_delay_ms: 500,
            max_visible_appointments: DEFAULT_MAX_VISIBLE_APPOINTMENTS,
            session_file: None,
        }
    }
}

impl SchedulerConfig {
    /// Configuration with every simulated delay disabled
    pub fn without_delays() -> Self {
        Self {
            initial_load_delay_ms: 0,
            login_delay_ms: 0,
            action_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn initial_load_delay(&self) -> Duration {
        Duration::from_millis(self.initial_load_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }

    /// Load configuration from `path`, writing the defaults there if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let yaml_content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {:?}", path))?;
            let config: SchedulerConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse config file {:?}", path))?;
            debug!("Loaded scheduler config from {:?}", path);
            Ok(config)
        } else {
            let config = SchedulerConfig::default();
            config.save(path)?;
            info!("Created default scheduler config at {:?}", path);
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml_content = serde_yaml::to_string(self)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

/// Per-user data directory for the scheduler's files
pub fn default_data_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIRECTORY))
}

/// Default location of the session flag file
pub fn default_session_file() -> Option<PathBuf> {
    default_data_directory().map(|dir| dir.join("session.yaml"))
}
