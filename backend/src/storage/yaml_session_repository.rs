//! # YAML Session Repository
//!
//! File-backed session storage using a single YAML mapping of string keys to
//! string values.
//!
//! ## YAML Format
//!
//! ```yaml
//! darkMode: "true"
//! isAuthenticated: "true"
//! ```
//!
//! Writes go to a temp file that is then renamed into place.

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::traits::SessionStorage;

#[derive(Debug)]
pub struct YamlSessionRepository {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file
    write_lock: Mutex<()>,
}

impl YamlSessionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all values, treating a missing file as empty
    fn load_values(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let yaml_content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file {:?}", self.path))?;
        if yaml_content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let values: BTreeMap<String, String> = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse session file {:?}", self.path))?;
        debug!("Loaded {} session values from {:?}", values.len(), self.path);
        Ok(values)
    }

    fn save_values(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                info!("Created session directory: {:?}", parent);
            }
        }

        let yaml_content = serde_yaml::to_string(values)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &self.path)?;

        debug!("Saved session values to {:?}", self.path);
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.write_lock.lock().map_err(|_| anyhow!("session file lock poisoned"))?;
        let mut values = self.load_values()?;
        apply(&mut values);
        self.save_values(&values)
    }
}

impl SessionStorage for YamlSessionRepository {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_values()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|values| {
            values.remove(key);
        })
    }
}
