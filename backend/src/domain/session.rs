//! Session flags that persist across reloads.
//!
//! Two boolean flags are kept in `SessionStorage` as the strings "true" and
//! "false": whether the user is signed in and whether dark mode is on. Values
//! are read once when the session is opened and written through on every
//! change. Any stored value other than "true" reads as false.

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::storage::SessionStorage;

pub const AUTHENTICATED_KEY: &str = "isAuthenticated";
pub const DARK_MODE_KEY: &str = "darkMode";

fn flag_value(flag: bool) -> &'static str {
    if flag { "true" } else { "false" }
}

pub struct Session {
    storage: Arc<dyn SessionStorage>,
    authenticated: bool,
    dark_mode: bool,
}

impl Session {
    /// Open a session, reading both flags from storage
    pub fn init(storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let authenticated = storage.get(AUTHENTICATED_KEY)?.as_deref() == Some("true");
        let dark_mode = storage.get(DARK_MODE_KEY)?.as_deref() == Some("true");
        info!("🔐 Session restored: authenticated={}, dark_mode={}", authenticated, dark_mode);

        Ok(Self { storage, authenticated, dark_mode })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Mark the user as signed in
    pub fn login(&mut self) -> Result<()> {
        self.storage.set(AUTHENTICATED_KEY, flag_value(true))?;
        self.authenticated = true;
        info!("🔐 Logged in");
        Ok(())
    }

    /// Clear the stored authentication flag
    pub fn logout(&mut self) -> Result<()> {
        self.storage.remove(AUTHENTICATED_KEY)?;
        self.authenticated = false;
        info!("👋 Logged out");
        Ok(())
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<()> {
        self.storage.set(DARK_MODE_KEY, flag_value(enabled))?;
        self.dark_mode = enabled;
        Ok(())
    }

    /// Flip dark mode, returning the new value
    pub fn toggle_dark_mode(&mut self) -> Result<bool> {
        let enabled = !self.dark_mode;
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.authenticated)
            .field("dark_mode", &self.dark_mode)
            .finish()
    }
}
