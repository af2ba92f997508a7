//! In-memory session storage, scoped to the lifetime of the process.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::SessionStorage;

#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    values: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with existing values, as if restored after a reload
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: Mutex::new(values.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().map_err(|_| anyhow!("session storage lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().map_err(|_| anyhow!("session storage lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().map_err(|_| anyhow!("session storage lock poisoned"))?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = InMemorySessionStorage::new();
        assert_eq!(storage.get("darkMode").unwrap(), None);

        storage.set("darkMode", "true").unwrap();
        assert_eq!(storage.get("darkMode").unwrap().as_deref(), Some("true"));

        storage.set("darkMode", "false").unwrap();
        assert_eq!(storage.get("darkMode").unwrap().as_deref(), Some("false"));

        storage.remove("darkMode").unwrap();
        storage.remove("darkMode").unwrap();
        assert_eq!(storage.get("darkMode").unwrap(), None);
    }

    #[test]
    fn test_with_values() {
        let storage = InMemorySessionStorage::with_values([("isAuthenticated", "true")]);
        assert_eq!(storage.get("isAuthenticated").unwrap().as_deref(), Some("true"));
    }
}
