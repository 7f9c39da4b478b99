// ── Persistent key/value storage ──
//
// The session and preferences persist a handful of string values. The
// backend is pluggable: `MemoryStorage` here, a JSON file in
// `cantina-config`.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::CoreError;

/// Fixed keys under which client state is persisted.
pub mod keys {
    pub const TOKEN: &str = "token";
    /// JSON-encoded `User`.
    pub const USER: &str = "user";
    /// `light` or `dark`.
    pub const THEME: &str = "theme";
    /// `pt-BR` or `en-US`.
    pub const LOCALE: &str = "locale";
}

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// Process-local storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with initial values.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(keys::THEME).unwrap(), None);
        storage.set(keys::THEME, "dark").unwrap();
        assert_eq!(storage.get(keys::THEME).unwrap().as_deref(), Some("dark"));
        storage.remove(keys::THEME).unwrap();
        assert_eq!(storage.get(keys::THEME).unwrap(), None);
    }
}
