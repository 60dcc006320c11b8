use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use crate::errors::{LedgerError, Result};

use super::KeyValueStore;

/// In-process key-value store with an optional byte quota across all values.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seeds a raw value, bypassing the quota.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.lock()?.insert(key.into(), value.into());
        Ok(())
    }

    pub fn used_bytes(&self) -> Result<usize> {
        Ok(self
            .lock()?
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.lock()?;
        if let Some(quota) = self.quota_bytes {
            let others: usize = values
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(existing, data)| existing.len() + data.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(LedgerError::Storage(format!(
                    "quota exceeded: {needed} bytes needed, {quota} allowed"
                )));
            }
        }
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_rejection_keeps_previous_value() {
        let store = MemoryStore::with_quota(16);
        store.set("k", "small").unwrap();
        let err = store.set("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn replacing_a_value_does_not_count_it_twice() {
        let store = MemoryStore::with_quota(10);
        store.set("k", "123456789").unwrap();
        store.set("k", "987654321").unwrap();
        assert_eq!(store.used_bytes().unwrap(), 10);
    }
}
