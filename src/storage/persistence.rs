use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::{LedgerError, Result},
    ledger::Debt,
};

use super::{json_file::write_replacing, KeyValueStore};

/// Fixed key the whole collection lives under.
pub const STORAGE_KEY: &str = "debt-tracker-data";
pub const CURRENT_SCHEMA_VERSION: u32 = 1;
/// Unversioned blobs (a bare array of debts) predate the envelope.
const LEGACY_SCHEMA_VERSION: u32 = 0;

/// Versioned envelope written on every save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredLedger {
    pub schema_version: u32,
    #[serde(default)]
    pub debts: Vec<Debt>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredLedgerRef<'a> {
    schema_version: u32,
    debts: &'a [Debt],
}

/// Reads and writes the entire debt collection as one serialized value.
#[derive(Debug)]
pub struct LedgerPersistence<S> {
    store: S,
    key: String,
    pretty: bool,
}

impl<S: KeyValueStore> LedgerPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the stored collection; an absent key yields an empty collection.
    pub fn load(&self) -> Result<Vec<Debt>> {
        match self.store.get(&self.key)? {
            Some(data) => {
                let debts = decode(&data)?;
                tracing::info!(key = %self.key, debts = debts.len(), "debt collection loaded");
                Ok(debts)
            }
            None => {
                tracing::info!(key = %self.key, "no stored debts, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrites the stored value with the full collection.
    pub fn save(&self, debts: &[Debt]) -> Result<()> {
        let data = encode(debts, self.pretty)?;
        self.store.set(&self.key, &data)?;
        tracing::debug!(key = %self.key, debts = debts.len(), bytes = data.len(), "debt collection saved");
        Ok(())
    }

    /// Writes the collection to an arbitrary file in the stored format.
    pub fn export_to_path(&self, debts: &[Debt], path: &Path) -> Result<()> {
        let data = encode(debts, true)?;
        write_replacing(path, &data).map_err(|err| {
            LedgerError::Storage(format!("failed to export to `{}`: {err}", path.display()))
        })?;
        tracing::info!(path = %path.display(), debts = debts.len(), "debt collection exported");
        Ok(())
    }

    /// Reads a collection previously written by [`Self::export_to_path`].
    pub fn import_from_path(&self, path: &Path) -> Result<Vec<Debt>> {
        let data = fs::read_to_string(path)?;
        decode(&data)
    }
}

/// Serializes the collection inside the current envelope.
pub fn encode(debts: &[Debt], pretty: bool) -> Result<String> {
    let envelope = StoredLedgerRef {
        schema_version: CURRENT_SCHEMA_VERSION,
        debts,
    };
    let encoded = if pretty {
        serde_json::to_string_pretty(&envelope)
    } else {
        serde_json::to_string(&envelope)
    };
    encoded.map_err(|err| LedgerError::Storage(format!("failed to serialize debts: {err}")))
}

/// Parses a stored value, accepting both the envelope and the legacy bare array.
pub fn decode(data: &str) -> Result<Vec<Debt>> {
    let raw: Value = serde_json::from_str(data)
        .map_err(|err| LedgerError::CorruptState(format!("stored value is not JSON: {err}")))?;

    let stored = if raw.is_array() {
        let debts: Vec<Debt> = serde_json::from_value(raw).map_err(corrupt)?;
        tracing::warn!(
            from = LEGACY_SCHEMA_VERSION,
            to = CURRENT_SCHEMA_VERSION,
            "upgrading unversioned debt collection"
        );
        StoredLedger {
            schema_version: LEGACY_SCHEMA_VERSION,
            debts,
        }
    } else if raw.is_object() {
        let version = raw
            .get("schemaVersion")
            .and_then(Value::as_u64)
            .ok_or_else(|| LedgerError::CorruptState("stored value has no schemaVersion".into()))?;
        if version > u64::from(CURRENT_SCHEMA_VERSION) {
            return Err(LedgerError::CorruptState(format!(
                "stored schema version {version} is newer than supported version {CURRENT_SCHEMA_VERSION}"
            )));
        }
        serde_json::from_value(raw).map_err(corrupt)?
    } else {
        return Err(LedgerError::CorruptState(
            "stored value must be an object or an array".into(),
        ));
    };

    ensure_unique_ids(&stored.debts)?;
    Ok(stored.debts)
}

fn corrupt(err: serde_json::Error) -> LedgerError {
    LedgerError::CorruptState(format!("stored debts do not match the expected shape: {err}"))
}

fn ensure_unique_ids(debts: &[Debt]) -> Result<()> {
    let mut seen = HashSet::new();
    let ids = debts.iter().flat_map(|debt| {
        std::iter::once(debt.id).chain(debt.payment_history.iter().map(|payment| payment.id))
    });
    for id in ids {
        if !seen.insert(id) {
            return Err(LedgerError::CorruptState(format!(
                "id {id} appears more than once"
            )));
        }
    }
    Ok(())
}
