use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::errors::{LedgerError, Result};

use super::KeyValueStore;

const VALUE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed store keeping one JSON file per key inside `root`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(LedgerError::Storage(format!(
                "failed to read `{}`: {err}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        write_replacing(&path, value).map_err(|err| {
            LedgerError::Storage(format!("failed to write `{}`: {err}", path.display()))
        })
    }
}

/// Stages `data` next to `path` and renames it into place.
pub fn write_replacing(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches(|c| c == '_' || c == '-').is_empty() {
        "store".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path()).expect("json store");
        (store, temp)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.get("debt-tracker-data").unwrap().is_none());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let (store, _guard) = store_with_temp_dir();
        store.set("debt-tracker-data", "[1]").unwrap();
        store.set("debt-tracker-data", "[2]").unwrap();
        assert_eq!(store.get("debt-tracker-data").unwrap().as_deref(), Some("[2]"));
        assert!(!tmp_path(&store.path_for("debt-tracker-data")).exists());
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        let (store, _guard) = store_with_temp_dir();
        let path = store.path_for("Debt Tracker/Data");
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("debt_tracker_data.json")
        );
    }
}
