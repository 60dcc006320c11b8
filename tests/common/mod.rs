#![allow(dead_code)]

use debt_ledger::{
    storage::{JsonFileStore, LedgerPersistence},
    tracker::DebtTracker,
};
use tempfile::TempDir;

/// Opens a tracker over a fresh file store; keep the guard alive for the test.
pub fn file_tracker() -> (DebtTracker<JsonFileStore>, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let tracker = reopen(&temp);
    (tracker, temp)
}

/// Opens a second tracker over the same directory, as a restarted process would.
pub fn reopen(temp: &TempDir) -> DebtTracker<JsonFileStore> {
    let store = JsonFileStore::new(temp.path().join("store")).expect("create json store");
    DebtTracker::open(LedgerPersistence::new(store)).expect("open tracker")
}
