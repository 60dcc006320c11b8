#![doc(test(attr(deny(warnings))))]

//! Debt Ledger tracks money other people owe you: debts, partial payments,
//! and collection notes, persisted locally as one JSON value.
//!
//! ```
//! use debt_ledger::{
//!     ledger::{DebtDraft, PaymentDraft},
//!     storage::{LedgerPersistence, MemoryStore},
//!     tracker::DebtTracker,
//! };
//!
//! let mut tracker = DebtTracker::open(LedgerPersistence::new(MemoryStore::new())).unwrap();
//! let id = tracker.create_debt(DebtDraft::new("Ana", 100.0)).unwrap()[0].id;
//! tracker.record_payment(id, PaymentDraft::new(100.0)).unwrap();
//! assert!(tracker.debt(id).unwrap().is_paid);
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod tracker;
pub mod utils;

pub use errors::{ErrorKind, LedgerError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Debt Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
