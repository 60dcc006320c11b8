//! Debt records, payments, and the in-memory ledger that owns them.

pub mod debt;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod payment;
pub mod summary;

pub use debt::{Debt, DebtDraft};
pub use ledger::DebtLedger;
pub use payment::{Payment, PaymentDraft};
pub use summary::{DebtSummary, LedgerSummary};

use crate::errors::{LedgerError, Result};

/// Rejects amounts that are not finite or not strictly positive.
pub(crate) fn validate_amount(label: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(LedgerError::Validation(format!(
            "{label} must be a finite number"
        )));
    }
    if amount <= 0.0 {
        return Err(LedgerError::Validation(format!(
            "{label} must be greater than zero (got {amount})"
        )));
    }
    Ok(())
}
