use chrono::Utc;
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

use super::{
    debt::{Debt, DebtDraft},
    payment::PaymentDraft,
    summary::LedgerSummary,
};

/// Authoritative, ordered collection of debts (most recent first).
///
/// Every command validates before mutating, so a failed command leaves the
/// collection exactly as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebtLedger {
    debts: Vec<Debt>,
}

impl DebtLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_debts(debts: Vec<Debt>) -> Self {
        Self { debts }
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn into_debts(self) -> Vec<Debt> {
        self.debts
    }

    pub fn debt(&self, id: Uuid) -> Option<&Debt> {
        self.debts.iter().find(|debt| debt.id == id)
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_debts(&self.debts)
    }

    /// Creates a debt from form data and prepends it to the collection.
    pub fn create_debt(&mut self, draft: DebtDraft) -> Result<&[Debt]> {
        draft.validate()?;
        let id = self.fresh_id();
        let debt = draft.into_debt(id, Utc::now());
        tracing::debug!(debt_id = %id, amount = debt.amount, "debt created");
        self.debts.insert(0, debt);
        Ok(&self.debts)
    }

    /// Flips `is_paid` regardless of the payment total.
    pub fn toggle_manual_paid(&mut self, debt_id: Uuid) -> Result<&[Debt]> {
        let debt = self.debt_mut(debt_id)?;
        debt.is_paid = !debt.is_paid;
        tracing::debug!(debt_id = %debt_id, is_paid = debt.is_paid, "paid flag toggled");
        Ok(&self.debts)
    }

    /// Appends a payment and recomputes `is_paid` from the payment total.
    pub fn record_payment(&mut self, debt_id: Uuid, draft: PaymentDraft) -> Result<&[Debt]> {
        draft.validate()?;
        // Checked before allocating an id so a miss leaves nothing behind.
        self.debt_mut(debt_id)?;
        let payment_id = self.fresh_id();
        let debt = self.debt_mut(debt_id)?;
        debt.push_payment(draft.into_payment(payment_id));
        tracing::debug!(
            debt_id = %debt_id,
            payment_id = %payment_id,
            total_paid = debt.total_paid(),
            is_paid = debt.is_paid,
            "payment recorded"
        );
        Ok(&self.debts)
    }

    /// Appends `note` verbatim; empty notes are accepted.
    pub fn add_collection_note(
        &mut self,
        debt_id: Uuid,
        note: impl Into<String>,
    ) -> Result<&[Debt]> {
        let debt = self.debt_mut(debt_id)?;
        debt.collection_notes.push(note.into());
        tracing::debug!(
            debt_id = %debt_id,
            notes = debt.collection_notes.len(),
            "collection note added"
        );
        Ok(&self.debts)
    }

    /// Resolves a full id or a unique, case-insensitive id prefix.
    pub fn resolve_id(&self, input: &str) -> Result<Uuid> {
        let needle = input.trim().to_ascii_lowercase();
        if let Ok(id) = Uuid::parse_str(&needle) {
            return Ok(id);
        }
        if needle.is_empty() {
            return Err(LedgerError::Validation("debt id must not be empty".into()));
        }
        let mut matches = self
            .debts
            .iter()
            .filter(|debt| debt.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(debt), None) => Ok(debt.id),
            (None, _) => {
                tracing::warn!(prefix = %needle, "no debt id matches prefix");
                Err(LedgerError::UnknownDebtPrefix(needle))
            }
            (Some(_), Some(_)) => Err(LedgerError::Validation(format!(
                "debt id prefix `{needle}` is ambiguous"
            ))),
        }
    }

    /// Ids already in use by a debt or a payment.
    fn contains_id(&self, id: Uuid) -> bool {
        self.debts
            .iter()
            .any(|debt| debt.id == id || debt.contains_payment(id))
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if !self.contains_id(id) {
                return id;
            }
        }
    }

    fn debt_mut(&mut self, debt_id: Uuid) -> Result<&mut Debt> {
        match self.debts.iter_mut().find(|debt| debt.id == debt_id) {
            Some(debt) => Ok(debt),
            None => {
                tracing::warn!(debt_id = %debt_id, "command references unknown debt");
                Err(LedgerError::DebtNotFound(debt_id))
            }
        }
    }
}
