//! Session object tying the ledger to its persistence adapter.

use std::path::Path;

use uuid::Uuid;

use crate::{
    errors::Result,
    ledger::{Debt, DebtDraft, DebtLedger, LedgerSummary, PaymentDraft},
    storage::{KeyValueStore, LedgerPersistence},
};

/// Owns the debt collection for one process and persists every change.
///
/// Commands run on a working copy; the copy replaces the live ledger only
/// after the store accepted it, so a failed command leaves both the
/// in-memory collection and the stored value as they were.
#[derive(Debug)]
pub struct DebtTracker<S> {
    ledger: DebtLedger,
    persistence: LedgerPersistence<S>,
}

impl<S: KeyValueStore> DebtTracker<S> {
    /// Loads the stored collection once and takes ownership of the adapter.
    pub fn open(persistence: LedgerPersistence<S>) -> Result<Self> {
        let ledger = DebtLedger::from_debts(persistence.load()?);
        Ok(Self {
            ledger,
            persistence,
        })
    }

    pub fn debts(&self) -> &[Debt] {
        self.ledger.debts()
    }

    pub fn debt(&self, id: Uuid) -> Option<&Debt> {
        self.ledger.debt(id)
    }

    pub fn summary(&self) -> LedgerSummary {
        self.ledger.summary()
    }

    pub fn resolve_id(&self, input: &str) -> Result<Uuid> {
        self.ledger.resolve_id(input)
    }

    pub fn persistence(&self) -> &LedgerPersistence<S> {
        &self.persistence
    }

    pub fn create_debt(&mut self, draft: DebtDraft) -> Result<&[Debt]> {
        self.apply(|ledger| ledger.create_debt(draft).map(|_| ()))
    }

    pub fn toggle_manual_paid(&mut self, debt_id: Uuid) -> Result<&[Debt]> {
        self.apply(|ledger| ledger.toggle_manual_paid(debt_id).map(|_| ()))
    }

    pub fn record_payment(&mut self, debt_id: Uuid, draft: PaymentDraft) -> Result<&[Debt]> {
        self.apply(|ledger| ledger.record_payment(debt_id, draft).map(|_| ()))
    }

    pub fn add_collection_note(
        &mut self,
        debt_id: Uuid,
        note: impl Into<String>,
    ) -> Result<&[Debt]> {
        let note = note.into();
        self.apply(|ledger| ledger.add_collection_note(debt_id, note).map(|_| ()))
    }

    /// Discards the in-memory collection and reads the store again.
    pub fn reload(&mut self) -> Result<&[Debt]> {
        self.ledger = DebtLedger::from_debts(self.persistence.load()?);
        Ok(self.ledger.debts())
    }

    pub fn export_to_path(&self, path: &Path) -> Result<()> {
        self.persistence.export_to_path(self.ledger.debts(), path)
    }

    /// Replaces the collection with the contents of an exported file.
    pub fn import_from_path(&mut self, path: &Path) -> Result<&[Debt]> {
        let imported = DebtLedger::from_debts(self.persistence.import_from_path(path)?);
        self.persistence.save(imported.debts())?;
        tracing::info!(path = %path.display(), debts = imported.len(), "debt collection imported");
        self.ledger = imported;
        Ok(self.ledger.debts())
    }

    fn apply<F>(&mut self, command: F) -> Result<&[Debt]>
    where
        F: FnOnce(&mut DebtLedger) -> Result<()>,
    {
        let mut working = self.ledger.clone();
        command(&mut working)?;
        self.persistence.save(working.debts())?;
        self.ledger = working;
        Ok(self.ledger.debts())
    }
}
