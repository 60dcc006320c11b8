//! Read-only views derived from the debt collection. Never persisted.

use uuid::Uuid;

use super::debt::Debt;

#[derive(Debug, Clone, PartialEq)]
pub struct DebtSummary {
    pub id: Uuid,
    pub debtor_name: String,
    pub amount: f64,
    pub total_paid: f64,
    pub remaining: f64,
    pub payment_count: usize,
    pub note_count: usize,
    pub is_paid: bool,
}

impl DebtSummary {
    pub fn from_debt(debt: &Debt) -> Self {
        Self {
            id: debt.id,
            debtor_name: debt.debtor_name().to_string(),
            amount: debt.amount,
            total_paid: debt.total_paid(),
            remaining: debt.remaining(),
            payment_count: debt.payment_history.len(),
            note_count: debt.collection_notes.len(),
            is_paid: debt.is_paid,
        }
    }
}

/// Totals across the whole collection.
///
/// `total_outstanding` only counts debts that are not marked paid, so a
/// manually settled debt contributes nothing even if payments fall short.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerSummary {
    pub debt_count: usize,
    pub open_count: usize,
    pub paid_count: usize,
    pub total_principal: f64,
    pub total_collected: f64,
    pub total_outstanding: f64,
}

impl LedgerSummary {
    pub fn from_debts(debts: &[Debt]) -> Self {
        debts.iter().fold(Self::default(), |mut totals, debt| {
            totals.debt_count += 1;
            totals.total_principal += debt.amount;
            totals.total_collected += debt.total_paid();
            if debt.is_paid {
                totals.paid_count += 1;
            } else {
                totals.open_count += 1;
                totals.total_outstanding += debt.remaining();
            }
            totals
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{DebtDraft, DebtLedger, PaymentDraft};

    #[test]
    fn totals_split_open_and_paid_debts() {
        let mut ledger = DebtLedger::new();
        ledger.create_debt(DebtDraft::new("Ana", 100.0)).unwrap();
        let ana = ledger.debts()[0].id;
        ledger.create_debt(DebtDraft::new("Bia", 40.0)).unwrap();
        let bia = ledger.debts()[0].id;

        ledger.record_payment(ana, PaymentDraft::new(30.0)).unwrap();
        ledger.record_payment(bia, PaymentDraft::new(40.0)).unwrap();

        let summary = LedgerSummary::from_debts(ledger.debts());
        assert_eq!(summary.debt_count, 2);
        assert_eq!(summary.open_count, 1);
        assert_eq!(summary.paid_count, 1);
        assert_eq!(summary.total_principal, 140.0);
        assert_eq!(summary.total_collected, 70.0);
        assert_eq!(summary.total_outstanding, 70.0);
    }

    #[test]
    fn debt_summary_reports_progress() {
        let mut ledger = DebtLedger::new();
        ledger.create_debt(DebtDraft::new("Caro", 90.0)).unwrap();
        let id = ledger.debts()[0].id;
        ledger.record_payment(id, PaymentDraft::new(30.0)).unwrap();
        ledger.add_collection_note(id, "texted").unwrap();

        let summary = ledger.debt(id).unwrap().summary();
        assert_eq!(summary.total_paid, 30.0);
        assert_eq!(summary.remaining, 60.0);
        assert_eq!(summary.payment_count, 1);
        assert_eq!(summary.note_count, 1);
        assert!(!summary.is_paid);
    }

    #[test]
    fn empty_collection_has_zero_totals() {
        assert_eq!(LedgerSummary::from_debts(&[]), LedgerSummary::default());
    }
}
