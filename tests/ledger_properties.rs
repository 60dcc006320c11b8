use std::collections::HashSet;

use debt_ledger::{
    ledger::{DebtDraft, DebtLedger, PaymentDraft},
    LedgerError,
};
use uuid::Uuid;

fn create(ledger: &mut DebtLedger, name: &str, amount: f64) -> Uuid {
    ledger
        .create_debt(DebtDraft::new(name, amount))
        .expect("create debt")[0]
        .id
}

#[test]
fn newest_debt_is_first_and_other_commands_keep_order() {
    let mut ledger = DebtLedger::new();
    let d1 = create(&mut ledger, "D1", 10.0);
    let d2 = create(&mut ledger, "D2", 20.0);
    let d3 = create(&mut ledger, "D3", 30.0);

    let order = |ledger: &DebtLedger| ledger.debts().iter().map(|d| d.id).collect::<Vec<_>>();
    assert_eq!(order(&ledger), vec![d3, d2, d1]);

    ledger.record_payment(d1, PaymentDraft::new(10.0)).unwrap();
    ledger.add_collection_note(d2, "call back").unwrap();
    ledger.toggle_manual_paid(d3).unwrap();
    assert_eq!(order(&ledger), vec![d3, d2, d1]);
}

#[test]
fn paid_flag_tracks_cumulative_payments() {
    let mut ledger = DebtLedger::new();
    let id = create(&mut ledger, "Caio", 100.0);
    let payments = [12.5, 20.0, 17.5, 25.0, 25.0, 5.0];

    let mut running = 0.0;
    for amount in payments {
        running += amount;
        let debts = ledger.record_payment(id, PaymentDraft::new(amount)).unwrap();
        assert_eq!(debts[0].is_paid, running >= 100.0, "after paying {running}");
    }
    let debt = ledger.debt(id).unwrap();
    assert_eq!(debt.payment_history.len(), payments.len());
    assert!(debt.is_paid);
}

#[test]
fn manual_toggle_can_reopen_a_settled_debt() {
    let mut ledger = DebtLedger::new();
    let id = create(&mut ledger, "Duda", 30.0);
    ledger.record_payment(id, PaymentDraft::new(30.0)).unwrap();
    assert!(ledger.debt(id).unwrap().is_paid);

    ledger.toggle_manual_paid(id).unwrap();
    assert!(!ledger.debt(id).unwrap().is_paid);

    // The next payment reapplies the sum rule.
    ledger.record_payment(id, PaymentDraft::new(1.0)).unwrap();
    assert!(ledger.debt(id).unwrap().is_paid);
}

#[test]
fn ids_are_unique_across_many_creates_and_payments() {
    let mut ledger = DebtLedger::new();
    for idx in 0..200 {
        let id = create(&mut ledger, &format!("debtor-{idx}"), 50.0);
        ledger.record_payment(id, PaymentDraft::new(10.0)).unwrap();
        ledger.record_payment(id, PaymentDraft::new(10.0)).unwrap();
    }

    let mut seen = HashSet::new();
    for debt in ledger.debts() {
        assert!(seen.insert(debt.id));
        for payment in &debt.payment_history {
            assert!(seen.insert(payment.id));
        }
    }
    assert_eq!(seen.len(), 600);
}

#[test]
fn invalid_payments_are_rejected_without_side_effects() {
    let mut ledger = DebtLedger::new();
    let id = create(&mut ledger, "Eva", 30.0);
    let before = ledger.clone();

    for amount in [0.0, -1.0, f64::NAN] {
        let err = ledger
            .record_payment(id, PaymentDraft::new(amount))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }
    assert_eq!(ledger, before);
}

#[test]
fn descriptive_fields_pass_through_unchanged() {
    let mut ledger = DebtLedger::new();
    let due = chrono::NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
    let draft = DebtDraft::new("Fabio", 75.0)
        .with_description("borrowed for rent")
        .with_due_date(due)
        .with_field("phone", "555-0142")
        .with_field("tags", serde_json::json!(["family"]));
    let debt = &ledger.create_debt(draft).unwrap()[0];

    assert_eq!(debt.debtor_name(), "Fabio");
    assert_eq!(debt.description(), Some("borrowed for rent"));
    assert_eq!(debt.due_date(), Some(&serde_json::json!("2026-12-01")));
    assert_eq!(debt.extra["phone"], "555-0142");
    assert_eq!(debt.extra["tags"], serde_json::json!(["family"]));
}
