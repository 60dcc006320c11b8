use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

use super::{payment::Payment, summary::DebtSummary, validate_amount};

const DEBTOR_NAME: &str = "debtorName";
const DESCRIPTION: &str = "description";
const DUE_DATE: &str = "dueDate";

/// Bookkeeping keys owned by the ledger; form fields may not reuse them.
const RESERVED_FIELDS: &[&str] = &[
    "id",
    "date",
    "amount",
    "isPaid",
    "collectionNotes",
    "paymentHistory",
];

/// One obligation owed to the user.
///
/// Only bookkeeping fields are typed. Descriptive form fields (`debtorName`,
/// `description`, `dueDate`, anything else) live in `extra` and are written
/// back exactly as they were read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: f64,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub collection_notes: Vec<String>,
    #[serde(default)]
    pub payment_history: Vec<Payment>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Debt {
    /// Debtor name when the form stored it as text, otherwise empty.
    pub fn debtor_name(&self) -> &str {
        self.extra
            .get(DEBTOR_NAME)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn description(&self) -> Option<&str> {
        self.extra.get(DESCRIPTION).and_then(Value::as_str)
    }

    /// Raw due date as stored; may be a date string, an empty string or anything else.
    pub fn due_date(&self) -> Option<&Value> {
        self.extra.get(DUE_DATE)
    }

    /// Sum of every recorded payment, in insertion order.
    pub fn total_paid(&self) -> f64 {
        self.payment_history
            .iter()
            .fold(0.0, |sum, payment| sum + payment.amount)
    }

    /// Principal not yet covered by payments; never negative.
    pub fn remaining(&self) -> f64 {
        (self.amount - self.total_paid()).max(0.0)
    }

    pub fn is_covered_by_payments(&self) -> bool {
        self.total_paid() >= self.amount
    }

    pub fn summary(&self) -> DebtSummary {
        DebtSummary::from_debt(self)
    }

    pub(crate) fn push_payment(&mut self, payment: Payment) {
        self.payment_history.push(payment);
        self.is_paid = self.is_covered_by_payments();
    }

    pub(crate) fn contains_payment(&self, id: Uuid) -> bool {
        self.payment_history.iter().any(|payment| payment.id == id)
    }
}

/// Fields supplied by the creation form; bookkeeping fields are assigned by the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebtDraft {
    pub amount: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DebtDraft {
    pub fn new(debtor_name: impl Into<String>, amount: f64) -> Self {
        Self {
            amount,
            extra: BTreeMap::new(),
        }
        .with_field(DEBTOR_NAME, debtor_name.into())
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.with_field(DESCRIPTION, description.into())
    }

    /// Stores the date in `YYYY-MM-DD` form.
    pub fn with_due_date(self, due_date: NaiveDate) -> Self {
        self.with_field(DUE_DATE, due_date.to_string())
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount("debt amount", self.amount)?;
        if let Some(key) = RESERVED_FIELDS
            .iter()
            .find(|key| self.extra.contains_key(**key))
        {
            return Err(LedgerError::Validation(format!(
                "debt fields may not override `{key}`"
            )));
        }
        Ok(())
    }

    pub(crate) fn into_debt(self, id: Uuid, date: DateTime<Utc>) -> Debt {
        Debt {
            id,
            date,
            amount: self.amount,
            is_paid: false,
            collection_notes: Vec::new(),
            payment_history: Vec::new(),
            extra: self.extra,
        }
    }
}
