use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

use super::validate_amount;

const DATE: &str = "date";
const METHOD: &str = "method";

/// Keys with a typed home on [`Payment`]; pass-through fields may not reuse them.
const RESERVED_FIELDS: &[&str] = &["id", "amount"];

/// A partial or full payment recorded against a debt.
///
/// `date`, `method` and any other form fields are kept verbatim in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub amount: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Payment {
    /// Raw payment date as stored.
    pub fn date(&self) -> Option<&Value> {
        self.extra.get(DATE)
    }

    pub fn method(&self) -> Option<&str> {
        self.extra.get(METHOD).and_then(Value::as_str)
    }
}

/// Caller-supplied payment fields; the ledger assigns the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    pub amount: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PaymentDraft {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    /// Stores the date in `YYYY-MM-DD` form.
    pub fn with_date(self, date: NaiveDate) -> Self {
        self.with_field(DATE, date.to_string())
    }

    pub fn with_method(self, method: impl Into<String>) -> Self {
        self.with_field(METHOD, method.into())
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount("payment amount", self.amount)?;
        if let Some(key) = RESERVED_FIELDS
            .iter()
            .find(|key| self.extra.contains_key(**key))
        {
            return Err(LedgerError::Validation(format!(
                "payment fields may not override `{key}`"
            )));
        }
        Ok(())
    }

    pub(crate) fn into_payment(self, id: Uuid) -> Payment {
        Payment {
            id,
            amount: self.amount,
            extra: self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_rejects_id_override() {
        let draft = PaymentDraft::new(10.0).with_field("id", "forged");
        let err = draft.validate().unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn extra_fields_flatten_into_payment_json() {
        let payment = PaymentDraft::new(25.0)
            .with_method("cash")
            .with_field("receivedBy", "Ana")
            .into_payment(Uuid::nil());
        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["amount"], 25.0);
        assert_eq!(json["method"], "cash");
        assert_eq!(json["receivedBy"], "Ana");
        assert!(json.get("date").is_none());
    }

    #[test]
    fn with_date_stores_calendar_date_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let payment = PaymentDraft::new(5.0)
            .with_date(date)
            .into_payment(Uuid::nil());
        assert_eq!(payment.date(), Some(&Value::from("2024-03-05")));
        assert_eq!(payment.method(), None);
    }
}
