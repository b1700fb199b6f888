//! Stored document shape for tip records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tipfolio_core::records::{PaymentMethod, TipRecord, ValidatedTip};
use tipfolio_core::utils::time_utils::{date_of_instant, midday_instant};

/// Persisted shape of one tip record.
///
/// `occurred_on` is stored as the fixed midday instant of the calendar date.
/// `occurred_on_iso` is a redundant denormalized ISO-8601 date string kept
/// solely for simple client-side string filtering; it is recomputed from
/// `occurred_on` on every write and is never an independent source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipRecordDocument {
    pub id: String,
    pub owner_id: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub peer_name: Option<String>,
    pub peer_id: Option<String>,
    pub occurred_on: DateTime<Utc>,
    pub occurred_on_iso: String,
    pub recorded_at: DateTime<Utc>,
}

impl TipRecordDocument {
    /// Builds the document for a fresh insert. The store supplies the id;
    /// the creation instant is stamped here.
    pub fn from_validated(id: String, owner_id: &str, tip: ValidatedTip) -> Self {
        Self {
            id,
            owner_id: owner_id.to_string(),
            amount: tip.amount,
            method: tip.method,
            peer_name: tip.peer_name,
            peer_id: tip.peer_id,
            occurred_on: midday_instant(tip.occurred_on),
            occurred_on_iso: tip.occurred_on.format("%Y-%m-%d").to_string(),
            recorded_at: Utc::now(),
        }
    }

    /// Applies a full-record replace. Identity and `recorded_at` are
    /// immutable; the derived ISO date is recomputed along with the instant.
    pub fn apply_replace(&mut self, tip: ValidatedTip) {
        self.amount = tip.amount;
        self.method = tip.method;
        self.peer_name = tip.peer_name;
        self.peer_id = tip.peer_id;
        self.occurred_on = midday_instant(tip.occurred_on);
        self.occurred_on_iso = tip.occurred_on.format("%Y-%m-%d").to_string();
    }
}

impl From<TipRecordDocument> for TipRecord {
    fn from(doc: TipRecordDocument) -> Self {
        TipRecord {
            id: doc.id,
            owner_id: doc.owner_id,
            amount: doc.amount,
            method: doc.method,
            occurred_on: date_of_instant(doc.occurred_on),
            peer_name: doc.peer_name,
            peer_id: doc.peer_id,
            recorded_at: doc.recorded_at,
        }
    }
}
