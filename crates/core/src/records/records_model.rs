//! Tip record domain models.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment method of a tip record (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    PeerSupport,
    DigitalWallet,
}

impl PaymentMethod {
    /// All methods, in stable presentation order. Summaries report every
    /// method in this order even when no records carry it.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::PeerSupport,
        PaymentMethod::DigitalWallet,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::PeerSupport => "Peer support",
            PaymentMethod::DigitalWallet => "Digital wallet",
        }
    }

    /// Whether entries of this method credit a supporting colleague.
    /// Peer-support entries carry a mandatory peer identity and a lower
    /// amount ceiling.
    pub fn is_peer_support(&self) -> bool {
        matches!(self, PaymentMethod::PeerSupport)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Domain model representing one recorded earnings event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TipRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Recording user. Immutable after creation.
    pub owner_id: String,
    /// Positive currency value.
    pub amount: Decimal,
    pub method: PaymentMethod,
    /// Calendar date the tip was earned. Time-of-day carries no meaning;
    /// storage anchors it at a fixed midday instant.
    pub occurred_on: NaiveDate,
    /// Supported colleague's display name. Present only on peer-support
    /// entries.
    pub peer_name: Option<String>,
    /// Registered peer identifier. Present only when the peer was resolved
    /// against the directory; absent for ad-hoc names.
    pub peer_id: Option<String>,
    /// Creation instant. Audit only, never used for filtering.
    pub recorded_at: DateTime<Utc>,
}

/// Input model for creating or editing a tip record.
///
/// An edit is a full-record replace and validates identically to creation,
/// so the same input model serves both paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTipRecord {
    pub amount: Decimal,
    /// No implicit default: the user must pick a method explicitly.
    pub method: Option<PaymentMethod>,
    pub occurred_on: NaiveDate,
    pub peer_name: Option<String>,
    pub peer_id: Option<String>,
}

/// A rule-approved tip, normalized and ready for persistence.
///
/// Produced by [`TipRuleEngine::validate`](super::TipRuleEngine::validate):
/// the amount fits the method's ceiling, the date is not in the future, and
/// peer fields are either established (peer support) or cleared (everything
/// else).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTip {
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub occurred_on: NaiveDate,
    pub peer_name: Option<String>,
    pub peer_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_serde_strings() {
        let json = serde_json::to_string(&PaymentMethod::PeerSupport).unwrap();
        assert_eq!(json, "\"PEER_SUPPORT\"");

        let parsed: PaymentMethod = serde_json::from_str("\"DIGITAL_WALLET\"").unwrap();
        assert_eq!(parsed, PaymentMethod::DigitalWallet);
    }

    #[test]
    fn test_payment_method_all_order_is_stable() {
        let labels: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["Cash", "Card", "Peer support", "Digital wallet"]);
    }

    #[test]
    fn test_only_peer_support_flags_peer_identity() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.is_peer_support(), method == PaymentMethod::PeerSupport);
        }
    }

    #[test]
    fn test_tip_record_serde_camel_case() {
        let record = TipRecord {
            id: "t-1".to_string(),
            owner_id: "u-1".to_string(),
            amount: rust_decimal_macros::dec!(12.5),
            method: PaymentMethod::Cash,
            occurred_on: chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            peer_name: None,
            peer_id: None,
            recorded_at: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"ownerId\""));
        assert!(json.contains("\"occurredOn\""));
        assert!(json.contains("\"recordedAt\""));

        let back: TipRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
