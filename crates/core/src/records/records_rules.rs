//! Business rules for admitting a tip record.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::directory::DirectoryEntry;
use crate::errors::ValidationRejection;
use crate::settings::TipPolicy;
use crate::utils::text_utils::{capitalize_words, is_valid_name};

use super::records_model::{NewTipRecord, PaymentMethod, ValidatedTip};

/// Ordered business checks for a candidate tip record.
///
/// Checks run in a fixed order and stop at the first failure, so the caller
/// always gets exactly one rejection with a specific message. On success the
/// input is normalized: the peer name is trimmed and word-capitalized, and a
/// submitted peer id survives only while the directory still backs it.
///
/// The engine is pure: the caller supplies "today" and the directory view,
/// and the store is never touched. Ceilings and rates come from the injected
/// [`TipPolicy`], never from hardcoded numbers.
#[derive(Debug, Clone)]
pub struct TipRuleEngine {
    policy: TipPolicy,
}

impl TipRuleEngine {
    pub fn new(policy: TipPolicy) -> Self {
        Self { policy }
    }

    /// The amount ceiling that applies to a method under the current policy.
    pub fn ceiling_for(&self, method: PaymentMethod) -> Decimal {
        if method.is_peer_support() {
            self.policy.peer_support_ceiling
        } else {
            self.policy.general_ceiling
        }
    }

    /// Validates a draft against the business limits.
    ///
    /// `today` is evaluated by the caller at validation time, not at record
    /// construction time, so edits re-check against the current date. The
    /// directory view backs the peer-id retention check; an incomplete
    /// directory only means the id is dropped and the entry stays ad-hoc.
    pub fn validate(
        &self,
        draft: &NewTipRecord,
        today: NaiveDate,
        directory: &[DirectoryEntry],
    ) -> Result<ValidatedTip, ValidationRejection> {
        let method = draft.method.ok_or(ValidationRejection::MissingMethod)?;

        if draft.amount <= Decimal::ZERO {
            return Err(ValidationRejection::InvalidAmount);
        }

        if draft.occurred_on > today {
            return Err(ValidationRejection::FutureDate);
        }

        let limit = self.ceiling_for(method);
        if draft.amount > limit {
            return Err(ValidationRejection::AmountOverLimit { method, limit });
        }

        let (peer_name, peer_id) = if method.is_peer_support() {
            let raw = draft.peer_name.as_deref().unwrap_or_default();
            if !is_valid_name(raw) {
                return Err(ValidationRejection::InvalidPeerName);
            }
            let name = capitalize_words(raw.trim());
            let peer_id = draft
                .peer_id
                .as_deref()
                .filter(|id| directory_backs(directory, id, &name))
                .map(str::to_string);
            (Some(name), peer_id)
        } else {
            // Cleared, not merely ignored: non-peer methods persist no peer fields.
            (None, None)
        };

        Ok(ValidatedTip {
            amount: draft.amount,
            method,
            occurred_on: draft.occurred_on,
            peer_name,
            peer_id,
        })
    }
}

/// True when `id` denotes a directory entry whose display name matches the
/// normalized peer name (trimmed, case-insensitive).
fn directory_backs(directory: &[DirectoryEntry], id: &str, name: &str) -> bool {
    directory
        .iter()
        .find(|entry| entry.id == id)
        .is_some_and(|entry| entry.display_name.trim().to_lowercase() == name.to_lowercase())
}
