use rust_decimal::Decimal;

use super::summary_model::{CardSettlement, MethodTotal, TipSummary};
use crate::constants::RECENT_SLICE_LEN;
use crate::records::{PaymentMethod, TipRecord};
use crate::settings::TipPolicy;

/// Computes the dashboard aggregates for a period's records.
///
/// Pure: the same input slice always yields the same summary, and nothing
/// here touches storage. Input is expected newest-first (the store's
/// ordering contract); the service does not re-sort.
pub struct SummaryService {
    policy: TipPolicy,
}

impl SummaryService {
    pub fn new(policy: TipPolicy) -> Self {
        Self { policy }
    }

    pub fn summarize(&self, records: &[TipRecord]) -> TipSummary {
        let mut totals_by_method: Vec<MethodTotal> = PaymentMethod::ALL
            .into_iter()
            .map(|method| MethodTotal {
                method,
                total: Decimal::ZERO,
            })
            .collect();
        let mut grand_total = Decimal::ZERO;
        let mut gross = Decimal::ZERO;

        for record in records {
            grand_total += record.amount;
            if let Some(slot) = totals_by_method
                .iter_mut()
                .find(|entry| entry.method == record.method)
            {
                slot.total += record.amount;
            }
            if record.method == PaymentMethod::Card {
                gross += record.amount;
            }
        }

        let commission = gross * self.policy.card_fee_rate;
        TipSummary {
            totals_by_method,
            grand_total,
            card_settlement: CardSettlement {
                gross,
                commission,
                net: gross - commission,
            },
            recent: records.iter().take(RECENT_SLICE_LEN).cloned().collect(),
        }
    }
}
