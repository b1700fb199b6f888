use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::records::{PaymentMethod, TipRecord};

/// Total recorded for one payment method within the selected period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub total: Decimal,
}

/// Card settlement figures for the selected period.
///
/// `commission` is the processor's cut of the card gross; `net` is what the
/// user actually keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSettlement {
    pub gross: Decimal,
    pub commission: Decimal,
    pub net: Decimal,
}

/// Aggregated dashboard figures for one period selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipSummary {
    /// One entry per payment method in [`PaymentMethod::ALL`] order; methods
    /// with no records appear with total zero.
    pub totals_by_method: Vec<MethodTotal>,
    /// Sum over every input record regardless of method.
    pub grand_total: Decimal,
    pub card_settlement: CardSettlement,
    /// The first records of the caller-supplied list (newest first by the
    /// store's ordering contract).
    pub recent: Vec<TipRecord>,
}

impl TipSummary {
    /// Presentation copy with the aggregate figures rounded to two decimals.
    ///
    /// Rounding happens here and nowhere earlier; the records in `recent`
    /// keep their entered amounts.
    pub fn rounded(&self) -> TipSummary {
        TipSummary {
            totals_by_method: self
                .totals_by_method
                .iter()
                .map(|entry| MethodTotal {
                    method: entry.method,
                    total: entry.total.round_dp(DISPLAY_DECIMAL_PRECISION),
                })
                .collect(),
            grand_total: self.grand_total.round_dp(DISPLAY_DECIMAL_PRECISION),
            card_settlement: CardSettlement {
                gross: self
                    .card_settlement
                    .gross
                    .round_dp(DISPLAY_DECIMAL_PRECISION),
                commission: self
                    .card_settlement
                    .commission
                    .round_dp(DISPLAY_DECIMAL_PRECISION),
                net: self.card_settlement.net.round_dp(DISPLAY_DECIMAL_PRECISION),
            },
            recent: self.recent.clone(),
        }
    }
}
