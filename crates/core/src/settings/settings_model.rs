use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Operator-adjustable policy values for tip validation and card settlement.
///
/// The defaults mirror the house rules the engine ships with. An embedding
/// host may supply its own policy at session creation; the rule engine and
/// the summary never read these numbers from anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TipPolicy {
    /// Ceiling for a single peer-support entry.
    pub peer_support_ceiling: Decimal,
    /// Ceiling for a single entry of any other method.
    pub general_ceiling: Decimal,
    /// Processor fee rate applied to the card gross at settlement.
    pub card_fee_rate: Decimal,
}

impl Default for TipPolicy {
    fn default() -> Self {
        Self {
            peer_support_ceiling: dec!(50),
            general_ceiling: dec!(999),
            card_fee_rate: dec!(0.045),
        }
    }
}

impl TipPolicy {
    /// Rejects values the rule engine cannot work with: ceilings must be
    /// positive and the fee rate must lie in `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if self.peer_support_ceiling <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "peerSupportCeiling must be positive, got {}",
                self.peer_support_ceiling
            )));
        }
        if self.general_ceiling <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "generalCeiling must be positive, got {}",
                self.general_ceiling
            )));
        }
        if self.card_fee_rate < Decimal::ZERO || self.card_fee_rate >= Decimal::ONE {
            return Err(Error::InvalidConfigValue(format!(
                "cardFeeRate must be in [0, 1), got {}",
                self.card_fee_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_values() {
        let policy = TipPolicy::default();
        assert_eq!(policy.peer_support_ceiling, dec!(50));
        assert_eq!(policy.general_ceiling, dec!(999));
        assert_eq!(policy.card_fee_rate, dec!(0.045));
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_ceiling() {
        let policy = TipPolicy {
            peer_support_ceiling: Decimal::ZERO,
            ..TipPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = TipPolicy {
            general_ceiling: dec!(-1),
            ..TipPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_fee_rate_outside_unit_interval() {
        let policy = TipPolicy {
            card_fee_rate: Decimal::ONE,
            ..TipPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = TipPolicy {
            card_fee_rate: dec!(-0.01),
            ..TipPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = TipPolicy {
            card_fee_rate: Decimal::ZERO,
            ..TipPolicy::default()
        };
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_serde_partial_overrides_fall_back_to_defaults() {
        let policy: TipPolicy = serde_json::from_str(r#"{"peerSupportCeiling": 75}"#).unwrap();
        assert_eq!(policy.peer_support_ceiling, dec!(75));
        assert_eq!(policy.general_ceiling, dec!(999));
        assert_eq!(policy.card_fee_rate, dec!(0.045));
    }
}
