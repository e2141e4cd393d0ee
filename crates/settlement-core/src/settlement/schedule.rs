use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SettlementError;
use crate::settlement::request::MAX_AMOUNT;
use crate::types::{Money, Rate};
use crate::SettleResult;

pub const STANDARD_VAT_RATE: Rate = dec!(0.1);
pub const STANDARD_CARD_FEE_RATE: Rate = dec!(0.02);
pub const STANDARD_CARD_FIXED_FEE: Money = dec!(3300);
pub const STANDARD_SERVICE_FEE_RATE: Rate = dec!(0.09);
pub const STANDARD_WITHHOLDING_RATE: Rate = dec!(0.033);

/// Rates and fixed charges applied when settling a payment.
///
/// Every field is optional on the wire, so a partial schedule file only
/// overrides what it names and inherits the standard rate for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// VAT rate, added on top of or embedded in the payment amount
    pub vat_rate: Rate,
    /// Proportional card processing fee on the VAT-inclusive amount
    pub card_fee_rate: Rate,
    /// Fixed surcharge per card payment, in won
    pub card_fixed_fee: Money,
    /// Platform / agency commission on the supply amount
    pub service_fee_rate: Rate,
    /// Withholding tax rate on the pre-tax settlement
    pub withholding_rate: Rate,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule {
            vat_rate: STANDARD_VAT_RATE,
            card_fee_rate: STANDARD_CARD_FEE_RATE,
            card_fixed_fee: STANDARD_CARD_FIXED_FEE,
            service_fee_rate: STANDARD_SERVICE_FEE_RATE,
            withholding_rate: STANDARD_WITHHOLDING_RATE,
        }
    }
}

impl FeeSchedule {
    pub fn validate(&self) -> SettleResult<()> {
        if self.vat_rate < Decimal::ZERO || self.vat_rate > Decimal::ONE {
            return Err(SettlementError::InvalidSchedule {
                field: "vat_rate".into(),
                reason: format!("VAT rate must be between 0 and 1, got {}", self.vat_rate),
            });
        }
        for (field, rate) in [
            ("card_fee_rate", self.card_fee_rate),
            ("service_fee_rate", self.service_fee_rate),
            ("withholding_rate", self.withholding_rate),
        ] {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(SettlementError::InvalidSchedule {
                    field: field.into(),
                    reason: format!("Rate must be in [0, 1), got {rate}"),
                });
            }
        }
        if self.card_fixed_fee < Decimal::ZERO || !self.card_fixed_fee.fract().is_zero() {
            return Err(SettlementError::InvalidSchedule {
                field: "card_fixed_fee".into(),
                reason: format!(
                    "Fixed card fee must be a non-negative whole amount, got {}",
                    self.card_fixed_fee
                ),
            });
        }
        if self.card_fixed_fee > MAX_AMOUNT {
            return Err(SettlementError::InvalidSchedule {
                field: "card_fixed_fee".into(),
                reason: format!("Fixed card fee exceeds the maximum of {MAX_AMOUNT}"),
            });
        }
        Ok(())
    }

    pub fn is_standard(&self) -> bool {
        *self == FeeSchedule::default()
    }
}
