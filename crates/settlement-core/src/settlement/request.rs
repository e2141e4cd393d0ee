use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SettlementError;
use crate::settlement::schedule::FeeSchedule;
use crate::types::{Money, Rate};
use crate::SettleResult;

/// Largest accepted payment amount (one quintillion won).
pub const MAX_AMOUNT: Money = dec!(1_000_000_000_000_000_000);

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Whether the entered payment amount already contains VAT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatMode {
    /// Amount is VAT-inclusive; supply amount is backed out of it
    #[default]
    Included,
    /// Amount is the supply amount; VAT is added on top
    Excluded,
}

impl VatMode {
    /// Form label for the given VAT rate, e.g. `✅ 포함 (10%)`.
    pub fn label(&self, vat_rate: Rate) -> String {
        let percent = (vat_rate * dec!(100)).normalize();
        match self {
            VatMode::Included => format!("✅ 포함 ({percent}%)"),
            VatMode::Excluded => format!("❌ 미포함 ({percent}% 추가됨)"),
        }
    }
}

impl fmt::Display for VatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VatMode::Included => write!(f, "included"),
            VatMode::Excluded => write!(f, "excluded"),
        }
    }
}

impl FromStr for VatMode {
    type Err = SettlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "included" => Ok(VatMode::Included),
            "excluded" => Ok(VatMode::Excluded),
            other => Err(SettlementError::InvalidInput {
                field: "vat_mode".into(),
                reason: format!("expected 'included' or 'excluded', got '{other}'"),
            }),
        }
    }
}

/// How the customer pays the partner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    /// Tax invoice, settled by bank transfer (no card fee)
    Invoice,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "💳 카드 결제",
            PaymentMethod::Invoice => "📄 계산서 발행",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Invoice => write!(f, "invoice"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = SettlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "invoice" => Ok(PaymentMethod::Invoice),
            other => Err(SettlementError::InvalidInput {
                field: "payment_method".into(),
                reason: format!("expected 'card' or 'invoice', got '{other}'"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A validated settlement request. Only constructible through
/// [`SettlementRequest::new`], so the amount is always a non-negative whole
/// number of won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettlementRequest {
    amount: Money,
    vat_mode: VatMode,
    payment_method: PaymentMethod,
}

impl SettlementRequest {
    pub fn new(
        amount: Money,
        vat_mode: VatMode,
        payment_method: PaymentMethod,
    ) -> SettleResult<Self> {
        if amount < Decimal::ZERO {
            return Err(SettlementError::InvalidInput {
                field: "amount".into(),
                reason: format!("Payment amount cannot be negative, got {amount}"),
            });
        }
        if amount > MAX_AMOUNT {
            return Err(SettlementError::InvalidInput {
                field: "amount".into(),
                reason: format!("Payment amount exceeds the maximum of {MAX_AMOUNT}"),
            });
        }
        if !amount.fract().is_zero() {
            return Err(SettlementError::InvalidInput {
                field: "amount".into(),
                reason: format!("Payment amount must be a whole number of won, got {amount}"),
            });
        }
        Ok(SettlementRequest {
            amount: amount.normalize(),
            vat_mode,
            payment_method,
        })
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn vat_mode(&self) -> VatMode {
        self.vat_mode
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }
}

/// Unvalidated settlement input as it arrives from JSON, flags or bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementInput {
    pub amount: Money,
    #[serde(default)]
    pub vat_mode: VatMode,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<FeeSchedule>,
}

impl SettlementInput {
    pub fn to_request(&self) -> SettleResult<SettlementRequest> {
        SettlementRequest::new(self.amount, self.vat_mode, self.payment_method)
    }

    /// The schedule to apply: the embedded one if present, otherwise standard.
    pub fn effective_schedule(&self) -> FeeSchedule {
        self.schedule.clone().unwrap_or_default()
    }
}
