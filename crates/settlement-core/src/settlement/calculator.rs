use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::settlement::request::{PaymentMethod, SettlementInput, SettlementRequest, VatMode};
use crate::settlement::schedule::FeeSchedule;
use crate::types::{round_won, with_metadata, ComputationOutput, Money};
use crate::SettleResult;

pub const ZERO_AMOUNT_NOTICE: &str = "🚨 결제금액이 0원이므로 정산 내역이 없습니다.";
pub const VAT_EXCLUDED_NOTICE: &str =
    "⚠️ 입력된 결제금액에는 부가세가 포함되지 않았습니다. 최종 결제금액이 자동으로 조정되었습니다.";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Breakdown of a single payment into what the partner is finally paid.
///
/// `final_payment_amount == supply_amount + vat`,
/// `pre_tax_settlement == final_payment_amount - vat - card_fee - service_fee` and
/// `final_settlement_amount == pre_tax_settlement - withholding_tax` hold for
/// every result. Pre-tax settlement, withholding tax and final settlement go
/// negative when fees exceed the payment; they are never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Payment amount after VAT normalization (VAT-inclusive)
    pub original_amount: Money,
    /// Amount the customer pays (VAT-inclusive)
    pub final_payment_amount: Money,
    /// Amount paid out to the partner after withholding tax
    pub final_settlement_amount: Money,
    pub pre_tax_settlement: Money,
    /// VAT-exclusive base price
    pub supply_amount: Money,
    pub vat: Money,
    pub card_fee: Money,
    /// Platform / agency commission
    pub service_fee: Money,
    pub withholding_tax: Money,
    /// Display label of the payment method, empty for a zero payment
    pub payment_method_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_mode: Option<VatMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

impl SettlementResult {
    /// The empty settlement returned for a zero payment.
    pub fn zero() -> Self {
        SettlementResult {
            original_amount: Decimal::ZERO,
            final_payment_amount: Decimal::ZERO,
            final_settlement_amount: Decimal::ZERO,
            pre_tax_settlement: Decimal::ZERO,
            supply_amount: Decimal::ZERO,
            vat: Decimal::ZERO,
            card_fee: Decimal::ZERO,
            service_fee: Decimal::ZERO,
            withholding_tax: Decimal::ZERO,
            payment_method_label: String::new(),
            vat_mode: None,
            payment_method: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.final_payment_amount.is_zero() && self.payment_method_label.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Settle a payment under the standard fee schedule.
///
/// 1. Zero payment: everything is zero and the label is empty.
/// 2. VAT: included → supply = round(amount / 1.1), vat = amount - supply;
///    excluded → supply = amount, vat = round(amount * 0.1), amount += vat.
/// 3. Card fee = round(amount * 0.02) + 3,300 for card payments, else 0.
/// 4. Service fee = round(supply * 0.09).
/// 5. Pre-tax = amount - vat - card fee - service fee.
/// 6. Withholding = round(pre-tax * 0.033); final = pre-tax - withholding.
///
/// Every rounding is to a whole won with ties to even.
pub fn calculate_settlement(request: &SettlementRequest) -> SettlementResult {
    compute(request, &FeeSchedule::default())
}

/// Settle a payment under a custom fee schedule.
pub fn calculate_settlement_with(
    request: &SettlementRequest,
    schedule: &FeeSchedule,
) -> SettleResult<SettlementResult> {
    schedule.validate()?;
    Ok(compute(request, schedule))
}

/// Settle a raw input and wrap the result with warnings and metadata.
pub fn settle(input: &SettlementInput) -> SettleResult<ComputationOutput<SettlementResult>> {
    let start = Instant::now();

    let request = input.to_request()?;
    let schedule = input.effective_schedule();
    let result = calculate_settlement_with(&request, &schedule)?;

    let mut warnings = notices(&request);
    if result.pre_tax_settlement < Decimal::ZERO {
        warnings.push(format!(
            "⚠️ 수수료가 결제금액을 초과합니다. 세전 정산액 {}원, 원천징수액과 최종 정산금액도 \
             음수이며 0으로 보정하지 않습니다.",
            result.pre_tax_settlement
        ));
    }
    if !schedule.is_standard() {
        warnings.push(non_standard_schedule_notice(&schedule));
    }

    let assumptions = serde_json::json!({
        "amount": request.amount().to_string(),
        "vat_mode": request.vat_mode(),
        "payment_method": request.payment_method(),
        "schedule": schedule,
        "rounding": "whole won, ties to even, at every step",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Partner settlement: VAT normalization, card and service fees, withholding tax",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Notices shown alongside a settlement, in display order.
pub fn notices(request: &SettlementRequest) -> Vec<String> {
    if request.amount().is_zero() {
        vec![ZERO_AMOUNT_NOTICE.to_string()]
    } else if request.vat_mode() == VatMode::Excluded {
        vec![VAT_EXCLUDED_NOTICE.to_string()]
    } else {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn non_standard_schedule_notice(schedule: &FeeSchedule) -> String {
    let percent = |rate: Decimal| (rate * Decimal::ONE_HUNDRED).normalize();
    format!(
        "ℹ️ 표준이 아닌 수수료 기준이 적용되었습니다. 부가세 {}%, 카드수수료 {}% + {}원, \
         결제대행료 {}%, 원천징수 {}%",
        percent(schedule.vat_rate),
        percent(schedule.card_fee_rate),
        schedule.card_fixed_fee.normalize(),
        percent(schedule.service_fee_rate),
        percent(schedule.withholding_rate),
    )
}

/// Expects a validated schedule.
fn compute(request: &SettlementRequest, schedule: &FeeSchedule) -> SettlementResult {
    let mut amount = request.amount();
    if amount.is_zero() {
        return SettlementResult::zero();
    }

    let (supply_amount, vat) = match request.vat_mode() {
        VatMode::Included => {
            let supply_amount = round_won(amount / (Decimal::ONE + schedule.vat_rate));
            (supply_amount, amount - supply_amount)
        }
        VatMode::Excluded => {
            let vat = round_won(amount * schedule.vat_rate);
            let supply_amount = amount;
            amount += vat;
            (supply_amount, vat)
        }
    };

    let card_fee = match request.payment_method() {
        PaymentMethod::Card => {
            round_won(amount * schedule.card_fee_rate) + schedule.card_fixed_fee.normalize()
        }
        PaymentMethod::Invoice => Decimal::ZERO,
    };
    let service_fee = round_won(supply_amount * schedule.service_fee_rate);

    let pre_tax_settlement = amount - vat - card_fee - service_fee;
    let withholding_tax = round_won(pre_tax_settlement * schedule.withholding_rate);
    let final_settlement_amount = pre_tax_settlement - withholding_tax;

    SettlementResult {
        original_amount: amount,
        final_payment_amount: amount,
        final_settlement_amount,
        pre_tax_settlement,
        supply_amount,
        vat,
        card_fee,
        service_fee,
        withholding_tax,
        payment_method_label: request.payment_method().label().to_string(),
        vat_mode: Some(request.vat_mode()),
        payment_method: Some(request.payment_method()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
