use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::SettlementError;
use crate::settlement::calculator::{settle, SettlementResult};
use crate::settlement::request::SettlementInput;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::SettleResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    pub payments: Vec<SettlementInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    pub count: usize,
    pub total_payment: Money,
    pub total_vat: Money,
    pub total_card_fee: Money,
    pub total_service_fee: Money,
    pub total_withholding_tax: Money,
    pub total_settlement: Money,
    pub per_payment: Vec<SettlementResult>,
}

/// Settle several payments and total them. Fails on the first invalid
/// payment, naming its position.
pub fn settle_batch(input: &BatchInput) -> SettleResult<ComputationOutput<BatchOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.payments.is_empty() {
        return Err(SettlementError::InsufficientData(
            "Batch must contain at least one payment".to_string(),
        ));
    }

    let mut per_payment: Vec<SettlementResult> = Vec::with_capacity(input.payments.len());
    let mut total_payment = Decimal::ZERO;
    let mut total_vat = Decimal::ZERO;
    let mut total_card_fee = Decimal::ZERO;
    let mut total_service_fee = Decimal::ZERO;
    let mut total_withholding_tax = Decimal::ZERO;
    let mut total_settlement = Decimal::ZERO;

    for (i, payment) in input.payments.iter().enumerate() {
        let output = settle(payment).map_err(|e| match e {
            SettlementError::InvalidInput { field, reason } => SettlementError::InvalidInput {
                field: format!("payments[{i}].{field}"),
                reason,
            },
            SettlementError::InvalidSchedule { field, reason } => {
                SettlementError::InvalidSchedule {
                    field: format!("payments[{i}].schedule.{field}"),
                    reason,
                }
            }
            other => other,
        })?;

        for w in &output.warnings {
            warnings.push(format!("결제 {}: {}", i + 1, w));
        }

        let r = output.result;
        total_payment += r.final_payment_amount;
        total_vat += r.vat;
        total_card_fee += r.card_fee;
        total_service_fee += r.service_fee;
        total_withholding_tax += r.withholding_tax;
        total_settlement += r.final_settlement_amount;
        per_payment.push(r);
    }

    let result = BatchOutput {
        count: per_payment.len(),
        total_payment,
        total_vat,
        total_card_fee,
        total_service_fee,
        total_withholding_tax,
        total_settlement,
        per_payment,
    };

    let assumptions = serde_json::json!({
        "num_payments": input.payments.len(),
        "total_payment": total_payment.to_string(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Batch partner settlement with per-payment breakdown",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
