use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use settlement_core::display::statement::{amount_caption, SettlementStatement};
use settlement_core::display::words::korean_words;
use settlement_core::settlement::batch::{self, BatchInput};
use settlement_core::settlement::calculator;
use settlement_core::settlement::request::{PaymentMethod, SettlementInput, VatMode};

use crate::input;

/// Arguments for settling a single payment
#[derive(Args)]
pub struct CalculateArgs {
    /// Payment amount in whole won (e.g. 11000)
    #[arg(long)]
    pub amount: Option<u64>,

    /// Whether the amount already includes 10% VAT
    #[arg(long, alias = "vat-mode", default_value = "included")]
    pub vat: VatMode,

    /// Payment method
    #[arg(long, alias = "payment-method", default_value = "card")]
    pub payment: PaymentMethod,

    /// YAML or JSON file overriding the standard fee schedule
    #[arg(long)]
    pub schedule: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for settling a batch of payments
#[derive(Args)]
pub struct BatchArgs {
    /// Path to JSON input file with a `payments` array
    #[arg(long)]
    pub input: Option<String>,

    /// YAML or JSON file applied to payments that carry no schedule of their own
    #[arg(long)]
    pub schedule: Option<String>,
}

/// Arguments for the amount caption
#[derive(Args)]
pub struct CaptionArgs {
    /// Payment amount in whole won
    #[arg(long)]
    pub amount: u64,
}

/// Arguments for printing the fee schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// YAML or JSON file overriding the standard fee schedule
    #[arg(long)]
    pub schedule: Option<String>,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let settlement_input = calculate_input(&args)?;
    tracing::info!(
        amount = %settlement_input.amount,
        vat_mode = %settlement_input.vat_mode,
        payment_method = %settlement_input.payment_method,
        "settling payment"
    );

    let output = calculator::settle(&settlement_input)?;
    tracing::debug!(
        final_settlement = %output.result.final_settlement_amount,
        elapsed_us = output.metadata.computation_time_us,
        "settlement computed"
    );

    let statement = SettlementStatement::from_result(&output.result);
    let mut value = serde_json::to_value(output)?;
    if let Value::Object(ref mut map) = value {
        map.insert("statement".to_string(), serde_json::to_value(statement)?);
    }
    Ok(value)
}

pub fn run_batch(args: BatchArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut batch_input: BatchInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for batch settlement".into());
    };

    if args.schedule.is_some() {
        let schedule = input::schedule::load_schedule(args.schedule.as_deref())?;
        for payment in batch_input.payments.iter_mut() {
            if payment.schedule.is_none() {
                payment.schedule = Some(schedule.clone());
            }
        }
    }

    tracing::info!(payments = batch_input.payments.len(), "settling batch");
    let result = batch::settle_batch(&batch_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_caption(args: CaptionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::json!({
        "amount": args.amount.to_string(),
        "words": korean_words(args.amount),
        "caption": amount_caption(args.amount),
    }))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule = input::schedule::load_schedule(args.schedule.as_deref())?;
    let mut value = serde_json::to_value(&schedule)?;
    if let Value::Object(ref mut map) = value {
        map.insert("is_standard".to_string(), Value::Bool(schedule.is_standard()));
    }
    Ok(value)
}

/// Build the settlement input from a JSON file, `--amount` flags, or piped
/// stdin, in that order. A `--schedule` file applies unless the JSON carries
/// its own.
fn calculate_input(args: &CalculateArgs) -> Result<SettlementInput, Box<dyn std::error::Error>> {
    let mut settlement_input: SettlementInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if args.amount.is_some() {
        input_from_flags(args)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--amount is required (or provide --input or stdin)".into());
    };

    if settlement_input.schedule.is_none() && args.schedule.is_some() {
        settlement_input.schedule = Some(input::schedule::load_schedule(args.schedule.as_deref())?);
    }
    Ok(settlement_input)
}

fn input_from_flags(args: &CalculateArgs) -> Result<SettlementInput, Box<dyn std::error::Error>> {
    let amount = args
        .amount
        .ok_or("--amount is required (or provide --input)")?;
    Ok(SettlementInput {
        amount: Decimal::from(amount),
        vat_mode: args.vat,
        payment_method: args.payment,
        schedule: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::fs;
    use std::path::PathBuf;

    /// Write a fixture into the temp dir, unique per process and name.
    fn fixture(name: &str, contents: &str) -> String {
        let path: PathBuf =
            std::env::temp_dir().join(format!("settle-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn args(amount: Option<u64>, vat: VatMode, payment: PaymentMethod) -> CalculateArgs {
        CalculateArgs {
            amount,
            vat,
            payment,
            schedule: None,
            input: None,
        }
    }

    #[test]
    fn test_flags_build_input() {
        let input = input_from_flags(&args(Some(11000), VatMode::Excluded, PaymentMethod::Invoice))
            .unwrap();
        assert_eq!(input.amount, dec!(11000));
        assert_eq!(input.vat_mode, VatMode::Excluded);
        assert_eq!(input.payment_method, PaymentMethod::Invoice);
        assert!(input.schedule.is_none());
    }

    #[test]
    fn test_missing_amount_is_reported() {
        let err = input_from_flags(&args(None, VatMode::Included, PaymentMethod::Card)).unwrap_err();
        assert!(err.to_string().contains("--amount"));
    }

    #[test]
    fn test_caption_command() {
        let value = run_caption(CaptionArgs { amount: 11000 }).unwrap();
        assert_eq!(value["words"], "만 천");
        assert_eq!(value["caption"], "🔢 11,000 원 (만 천 원)");
    }

    #[test]
    fn test_default_schedule_command() {
        let value = run_schedule(ScheduleArgs { schedule: None }).unwrap();
        assert_eq!(value["is_standard"], true);
        assert_eq!(value["card_fixed_fee"], "3300");
    }

    #[test]
    fn test_calculate_from_flags_includes_statement() {
        let value = run_calculate(args(Some(11000), VatMode::Included, PaymentMethod::Card)).unwrap();
        assert_eq!(value["result"]["card_fee"], "3520");
        assert_eq!(value["result"]["final_settlement_amount"], "5396");
        assert_eq!(value["statement"]["final_settlement"]["amount"], "5,396 원");
        assert_eq!(value["statement"]["payment_method"], "💳 카드 결제");
        assert_eq!(value["warnings"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_schedule_file_applies_to_flag_input() {
        let schedule = fixture("flags-schedule.yaml", "card_fixed_fee: 0\n");
        let value = run_calculate(CalculateArgs {
            schedule: Some(schedule),
            ..args(Some(11000), VatMode::Included, PaymentMethod::Card)
        })
        .unwrap();
        assert_eq!(value["result"]["card_fee"], "220");
    }

    #[test]
    fn test_embedded_schedule_beats_schedule_file() {
        let input = fixture(
            "embedded-input.json",
            r#"{ "amount": "11000", "vat_mode": "included", "payment_method": "card",
                 "schedule": { "card_fixed_fee": "1000" } }"#,
        );
        let schedule = fixture("embedded-schedule.yaml", "card_fixed_fee: 0\n");
        let value = run_calculate(CalculateArgs {
            amount: None,
            vat: VatMode::Included,
            payment: PaymentMethod::Card,
            schedule: Some(schedule),
            input: Some(input),
        })
        .unwrap();
        assert_eq!(value["result"]["card_fee"], "1220");
    }

    #[test]
    fn test_batch_schedule_only_fills_missing_schedules() {
        let input = fixture(
            "batch-input.json",
            r#"{ "payments": [
                { "amount": "11000" },
                { "amount": "11000", "schedule": { "card_fixed_fee": "1000" } }
            ] }"#,
        );
        let schedule = fixture("batch-schedule.yaml", "card_fixed_fee: 0\n");
        let value = run_batch(BatchArgs {
            input: Some(input),
            schedule: Some(schedule),
        })
        .unwrap();
        let payments = value["result"]["per_payment"].as_array().unwrap();
        assert_eq!(payments[0]["card_fee"], "220");
        assert_eq!(payments[1]["card_fee"], "1220");
        assert_eq!(value["result"]["total_card_fee"], "1440");
    }
}
