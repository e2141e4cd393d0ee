use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::display::currency::{format_won, WON_SUFFIX};
use crate::display::words::korean_words;
use crate::settlement::calculator::{self, SettlementResult};
use crate::settlement::request::SettlementRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    pub label: String,
    pub amount: String,
}

impl StatementLine {
    fn new(label: &str, amount: Decimal) -> Self {
        StatementLine {
            label: label.to_string(),
            amount: format_won(amount),
        }
    }
}

/// A settlement formatted for display: two headline figures, the fee and
/// tax breakdown, and the pre-tax settlement line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementStatement {
    pub payment_method: String,
    pub original_payment: StatementLine,
    pub final_payment: StatementLine,
    pub final_settlement: StatementLine,
    pub breakdown: Vec<StatementLine>,
    pub pre_tax_settlement: StatementLine,
}

impl SettlementStatement {
    pub fn from_result(result: &SettlementResult) -> Self {
        SettlementStatement {
            payment_method: result.payment_method_label.clone(),
            original_payment: StatementLine::new("기존 결제금액", result.original_amount),
            final_payment: StatementLine::new("최종 결제금액", result.final_payment_amount),
            final_settlement: StatementLine::new("최종 정산금액", result.final_settlement_amount),
            breakdown: vec![
                StatementLine::new("공급가액", result.supply_amount),
                StatementLine::new("부가세", result.vat),
                StatementLine::new("카드수수료", result.card_fee),
                StatementLine::new("결제대행료", result.service_fee),
                StatementLine::new("원천징수액", result.withholding_tax),
            ],
            pre_tax_settlement: StatementLine::new("세전 정산액", result.pre_tax_settlement),
        }
    }

    /// Every line in display order, headline first.
    pub fn lines(&self) -> Vec<&StatementLine> {
        let mut lines = vec![&self.final_payment, &self.final_settlement];
        lines.extend(self.breakdown.iter());
        lines.push(&self.pre_tax_settlement);
        lines
    }
}

/// Caption shown under the amount input: `🔢 11,000 원 (만 천 원)`.
pub fn amount_caption(amount: u64) -> String {
    format!(
        "🔢 {} ({} {WON_SUFFIX})",
        format_won(Decimal::from(amount)),
        korean_words(amount)
    )
}

/// Notices shown above the statement, in display order.
pub fn notices(request: &SettlementRequest) -> Vec<String> {
    calculator::notices(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::calculator::{calculate_settlement, VAT_EXCLUDED_NOTICE, ZERO_AMOUNT_NOTICE};
    use crate::settlement::request::{PaymentMethod, VatMode};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_statement_for_card_payment() {
        let request =
            SettlementRequest::new(dec!(11000), VatMode::Included, PaymentMethod::Card).unwrap();
        let statement = SettlementStatement::from_result(&calculate_settlement(&request));

        assert_eq!(statement.payment_method, "💳 카드 결제");
        assert_eq!(statement.final_payment.amount, "11,000 원");
        assert_eq!(statement.final_settlement.amount, "5,396 원");
        assert_eq!(statement.pre_tax_settlement.amount, "5,580 원");

        let breakdown: Vec<(&str, &str)> = statement
            .breakdown
            .iter()
            .map(|l| (l.label.as_str(), l.amount.as_str()))
            .collect();
        assert_eq!(
            breakdown,
            vec![
                ("공급가액", "10,000 원"),
                ("부가세", "1,000 원"),
                ("카드수수료", "3,520 원"),
                ("결제대행료", "900 원"),
                ("원천징수액", "184 원"),
            ]
        );
        assert_eq!(statement.lines().len(), 8);
    }

    #[test]
    fn test_statement_for_zero_payment() {
        let statement = SettlementStatement::from_result(&SettlementResult::zero());
        assert_eq!(statement.payment_method, "");
        assert!(statement.lines().iter().all(|l| l.amount == "0 원"));
    }

    #[test]
    fn test_amount_caption() {
        assert_eq!(amount_caption(11000), "🔢 11,000 원 (만 천 원)");
        assert_eq!(amount_caption(0), "🔢 0 원 (영 원)");
    }

    #[test]
    fn test_notices() {
        let zero = SettlementRequest::new(dec!(0), VatMode::Excluded, PaymentMethod::Card).unwrap();
        assert_eq!(notices(&zero), vec![ZERO_AMOUNT_NOTICE.to_string()]);

        let excluded =
            SettlementRequest::new(dec!(5000), VatMode::Excluded, PaymentMethod::Card).unwrap();
        assert_eq!(notices(&excluded), vec![VAT_EXCLUDED_NOTICE.to_string()]);

        let included =
            SettlementRequest::new(dec!(5000), VatMode::Included, PaymentMethod::Card).unwrap();
        assert!(notices(&included).is_empty());
    }
}
