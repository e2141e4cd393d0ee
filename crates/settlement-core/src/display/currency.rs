use rust_decimal::Decimal;

use crate::types::{round_won, Money};

pub const WON_SUFFIX: &str = "원";

/// Format an amount as whole won with thousands separators: `11,000 원`.
pub fn format_won(amount: Money) -> String {
    let rounded = round_won(amount);
    let digits = rounded.abs().to_string();
    let grouped = group_thousands(&digits);
    if rounded < Decimal::ZERO {
        format!("-{grouped} {WON_SUFFIX}")
    } else {
        format!("{grouped} {WON_SUFFIX}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_won() {
        assert_eq!(format_won(dec!(0)), "0 원");
        assert_eq!(format_won(dec!(999)), "999 원");
        assert_eq!(format_won(dec!(1000)), "1,000 원");
        assert_eq!(format_won(dec!(11000)), "11,000 원");
        assert_eq!(format_won(dec!(1234567)), "1,234,567 원");
    }

    #[test]
    fn test_format_won_negative() {
        assert_eq!(format_won(dec!(-1234)), "-1,234 원");
        assert_eq!(format_won(dec!(-82)), "-82 원");
    }

    #[test]
    fn test_format_won_drops_fraction() {
        assert_eq!(format_won(dec!(11000.00)), "11,000 원");
    }
}
