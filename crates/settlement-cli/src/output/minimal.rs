use serde_json::Value;

use super::format_value;

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, then falls back
/// to the first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "final_settlement_amount",
        "total_settlement",
        "caption",
        "withholding_rate",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_value(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_value(val));
        }
    }

    format_value(result_obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settlement_prints_final_amount() {
        let value = json!({ "result": { "vat": "1000", "final_settlement_amount": "5396" } });
        assert_eq!(minimal_line(&value), "5396");
    }

    #[test]
    fn test_caption_without_envelope() {
        let value = json!({ "amount": "11000", "caption": "🔢 11,000 원 (만 천 원)" });
        assert_eq!(minimal_line(&value), "🔢 11,000 원 (만 천 원)");
    }
}
