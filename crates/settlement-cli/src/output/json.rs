use serde_json::Value;

/// Pretty-print the JSON envelope to stdout.
pub fn print_json(value: &Value) {
    match render_json(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            tracing::error!(error = %e, "failed to render JSON output");
            eprintln!("JSON serialization error: {}", e);
        }
    }
}

/// Pretty JSON; non-ASCII text is written as-is.
fn render_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_korean_labels_are_not_escaped() {
        let rendered = render_json(&json!({ "label": "최종 정산금액", "amount": "5,396 원" })).unwrap();
        assert!(rendered.contains("최종 정산금액"));
        assert!(rendered.contains("\"amount\": \"5,396 원\""));
    }
}
