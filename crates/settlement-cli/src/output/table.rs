use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::format_value;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(statement)) = map.get("statement") {
                print_statement(statement);
                print_envelope_notes(map);
            } else if let Some(result) = map.get("result") {
                print_result_table(result);
                print_envelope_notes(map);
            } else {
                print_flat_object(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

/// The settlement statement: payment method, highlighted headline figures,
/// the breakdown table and the pre-tax line.
fn print_statement(statement: &Map<String, Value>) {
    let line = |key: &str| -> (String, String) {
        let entry = statement.get(key);
        let label = entry
            .and_then(|l| l.get("label"))
            .map(format_value)
            .unwrap_or_default();
        let amount = entry
            .and_then(|l| l.get("amount"))
            .map(format_value)
            .unwrap_or_default();
        (label, amount)
    };

    if let Some(method) = statement.get("payment_method").map(format_value) {
        if !method.is_empty() {
            println!("{}", method);
        }
    }

    let (label, amount) = line("final_payment");
    println!("💰 {}: {}", label, amount.yellow().bold());
    let (label, amount) = line("final_settlement");
    println!("📌 {}: {}", label, amount.yellow().bold());
    println!();

    let mut builder = Builder::default();
    builder.push_record(["구분", "금액"]);
    if let Some(Value::Array(rows)) = statement.get("breakdown") {
        for row in rows {
            let label = row.get("label").map(format_value).unwrap_or_default();
            let amount = row.get("amount").map(format_value).unwrap_or_default();
            builder.push_record([label, amount]);
        }
    }
    println!("{}", Table::from(builder));

    let (label, amount) = line("pre_tax_settlement");
    println!("\n{}: {}", label, amount.yellow());
}

fn print_result_table(result: &Value) {
    match result {
        Value::Object(res_map) => {
            let mut scalars = Map::new();
            let mut nested: Vec<(&String, &Vec<Value>)> = Vec::new();
            for (key, val) in res_map {
                match val {
                    Value::Array(arr) if arr.iter().all(Value::is_object) && !arr.is_empty() => {
                        nested.push((key, arr))
                    }
                    _ => {
                        scalars.insert(key.clone(), val.clone());
                    }
                }
            }
            print_flat_object(&scalars);
            for (key, arr) in nested {
                println!("\n{}:", key);
                print_array_table(arr);
            }
        }
        other => println!("{}", format_value(other)),
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}
