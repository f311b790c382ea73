use colored::Colorize;
use hms_client::{Notification, NotificationKind};
use serde_json::{Map, Value};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;

pub fn print_value(value: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", to_pretty_json(value)),
        OutputFormat::Yaml => println!("{}", to_yaml(value)),
        OutputFormat::Table => println!("{}", to_table(value)),
    }
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::SessionExpired => {
            eprintln!("{} {}", "!".yellow().bold(), notification.message.yellow())
        }
        NotificationKind::RequestFailed => {
            eprintln!("{} {}", "✗".red(), notification.message.red())
        }
    }
}

fn to_pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Paged `{total, page, pageSize, list}` and bare arrays become a row table,
/// objects a field/value table, scalars print as-is.
fn to_table(value: &Value) -> String {
    match value {
        Value::Object(obj) if obj.get("list").is_some_and(Value::is_array) => {
            let rows = obj.get("list").and_then(Value::as_array).map(Vec::as_slice);
            let mut out = rows_table(rows.unwrap_or_default());
            if let Some(total) = obj.get("total").and_then(Value::as_u64) {
                let page = obj.get("page").and_then(Value::as_u64).unwrap_or(1);
                out.push_str(&format!("\nTotal: {total} (page {page})"));
            }
            out
        }
        Value::Array(rows) => rows_table(rows),
        Value::Object(obj) => fields_table(obj),
        Value::Null => "(no data)".to_string(),
        other => cell(other),
    }
}

fn rows_table(rows: &[Value]) -> String {
    if rows.is_empty() {
        return "No records found.".to_string();
    }

    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        if let Value::Object(obj) = row {
            for key in obj.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
    }
    if columns.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["value"]);
        for row in rows {
            builder.push_record([cell(row)]);
        }
        return builder.build().with(Style::rounded()).to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().copied());
    for row in rows {
        builder.push_record(
            columns
                .iter()
                .map(|c| row.get(*c).map(cell).unwrap_or_else(|| "-".to_string())),
        );
    }
    builder.build().with(Style::rounded()).to_string()
}

fn fields_table(obj: &Map<String, Value>) -> String {
    if obj.is_empty() {
        return "(empty)".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(["field", "value"]);
    for (key, value) in obj {
        builder.push_record([key.clone(), cell(value)]);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn to_yaml(value: &Value) -> String {
    let mut out = String::new();
    write_yaml(value, 0, &mut out);
    out.trim_end().to_string()
}

fn write_yaml(value: &Value, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Array(items) if !items.is_empty() => {
            for item in items {
                if is_nested(item) {
                    out.push_str(&format!("{pad}-\n"));
                    write_yaml(item, indent + 1, out);
                } else {
                    out.push_str(&format!("{pad}- {}\n", yaml_scalar(item)));
                }
            }
        }
        Value::Object(obj) if !obj.is_empty() => {
            for (key, item) in obj {
                if is_nested(item) {
                    out.push_str(&format!("{pad}{key}:\n"));
                    write_yaml(item, indent + 1, out);
                } else {
                    out.push_str(&format!("{pad}{key}: {}\n", yaml_scalar(item)));
                }
            }
        }
        scalar => out.push_str(&format!("{pad}{}\n", yaml_scalar(scalar))),
    }
}

fn is_nested(value: &Value) -> bool {
    match value {
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        _ => false,
    }
}

fn yaml_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(_) => "[]".to_string(),
        Value::Object(_) => "{}".to_string(),
        // JSON strings are valid YAML double-quoted scalars.
        Value::String(_) | Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}
