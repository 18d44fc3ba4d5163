use serde_json::{Number, Value};

/// String prefixes that mark a value as a raw expression rather than data.
pub const RAW_EXPRESSION_PREFIXES: [&str; 2] = ["showifdef(", "user_info("];

pub const TRUE_LITERAL: &str = "True";
pub const FALSE_LITERAL: &str = "False";
pub const NONE_LITERAL: &str = "None";

/// Render a value as a literal token of the order block's scripting language.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if is_raw_expression(s) => s.clone(),
        Value::String(s) => quote(s),
        Value::Number(n) => format_number(n),
        Value::Bool(b) => bool_literal(*b).to_string(),
        Value::Null => NONE_LITERAL.to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", quote(key), format_value(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Double-quote a string, escaping backslashes and double quotes.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if ch == '\\' || ch == '"' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

pub fn bool_literal(value: bool) -> &'static str {
    if value { TRUE_LITERAL } else { FALSE_LITERAL }
}

fn is_raw_expression(s: &str) -> bool {
    RAW_EXPRESSION_PREFIXES.iter().any(|p| s.starts_with(p))
}

fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => format_float(f),
        _ => NONE_LITERAL.to_string(),
    }
}

/// Shortest decimal text for a float; integral values drop the fraction.
pub(crate) fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}
