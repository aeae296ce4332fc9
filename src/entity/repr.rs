//! Console rendering of an entity's raw attribute mapping.
//!
//! Timestamps render as `datetime.datetime(...)` values and strings are
//! single-quoted, so `show` and `all` print the same notation existing
//! console users already parse.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde_json::Value;

use super::BaseModel;

pub(super) fn attribute_mapping(base: &BaseModel) -> String {
    let mut entries = Vec::with_capacity(base.attributes().len() + 3);
    entries.push(format!("'id': {}", quote(&base.id().to_string())));
    entries.push(format!("'created_at': {}", datetime(&base.created_at())));
    entries.push(format!("'updated_at': {}", datetime(&base.updated_at())));
    for (key, value) in base.attributes() {
        entries.push(format!("{}: {}", quote(key), value_repr(value)));
    }
    format!("{{{}}}", entries.join(", "))
}

fn datetime(ts: &NaiveDateTime) -> String {
    let micros = ts.nanosecond() / 1_000;
    let mut parts = vec![
        ts.year().to_string(),
        ts.month().to_string(),
        ts.day().to_string(),
        ts.hour().to_string(),
        ts.minute().to_string(),
    ];
    // second and microsecond are dropped when they are trailing zeros
    if ts.second() != 0 || micros != 0 {
        parts.push(ts.second().to_string());
    }
    if micros != 0 {
        parts.push(micros.to_string());
    }
    format!("datetime.datetime({})", parts.join(", "))
}

fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if c < ' ' || ('\u{7f}'..='\u{a0}').contains(&c) => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

/// Shortest round-trip float text, positional for exponents in `-4..16`
/// and scientific (`1e+20`, `1.5e-05`) outside it.
fn float_repr(f: f64) -> String {
    let scientific = format!("{:e}", f);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    if !(-4..16).contains(&exponent) {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exponent.abs());
    }

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let point = exponent + 1;
    let body = if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}.0", digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{}.{}", whole, fraction)
    };
    format!("{}{}", sign, body)
}

fn value_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => float_repr(f),
            _ => n.to_string(),
        },
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(value_repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), value_repr(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}
