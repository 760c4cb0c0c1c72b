use serde_json::Value;

/// Headline figure per command as JSON pointers into the result, most
/// specific first.
const PRIORITY_PATHS: [&str; 8] = [
    "/monthly_cash_flow",
    "/cash_flow/monthly",
    "/yields/equity",
    "/net_yield",
    "/closing_balance",
    "/cumulative_cash_flow",
    "/average_price",
    "/gross_yield",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority (skipping
/// undefined ones), then falls back to the first field in the result.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match headline(result_obj) {
        Some(line) => println!("{line}"),
        None => println!("{}", format_minimal(result_obj)),
    }
}

fn headline(result: &Value) -> Option<String> {
    let map = result.as_object()?;

    let found = PRIORITY_PATHS
        .iter()
        .filter_map(|path| result.pointer(path))
        .find(|val| !val.is_null() && !val.is_object());
    if let Some(val) = found {
        return Some(format_minimal(val));
    }

    map.iter()
        .next()
        .map(|(key, val)| format!("{key}: {}", format_minimal(val)))
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
