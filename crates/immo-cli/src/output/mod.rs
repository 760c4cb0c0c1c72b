pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Scalar fields of `map` with nested objects inlined under dotted keys
/// (`costs.transfer_tax`). Arrays of objects are left out; callers render
/// them as their own tables.
pub(crate) fn flatten_scalars(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    flatten_into("", map, &mut out);
    out
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(&name, inner, out),
            Value::Array(items) if items.iter().any(Value::is_object) => {}
            _ => out.push((name, val.clone())),
        }
    }
}

/// Arrays of objects inside `map`, by field name.
pub(crate) fn object_arrays(map: &Map<String, Value>) -> Vec<(&str, &[Value])> {
    map.iter()
        .filter_map(|(key, val)| match val {
            Value::Array(items) if items.iter().any(Value::is_object) => {
                Some((key.as_str(), items.as_slice()))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_result() {
        let value = json!({
            "costs": {"transfer_tax": "15000", "total_cost": "331710"},
            "leverage_effect": null,
            "years": [{"year": 0}]
        });
        let flat = flatten_scalars(value.as_object().unwrap());
        let mut keys: Vec<&str> = flat.iter().map(|(k, _)| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["costs.total_cost", "costs.transfer_tax", "leverage_effect"]);

        let arrays = object_arrays(value.as_object().unwrap());
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].0, "years");
    }
}
