//! Outbound payload sanitization and inbound JSON repair.
//!
//! The FBR sandbox rejects empty-string numerics and is inconsistent about
//! missing-vs-empty semantics, so outgoing payloads are scrubbed: null,
//! empty-string, and zero-valued entries are dropped, except for a fixed
//! whitelist of fields the API requires to be present even at zero or
//! empty. The whitelists must be preserved exactly; the API's acceptance
//! rules depend on them.
//!
//! Inbound, the sandbox occasionally emits malformed JSON (trailing commas,
//! `"key":,` missing-value holes). [`repair_json`] patches the known
//! patterns before parsing.

use serde_json::Value;

/// Numeric fields that must be present even when zero.
const KEEP_AT_ZERO: &[&str] = &[
    "discount",
    "fedPayable",
    "extraTax",
    "furtherTax",
    "salesTaxWithheldAtSource",
    "fixedNotifiedValueOrRetailPrice",
];

/// String fields that must be present even when empty.
const KEEP_WHEN_EMPTY: &[&str] = &["invoiceRefNo", "sroScheduleNo", "sroItemSerialNo"];

fn is_zero_number(value: &Value) -> bool {
    value.as_f64().is_some_and(|n| n.abs() < f64::EPSILON)
}

/// Recursively strip null, empty-string, and zero-valued entries from a
/// payload, honoring the keep-at-zero and keep-when-empty whitelists.
#[must_use]
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let cleaned = map
                .into_iter()
                .filter_map(|(key, entry)| {
                    let keep = match &entry {
                        Value::Null => false,
                        Value::String(s) if s.is_empty() => {
                            KEEP_WHEN_EMPTY.contains(&key.as_str())
                        }
                        number if is_zero_number(number) => KEEP_AT_ZERO.contains(&key.as_str()),
                        _ => true,
                    };
                    keep.then(|| (key, sanitize(entry)))
                })
                .collect();
            Value::Object(cleaned)
        }
        Value::Array(entries) => Value::Array(entries.into_iter().map(sanitize).collect()),
        other => other,
    }
}

/// Repair the malformed-JSON patterns the sandbox is known to produce:
/// `"key":,` and `"key":}` missing-value holes become `null`, and trailing
/// commas before `}` or `]` are removed. String contents are left intact.
#[must_use]
pub fn repair_json(text: &str) -> String {
    let mut repaired = String::with_capacity(text.len() + 8);
    let chars: Vec<char> = text.chars().collect();
    let mut in_string = false;
    let mut escaped = false;
    let mut index = 0;

    let next_significant = |from: usize| -> Option<char> {
        chars
            .get(from..)?
            .iter()
            .copied()
            .find(|c| !c.is_whitespace())
    };

    while let Some(&c) = chars.get(index) {
        if in_string {
            repaired.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            index += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                repaired.push(c);
            }
            ':' if matches!(next_significant(index + 1), Some(',' | '}')) => {
                // A key with no value; the API meant null.
                repaired.push_str(":null");
            }
            ',' if matches!(next_significant(index + 1), Some('}' | ']')) => {
                // Trailing comma; drop it.
            }
            _ => repaired.push(c),
        }
        index += 1;
    }

    repaired
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_drops_null_empty_and_zero() {
        let sanitized = sanitize(json!({
            "a": null,
            "c": "",
            "quantity": 0,
            "discount": 0,
            "invoiceRefNo": ""
        }));
        assert_eq!(sanitized, json!({"discount": 0, "invoiceRefNo": ""}));
    }

    #[test]
    fn test_sanitize_keeps_whitelisted_zero_numerics() {
        let sanitized = sanitize(json!({
            "fedPayable": 0,
            "extraTax": 0.0,
            "furtherTax": 0,
            "salesTaxWithheldAtSource": 0,
            "fixedNotifiedValueOrRetailPrice": 0,
            "salesTaxApplicable": 0
        }));
        let object = sanitized.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert!(!object.contains_key("salesTaxApplicable"));
    }

    #[test]
    fn test_sanitize_keeps_whitelisted_empty_strings() {
        let sanitized = sanitize(json!({
            "sroScheduleNo": "",
            "sroItemSerialNo": "",
            "productDescription": ""
        }));
        assert_eq!(
            sanitized,
            json!({"sroScheduleNo": "", "sroItemSerialNo": ""})
        );
    }

    #[test]
    fn test_sanitize_recurses_into_items() {
        let sanitized = sanitize(json!({
            "scenarioId": "SN001",
            "items": [
                {"hsCode": "2710.1991", "note": null, "discount": 0, "rate": ""}
            ]
        }));
        assert_eq!(
            sanitized,
            json!({
                "scenarioId": "SN001",
                "items": [{"hsCode": "2710.1991", "discount": 0}]
            })
        );
    }

    #[test]
    fn test_sanitize_keeps_nonzero_values() {
        let sanitized = sanitize(json!({"quantity": 2.5, "rate": "18%"}));
        assert_eq!(sanitized, json!({"quantity": 2.5, "rate": "18%"}));
    }

    #[test]
    fn test_repair_missing_value_hole() {
        let repaired = repair_json(r#"{"status":,"error":"x",}"#);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value, json!({"status": null, "error": "x"}));
    }

    #[test]
    fn test_repair_trailing_commas() {
        let repaired = repair_json(r#"{"a": 1, "b": [1, 2, ], }"#);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value, json!({"a": 1, "b": [1, 2]}));
    }

    #[test]
    fn test_repair_hole_before_closing_brace() {
        let repaired = repair_json(r#"{"a": 1, "b":}"#);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value, json!({"a": 1, "b": null}));
    }

    #[test]
    fn test_repair_leaves_valid_json_alone() {
        let text = r#"{"status":"Valid","invoiceNumber":"7000007DI1747119701593"}"#;
        assert_eq!(repair_json(text), text);
    }

    #[test]
    fn test_repair_ignores_patterns_inside_strings() {
        let text = r#"{"note":"a:, b,}","x":1}"#;
        assert_eq!(repair_json(text), text);
    }
}
