//! Sheet cell normalisation.
//!
//! The spreadsheet backend hands back whatever the cell holds: text, numbers,
//! booleans or nulls. Text fields are normalised to `String` on the way in.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::fault::RowNumber;

pub(crate) fn cell_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Arrays and objects never appear in a single cell; keep the JSON text.
        other => other.to_string(),
    }
}

/// Deserializes any scalar cell as text.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(cell_to_text(&value))
}

/// Row numbers come back as JSON numbers, sometimes as numeric strings.
pub(crate) fn row_number<'de, D>(deserializer: D) -> Result<Option<RowNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(row_number_from_value)
        .map(RowNumber::new))
}

pub(crate) fn row_number_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_to_text() {
        assert_eq!(cell_to_text(&json!(null)), "");
        assert_eq!(cell_to_text(&json!("TN-42")), "TN-42");
        assert_eq!(cell_to_text(&json!(1042)), "1042");
        assert_eq!(cell_to_text(&json!(true)), "true");
    }

    #[test]
    fn test_row_number_from_value() {
        assert_eq!(row_number_from_value(&json!(7)), Some(7));
        assert_eq!(row_number_from_value(&json!(7.0)), Some(7));
        assert_eq!(row_number_from_value(&json!(" 12 ")), Some(12));
        assert_eq!(row_number_from_value(&json!(7.5)), None);
        assert_eq!(row_number_from_value(&json!("row")), None);
        assert_eq!(row_number_from_value(&json!(null)), None);
    }
}
