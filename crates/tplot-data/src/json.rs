//! JSON input
//!
//! Accepted shapes:
//! - `{"x": [1, 2], "y": [3, 4]}` named columns, in document order
//! - `[[1, 3], [2, 4]]` rows
//! - `[3, 4]` a single column

use crate::Table;
use serde_json::Value as Json;
use tplot_core::{TplotError, Value};
use tracing::debug;

/// Read a JSON document into a table
///
/// # Errors
///
/// Returns `TplotError::Parse` for malformed JSON or unsupported shapes,
/// and `TplotError::NoData` for empty documents
pub fn read_json(input: &str, filename: &str) -> Result<Table, TplotError> {
    let document: Json = serde_json::from_str(input)
        .map_err(|e| TplotError::parse_at(e.to_string(), filename, e.line(), e.column()))?;
    let invalid = |message: String| TplotError::parse_at(message, filename, 1, 1);

    let table = match document {
        Json::Object(map) => {
            let mut headers = Vec::with_capacity(map.len());
            let mut columns = Vec::with_capacity(map.len());
            for (name, column) in map {
                let Json::Array(items) = column else {
                    return Err(invalid(format!("column {name} is not an array")));
                };
                let values = items
                    .iter()
                    .map(to_value)
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| invalid(format!("column {name} holds a non-scalar value")))?;
                headers.push(name);
                columns.push(values);
            }
            Table::from_columns(Some(headers), columns).map_err(|e| match e {
                TplotError::LengthMismatch { x_len, y_len } => invalid(format!(
                    "columns have different lengths ({x_len} and {y_len})"
                )),
                other => other,
            })?
        }
        Json::Array(items) if items.iter().all(Json::is_array) && !items.is_empty() => {
            let mut columns: Vec<Vec<Value>> = Vec::new();
            for (index, row) in items.iter().enumerate() {
                let cells = row.as_array().map(Vec::as_slice).unwrap_or_default();
                if index == 0 {
                    columns = vec![Vec::with_capacity(items.len()); cells.len()];
                } else if cells.len() != columns.len() {
                    return Err(invalid(format!(
                        "row {index} has {} values, expected {}",
                        cells.len(),
                        columns.len()
                    )));
                }
                for (column, cell) in columns.iter_mut().zip(cells) {
                    let value = to_value(cell)
                        .ok_or_else(|| invalid(format!("row {index} holds a non-scalar value")))?;
                    column.push(value);
                }
            }
            Table::from_columns(None, columns)?
        }
        Json::Array(items) => {
            let values = items
                .iter()
                .map(to_value)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid("array holds a non-scalar value".to_string()))?;
            Table::from_columns(None, vec![values])?
        }
        _ => return Err(invalid("expected a JSON object or array".to_string())),
    };

    debug!(filename, columns = table.width(), rows = table.len(), "read JSON table");
    Ok(table)
}

fn to_value(json: &Json) -> Option<Value> {
    match json {
        Json::Number(n) => n.as_f64().map(Value::Number),
        Json::String(s) => Some(Value::Label(s.clone())),
        _ => None,
    }
}
