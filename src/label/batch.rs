//! # Batch Tables
//!
//! A batch is a JSON array with one row per outbound label. A row is either
//! an object or a spreadsheet-style array:
//!
//! ```json
//! [
//!   {"identifier": "100001", "claim": "C-1", "fru": "01AB234"},
//!   [100002, "C-2", "01AB235"]
//! ]
//! ```
//!
//! Numeric cells are printed as written, so `100002` becomes `"100002"`.
//!
//! Long batches drift against the gaps, so every fifth label is preceded by
//! a small forward nudge sent as its own job.

use std::path::Path;

use serde_json::Value;

use crate::error::LabelError;

use super::variant::OutboundFields;

/// A nudge is sent before every `NUDGE_EVERY`-th row.
pub const NUDGE_EVERY: usize = 5;

/// Forward feed of the drift compensation nudge.
pub const NUDGE_MM: f64 = 0.5;

/// Whether a nudge precedes the row at zero-based `index`.
pub fn nudge_before(index: usize) -> bool {
    index % NUDGE_EVERY == NUDGE_EVERY - 1
}

/// Parse a batch table from JSON text.
pub fn parse_rows(json: &str) -> Result<Vec<OutboundFields>, LabelError> {
    let rows: Vec<Value> = serde_json::from_str(json)?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            OutboundFields::try_from(row)
                .map_err(|e| LabelError::InvalidInput(format!("row {}: {}", i + 1, e)))
        })
        .collect()
}

/// Read and parse a batch table file.
pub fn load_rows(path: &Path) -> Result<Vec<OutboundFields>, LabelError> {
    let json = std::fs::read_to_string(path)?;
    let rows = parse_rows(&json)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "loaded batch table");
    Ok(rows)
}

impl TryFrom<Value> for OutboundFields {
    type Error = String;

    fn try_from(row: Value) -> Result<Self, Self::Error> {
        match row {
            Value::Object(map) => {
                let field = |names: &[&str]| {
                    names
                        .iter()
                        .find_map(|name| map.get(*name))
                        .map(cell_text)
                        .transpose()
                };
                let identifier = field(&["identifier", "osi", "id"])?
                    .ok_or_else(|| "missing 'identifier'".to_string())?;
                Ok(Self {
                    identifier,
                    claim: field(&["claim"])?.unwrap_or_default(),
                    fru: field(&["fru"])?.unwrap_or_default(),
                })
            }
            Value::Array(cells) => {
                if cells.len() < 3 {
                    return Err(format!(
                        "expected [identifier, claim, fru], got {} cells",
                        cells.len()
                    ));
                }
                Ok(Self {
                    identifier: cell_text(&cells[0])?,
                    claim: cell_text(&cells[1])?,
                    fru: cell_text(&cells[2])?,
                })
            }
            other => Err(format!("expected an object or an array, got {}", other)),
        }
    }
}

fn cell_text(cell: &Value) -> Result<String, String> {
    match cell {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(format!("unsupported cell {}", other)),
    }
}
