//! Request payload parsing

use ndarray::Array2;

use crate::error::{Result, ScoreError};

/// Parse a raw request body into a feature batch.
///
/// The body must be JSON of the shape `{"data": [[f64, ...], ...]}` with
/// rectangular, numeric rows. JSON failures are parse-stage errors; a
/// well-formed body with the wrong shape is a schema-stage error.
pub fn parse_payload(raw: &str) -> Result<Array2<f64>> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(ScoreError::Parse)?;

    let data = value
        .get("data")
        .ok_or_else(|| ScoreError::Schema("missing 'data' field".to_string()))?;

    let rows = data
        .as_array()
        .ok_or_else(|| ScoreError::Schema("'data' must be an array of rows".to_string()))?;

    if rows.is_empty() {
        return Err(ScoreError::Schema("'data' is empty".to_string()));
    }

    let mut width: Option<usize> = None;
    let mut flat: Vec<f64> = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let cells = row.as_array().ok_or_else(|| {
            ScoreError::Schema(format!("row {} is not an array", i))
        })?;

        match width {
            None => width = Some(cells.len()),
            Some(w) if w != cells.len() => {
                return Err(ScoreError::Schema(format!(
                    "row {} has {} values, expected {}",
                    i,
                    cells.len(),
                    w
                )));
            }
            Some(_) => {}
        }

        for (j, cell) in cells.iter().enumerate() {
            let v = cell.as_f64().ok_or_else(|| {
                ScoreError::Schema(format!("row {} column {} is not a number", i, j))
            })?;
            flat.push(v);
        }
    }

    let n_cols = width.unwrap_or(0);
    if n_cols == 0 {
        return Err(ScoreError::Schema("rows have no values".to_string()));
    }

    Array2::from_shape_vec((rows.len(), n_cols), flat)
        .map_err(|e| ScoreError::Schema(format!("cannot shape 'data': {}", e)))
}
