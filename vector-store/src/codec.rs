//! Text encoding of the vector column.

use crate::error::{Result, StoreError};

/// Join the components with commas, each in its shortest round-trip form.
pub fn format_vector(vector: &[f32]) -> String {
    vector
        .iter()
        .map(f32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a vector column, bare (`1,2`) or bracketed (`[1,2]`).
///
/// An empty column (`""` or `"[]"`) is an empty vector. `row` is the
/// 1-based row number reported in errors.
pub fn parse_vector(field: &str, row: usize) -> Result<Vec<f32>> {
    let inner = field
        .trim()
        .trim_matches(|c| c == '[' || c == ']')
        .trim();

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f32>().map_err(|source| StoreError::Parse {
                row,
                value: part.to_string(),
                source,
            })
        })
        .collect()
}
