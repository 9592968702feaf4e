use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Parse a whitespace-delimited numeric table.
///
/// Anything from `#` to the end of a line is a comment, and lines left
/// blank are skipped. Every remaining token must be a number and every row
/// must have as many columns as the first; the error names the offending
/// line.
pub fn parse_table(path: &Path, text: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(parse_number)
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| {
                Error::malformed(path, format!("line {}: non-numeric value in '{}'", lineno + 1, line))
            })?;
        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(Error::malformed(
                    path,
                    format!(
                        "line {}: expected {} columns, found {}",
                        lineno + 1,
                        first.len(),
                        row.len()
                    ),
                ));
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Fortran writers sometimes emit `D` exponents.
fn parse_number(tok: &str) -> Option<f64> {
    tok.parse::<f64>()
        .ok()
        .or_else(|| tok.replace(['D', 'd'], "e").parse::<f64>().ok())
}

pub fn load_table(path: impl AsRef<Path>) -> Result<Vec<Vec<f64>>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_table(path, &text)
}

/// Last row of the table at `path`, which must hold at least `min_cols`
/// values.
pub fn last_row(path: impl AsRef<Path>, min_cols: usize) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let row = load_table(path)?
        .pop()
        .ok_or_else(|| Error::malformed(path, "table is empty"))?;
    if row.len() < min_cols {
        return Err(Error::malformed(
            path,
            format!("last row has {} columns, need at least {}", row.len(), min_cols),
        ));
    }
    Ok(row)
}
