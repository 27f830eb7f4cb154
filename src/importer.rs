use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Every data line of the export starts with a stray U+FEFF. The file itself
/// is UTF-8 without a leading BOM; the marker does not mean UTF-16.
pub const MARKER: char = '\u{FEFF}';

/// Lines that carry the marker but are not transactions.
const NON_DATA_PREFIXES: &[&str] = &[
    "All Transactions",
    "Filter Criteria",
    ",\"Scheduled\"",
    "Total Inflows",
];

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Keep only marker-prefixed lines, strip the marker, drop the known
/// non-data lines and join the rest back into one CSV blob.
pub fn extract_data_lines(content: &str) -> String {
    content
        .lines()
        .filter_map(|line| line.strip_prefix(MARKER))
        .filter(|line| {
            let keep = !NON_DATA_PREFIXES.iter().any(|p| line.starts_with(p));
            if !keep {
                debug!(line, "dropping non-data line");
            }
            keep
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn read_export(file_path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(file_path)?;
    Ok(extract_data_lines(&content))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse the extracted blob as headerless, ragged CSV.
pub fn parse_rows(data: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_bytes());
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

pub fn load_rows(file_path: &Path) -> Result<Vec<Vec<String>>> {
    let data = read_export(file_path)?;
    parse_rows(&data)
}
