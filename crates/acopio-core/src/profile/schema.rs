use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Declarative description of one tabular bulletin layout.
///
/// Everything the token-stream extractor needs to know about a document
/// (column count, header length, known text artifacts, the encoded-date
/// fallback, where to find the PDF) lives here rather than in code, so a
/// layout change upstream means a new profile, not a new binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Number of columns per record; token groups of any other size are discarded.
    pub columns: usize,
    /// Tokens to skip on the first page (the column headers appear once).
    pub header_tokens: usize,
    /// Zero-based index of the date column within a record.
    pub date_field: usize,
    /// A date token of exactly this length is treated as a day-offset serial.
    pub serial_date_len: usize,
    /// Epoch the day-offset serial counts from.
    pub serial_epoch: NaiveDate,
    /// strftime format for repaired dates.
    pub date_output_format: String,
    /// Header row of the output CSV; must have `columns` entries.
    pub output_header: Vec<String>,
    /// Ordered literal find/replace pairs applied to each page before
    /// tokenization. Hand-curated for known artifacts; does not generalize.
    pub repairs: Vec<RepairDef>,
    /// Page listing the daily bulletin documents.
    pub bulletin_url: String,
    /// Prefix for anchor hrefs that are site-relative.
    pub site_root: String,
    /// Substring identifying the case-table PDF among the page's links.
    pub link_pattern: String,
}

/// A literal find/replace pair correcting a known extraction artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairDef {
    pub find: String,
    pub replace: String,
}
