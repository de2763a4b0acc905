use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One observation of the global dataset: a (date, country) pair with the
/// three overlaid metrics. Unique per (isodate, country).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalRecord {
    pub isodate: NaiveDate,
    pub country: String,
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

/// The three wide time-series sources, in overlay order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Confirmed,
    Deaths,
    Recovered,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Confirmed, Metric::Deaths, Metric::Recovered];

    /// Slot index within a skeleton cell.
    pub fn index(self) -> usize {
        match self {
            Metric::Confirmed => 0,
            Metric::Deaths => 1,
            Metric::Recovered => 2,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Confirmed => write!(f, "confirmed"),
            Metric::Deaths => write!(f, "deaths"),
            Metric::Recovered => write!(f, "recovered"),
        }
    }
}

/// How overlapping contributions to the same (date, country) cell combine.
///
/// Multiple source rows may share a country label (sub-national entries
/// rolling up to a country), so `Sum` is the default. With the deterministic
/// row and column iteration order, `Overwrite` is last-write-wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    #[default]
    Sum,
    Overwrite,
}

impl MergeStrategy {
    pub fn from_str_loose(s: &str) -> Option<MergeStrategy> {
        match s.trim().to_lowercase().as_str() {
            "sum" | "add" => Some(MergeStrategy::Sum),
            "overwrite" | "last" | "last-write-wins" => Some(MergeStrategy::Overwrite),
            _ => None,
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::Sum => write!(f, "sum"),
            MergeStrategy::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// One row recovered from the bulletin's token stream.
///
/// Fields are strictly positional: the Nth token of an accepted group maps
/// to the Nth column of the profile's output header. No field-level
/// validation is applied beyond the group-length check, so a malformed group
/// that happens to have the full column count passes through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub fields: Vec<String>,
}
