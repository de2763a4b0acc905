pub mod builtin;
pub mod schema;

use crate::error::AcopioError;
use schema::ExtractionProfile;
use std::fmt::Write as _;
use std::path::Path;

/// Load an extraction profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<ExtractionProfile, AcopioError> {
    let content = std::fs::read_to_string(path).map_err(|e| AcopioError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string, keeping the file path for error context.
pub fn parse_profile(json: &str, source: &Path) -> Result<ExtractionProfile, AcopioError> {
    let profile: ExtractionProfile =
        serde_json::from_str(json).map_err(|e| AcopioError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<ExtractionProfile, AcopioError> {
    let profile: ExtractionProfile = serde_json::from_str(json).map_err(AcopioError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &ExtractionProfile) -> Result<(), AcopioError> {
    if profile.columns == 0 {
        return Err(AcopioError::ProfileInvalid("columns must be > 0".into()));
    }

    if profile.date_field >= profile.columns {
        return Err(AcopioError::ProfileInvalid(format!(
            "date_field {} is out of range for {} columns",
            profile.date_field, profile.columns
        )));
    }

    if profile.serial_date_len == 0 {
        return Err(AcopioError::ProfileInvalid(
            "serial_date_len must be > 0".into(),
        ));
    }

    if profile.output_header.len() != profile.columns {
        return Err(AcopioError::ProfileInvalid(format!(
            "output_header has {} entries, expected {} (one per column)",
            profile.output_header.len(),
            profile.columns
        )));
    }

    for repair in &profile.repairs {
        if repair.find.is_empty() {
            return Err(AcopioError::ProfileInvalid(
                "repair 'find' string must not be empty".into(),
            ));
        }
    }

    // chrono only reports a bad format string when it is actually rendered.
    let mut buf = String::new();
    if write!(buf, "{}", profile.serial_epoch.format(&profile.date_output_format)).is_err() {
        return Err(AcopioError::ProfileInvalid(format!(
            "invalid date_output_format '{}'",
            profile.date_output_format
        )));
    }

    Ok(())
}
