use crate::error::AcopioError;
use crate::profile::schema::ExtractionProfile;

const CASOS_CONFIRMADOS_JSON: &str = include_str!("../../../../profiles/casos_confirmados.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["casos-confirmados"];

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<ExtractionProfile, AcopioError> {
    match name {
        "casos-confirmados" => crate::profile::parse_profile_str(CASOS_CONFIRMADOS_JSON),
        _ => Err(AcopioError::ProfileInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The profile used when the CLI is given no `--profile`.
pub fn default_profile() -> Result<ExtractionProfile, AcopioError> {
    load_preset("casos-confirmados")
}
