use acopio_core::error::AcopioError;
use acopio_core::profile;
use std::path::Path;

pub fn show() -> Result<(), AcopioError> {
    let profile = profile::builtin::default_profile()?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), AcopioError> {
    let profile = profile::load_profile(file)?;
    println!(
        "Profile '{}' (v{}) is valid: {} columns, {} repair(s)",
        profile.name,
        profile.version,
        profile.columns,
        profile.repairs.len()
    );
    Ok(())
}
