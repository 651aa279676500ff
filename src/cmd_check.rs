//! `check-config` command.

use std::path::Path;

use domtest_config::{ConfigLoader, ConfigValidator};

/// Print validation problems; returns whether the configuration is usable.
pub(crate) fn check_config(path: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load(path)?;
    let result = ConfigValidator::validate(&config)?;

    for error in &result.errors {
        println!("error: {}", error);
    }
    for warning in &result.warnings {
        println!("warning: {}", warning);
    }

    if result.is_valid() {
        println!("{}: OK ({} warnings)", path.display(), result.warnings.len());
    }
    Ok(result.is_valid())
}
