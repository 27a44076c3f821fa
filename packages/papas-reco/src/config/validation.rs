//! Configuration validation

use super::error::ConfigResult;

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Check `value` lies in `min..=max` (NaN always fails)
pub(crate) fn check_range(
    field: &str,
    value: f64,
    min: f64,
    max: f64,
    hint: &str,
) -> ConfigResult<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(super::error::ConfigError::range_with_hint(
            field, value, min, max, hint,
        ))
    }
}
