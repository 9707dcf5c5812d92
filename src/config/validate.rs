// src/config/validate.rs

use crate::config::model::{RawStepFile, StepFile};
use crate::errors::{PhaseplanError, Result};

impl TryFrom<RawStepFile> for StepFile {
    type Error = PhaseplanError;

    fn try_from(raw: RawStepFile) -> std::result::Result<Self, Self::Error> {
        validate_defaults(&raw)?;
        Ok(StepFile::new_unchecked(raw.defaults, raw.step))
    }
}

fn validate_defaults(raw: &RawStepFile) -> Result<()> {
    let fields = [
        ("duration_seconds", raw.defaults.duration_seconds),
        ("cost", raw.defaults.cost),
    ];

    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(PhaseplanError::ConfigError(format!(
                "[defaults].{field} must be a non-negative number (got {value})"
            )));
        }
    }
    Ok(())
}
