use crate::utils::error::{KitError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let raw = path.as_os_str();
    if raw.is_empty() {
        return Err(KitError::invalid_argument(
            field_name,
            path.display(),
            "Path cannot be empty",
        ));
    }

    if raw.to_string_lossy().contains('\0') {
        return Err(KitError::invalid_argument(
            field_name,
            path.display(),
            "Path contains null bytes",
        ));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(KitError::invalid_argument(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_zero(field_name: &str, value: i64) -> Result<()> {
    if value == 0 {
        return Err(KitError::invalid_argument(
            field_name,
            value,
            "Value must be non-zero",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(KitError::invalid_argument(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
