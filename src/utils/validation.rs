use crate::utils::error::{DiagraformError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DiagraformError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DiagraformError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DiagraformError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
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
        return Err(DiagraformError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_formats(field_name: &str, formats: &[String], allowed: &[&str]) -> Result<()> {
    for format in formats {
        if !allowed.contains(&format.as_str()) {
            return Err(DiagraformError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!("Unsupported format. Valid formats: {}", allowed.join(", ")),
            });
        }
    }
    Ok(())
}

/// Resource type names are matched verbatim, so blanks are almost always a typo.
pub fn validate_type_names(field_name: &str, types: &[String]) -> Result<()> {
    for resource_type in types {
        validate_non_empty_string(field_name, resource_type)?;
    }
    Ok(())
}
