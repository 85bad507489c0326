use crate::utils::error::{PresenterError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PresenterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PresenterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PresenterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PresenterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PresenterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PresenterError::InvalidConfigValueError {
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
    // NaN 不在任何區間內
    if !(min..=max).contains(&value) {
        return Err(PresenterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("gemini.base_url", "https://example.com").is_ok());
        assert!(validate_url("gemini.base_url", "http://127.0.0.1:8080/v1beta").is_ok());
        assert!(validate_url("gemini.base_url", "").is_err());
        assert!(validate_url("gemini.base_url", "invalid-url").is_err());
        assert!(validate_url("gemini.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("gemini.temperature", 0.7, 0.0, 2.0).is_ok());
        assert!(validate_range("gemini.temperature", 2.5, 0.0, 2.0).is_err());
        assert!(validate_range("gemini.temperature", -0.1, 0.0, 2.0).is_err());
        assert!(validate_range("gemini.temperature", f32::NAN, 0.0, 2.0).is_err());
        assert!(validate_range("timeout_seconds", 600, 1, 600).is_ok());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("gemini.text_model", "gemini-2.5-flash").is_ok());
        assert!(validate_non_empty_string("gemini.text_model", "   ").is_err());
    }
}
