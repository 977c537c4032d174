use crate::utils::error::{HousingError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(HousingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(HousingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(HousingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HousingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HousingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 檔名不可包含目錄分隔符
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;
    if name.contains('/') || name.contains('\\') {
        return Err(HousingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "File name must not contain path separators".to_string(),
        });
    }
    Ok(())
}

/// 開區間檢查 (min, max)
pub fn validate_open_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !(value > min && value < max) {
        return Err(HousingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be strictly between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HousingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("dataset_url", "https://example.com/housing.tgz").is_ok());
        assert!(validate_url("dataset_url", "http://example.com").is_ok());
        assert!(validate_url("dataset_url", "").is_err());
        assert!(validate_url("dataset_url", "invalid-url").is_err());
        assert!(validate_url("dataset_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_open_range() {
        assert!(validate_open_range("test_ratio", 0.2, 0.0, 1.0).is_ok());
        assert!(validate_open_range("test_ratio", 0.0, 0.0, 1.0).is_err());
        assert!(validate_open_range("test_ratio", 1.0, 0.0, 1.0).is_err());
        assert!(validate_open_range("test_ratio", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("model_file", "linear_model.json").is_ok());
        assert!(validate_file_name("model_file", "models/linear.json").is_err());
        assert!(validate_file_name("model_file", "").is_err());
    }
}
