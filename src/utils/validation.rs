use crate::utils::error::{CatalogError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 分隔字元必須是單一 ASCII 位元組，且不能是換行字元
pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.to_string(),
            reason: "Delimiter must be a single ASCII character".to_string(),
        });
    }

    if delimiter == '\n' || delimiter == '\r' {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.escape_default().to_string(),
            reason: "Delimiter cannot be a line terminator".to_string(),
        });
    }

    Ok(delimiter as u8)
}

/// 課程代碼格式: 4 個英文字母 + 3 個數字 (例如 CSCI300)
pub fn is_well_formed_course_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    bytes.len() == 7
        && bytes[..4].iter().all(u8::is_ascii_alphabetic)
        && bytes[4..].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("catalog.input_path", "ABCU_Courses.csv").is_ok());
        assert!(validate_path("catalog.input_path", "  ").is_err());
        assert!(validate_path("catalog.input_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("catalog.bucket_count", 27, 1).is_ok());
        assert!(validate_positive_number("catalog.bucket_count", 0, 1).is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        assert_eq!(validate_delimiter("catalog.delimiter", ',').unwrap(), b',');
        assert_eq!(validate_delimiter("catalog.delimiter", '\t').unwrap(), b'\t');
        assert!(validate_delimiter("catalog.delimiter", '\n').is_err());
        assert!(validate_delimiter("catalog.delimiter", '；').is_err());
    }

    #[test]
    fn test_course_id_shape() {
        assert!(is_well_formed_course_id("CSCI300"));
        assert!(is_well_formed_course_id("math201"));
        assert!(!is_well_formed_course_id("CSCI30"));
        assert!(!is_well_formed_course_id("CS300"));
        assert!(!is_well_formed_course_id("CSCIABC"));
    }
}
