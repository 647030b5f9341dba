use crate::utils::error::{TallyError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TallyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TallyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TallyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Parses a delimiter setting into the single byte the CSV reader expects.
pub fn parse_delimiter(field_name: &str, value: &str) -> Result<u8> {
    let invalid = |reason: &str| TallyError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let byte = match value {
        "\\t" | "tab" => b'\t',
        _ => {
            let bytes = value.as_bytes();
            if bytes.len() != 1 || !bytes[0].is_ascii() {
                return Err(invalid("Delimiter must be a single ASCII character"));
            }
            bytes[0]
        }
    };

    if matches!(byte, b'"' | b'\n' | b'\r') {
        return Err(invalid("Delimiter cannot be a quote or line break"));
    }

    Ok(byte)
}
