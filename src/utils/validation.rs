use crate::utils::error::{ImportError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ImportError::ConfigError {
            message: format!("{field_name}: path cannot be empty"),
        });
    }

    if path.contains('\0') {
        return Err(ImportError::ConfigError {
            message: format!("{field_name}: path contains null bytes"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("registry", "./accounts.json").is_ok());
        assert!(validate_path("registry", "").is_err());
        assert!(validate_path("registry", "bad\0path").is_err());
    }
}
