use crate::error::{ManagerError, Result};

/// Shared validation for the string keys that identify lists, items and
/// tags: non-empty once trimmed, and free of embedded whitespace that
/// would make CLI invocation ambiguous.
pub fn validate_key(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ManagerError::InvalidArgument(format!(
            "{field} must not be empty"
        )));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(ManagerError::InvalidArgument(format!(
            "{field} must not contain whitespace: '{value}'"
        )));
    }
    Ok(trimmed.to_string())
}

/// Positions are 1-based dense integers within a sibling group; a caller
/// supplying an explicit position must not hand in a non-positive one.
pub fn validate_position(position: i32) -> Result<()> {
    if position < 1 {
        return Err(ManagerError::InvalidArgument(format!(
            "position must be positive, got {position}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert!(validate_key("item_key", "   ").is_err());
    }

    #[test]
    fn rejects_embedded_whitespace() {
        assert!(validate_key("item_key", "a b").is_err());
    }

    #[test]
    fn trims_and_accepts() {
        assert_eq!(validate_key("item_key", "  task1  ").unwrap(), "task1");
    }

    #[test]
    fn rejects_nonpositive_position() {
        assert!(validate_position(0).is_err());
        assert!(validate_position(-5).is_err());
    }

    #[test]
    fn accepts_positive_position() {
        assert!(validate_position(1).is_ok());
    }
}
