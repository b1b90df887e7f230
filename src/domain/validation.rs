use std::borrow::Cow;

use validator::ValidationError;

/// Rejects empty and whitespace-only text. Shared by create payloads and patch checks.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some(Cow::from("must not be blank"));
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_is_blank() {
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t\n ").is_err());
        assert!(not_blank(" Maize ").is_ok());
    }
}
