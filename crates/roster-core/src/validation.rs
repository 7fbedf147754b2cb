//! Username validation for the add-person form.

use crate::error::ValidationError;

/// Outcome of validating a username field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The value may be submitted.
    Valid,
    /// The value was rejected.
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Check if validation passed.
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The user-facing message, if invalid.
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e.message()),
        }
    }

    /// Convert into a `Result`.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(e) => Err(e),
        }
    }
}

/// Validate a username as typed.
///
/// Trimming is only used for the emptiness check; the caller submits the
/// untrimmed value.
pub fn validate_username(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::Invalid(ValidationError::EmptyUsername)
    } else {
        ValidationResult::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::INVALID_USERNAME_MESSAGE;
    use proptest::prelude::*;

    #[test]
    fn test_empty_username_is_invalid() {
        let result = validate_username("");
        assert!(!result.is_valid());
        assert_eq!(result.message(), Some(INVALID_USERNAME_MESSAGE));
    }

    #[test]
    fn test_whitespace_username_is_invalid() {
        assert!(!validate_username(" \t\n ").is_valid());
    }

    #[test]
    fn test_padded_username_is_valid() {
        let result = validate_username("  foobar ");
        assert!(result.is_valid());
        assert_eq!(result.message(), None);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(validate_username("foo").into_result(), Ok(()));
        assert_eq!(
            validate_username("").into_result(),
            Err(ValidationError::EmptyUsername)
        );
    }

    proptest! {
        #[test]
        fn prop_whitespace_only_never_valid(ws in "[ \t\r\n]{0,16}") {
            prop_assert!(!validate_username(&ws).is_valid());
        }

        #[test]
        fn prop_any_visible_char_is_valid(pad in "[ ]{0,4}", c in "[a-zA-Z0-9_]") {
            let value = format!("{pad}{c}{pad}");
            prop_assert!(validate_username(&value).is_valid());
        }
    }
}
