//! Phone number type.
//!
//! Shop contact numbers as entered by shopkeepers. Validation is deliberately
//! lenient: the directory stores whatever a shopkeeper can be reached at,
//! including numbers with spaces, dashes, and a leading country prefix.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("phone number must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Fewer digits than any dialable number.
    #[error("phone number must contain at least {min} digits")]
    TooFewDigits {
        /// Minimum required digit count.
        min: usize,
    },
    /// A character outside digits, spaces, and `+ - ( )`.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// A shop contact phone number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Maximum stored length.
    pub const MAX_LENGTH: usize = 20;

    /// Minimum digit count for a dialable number.
    pub const MIN_DIGITS: usize = 6;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains characters
    /// other than digits/spaces/`+ - ( )`, or has fewer than six digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(PhoneError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        for c in s.chars() {
            if !(c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')')) {
                return Err(PhoneError::InvalidCharacter(c));
            }
        }

        let digits = s.chars().filter(char::is_ascii_digit).count();
        if digits < Self::MIN_DIGITS {
            return Err(PhoneError::TooFewDigits {
                min: Self::MIN_DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert!(Phone::parse("+91 98765 43210").is_ok());
        assert!(Phone::parse("022-2267 0000").is_ok());
        assert!(Phone::parse("(022) 22670000").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert!(matches!(
            Phone::parse("98765x43210"),
            Err(PhoneError::InvalidCharacter('x'))
        ));
    }

    #[test]
    fn test_parse_too_few_digits() {
        assert!(matches!(
            Phone::parse("+91 12"),
            Err(PhoneError::TooFewDigits { .. })
        ));
    }
}
