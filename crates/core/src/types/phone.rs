//! Egyptian mobile phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input has the wrong number of digits.
    #[error("phone number must be exactly {expected} digits")]
    WrongLength {
        /// Required digit count.
        expected: usize,
    },
    /// The input contains a non-digit character.
    #[error("phone number must contain only digits")]
    NonDigit,
    /// The input does not start with a valid Egyptian mobile prefix.
    #[error("phone number must start with 010, 011, 012 or 015")]
    InvalidPrefix,
}

/// An Egyptian mobile phone number.
///
/// This is the sole identity key used by the remote order service: login,
/// profile updates and every order operation are keyed by it.
///
/// ## Constraints
///
/// - Exactly 11 digits
/// - Starts with `01`
/// - Third digit is one of `0`, `1`, `2`, `5` (the Egyptian mobile carriers)
///
/// ## Examples
///
/// ```
/// use tahadu_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("01098765432").is_ok());
/// assert!(PhoneNumber::parse("01598765432").is_ok());
///
/// assert!(PhoneNumber::parse("0109123456").is_err());  // 10 digits
/// assert!(PhoneNumber::parse("01398765432").is_err()); // no carrier 013
/// assert!(PhoneNumber::parse("02098765432").is_err()); // not a mobile prefix
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Length of an Egyptian mobile number.
    pub const DIGITS: usize = 11;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// Validation happens entirely client-side; a rejected number never
    /// reaches the remote service.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly 11 ASCII digits
    /// - Does not start with a valid mobile prefix (`010`/`011`/`012`/`015`)
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if s.len() != Self::DIGITS {
            return Err(PhoneError::WrongLength {
                expected: Self::DIGITS,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        let mut bytes = s.bytes();
        let prefix_ok = bytes.next() == Some(b'0')
            && bytes.next() == Some(b'1')
            && matches!(bytes.next(), Some(b'0' | b'1' | b'2' | b'5'));

        if !prefix_ok {
            return Err(PhoneError::InvalidPrefix);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_carrier_prefixes() {
        for prefix in ["010", "011", "012", "015"] {
            let number = format!("{prefix}98765432");
            assert!(PhoneNumber::parse(&number).is_ok(), "rejected {number}");
        }
    }

    #[test]
    fn rejects_ten_digit_number() {
        // Looks plausible but is one digit short.
        assert_eq!(
            PhoneNumber::parse("0109123456"),
            Err(PhoneError::WrongLength { expected: 11 })
        );
    }

    #[test]
    fn rejects_unknown_carrier() {
        assert_eq!(
            PhoneNumber::parse("01398765432"),
            Err(PhoneError::InvalidPrefix)
        );
        assert_eq!(
            PhoneNumber::parse("02198765432"),
            Err(PhoneError::InvalidPrefix)
        );
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(
            PhoneNumber::parse("0109876543a"),
            Err(PhoneError::NonDigit)
        );
        assert_eq!(
            PhoneNumber::parse("+2010987654"),
            Err(PhoneError::NonDigit)
        );
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(PhoneNumber::parse(""), Err(PhoneError::Empty));
    }

    #[test]
    fn serializes_transparently() {
        let phone = PhoneNumber::parse("01098765432").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"01098765432\"");
    }
}
