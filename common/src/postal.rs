//! Brazilian postal code (CEP) handling.
//!
//! Users type CEPs with or without the mask (`11717-005`, `11717005`, ` 11.717-005 `); we only
//! keep the digits and there must be exactly `CEP_DIGITS` of them.
//!

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of digits in a CEP
pub const CEP_DIGITS: usize = 8;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum PostalCodeError {
    #[error("invalid postal code '{input}': expected {CEP_DIGITS} digits, got {digits}")]
    BadLength { input: String, digits: usize },
}

/// A normalised CEP: always `CEP_DIGITS` ASCII digits, no mask.
///
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

/// Keep only the ASCII digits of `input`.
///
#[inline]
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

impl PostalCode {
    /// Normalise and validate user input.
    ///
    pub fn parse(input: &str) -> Result<Self, PostalCodeError> {
        let digits = digits_only(input);
        if digits.len() != CEP_DIGITS {
            return Err(PostalCodeError::BadLength {
                input: input.to_string(),
                digits: digits.len(),
            });
        }
        Ok(PostalCode(digits))
    }

    /// Digits only, as sent to the geocoder and the backend.
    ///
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Usual `NNNNN-NNN` display form.
    ///
    pub fn masked(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl Display for PostalCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostalCode {
    type Err = PostalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostalCode::parse(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = PostalCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PostalCode::parse(&value)
    }
}

impl From<PostalCode> for String {
    fn from(value: PostalCode) -> Self {
        value.0
    }
}
