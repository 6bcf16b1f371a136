//! PhoneNumber value object.

use super::errors::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;

/// A phone number as the caller wrote it, checked for plausible characters.
///
/// HubSpot stores `phone` as free text, so formatting is preserved; only the
/// surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber.
    ///
    /// Accepts digits, spaces, hyphens, parentheses, periods, a leading '+'
    /// and an `x`/`ext` extension marker. At least seven digits are required.
    pub fn new(phone: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = phone.as_ref().trim();

        if !Self::is_valid(trimmed) {
            return Err(ValidationError::InvalidPhone(phone.as_ref().to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    fn is_valid(phone: &str) -> bool {
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < 7 {
            return false;
        }

        let lower = phone.to_ascii_lowercase();
        let body = lower.strip_prefix('+').unwrap_or(&lower);
        let body = body.replacen("ext", "x", 1);

        body.chars().all(|c| {
            c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '.' | 'x')
        }) && body.matches('x').count() <= 1
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
