//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The named identifier is empty.
    EmptyId(&'static str),

    /// The named identifier contains characters ids never have.
    InvalidId(&'static str, String),

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is invalid.
    InvalidPhone(String),

    /// A required field was not supplied.
    MissingField(&'static str),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId(field) => write!(f, "{} cannot be empty", field),
            Self::InvalidId(field, id) => write!(f, "Invalid {}: {}", field, id),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
            Self::MissingField(field) => write!(f, "{} is required", field),
        }
    }
}

impl std::error::Error for ValidationError {}
