//! EmailAddress value object.

use super::errors::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated, normalized email address.
///
/// HubSpot matches the `email` property case-insensitively, so addresses are
/// trimmed and lowercased on construction. That keeps duplicate checks and
/// contact lookups consistent regardless of how the caller typed them.
///
/// # Example
///
/// ```
/// use hubspot_mcp_server::domain::EmailAddress;
///
/// let email = EmailAddress::new(" Jane.Doe@Example.com ").unwrap();
/// assert_eq!(email.as_str(), "jane.doe@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - Exactly one '@' with a non-empty local part
    /// - A domain with at least one '.' and no empty labels
    /// - No whitespace inside the address
    pub fn new(email: impl AsRef<str>) -> Result<Self, ValidationError> {
        let normalized = email.as_ref().trim().to_lowercase();

        if !Self::is_valid(&normalized) {
            return Err(ValidationError::InvalidEmail(email.as_ref().to_string()));
        }

        Ok(Self(normalized))
    }

    fn is_valid(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || domain.contains('@') || !domain.contains('.') {
            return false;
        }

        domain.split('.').all(|label| !label.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get the domain part (after '@').
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
