//! Domain value objects and types.
//!
//! Type-safe wrappers for the identifiers and contact fields that tool
//! callers supply. Each validates at construction time so malformed input is
//! rejected before a request reaches HubSpot.

pub mod email;
pub mod errors;
pub mod phone;
pub mod record_id;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::PhoneNumber;
pub use record_id::RecordId;
