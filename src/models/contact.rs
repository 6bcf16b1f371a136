//! Contact views: the resolved identity used by the activity summary and the
//! writable property set used by the contact tools.

use super::crm_object::CrmObject;
use crate::domain::{EmailAddress, PhoneNumber};
use serde::Serialize;
use serde_json::{Map, Value};

/// Properties requested when resolving a contact.
pub const CONTACT_PROPERTIES: [&str; 3] = ["email", "firstname", "lastname"];

/// A resolved contact: id, display name and email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRef {
    pub id: String,

    /// `firstname lastname`, or `"Unknown"` when both are absent
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ContactRef {
    pub fn from_object(contact: &CrmObject) -> Self {
        Self {
            id: contact.id.clone(),
            name: Self::display_name(contact.property("firstname"), contact.property("lastname")),
            email: contact.property("email").map(str::to_string),
        }
    }

    pub fn display_name(first: Option<&str>, last: Option<&str>) -> String {
        let parts: Vec<&str> = [first, last]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            "Unknown".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Split a free-form full name into first and last name.
///
/// The first whitespace-separated word is the first name; the rest, if
/// any, is the last name.
pub fn split_name(name: &str) -> (Option<String>, Option<String>) {
    let name = name.trim();
    if name.is_empty() {
        return (None, None);
    }
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => {
            let rest = rest.trim();
            (
                Some(first.to_string()),
                (!rest.is_empty()).then(|| rest.to_string()),
            )
        }
        None => (Some(name.to_string()), None),
    }
}

/// Writable contact properties. Unset fields are not sent, so an update
/// never clears existing values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactProperties {
    pub email: Option<EmailAddress>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<PhoneNumber>,
    pub company: Option<String>,
}

impl ContactProperties {
    /// Set first/last name from a full name.
    pub fn with_name(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name {
            let (first, last) = split_name(name);
            self.firstname = first;
            self.lastname = last;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.firstname.is_none()
            && self.lastname.is_none()
            && self.phone.is_none()
            && self.company.is_none()
    }

    /// The `properties` object of a create/update request body.
    pub fn to_properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        let mut put = |key: &str, value: Option<&str>| {
            if let Some(v) = value {
                props.insert(key.to_string(), Value::String(v.to_string()));
            }
        };
        put("email", self.email.as_ref().map(EmailAddress::as_str));
        put("firstname", self.firstname.as_deref());
        put("lastname", self.lastname.as_deref());
        put("phone", self.phone.as_ref().map(PhoneNumber::as_str));
        put("company", self.company.as_deref());
        props
    }
}
