//! Contact tools: create, update and duplicate-checked creation from a chat.

use crate::client::NoteTarget;
use crate::domain::{EmailAddress, PhoneNumber, RecordId};
use crate::error::{CrmApiError, CrmApiResult};
use crate::models::{ContactProperties, CrmObject};
use crate::repositories::{ContactRepository, NoteRepository};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Caller-supplied contact fields, unvalidated.
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

impl ContactInput {
    /// Validate the non-email fields into a property set.
    fn details(&self) -> CrmApiResult<ContactProperties> {
        let phone = non_blank(self.phone.as_deref())
            .map(PhoneNumber::new)
            .transpose()?;

        Ok(ContactProperties {
            phone,
            company: non_blank(self.company.as_deref()).map(str::to_string),
            ..Default::default()
        }
        .with_name(non_blank(self.name.as_deref())))
    }

    fn required_email(&self) -> CrmApiResult<EmailAddress> {
        match non_blank(self.email.as_deref()) {
            Some(email) => Ok(EmailAddress::new(email)?),
            None => Err(CrmApiError::InvalidInput("email is required".to_string())),
        }
    }
}

/// Result of [`ContactTools::create_from_chat`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContactOutcome {
    pub contact: CrmObject,

    /// `false` when a contact with the same email already existed
    pub created: bool,

    /// Present only when a chat summary was supplied for a new contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_logged: Option<bool>,
}

/// Contact create and update operations.
pub struct ContactTools {
    contact_repo: Arc<dyn ContactRepository>,
    note_repo: Arc<dyn NoteRepository>,
}

impl ContactTools {
    pub fn new(
        contact_repo: Arc<dyn ContactRepository>,
        note_repo: Arc<dyn NoteRepository>,
    ) -> Self {
        Self {
            contact_repo,
            note_repo,
        }
    }

    /// Create a contact. The email is required.
    pub async fn create_contact(&self, input: &ContactInput) -> CrmApiResult<CrmObject> {
        let email = input.required_email()?;
        let properties = ContactProperties {
            email: Some(email),
            ..input.details()?
        };

        let contact = self.contact_repo.create(&properties).await?;
        info!("Created contact {}", contact.id);
        Ok(contact)
    }

    /// Update a contact by id, or by email lookup when no id is given.
    ///
    /// With an id the email is one of the updated properties; without one it
    /// only identifies the contact.
    pub async fn update_contact(
        &self,
        contact_id: Option<&str>,
        input: &ContactInput,
    ) -> CrmApiResult<CrmObject> {
        let (id, properties) = match contact_id {
            Some(id) => {
                let id = RecordId::parse("contactId", id)?;
                let email = non_blank(input.email.as_deref())
                    .map(EmailAddress::new)
                    .transpose()?;
                let properties = ContactProperties {
                    email,
                    ..input.details()?
                };
                (id.into_inner(), properties)
            }
            None => {
                let email = match non_blank(input.email.as_deref()) {
                    Some(email) => EmailAddress::new(email)?,
                    None => {
                        return Err(CrmApiError::InvalidInput(
                            "contactId or email is required".to_string(),
                        ))
                    }
                };
                let properties = input.details()?;
                if properties.is_empty() {
                    return Err(no_properties());
                }
                (self.resolve_by_email(&email).await?, properties)
            }
        };

        if properties.is_empty() {
            return Err(no_properties());
        }

        let contact = self.contact_repo.update(&id, &properties).await?;
        info!("Updated contact {}", contact.id);
        Ok(contact)
    }

    /// Create a contact captured in a chat unless one with the same email
    /// exists, logging the chat summary as a note on a new contact.
    pub async fn create_from_chat(
        &self,
        input: &ContactInput,
        chat_summary: Option<&str>,
    ) -> CrmApiResult<ChatContactOutcome> {
        let email = input.required_email()?;
        let details = input.details()?;

        let existing = self.contact_repo.search_by_email(&email).await?;
        if let Some(contact) = existing.into_iter().next() {
            info!("Contact {} already exists for {}", contact.id, email);
            return Ok(ChatContactOutcome {
                contact,
                created: false,
                note_logged: None,
            });
        }

        let properties = ContactProperties {
            email: Some(email),
            ..details
        };
        let contact = self.contact_repo.create(&properties).await?;
        info!("Created contact {} from chat", contact.id);

        let note_logged = match non_blank(chat_summary) {
            Some(summary) => {
                let body = format!("Chat summary:\n{}", summary.trim());
                let target = NoteTarget::Contact(contact.id.clone());
                match self.note_repo.create(&target, &body).await {
                    Ok(_) => Some(true),
                    Err(e) => {
                        warn!("Failed to log chat note for contact {}: {}", contact.id, e);
                        Some(false)
                    }
                }
            }
            None => None,
        };

        Ok(ChatContactOutcome {
            contact,
            created: true,
            note_logged,
        })
    }

    async fn resolve_by_email(&self, email: &EmailAddress) -> CrmApiResult<String> {
        let matches = self.contact_repo.search_by_email(email).await?;
        matches
            .into_iter()
            .next()
            .map(|c| c.id)
            .ok_or_else(|| CrmApiError::NotFound(format!("contact with email {}", email)))
    }
}

fn no_properties() -> CrmApiError {
    CrmApiError::InvalidInput("at least one of email, name, phone or company is required".to_string())
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
