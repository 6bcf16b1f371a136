use crate::client::NoteTarget;
use crate::domain::EmailAddress;
use crate::error::CrmApiResult;
use crate::models::{ContactProperties, CrmObject, EngagementKind, Pipeline};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage and retrieval,
/// enabling different implementations (API client, mock).
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve a contact's identity fields by ID.
    async fn get(&self, id: &str) -> CrmApiResult<CrmObject>;

    /// Contacts whose email equals `email`.
    async fn search_by_email(&self, email: &EmailAddress) -> CrmApiResult<Vec<CrmObject>>;

    /// Create a new contact.
    async fn create(&self, properties: &ContactProperties) -> CrmApiResult<CrmObject>;

    /// Update the set properties of an existing contact.
    async fn update(&self, id: &str, properties: &ContactProperties) -> CrmApiResult<CrmObject>;
}

/// Read access to the engagements associated with a contact.
///
/// Both methods report failures as errors. Deciding whether a failure is
/// fatal is left to the caller.
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Ids of the engagements of `kind` associated with a contact.
    async fn associations(&self, contact_id: &str, kind: EngagementKind)
        -> CrmApiResult<Vec<String>>;

    /// One engagement with the properties of its kind.
    async fn engagement(&self, kind: EngagementKind, id: &str) -> CrmApiResult<CrmObject>;
}

/// Repository for deals and their pipelines.
#[async_trait]
pub trait DealRepository: Send + Sync {
    /// Move a deal to `stage`.
    async fn update_stage(&self, deal_id: &str, stage: &str) -> CrmApiResult<CrmObject>;

    /// All deal pipelines with their stages.
    async fn pipelines(&self) -> CrmApiResult<Vec<Pipeline>>;
}

/// Repository for notes logged against contacts and deals.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create(&self, target: &NoteTarget, body: &str) -> CrmApiResult<CrmObject>;
}
