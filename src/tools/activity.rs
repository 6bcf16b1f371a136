//! Contact activity summary.
//!
//! Fetches the engagements associated with a contact across all five kinds,
//! normalizes a bounded sample of each and merges them into one
//! [`ActivitySummary`]. Counts come from the association index, so they are
//! exact even when only a few records per kind are fetched in detail.

use crate::domain::{EmailAddress, RecordId};
use crate::error::{CrmApiError, CrmApiResult};
use crate::models::{ActivitySummary, ContactRef, EngagementKind, EngagementSummary};
use crate::repositories::{ContactRepository, EngagementRepository};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Records fetched in detail per kind unless configured otherwise.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Deadline for one summary unless configured otherwise.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// A resolved contact together with its activity summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactActivity {
    pub contact: ContactRef,
    pub summary: ActivitySummary,
}

/// Activity aggregation over the contact and engagement repositories.
pub struct ContactActivityTools {
    contact_repo: Arc<dyn ContactRepository>,
    engagement_repo: Arc<dyn EngagementRepository>,
    sample_size: usize,
    deadline: Duration,
}

impl ContactActivityTools {
    pub fn new(
        contact_repo: Arc<dyn ContactRepository>,
        engagement_repo: Arc<dyn EngagementRepository>,
    ) -> Self {
        Self {
            contact_repo,
            engagement_repo,
            sample_size: DEFAULT_SAMPLE_SIZE,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Number of records per kind fetched in detail.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Deadline for the per-kind fan-out of one summary.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Summarize by contact id, or by email when no id is given.
    pub async fn summarize_for(
        &self,
        contact_id: Option<&str>,
        email: Option<&str>,
    ) -> CrmApiResult<ContactActivity> {
        match (contact_id, email) {
            (Some(id), _) => {
                let id = RecordId::parse("contactId", id)?;
                self.summarize(id.as_str()).await
            }
            (None, Some(email)) => {
                let email = EmailAddress::new(email)?;
                self.summarize_by_email(&email).await
            }
            (None, None) => Err(CrmApiError::InvalidInput(
                "contactId or email is required".to_string(),
            )),
        }
    }

    /// Resolve a contact by email, then summarize it.
    pub async fn summarize_by_email(&self, email: &EmailAddress) -> CrmApiResult<ContactActivity> {
        let matches = self.contact_repo.search_by_email(email).await?;
        let contact = matches
            .first()
            .ok_or_else(|| CrmApiError::NotFound(format!("contact with email {}", email)))?;
        self.summarize(&contact.id).await
    }

    /// Build the activity summary of one contact.
    ///
    /// Only resolving the contact can fail the whole operation, apart from
    /// the overall deadline, which covers the contact lookup and every kind.
    /// Association and detail failures of a single kind degrade that kind to
    /// an empty or shorter sample.
    pub async fn summarize(&self, contact_id: &str) -> CrmApiResult<ContactActivity> {
        tokio::time::timeout(self.deadline, self.build(contact_id))
            .await
            .map_err(|_| {
                warn!(
                    "Activity summary for contact {} exceeded {:?}",
                    contact_id, self.deadline
                );
                CrmApiError::Timeout
            })?
    }

    async fn build(&self, contact_id: &str) -> CrmApiResult<ContactActivity> {
        let contact = self.contact_repo.get(contact_id).await?;
        let contact = ContactRef::from_object(&contact);

        // One pipeline per kind; results land in kind order and are merged
        // only after every kind finished.
        let fetches = EngagementKind::ALL
            .into_iter()
            .map(|kind| self.fetch_kind(contact_id, kind));
        let per_kind = join_all(fetches).await;

        let summary = ActivitySummary::from_kinds(per_kind);

        info!(
            contact_id = %contact_id,
            total_engagements = summary.total_engagements,
            sampled = summary.timeline.len(),
            "Activity summary built"
        );

        Ok(ContactActivity { contact, summary })
    }

    /// Count and sample the engagements of one kind.
    async fn fetch_kind(&self, contact_id: &str, kind: EngagementKind) -> EngagementSummary {
        // Fail-soft: an association failure is reported as a zero count for
        // this kind instead of failing the summary.
        let ids = match self.engagement_repo.associations(contact_id, kind).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Skipping {} for contact {}: {}", kind, contact_id, e);
                return EngagementSummary::empty(kind);
            }
        };

        let count = ids.len();
        let mut items = Vec::with_capacity(count.min(self.sample_size));

        for id in ids.iter().take(self.sample_size) {
            // A missing or failing record is dropped from the sample; the
            // count still includes it.
            match self.engagement_repo.engagement(kind, id).await {
                Ok(raw) => items.push(kind.normalize(&raw)),
                Err(e) => debug!("Dropping {} {} from sample: {}", kind, id, e),
            }
        }

        EngagementSummary { kind, count, items }
    }
}
