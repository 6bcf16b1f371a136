mod hubspot_contact_repository;
mod hubspot_deal_repository;
mod hubspot_engagement_repository;
mod hubspot_note_repository;
mod traits;

pub use hubspot_contact_repository::HubSpotContactRepository;
pub use hubspot_deal_repository::HubSpotDealRepository;
pub use hubspot_engagement_repository::HubSpotEngagementRepository;
pub use hubspot_note_repository::HubSpotNoteRepository;
pub use traits::{ContactRepository, DealRepository, EngagementRepository, NoteRepository};
