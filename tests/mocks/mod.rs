//! In-memory repository implementations shared by the integration tests.

mod mock_contact_repository;
mod mock_deal_repository;
mod mock_engagement_repository;
mod mock_note_repository;

#[allow(unused_imports)]
pub use mock_contact_repository::MockContactRepository;
#[allow(unused_imports)]
pub use mock_deal_repository::MockDealRepository;
#[allow(unused_imports)]
pub use mock_engagement_repository::MockEngagementRepository;
#[allow(unused_imports)]
pub use mock_note_repository::MockNoteRepository;
