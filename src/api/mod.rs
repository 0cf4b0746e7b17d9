pub mod books;
pub mod client;
pub mod error;
pub mod models;
pub mod wire;

pub use books::{GoogleBooksClient, MockBookCatalog};
pub use client::CalmverseClient;
pub use error::{report_failure, ApiError};
pub use models::*;

use crate::config::Config;
use std::sync::Arc;

/// Song catalog and similarity recommendations
#[async_trait::async_trait]
pub trait MusicApi: Send + Sync {
    async fn list_songs(&self) -> Result<Vec<String>, ApiError>;
    async fn recommend(&self, song: &str) -> Result<Vec<Song>, ApiError>;
}

/// Free-text book catalog (third-party or the fallback dataset)
#[async_trait::async_trait]
pub trait BookCatalog: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Book>, ApiError>;
    async fn related(&self, book: &Book) -> Result<Vec<Book>, ApiError>;
}

#[async_trait::async_trait]
pub trait TherapistApi: Send + Sync {
    async fn list_therapists(&self, filter: &TherapistFilter) -> Result<Vec<Therapist>, ApiError>;
    async fn specializations(&self) -> Result<Vec<String>, ApiError>;
    async fn therapist(&self, id: &str) -> Result<TherapistDetail, ApiError>;
    async fn user_appointments(
        &self,
        user_id: &str,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, ApiError>;
    async fn book(&self, appointment: &NewAppointment) -> Result<Appointment, ApiError>;
    async fn cancel(&self, appointment_id: &str) -> Result<(), ApiError>;
}

#[async_trait::async_trait]
pub trait JournalApi: Send + Sync {
    async fn entries(&self) -> Result<Vec<JournalEntry>, ApiError>;
    async fn create_entry(&self, draft: &JournalDraft) -> Result<JournalEntry, ApiError>;
    async fn update_entry(&self, id: &str, draft: &JournalDraft) -> Result<JournalEntry, ApiError>;
    async fn delete_entry(&self, id: &str) -> Result<(), ApiError>;
    async fn prompts(&self) -> Result<Vec<JournalPrompt>, ApiError>;
    async fn insights(&self) -> Result<JournalInsights, ApiError>;
}

#[async_trait::async_trait]
pub trait ChatApi: Send + Sync {
    async fn send(&self, payload: &ChatPayload) -> Result<ChatReply, ApiError>;
    async fn end_session(&self, session_id: &str) -> Result<(), ApiError>;
}

/// Every gateway the pages talk to, shared through UI context
#[derive(Clone)]
pub struct Services {
    pub music: Arc<dyn MusicApi>,
    pub books: Arc<dyn BookCatalog>,
    pub therapists: Arc<dyn TherapistApi>,
    pub journal: Arc<dyn JournalApi>,
    pub chat: Arc<dyn ChatApi>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.music, &other.music)
            && Arc::ptr_eq(&self.books, &other.books)
            && Arc::ptr_eq(&self.therapists, &other.therapists)
            && Arc::ptr_eq(&self.journal, &other.journal)
            && Arc::ptr_eq(&self.chat, &other.chat)
    }
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let backend = Arc::new(CalmverseClient::from_config(config)?);

        let books: Arc<dyn BookCatalog> = if config.use_mock_books {
            Arc::new(MockBookCatalog::new())
        } else {
            Arc::new(GoogleBooksClient::from_config(config)?)
        };

        Ok(Self {
            music: backend.clone(),
            books,
            therapists: backend.clone(),
            journal: backend.clone(),
            chat: backend,
        })
    }
}
