//! Page state machines. Each `begin_*` call hands back a request for the
//! caller to dispatch; the matching `finish_*` applies the result.

pub mod books;
pub mod chat;
pub mod journal;
pub mod music;
pub mod search_select;
pub mod therapists;

pub use books::BooksPage;
pub use chat::{ChatMessage, ChatSession, Sender};
pub use journal::{JournalForm, JournalFormError, JournalPage};
pub use music::MusicPage;
pub use search_select::{Candidate, DetailRequest, SearchRequest, SearchSelect};
pub use therapists::{BookingError, BookingPhase, BookingStatus, TherapistsPage};
