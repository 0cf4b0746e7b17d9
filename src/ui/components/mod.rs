pub mod app;
pub mod books;
pub mod chat;
pub mod dialog;
pub mod journal;
pub mod landing;
pub mod music;
pub mod navbar;
pub mod status;
pub mod therapists;

pub use app::App;
pub use books::BookRecommend;
pub use chat::MentalHealthChat;
pub use journal::Journal;
pub use landing::{Landing, NotFound};
pub use music::MusicRecommend;
pub use navbar::Layout;
pub use therapists::TherapistAppointments;
