use super::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PLACEHOLDER_COVER: &str = "https://i.postimg.cc/0QNxYz4V/social.png";

fn placeholder_cover() -> String {
    PLACEHOLDER_COVER.to_string()
}

/// A recommended track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    pub artist: String,
    #[serde(default = "placeholder_cover")]
    pub album_cover_url: String,
    #[serde(default)]
    pub spotify_uri: Option<String>,
}

impl Song {
    /// Web player link for the track, derived from its `spotify:track:` URI
    pub fn spotify_url(&self) -> Option<String> {
        self.spotify_uri
            .as_deref()
            .and_then(|uri| uri.strip_prefix("spotify:track:"))
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://open.spotify.com/track/{}", id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongList {
    pub songs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub input_song: String,
    pub recommendations: Vec<Song>,
}

/// A book from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub thumbnail: Option<String>,
    pub info_link: Option<String>,
    pub description: Option<String>,
    pub published_date: Option<String>,
}

impl Book {
    pub fn author_line(&self) -> String {
        if self.authors.is_empty() {
            "Unknown author".to_string()
        } else {
            self.authors.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Therapist {
    #[serde(rename = "_id", deserialize_with = "wire::object_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub bio: String,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(deserialize_with = "wire::timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "wire::timestamp")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub is_booked: bool,
}

/// Therapist detail including open slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapistDetail {
    #[serde(flatten)]
    pub therapist: Therapist,
    #[serde(default)]
    pub available_slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specializations {
    pub specializations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TherapistFilter {
    pub specialization: Option<String>,
    pub language: Option<String>,
}

impl TherapistFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(spec) = self.specialization.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("specialization", spec.clone()));
        }
        if let Some(lang) = self.language.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("language", lang.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: String,
    #[serde(default)]
    pub user_id: String,
    pub therapist_id: String,
    pub therapist_name: String,
    #[serde(deserialize_with = "wire::timestamp")]
    pub date: DateTime<Utc>,
    #[serde(deserialize_with = "wire::timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "wire::timestamp")]
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Booking payload for `POST /therapists/appointments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub user_id: String,
    pub therapist_id: String,
    pub date: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(rename = "_id", deserialize_with = "wire::object_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    /// Content shortened for list display
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() > max_chars {
            let head: String = self.content.chars().take(max_chars).collect();
            format!("{}...", head)
        } else {
            self.content.clone()
        }
    }
}

/// Body for creating or updating a journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalDraft {
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalPrompt {
    pub prompt: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightCount {
    #[serde(rename = "_id")]
    pub label: serde_json::Value,
    pub count: u32,
}

impl InsightCount {
    pub fn label_text(&self) -> String {
        match &self.label {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "none".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalInsights {
    #[serde(default)]
    pub total_entries: u32,
    #[serde(default)]
    pub top_moods: Vec<InsightCount>,
    #[serde(default)]
    pub top_tags: Vec<InsightCount>,
    #[serde(default)]
    pub entries_by_week: Vec<InsightCount>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub message: String,
    pub user_id: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResource {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
    #[serde(default)]
    pub resources: Option<Vec<ChatResource>>,
    #[serde(default)]
    pub emergency_contact: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spotify_url_from_uri() {
        let song = Song {
            name: "Bohemian Rhapsody".to_string(),
            artist: "Queen".to_string(),
            album_cover_url: placeholder_cover(),
            spotify_uri: Some("spotify:track:4u7EnebtmKWzUH433cf5Qv".to_string()),
        };
        assert_eq!(
            song.spotify_url().as_deref(),
            Some("https://open.spotify.com/track/4u7EnebtmKWzUH433cf5Qv")
        );

        let without = Song {
            spotify_uri: None,
            ..song
        };
        assert_eq!(without.spotify_url(), None);
    }

    #[test]
    fn test_song_without_cover_gets_placeholder() {
        let song: Song = serde_json::from_str(r#"{"name": "Yellow", "artist": "Coldplay"}"#).unwrap();
        assert_eq!(song.album_cover_url, PLACEHOLDER_COVER);
    }

    #[test]
    fn test_therapist_detail_decodes_slots() {
        let json = r#"{
            "_id": "662a1",
            "name": "Dr. Sarah Johnson",
            "specializations": ["Anxiety"],
            "experience_years": 12,
            "education": "Ph.D",
            "bio": "CBT",
            "photo_url": null,
            "hourly_rate": 120.0,
            "languages": ["English"],
            "available_slots": [
                {"start_time": "2025-05-02T10:00:00", "end_time": "2025-05-02T11:00:00"}
            ]
        }"#;
        let detail: TherapistDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.therapist.id, "662a1");
        assert_eq!(detail.available_slots.len(), 1);
        assert!(!detail.available_slots[0].is_booked);
    }

    #[test]
    fn test_appointment_status_wire_format() {
        let json = r#"{
            "appointment_id": "a-1",
            "therapist_id": "t-1",
            "therapist_name": "Dr. Chen",
            "date": "2025-05-02T10:00:00",
            "start_time": "2025-05-02T10:00:00",
            "end_time": "2025-05-02T11:00:00",
            "status": "cancelled"
        }"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.status, AppointmentStatus::Cancelled);
        assert!(appt.created_at.is_none());
    }

    #[test]
    fn test_journal_entry_preview_truncates() {
        let entry = JournalEntry {
            id: "1".to_string(),
            title: "Long".to_string(),
            content: "a".repeat(250),
            mood: None,
            tags: Vec::new(),
            created_at: None,
        };
        let preview = entry.preview(200);
        assert_eq!(preview.len(), 203);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_filter_skips_empty_values() {
        let filter = TherapistFilter {
            specialization: Some(String::new()),
            language: Some("Spanish".to_string()),
        };
        assert_eq!(filter.query_pairs(), vec![("language", "Spanish".to_string())]);
    }

    #[test]
    fn test_chat_resource_accepts_contact_entries() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"response": "Please reach out", "session_id": "s1", "emergency_contact": true,
                "resources": [{"name": "Crisis Text Line", "type": "hotline", "contact": "Text HOME to 741741"}]}"#,
        )
        .unwrap();
        let resources = reply.resources.unwrap();
        assert_eq!(resources[0].kind.as_deref(), Some("hotline"));
        assert_eq!(resources[0].contact.as_deref(), Some("Text HOME to 741741"));
    }
}
