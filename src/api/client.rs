use super::error::ApiError;
use super::models::{
    Appointment, AppointmentStatus, ChatPayload, ChatReply, JournalDraft, JournalEntry,
    JournalInsights, JournalPrompt, NewAppointment, RecommendationResponse, Song, SongList,
    Specializations, Therapist, TherapistDetail, TherapistFilter,
};
use super::{ChatApi, JournalApi, MusicApi, TherapistApi};
use crate::config::Config;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

/// Client for the CalmVerse backend (music, therapists, journal, chat)
#[derive(Clone)]
pub struct CalmverseClient {
    client: Client,
    base_url: String,
}

impl CalmverseClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body, mapping non-2xx to `ApiError::Status`
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        debug!("Response status: {} for {}", status, url);

        let body = response.text().await?;

        if !status.is_success() {
            warn!("✗ CalmVerse API error: {} for {}", status, url);
            return Err(ApiError::from_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("JSON parsing error for {}: {}", url, e);
            error!("Raw response: {}", body);
            ApiError::Payload(e)
        })
    }

    /// Send a request whose success body carries nothing we need
    async fn execute(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let url = response.url().clone();
            let body = response.text().await.unwrap_or_default();
            warn!("✗ CalmVerse API error: {} for {}", status, url);
            Err(ApiError::from_status(status, &body))
        }
    }
}

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[async_trait::async_trait]
impl MusicApi for CalmverseClient {
    async fn list_songs(&self) -> Result<Vec<String>, ApiError> {
        let url = self.url("/songs");
        info!("📡 CalmVerse API: GET {}", url);

        let list: SongList = self.fetch(self.client.get(&url)).await?;
        Ok(list.songs)
    }

    async fn recommend(&self, song: &str) -> Result<Vec<Song>, ApiError> {
        let url = self.url("/recommend");
        info!("📡 CalmVerse API: GET {} with song='{}'", url, song);

        let response: RecommendationResponse = self
            .fetch(self.client.get(&url).query(&[("song", song)]))
            .await?;

        info!(
            "✓ {} recommendation(s) for '{}'",
            response.recommendations.len(),
            response.input_song
        );
        Ok(response.recommendations)
    }
}

#[async_trait::async_trait]
impl TherapistApi for CalmverseClient {
    async fn list_therapists(&self, filter: &TherapistFilter) -> Result<Vec<Therapist>, ApiError> {
        let url = self.url("/therapists/");
        let params = filter.query_pairs();
        info!("📡 CalmVerse API: GET {} with {:?}", url, params);

        self.fetch(self.client.get(&url).query(&params)).await
    }

    async fn specializations(&self) -> Result<Vec<String>, ApiError> {
        let url = self.url("/therapists/specializations");
        info!("📡 CalmVerse API: GET {}", url);

        let response: Specializations = self.fetch(self.client.get(&url)).await?;
        Ok(response.specializations)
    }

    async fn therapist(&self, id: &str) -> Result<TherapistDetail, ApiError> {
        let url = self.url(&format!("/therapists/{}", segment(id)));
        info!("📡 CalmVerse API: GET {}", url);

        self.fetch(self.client.get(&url)).await
    }

    async fn user_appointments(
        &self,
        user_id: &str,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, ApiError> {
        let url = self.url(&format!("/therapists/appointments/user/{}", segment(user_id)));
        info!("📡 CalmVerse API: GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }
        self.fetch(request).await
    }

    async fn book(&self, appointment: &NewAppointment) -> Result<Appointment, ApiError> {
        let url = self.url("/therapists/appointments");
        info!(
            "📡 CalmVerse API: POST {} therapist={} start={}",
            url, appointment.therapist_id, appointment.start_time
        );

        self.fetch(self.client.post(&url).json(appointment)).await
    }

    async fn cancel(&self, appointment_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/therapists/appointments/{}", segment(appointment_id)));
        info!("📡 CalmVerse API: DELETE {}", url);

        self.execute(self.client.delete(&url)).await
    }
}

#[async_trait::async_trait]
impl JournalApi for CalmverseClient {
    async fn entries(&self) -> Result<Vec<JournalEntry>, ApiError> {
        let url = self.url("/journal/entries");
        info!("📡 CalmVerse API: GET {}", url);

        self.fetch(self.client.get(&url)).await
    }

    async fn create_entry(&self, draft: &JournalDraft) -> Result<JournalEntry, ApiError> {
        let url = self.url("/journal/entries");
        info!("📡 CalmVerse API: POST {} title='{}'", url, draft.title);
        debug!("Journal tags: {:?}", draft.tags);

        self.fetch(self.client.post(&url).json(draft)).await
    }

    async fn update_entry(&self, id: &str, draft: &JournalDraft) -> Result<JournalEntry, ApiError> {
        let url = self.url(&format!("/journal/entries/{}", segment(id)));
        info!("📡 CalmVerse API: PUT {} title='{}'", url, draft.title);

        self.fetch(self.client.put(&url).json(draft)).await
    }

    async fn delete_entry(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/journal/entries/{}", segment(id)));
        info!("📡 CalmVerse API: DELETE {}", url);

        self.execute(self.client.delete(&url)).await
    }

    async fn prompts(&self) -> Result<Vec<JournalPrompt>, ApiError> {
        let url = self.url("/journal/prompts");
        debug!("📡 CalmVerse API: GET {}", url);

        self.fetch(self.client.get(&url)).await
    }

    async fn insights(&self) -> Result<JournalInsights, ApiError> {
        let url = self.url("/journal/insights");
        debug!("📡 CalmVerse API: GET {}", url);

        self.fetch(self.client.get(&url)).await
    }
}

#[async_trait::async_trait]
impl ChatApi for CalmverseClient {
    async fn send(&self, payload: &ChatPayload) -> Result<ChatReply, ApiError> {
        let url = self.url("/mental-health/chat");
        info!(
            "📡 CalmVerse API: POST {} session={:?}",
            url, payload.session_id
        );

        self.fetch(self.client.post(&url).json(payload)).await
    }

    async fn end_session(&self, session_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/mental-health/chat/{}", segment(session_id)));
        info!("📡 CalmVerse API: DELETE {}", url);

        self.execute(self.client.delete(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_trims_base_url() {
        let client = CalmverseClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/songs"), "http://localhost:8000/songs");
    }

    #[test]
    fn test_path_segments_are_encoded() {
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }

    // Request/response behavior is covered against the dev backend in tests/
}
