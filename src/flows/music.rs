use super::search_select::{DetailRequest, FailureMessages, SearchRequest, SearchSelect};
use crate::api::{ApiError, MusicApi, Song};
use tracing::info;

/// Most matches shown in the dropdown
pub const MAX_MATCHES: usize = 10;

const MESSAGES: FailureMessages = FailureMessages {
    search: "Failed to load songs. Please check if the API server is running.",
    detail: "Failed to get recommendations. Please try again.",
};

/// Case-insensitive substring match over catalog titles
pub fn filter_catalog(catalog: &[String], query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|title| title.to_lowercase().contains(&needle))
        .take(MAX_MATCHES)
        .cloned()
        .collect()
}

/// Fetch the catalog and keep the titles matching `query`
pub async fn fetch_matches(api: &dyn MusicApi, query: &str) -> Result<Vec<String>, ApiError> {
    let catalog = api.list_songs().await?;
    let matches = filter_catalog(&catalog, query);
    info!(
        "✓ {} of {} catalog song(s) match '{}'",
        matches.len(),
        catalog.len(),
        query
    );
    Ok(matches)
}

/// Music recommendation page state
#[derive(Debug, Clone)]
pub struct MusicPage {
    flow: SearchSelect<String, Vec<Song>>,
}

impl Default for MusicPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicPage {
    pub fn new() -> Self {
        Self {
            flow: SearchSelect::new(MESSAGES),
        }
    }

    pub fn flow(&self) -> &SearchSelect<String, Vec<Song>> {
        &self.flow
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.flow.set_query(query);
    }

    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        self.flow.begin_search()
    }

    /// Apply matches. The dropdown stays hidden when nothing matched.
    pub fn finish_search(&mut self, request: &SearchRequest, result: Result<Vec<String>, ApiError>) -> bool {
        if !self.flow.finish_search(request, result) {
            return false;
        }
        if self.flow.candidates().data().map_or(false, Vec::is_empty) {
            self.flow.close_list();
        }
        true
    }

    /// Pick a song; the query box takes the chosen title
    pub fn select(&mut self, title: String) -> DetailRequest<String> {
        self.flow.set_query(title.clone());
        self.flow.select(title)
    }

    pub fn finish_recommendations(
        &mut self,
        request: &DetailRequest<String>,
        result: Result<Vec<Song>, ApiError>,
    ) -> bool {
        self.flow.finish_detail(request, result)
    }

    pub fn selected_song(&self) -> Option<&str> {
        self.flow.selection().map(String::as_str)
    }

    pub fn recommendations(&self) -> &[Song] {
        self.flow.detail().data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn error(&self) -> Option<&str> {
        self.flow
            .detail()
            .error()
            .or_else(|| self.flow.candidates().error())
    }

    pub fn is_loading(&self) -> bool {
        self.flow.is_searching() || self.flow.detail().is_loading()
    }

    pub fn dismiss_errors(&mut self) {
        self.flow.dismiss_errors();
    }

    /// Run a whole search against `api`
    pub async fn search(&mut self, api: &dyn MusicApi) -> bool {
        let Some(request) = self.begin_search() else {
            return false;
        };
        let result = fetch_matches(api, &request.query).await;
        self.finish_search(&request, result)
    }

    /// Select `title` and load its recommendations from `api`
    pub async fn choose(&mut self, api: &dyn MusicApi, title: String) -> bool {
        let request = self.select(title);
        let result = api.recommend(&request.key).await;
        self.finish_recommendations(&request, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeMusic {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl MusicApi for FakeMusic {
        async fn list_songs(&self) -> Result<Vec<String>, ApiError> {
            self.calls.lock().unwrap().push("songs".to_string());
            Ok(vec![
                "Bohemian Rhapsody".to_string(),
                "Weightless".to_string(),
                "Clair de Lune".to_string(),
            ])
        }

        async fn recommend(&self, song: &str) -> Result<Vec<Song>, ApiError> {
            self.calls.lock().unwrap().push(format!("recommend:{}", song));
            Ok(vec![Song {
                name: "Don't Stop Me Now".to_string(),
                artist: "Queen".to_string(),
                album_cover_url: "https://img/cover.jpg".to_string(),
                spotify_uri: None,
            }])
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_and_capped() {
        let catalog: Vec<String> = (0..30).map(|i| format!("Calm Song {}", i)).collect();
        let matches = filter_catalog(&catalog, "CALM");
        assert_eq!(matches.len(), MAX_MATCHES);
        assert!(filter_catalog(&catalog, "  ").is_empty());
        assert!(filter_catalog(&catalog, "storm").is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_request() {
        let api = FakeMusic::default();
        let mut page = MusicPage::new();
        page.set_query("   ");

        assert!(!page.search(&api).await);
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bohemian_scenario() {
        let api = FakeMusic::default();
        let mut page = MusicPage::new();

        page.set_query("Bohemian");
        assert!(page.search(&api).await);
        assert!(page.flow().is_list_open());
        let matches = page.flow().candidates().data().cloned().unwrap();
        assert_eq!(matches, vec!["Bohemian Rhapsody".to_string()]);

        assert!(page.choose(&api, matches[0].clone()).await);
        assert_eq!(
            api.calls.lock().unwrap().last().map(String::as_str),
            Some("recommend:Bohemian Rhapsody")
        );
        assert_eq!(page.selected_song(), Some("Bohemian Rhapsody"));
        assert_eq!(page.flow().query(), "Bohemian Rhapsody");
        assert!(!page.flow().is_list_open());

        let grid = page.recommendations();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].name, "Don't Stop Me Now");
        assert_eq!(grid[0].artist, "Queen");
        assert_eq!(grid[0].album_cover_url, "https://img/cover.jpg");
    }

    #[tokio::test]
    async fn test_no_matches_keeps_dropdown_hidden() {
        let api = FakeMusic::default();
        let mut page = MusicPage::new();

        page.set_query("weight");
        assert!(page.search(&api).await);
        assert!(page.flow().is_list_open());

        page.set_query("thunderstorm");
        assert!(page.search(&api).await);
        assert_eq!(page.flow().candidates().data().map(Vec::len), Some(0));
        assert!(!page.flow().is_list_open());
        assert!(page.error().is_none());
    }
}
