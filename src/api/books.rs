use super::error::ApiError;
use super::models::Book;
use super::BookCatalog;
use crate::config::Config;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

const MAX_RESULTS: u32 = 20;

/// Google Books volumes search response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: u32,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: String,
    authors: Option<Vec<String>>,
    categories: Option<Vec<String>>,
    description: Option<String>,
    published_date: Option<String>,
    image_links: Option<ImageLinks>,
    info_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

impl From<Volume> for Book {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        // Catalog image links come back as plain http
        let thumbnail = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail))
            .map(|url| match url.strip_prefix("http://") {
                Some(rest) => format!("https://{}", rest),
                None => url,
            });

        Book {
            id: volume.id,
            title: info.title,
            authors: info.authors.unwrap_or_default(),
            categories: info.categories.unwrap_or_default(),
            thumbnail,
            info_link: info.info_link,
            description: info.description,
            published_date: info.published_date,
        }
    }
}

/// Catalog query used to find books related to `book`
pub fn related_query(book: &Book) -> String {
    if let Some(category) = book.categories.first() {
        format!("subject:\"{}\"", category)
    } else if let Some(author) = book.authors.first() {
        format!("inauthor:\"{}\"", author)
    } else {
        book.title.clone()
    }
}

#[derive(Clone)]
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.books_api_url.trim_end_matches('/').to_string(),
            api_key: config.books_api_key.clone(),
        })
    }

    async fn volumes(&self, query: &str) -> Result<Vec<Book>, ApiError> {
        let url = format!("{}/volumes", self.base_url);

        let max_results = MAX_RESULTS.to_string();
        let mut params = vec![("q", query), ("maxResults", max_results.as_str())];
        if let Some(key) = &self.api_key {
            params.push(("key", key.as_str()));
        }

        info!("📡 Books API: GET {} with q='{}'", url, query);

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        debug!("Response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            warn!("✗ Books API error: {}", status);
            return Err(ApiError::from_status(status, &body));
        }

        let volumes: VolumesResponse = serde_json::from_str(&body).map_err(|e| {
            error!("JSON parsing error for books query '{}': {}", query, e);
            error!("Raw response: {}", body);
            e
        })?;

        info!(
            "✓ Books search returned {} of {} total result(s)",
            volumes.items.len(),
            volumes.total_items
        );
        Ok(volumes.items.into_iter().map(Book::from).collect())
    }
}

#[async_trait::async_trait]
impl BookCatalog for GoogleBooksClient {
    async fn search(&self, query: &str) -> Result<Vec<Book>, ApiError> {
        self.volumes(query).await
    }

    async fn related(&self, book: &Book) -> Result<Vec<Book>, ApiError> {
        let query = related_query(book);
        let results = self.volumes(&query).await?;
        Ok(results.into_iter().filter(|b| b.id != book.id).collect())
    }
}

const MOCK_BOOKS: &[&str] = &[
    "The Alchemist",
    "Atomic Habits",
    "Thinking, Fast and Slow",
    "Man's Search for Meaning",
    "Mindfulness in Plain English",
    "The Power of Now",
    "Feeling Good",
    "The Body Keeps the Score",
];

const MOCK_RECOMMENDATIONS: &[(&str, &str)] = &[
    (
        "The Four Agreements",
        "https://m.media-amazon.com/images/I/91rR9gMuOVL.jpg",
    ),
    (
        "Daring Greatly",
        "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQeFawuG6tASf3518NjhM5sQyfnDIHnOOywcQ&s",
    ),
    (
        "The Untethered Soul",
        "https://m.media-amazon.com/images/I/51jaiwUXqVL._SL500_.jpg",
    ),
    (
        "The Happiness Trap",
        "https://m.media-amazon.com/images/I/71kCQXpBqlL._AC_UF1000,1000_QL80_.jpg",
    ),
];

/// Fixed fallback dataset for working without the catalog
#[derive(Clone, Default)]
pub struct MockBookCatalog;

impl MockBookCatalog {
    pub fn new() -> Self {
        Self
    }

    fn book(id: String, title: &str, thumbnail: Option<&str>) -> Book {
        Book {
            id,
            title: title.to_string(),
            authors: Vec::new(),
            categories: Vec::new(),
            thumbnail: thumbnail.map(str::to_string),
            info_link: None,
            description: None,
            published_date: None,
        }
    }
}

#[async_trait::async_trait]
impl BookCatalog for MockBookCatalog {
    async fn search(&self, query: &str) -> Result<Vec<Book>, ApiError> {
        let needle = query.trim().to_lowercase();
        Ok(MOCK_BOOKS
            .iter()
            .enumerate()
            .filter(|(_, title)| title.to_lowercase().contains(&needle))
            .map(|(i, title)| Self::book(format!("mock-{}", i + 1), title, None))
            .collect())
    }

    async fn related(&self, book: &Book) -> Result<Vec<Book>, ApiError> {
        Ok(MOCK_RECOMMENDATIONS
            .iter()
            .enumerate()
            .filter(|(_, (title, _))| *title != book.title)
            .map(|(i, (title, image))| Self::book(format!("mock-rec-{}", i + 1), title, Some(image)))
            .collect())
    }
}
