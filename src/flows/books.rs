use super::search_select::{Candidate, DetailRequest, FailureMessages, SearchRequest, SearchSelect};
use crate::api::{ApiError, Book, BookCatalog};

const MESSAGES: FailureMessages = FailureMessages {
    search: "Failed to load books. Please try again later.",
    detail: "Failed to get recommendations. Please try again later.",
};

impl Candidate for Book {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Book recommendation page state
#[derive(Debug, Clone)]
pub struct BooksPage {
    flow: SearchSelect<Book, Vec<Book>>,
}

impl Default for BooksPage {
    fn default() -> Self {
        Self::new()
    }
}

impl BooksPage {
    pub fn new() -> Self {
        Self {
            flow: SearchSelect::new(MESSAGES),
        }
    }

    pub fn flow(&self) -> &SearchSelect<Book, Vec<Book>> {
        &self.flow
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.flow.set_query(query);
    }

    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        self.flow.begin_search()
    }

    pub fn finish_search(&mut self, request: &SearchRequest, result: Result<Vec<Book>, ApiError>) -> bool {
        self.flow.finish_search(request, result)
    }

    pub fn select(&mut self, book: Book) -> DetailRequest<String> {
        self.flow.select(book)
    }

    pub fn finish_recommendations(
        &mut self,
        request: &DetailRequest<String>,
        result: Result<Vec<Book>, ApiError>,
    ) -> bool {
        self.flow.finish_detail(request, result)
    }

    pub fn selected(&self) -> Option<&Book> {
        self.flow.selection()
    }

    pub fn recommendations(&self) -> &[Book] {
        self.flow.detail().data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Selection made, fetch finished and came back empty
    pub fn has_no_recommendations(&self) -> bool {
        self.flow.selection().is_some()
            && self.flow.detail().is_ready()
            && self.recommendations().is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.flow
            .detail()
            .error()
            .or_else(|| self.flow.candidates().error())
    }

    pub fn dismiss_errors(&mut self) {
        self.flow.dismiss_errors();
    }

    pub async fn search(&mut self, catalog: &dyn BookCatalog) -> bool {
        let Some(request) = self.begin_search() else {
            return false;
        };
        let result = catalog.search(&request.query).await;
        self.finish_search(&request, result)
    }

    pub async fn choose(&mut self, catalog: &dyn BookCatalog, book: Book) -> bool {
        let request = self.select(book.clone());
        let result = catalog.related(&book).await;
        self.finish_recommendations(&request, result)
    }
}
