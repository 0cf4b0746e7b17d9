use crate::api::{report_failure, ApiError};
use crate::resource::{Resource, Ticket, TicketCounter};
use std::fmt::Debug;
use tracing::debug;

/// Something that can be picked from a result list
pub trait Candidate: Clone {
    type Key: Clone + PartialEq + Debug;

    fn key(&self) -> Self::Key;
}

impl Candidate for String {
    type Key = String;

    fn key(&self) -> String {
        self.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub query: String,
}

/// Dependent fetch scoped to one selected candidate
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRequest<K> {
    pub ticket: Ticket,
    pub key: K,
}

/// User-facing strings for the two channels
#[derive(Debug, Clone, Copy)]
pub struct FailureMessages {
    pub search: &'static str,
    pub detail: &'static str,
}

/// Query → candidate list → selection → dependent list
#[derive(Debug, Clone)]
pub struct SearchSelect<C: Candidate, D> {
    query: String,
    candidates: Resource<Vec<C>>,
    list_open: bool,
    selection: Option<C>,
    detail: Resource<D>,
    search_tickets: TicketCounter,
    detail_tickets: TicketCounter,
    messages: FailureMessages,
}

impl<C: Candidate, D> SearchSelect<C, D> {
    pub fn new(messages: FailureMessages) -> Self {
        Self {
            query: String::new(),
            candidates: Resource::Idle,
            list_open: false,
            selection: None,
            detail: Resource::Idle,
            search_tickets: TicketCounter::default(),
            detail_tickets: TicketCounter::default(),
            messages,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn candidates(&self) -> &Resource<Vec<C>> {
        &self.candidates
    }

    pub fn is_list_open(&self) -> bool {
        self.list_open
    }

    pub fn close_list(&mut self) {
        self.list_open = false;
    }

    pub fn selection(&self) -> Option<&C> {
        self.selection.as_ref()
    }

    pub fn detail(&self) -> &Resource<D> {
        &self.detail
    }

    pub fn detail_mut(&mut self) -> &mut Resource<D> {
        &mut self.detail
    }

    pub fn is_searching(&self) -> bool {
        self.candidates.is_loading()
    }

    /// Start a search for the current query. Blank queries never issue a request.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        let query = self.query.trim();
        if query.is_empty() {
            debug!("Ignoring blank search query");
            return None;
        }
        let query = query.to_string();
        self.begin_lookup(query)
    }

    /// Start a lookup with an arbitrary (possibly empty) query string
    pub fn begin_lookup(&mut self, query: String) -> Option<SearchRequest> {
        if self.candidates.is_loading() {
            debug!("Search already in flight, ignoring '{}'", query);
            return None;
        }

        self.candidates.start();
        Some(SearchRequest {
            ticket: self.search_tickets.issue(),
            query,
        })
    }

    /// Apply a search result. Returns false when the result was stale.
    pub fn finish_search(&mut self, request: &SearchRequest, result: Result<Vec<C>, ApiError>) -> bool {
        if !self.search_tickets.is_current(request.ticket) {
            debug!("Discarding stale search result for '{}'", request.query);
            return false;
        }

        match result {
            Ok(items) => {
                self.candidates.resolve(items);
                self.list_open = true;
            }
            Err(e) => {
                report_failure("Search", &e);
                self.candidates.fail(self.messages.search);
            }
        }
        true
    }

    /// Select a candidate. The dependent list is cleared before the request is issued.
    pub fn select(&mut self, candidate: C) -> DetailRequest<C::Key> {
        let key = candidate.key();
        self.detail.clear();
        self.selection = Some(candidate);
        self.list_open = false;
        self.detail.start();

        DetailRequest {
            ticket: self.detail_tickets.issue(),
            key,
        }
    }

    /// Re-issue the dependent fetch for the current selection
    pub fn reload_detail(&mut self) -> Option<DetailRequest<C::Key>> {
        let key = self.selection.as_ref()?.key();
        self.detail.start();
        Some(DetailRequest {
            ticket: self.detail_tickets.issue(),
            key,
        })
    }

    /// Apply a dependent result. Only the latest selection's response is applied.
    pub fn finish_detail(
        &mut self,
        request: &DetailRequest<C::Key>,
        result: Result<D, ApiError>,
    ) -> bool {
        let matches_selection = self
            .selection
            .as_ref()
            .map(|s| s.key() == request.key)
            .unwrap_or(false);

        if !self.detail_tickets.is_current(request.ticket) || !matches_selection {
            debug!("Discarding stale detail result for {:?}", request.key);
            return false;
        }

        match result {
            Ok(value) => self.detail.resolve(value),
            Err(e) => {
                report_failure("Detail fetch", &e);
                self.detail.fail(self.messages.detail);
            }
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.detail.clear();
        self.detail_tickets.invalidate();
    }

    pub fn dismiss_errors(&mut self) {
        self.candidates.dismiss_error();
        self.detail.dismiss_error();
    }
}
