use crate::api::{report_failure, ApiError, JournalApi, JournalDraft, JournalEntry, JournalInsights, JournalPrompt};
use crate::resource::{Resource, Ticket, TicketCounter};
use thiserror::Error;
use tracing::{debug, info};

/// Characters of content shown per entry in the list
pub const PREVIEW_CHARS: usize = 200;

const LOAD_FAILED: &str = "Failed to load journal data. Please try again later.";
const SAVE_FAILED: &str = "Failed to save journal entry. Please try again.";
const DELETE_FAILED: &str = "Failed to delete journal entry. Please try again.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JournalFormError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Content is required")]
    MissingContent,
    #[error("Entry is already being saved")]
    InFlight,
}

/// Split comma-separated tag text, trimming and dropping empty pieces
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Editable form fields, kept as the user typed them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalForm {
    pub title: String,
    pub content: String,
    pub mood: String,
    pub tags: String,
    pub editing: Option<String>,
}

impl JournalForm {
    pub fn from_entry(entry: &JournalEntry) -> Self {
        Self {
            title: entry.title.clone(),
            content: entry.content.clone(),
            mood: entry.mood.clone().unwrap_or_default(),
            tags: entry.tags.join(", "),
            editing: Some(entry.id.clone()),
        }
    }

    pub fn validate(&self) -> Result<JournalDraft, JournalFormError> {
        if self.title.trim().is_empty() {
            return Err(JournalFormError::MissingTitle);
        }
        if self.content.trim().is_empty() {
            return Err(JournalFormError::MissingContent);
        }

        let mood = self.mood.trim();
        Ok(JournalDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            mood: (!mood.is_empty()).then(|| mood.to_string()),
            tags: normalize_tags(&self.tags),
        })
    }
}

/// Entries, prompts and insights fetched together
#[derive(Debug, Clone, PartialEq)]
pub struct JournalSnapshot {
    pub entries: Vec<JournalEntry>,
    pub prompts: Vec<JournalPrompt>,
    pub insights: JournalInsights,
}

/// Issue the three reads concurrently; any failure fails the whole refresh
pub async fn fetch_snapshot(api: &dyn JournalApi) -> Result<JournalSnapshot, ApiError> {
    let (entries, prompts, insights) =
        futures::try_join!(api.entries(), api.prompts(), api.insights())?;
    info!(
        "✓ Loaded {} journal entries, {} prompts",
        entries.len(),
        prompts.len()
    );
    Ok(JournalSnapshot {
        entries,
        prompts,
        insights,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub target: SubmitTarget,
    pub draft: JournalDraft,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshRequest {
    pub ticket: Ticket,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    pub id: String,
}

/// Journal page state
#[derive(Debug, Clone, Default)]
pub struct JournalPage {
    snapshot: Resource<JournalSnapshot>,
    tickets: TicketCounter,
    form: JournalForm,
    form_open: bool,
    saving: bool,
    pending_delete: Option<String>,
    deleting: bool,
    notice: Option<String>,
}

impl JournalPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &Resource<JournalSnapshot> {
        &self.snapshot
    }

    pub fn entries(&self) -> &[JournalEntry] {
        self.snapshot
            .data()
            .map(|s| s.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn prompts(&self) -> &[JournalPrompt] {
        self.snapshot
            .data()
            .map(|s| s.prompts.as_slice())
            .unwrap_or(&[])
    }

    pub fn insights(&self) -> Option<&JournalInsights> {
        self.snapshot.data().map(|s| &s.insights)
    }

    pub fn form(&self) -> &JournalForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut JournalForm {
        &mut self.form
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Load failure or the last save/delete failure
    pub fn error(&self) -> Option<&str> {
        self.notice.as_deref().or_else(|| self.snapshot.error())
    }

    pub fn dismiss_error(&mut self) {
        self.notice = None;
        self.snapshot.dismiss_error();
    }

    /// Closing the form discards whatever was typed
    pub fn toggle_form(&mut self) {
        if self.form_open {
            self.form = JournalForm::default();
        }
        self.form_open = !self.form_open;
    }

    pub fn edit(&mut self, entry: &JournalEntry) {
        self.form = JournalForm::from_entry(entry);
        self.form_open = true;
    }

    pub fn apply_prompt(&mut self, prompt: &str) {
        if self.form.content.is_empty() {
            self.form.content = prompt.to_string();
        } else {
            self.form.content = format!("{}\n\n{}", self.form.content, prompt);
        }
        self.form_open = true;
    }

    /// Reload entries, prompts and insights; refused while a load is in flight
    pub fn begin_refresh(&mut self) -> Option<RefreshRequest> {
        if self.snapshot.is_loading() {
            debug!("Journal refresh already in flight");
            return None;
        }
        Some(self.begin_reload())
    }

    /// Reload after a write. Supersedes any read still in flight.
    pub fn begin_reload(&mut self) -> RefreshRequest {
        self.snapshot.start();
        RefreshRequest {
            ticket: self.tickets.issue(),
        }
    }

    pub fn finish_refresh(&mut self, request: &RefreshRequest, result: Result<JournalSnapshot, ApiError>) -> bool {
        if !self.tickets.is_current(request.ticket) {
            debug!("Discarding stale journal refresh");
            return false;
        }

        match result {
            Ok(snapshot) => self.snapshot.resolve(snapshot),
            Err(e) => {
                report_failure("Loading journal", &e);
                self.snapshot.fail(LOAD_FAILED);
            }
        }
        true
    }

    /// Validate the form; create or update depending on whether an entry is being edited
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, JournalFormError> {
        if self.saving {
            return Err(JournalFormError::InFlight);
        }
        let draft = self.form.validate()?;
        let target = match &self.form.editing {
            Some(id) => SubmitTarget::Update(id.clone()),
            None => SubmitTarget::Create,
        };

        self.saving = true;
        self.notice = None;
        Ok(SubmitRequest { target, draft })
    }

    /// Returns true when the entry was saved and a refresh should follow
    pub fn finish_submit(&mut self, result: Result<JournalEntry, ApiError>) -> bool {
        self.saving = false;
        match result {
            Ok(entry) => {
                info!("✓ Saved journal entry '{}'", entry.title);
                self.form = JournalForm::default();
                self.form_open = false;
                true
            }
            Err(e) => {
                report_failure("Saving journal entry", &e);
                self.notice = Some(SAVE_FAILED.to_string());
                false
            }
        }
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<DeleteRequest> {
        if self.deleting {
            return None;
        }
        let id = self.pending_delete.take()?;
        self.deleting = true;
        Some(DeleteRequest { id })
    }

    /// Returns true when the entry was deleted and a refresh should follow
    pub fn finish_delete(&mut self, request: &DeleteRequest, result: Result<(), ApiError>) -> bool {
        self.deleting = false;
        match result {
            Ok(()) => {
                if let Some(snapshot) = self.snapshot.data_mut() {
                    snapshot.entries.retain(|e| e.id != request.id);
                }
                true
            }
            Err(e) => {
                report_failure("Deleting journal entry", &e);
                self.notice = Some(DELETE_FAILED.to_string());
                false
            }
        }
    }

    pub async fn refresh(&mut self, api: &dyn JournalApi) -> bool {
        let Some(request) = self.begin_refresh() else {
            return false;
        };
        self.load_snapshot(api, request).await
    }

    async fn load_snapshot(&mut self, api: &dyn JournalApi, request: RefreshRequest) -> bool {
        let result = fetch_snapshot(api).await;
        self.finish_refresh(&request, result)
    }

    /// Save the form and refresh on success
    pub async fn submit(&mut self, api: &dyn JournalApi) -> Result<bool, JournalFormError> {
        let request = self.begin_submit()?;
        let result = match &request.target {
            SubmitTarget::Create => api.create_entry(&request.draft).await,
            SubmitTarget::Update(id) => api.update_entry(id, &request.draft).await,
        };
        if !self.finish_submit(result) {
            return Ok(false);
        }
        let reload = self.begin_reload();
        self.load_snapshot(api, reload).await;
        Ok(true)
    }

    pub async fn delete_confirmed(&mut self, api: &dyn JournalApi) -> bool {
        let Some(request) = self.confirm_delete() else {
            return false;
        };
        let result = api.delete_entry(&request.id).await;
        if !self.finish_delete(&request, result) {
            return false;
        }
        let reload = self.begin_reload();
        self.load_snapshot(api, reload).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeJournal {
        entries: Mutex<Vec<JournalEntry>>,
        created: Mutex<Vec<JournalDraft>>,
        updated: Mutex<Vec<(String, JournalDraft)>>,
        fail_prompts: bool,
    }

    fn entry(id: &str, draft: &JournalDraft) -> JournalEntry {
        JournalEntry {
            id: id.to_string(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            mood: draft.mood.clone(),
            tags: draft.tags.clone(),
            created_at: None,
        }
    }

    #[async_trait::async_trait]
    impl JournalApi for FakeJournal {
        async fn entries(&self) -> Result<Vec<JournalEntry>, ApiError> {
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn create_entry(&self, draft: &JournalDraft) -> Result<JournalEntry, ApiError> {
            self.created.lock().unwrap().push(draft.clone());
            let mut entries = self.entries.lock().unwrap();
            let created = entry(&format!("e{}", entries.len() + 1), draft);
            entries.push(created.clone());
            Ok(created)
        }

        async fn update_entry(&self, id: &str, draft: &JournalDraft) -> Result<JournalEntry, ApiError> {
            self.updated.lock().unwrap().push((id.to_string(), draft.clone()));
            Ok(entry(id, draft))
        }

        async fn delete_entry(&self, id: &str) -> Result<(), ApiError> {
            self.entries.lock().unwrap().retain(|e| e.id != id);
            Ok(())
        }

        async fn prompts(&self) -> Result<Vec<JournalPrompt>, ApiError> {
            if self.fail_prompts {
                return Err(ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, ""));
            }
            Ok(vec![JournalPrompt {
                prompt: "What was the most meaningful part of your day?".to_string(),
                category: "reflection".to_string(),
            }])
        }

        async fn insights(&self) -> Result<JournalInsights, ApiError> {
            Ok(JournalInsights::default())
        }
    }

    #[test]
    fn test_normalize_tags() {
        assert_eq!(
            normalize_tags("mindfulness, gratitude"),
            vec!["mindfulness".to_string(), "gratitude".to_string()]
        );
        assert_eq!(normalize_tags(" a ,, b ,"), vec!["a".to_string(), "b".to_string()]);
        assert!(normalize_tags("").is_empty());
    }

    #[test]
    fn test_required_fields_checked_locally() {
        let mut page = JournalPage::new();
        page.form_mut().content = "Some thoughts".to_string();
        assert_eq!(page.begin_submit().unwrap_err(), JournalFormError::MissingTitle);

        page.form_mut().title = "Evening".to_string();
        page.form_mut().content = "   ".to_string();
        assert_eq!(page.begin_submit().unwrap_err(), JournalFormError::MissingContent);
        assert!(!page.is_saving());
    }

    #[tokio::test]
    async fn test_morning_entry_posts_normalized_tags() {
        let api = FakeJournal::default();
        let mut page = JournalPage::new();
        page.toggle_form();
        {
            let form = page.form_mut();
            form.title = "Morning".to_string();
            form.content = "Felt calm".to_string();
            form.mood = "calm".to_string();
            form.tags = "mindfulness, gratitude".to_string();
        }

        assert_eq!(page.submit(&api).await, Ok(true));

        let sent = api.created.lock().unwrap()[0].clone();
        assert_eq!(sent.title, "Morning");
        assert_eq!(sent.content, "Felt calm");
        assert_eq!(sent.mood.as_deref(), Some("calm"));
        assert_eq!(sent.tags, vec!["mindfulness".to_string(), "gratitude".to_string()]);

        assert!(!page.is_form_open());
        assert_eq!(page.form(), &JournalForm::default());
        assert_eq!(page.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_editing_submits_update() {
        let api = FakeJournal::default();
        let mut page = JournalPage::new();
        let existing = JournalEntry {
            id: "abc".to_string(),
            title: "Old".to_string(),
            content: "Old content".to_string(),
            mood: None,
            tags: vec!["sleep".to_string(), "rest".to_string()],
            created_at: None,
        };

        page.edit(&existing);
        assert!(page.is_form_open());
        assert_eq!(page.form().tags, "sleep, rest");

        page.form_mut().title = "New".to_string();
        page.submit(&api).await.unwrap();

        assert!(api.created.lock().unwrap().is_empty());
        let updated = api.updated.lock().unwrap();
        assert_eq!(updated[0].0, "abc");
        assert_eq!(updated[0].1.title, "New");
        assert_eq!(updated[0].1.mood, None);
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let api = FakeJournal::default();
        let mut page = JournalPage::new();
        page.form_mut().title = "t".to_string();
        page.form_mut().content = "c".to_string();
        page.submit(&api).await.unwrap();
        let id = page.entries()[0].id.clone();

        page.request_delete(id.clone());
        page.cancel_delete();
        assert!(!page.delete_confirmed(&api).await);
        assert_eq!(page.entries().len(), 1);

        page.request_delete(id);
        assert!(page.delete_confirmed(&api).await);
        assert!(page.entries().is_empty());
    }

    #[tokio::test]
    async fn test_partial_failure_fails_refresh() {
        let api = FakeJournal {
            fail_prompts: true,
            ..Default::default()
        };
        let mut page = JournalPage::new();
        page.refresh(&api).await;
        assert_eq!(page.error(), Some(LOAD_FAILED));
    }

    #[test]
    fn test_prompt_appends_after_blank_line() {
        let mut page = JournalPage::new();
        page.apply_prompt("First prompt");
        assert!(page.is_form_open());
        assert_eq!(page.form().content, "First prompt");

        page.apply_prompt("Second prompt");
        assert_eq!(page.form().content, "First prompt\n\nSecond prompt");
    }

    #[test]
    fn test_closing_form_resets_it() {
        let mut page = JournalPage::new();
        page.toggle_form();
        page.form_mut().title = "Draft".to_string();
        page.toggle_form();
        assert!(!page.is_form_open());
        assert!(page.form().title.is_empty());
    }

    fn empty_snapshot() -> JournalSnapshot {
        JournalSnapshot {
            entries: Vec::new(),
            prompts: Vec::new(),
            insights: JournalInsights::default(),
        }
    }

    #[test]
    fn test_refresh_refused_while_loading() {
        let mut page = JournalPage::new();
        let first = page.begin_refresh().unwrap();
        assert!(page.begin_refresh().is_none());

        assert!(page.finish_refresh(&first, Ok(empty_snapshot())));
        assert!(page.begin_refresh().is_some());
    }

    #[test]
    fn test_reload_after_write_supersedes_read_in_flight() {
        let mut page = JournalPage::new();
        let read = page.begin_refresh().unwrap();
        let reload = page.begin_reload();

        assert!(page.finish_refresh(&reload, Ok(empty_snapshot())));
        let late = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(!page.finish_refresh(&read, Err(late)));
        assert!(page.error().is_none());
    }
}
