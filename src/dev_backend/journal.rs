use super::{seed, DevState, Failure};
use crate::api::{InsightCount, JournalDraft, JournalEntry, JournalInsights, JournalPrompt};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Utc};
use std::collections::HashMap;
use tracing::info;

const TOP_COUNT: usize = 5;
const WEEKS_SHOWN: usize = 10;

fn new_entry_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..24].to_string()
}

pub async fn list(State(state): State<DevState>) -> Json<Vec<JournalEntry>> {
    let store = state.store.lock().await;
    let mut entries = store.journal.clone();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Json(entries)
}

pub async fn create(
    State(state): State<DevState>,
    Json(draft): Json<JournalDraft>,
) -> (StatusCode, Json<JournalEntry>) {
    let entry = JournalEntry {
        id: new_entry_id(),
        title: draft.title,
        content: draft.content,
        mood: draft.mood,
        tags: draft.tags,
        created_at: Some(Utc::now()),
    };
    info!("✓ Created journal entry {} '{}'", entry.id, entry.title);

    state.store.lock().await.journal.push(entry.clone());
    (StatusCode::CREATED, Json(entry))
}

pub async fn fetch(
    State(state): State<DevState>,
    Path(entry_id): Path<String>,
) -> Result<Json<JournalEntry>, Failure> {
    let store = state.store.lock().await;
    store
        .journal
        .iter()
        .find(|e| e.id == entry_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::not_found("Journal entry not found"))
}

pub async fn update(
    State(state): State<DevState>,
    Path(entry_id): Path<String>,
    Json(draft): Json<JournalDraft>,
) -> Result<Json<JournalEntry>, Failure> {
    let mut store = state.store.lock().await;
    let entry = store
        .journal
        .iter_mut()
        .find(|e| e.id == entry_id)
        .ok_or_else(|| Failure::not_found("Journal entry not found"))?;

    entry.title = draft.title;
    entry.content = draft.content;
    entry.mood = draft.mood;
    entry.tags = draft.tags;
    Ok(Json(entry.clone()))
}

pub async fn remove(
    State(state): State<DevState>,
    Path(entry_id): Path<String>,
) -> Result<StatusCode, Failure> {
    let mut store = state.store.lock().await;
    let before = store.journal.len();
    store.journal.retain(|e| e.id != entry_id);
    if store.journal.len() == before {
        return Err(Failure::not_found("Journal entry not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn prompts() -> Json<Vec<JournalPrompt>> {
    Json(seed::prompts())
}

/// Count occurrences, most frequent first, ties by label
fn ranked<I: IntoIterator<Item = String>>(labels: I, limit: usize) -> Vec<InsightCount> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    let mut ranked: Vec<(String, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(label, count)| InsightCount {
            label: serde_json::Value::String(label),
            count,
        })
        .collect()
}

pub async fn insights(State(state): State<DevState>) -> Json<JournalInsights> {
    let store = state.store.lock().await;
    let entries = &store.journal;
    if entries.is_empty() {
        return Json(JournalInsights {
            message: "No journal entries found to generate insights".to_string(),
            ..JournalInsights::default()
        });
    }

    let moods = entries.iter().filter_map(|e| e.mood.clone());
    let tags = entries.iter().flat_map(|e| e.tags.iter().cloned());
    let weeks = entries.iter().filter_map(|e| e.created_at).map(|at| {
        let week = at.iso_week();
        format!("{}-W{:02}", week.year(), week.week())
    });

    let mut entries_by_week = ranked(weeks, usize::MAX);
    entries_by_week.sort_by(|a, b| b.label_text().cmp(&a.label_text()));
    entries_by_week.truncate(WEEKS_SHOWN);

    Json(JournalInsights {
        total_entries: entries.len() as u32,
        top_moods: ranked(moods, TOP_COUNT),
        top_tags: ranked(tags, TOP_COUNT),
        entries_by_week,
        message: "Continue journaling regularly to see more detailed insights!".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_orders_by_count_then_label() {
        let labels = ["calm", "anxious", "calm", "hopeful", "anxious", "calm"]
            .into_iter()
            .map(String::from);
        let ranked = ranked(labels, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].label_text(), "calm");
        assert_eq!(ranked[0].count, 3);
        assert_eq!(ranked[1].label_text(), "anxious");
    }
}
