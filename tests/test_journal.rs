mod support;

use crate::support::start_backend;
use calmverse::api::{JournalApi, JournalDraft};
use calmverse::flows::{JournalFormError, JournalPage};
use reqwest::StatusCode;

#[tokio::test]
async fn test_empty_journal_loads_prompts_and_placeholder_insights() {
    let client = start_backend().await;
    let mut page = JournalPage::new();

    assert!(page.refresh(&client).await);
    assert!(page.entries().is_empty());
    assert!(!page.prompts().is_empty());
    let insights = page.insights().unwrap();
    assert_eq!(insights.total_entries, 0);
    assert_eq!(insights.message, "No journal entries found to generate insights");
}

#[tokio::test]
async fn test_create_edit_delete_entry() {
    let client = start_backend().await;
    let mut page = JournalPage::new();
    page.refresh(&client).await;

    page.toggle_form();
    assert_eq!(page.submit(&client).await, Err(JournalFormError::MissingTitle));

    page.form_mut().title = "Morning".to_string();
    page.form_mut().content = "Felt rested and slow.".to_string();
    page.form_mut().mood = "calm".to_string();
    page.form_mut().tags = " sleep, , gratitude ".to_string();
    assert_eq!(page.submit(&client).await, Ok(true));
    assert!(!page.is_form_open());

    assert_eq!(page.entries().len(), 1);
    let entry = page.entries()[0].clone();
    assert_eq!(entry.title, "Morning");
    assert_eq!(entry.mood.as_deref(), Some("calm"));
    assert_eq!(entry.tags, vec!["sleep".to_string(), "gratitude".to_string()]);

    let insights = page.insights().unwrap();
    assert_eq!(insights.total_entries, 1);
    assert_eq!(insights.top_moods[0].label_text(), "calm");
    assert_eq!(insights.entries_by_week.len(), 1);

    // Editing keeps the id and replaces the fields
    page.edit(&entry);
    assert_eq!(page.form().tags, "sleep, gratitude");
    page.form_mut().content = "Felt rested.".to_string();
    page.form_mut().mood = String::new();
    assert_eq!(page.submit(&client).await, Ok(true));

    let stored = client.entries().await.unwrap().remove(0);
    assert_eq!(stored.id, entry.id);
    assert_eq!(stored.content, "Felt rested.");
    assert_eq!(stored.mood, None);

    page.request_delete(entry.id.clone());
    assert!(page.delete_confirmed(&client).await);
    assert!(page.entries().is_empty());

    let url = format!("{}/journal/entries/{}", client.base_url(), entry.id);
    let response = reqwest::get(&url).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Journal entry not found");
}

#[tokio::test]
async fn test_entries_listed_newest_first() {
    let client = start_backend().await;

    for title in ["First", "Second"] {
        client
            .create_entry(&JournalDraft {
                title: title.to_string(),
                content: "text".to_string(),
                mood: None,
                tags: Vec::new(),
            })
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let titles: Vec<String> = client
        .entries()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Second".to_string(), "First".to_string()]);
}

#[tokio::test]
async fn test_failed_delete_keeps_entry_and_reports() {
    let client = start_backend().await;
    let mut page = JournalPage::new();

    page.request_delete("missing-entry");
    assert!(!page.delete_confirmed(&client).await);
    assert_eq!(
        page.error(),
        Some("Failed to delete journal entry. Please try again.")
    );
    page.dismiss_error();
    assert_eq!(page.error(), None);
}
