mod support;

use crate::support::start_backend;
use calmverse::api::MusicApi;
use calmverse::flows::MusicPage;

#[tokio::test]
async fn test_search_then_choose_bohemian() {
    let client = start_backend().await;
    let mut page = MusicPage::new();

    page.set_query("bohem");
    assert!(page.search(&client).await);
    let matches = page.flow().candidates().data().cloned().unwrap_or_default();
    assert_eq!(matches, vec!["Bohemian Rhapsody".to_string()]);
    assert!(page.flow().is_list_open());

    assert!(page.choose(&client, "Bohemian Rhapsody".to_string()).await);
    assert_eq!(page.selected_song(), Some("Bohemian Rhapsody"));
    assert!(!page.flow().is_list_open());

    let recs = page.recommendations();
    assert_eq!(recs.len(), 5);
    assert!(recs.iter().all(|s| s.name != "Bohemian Rhapsody"));
    assert_eq!(recs[0].name, "Don't Stop Me Now");
    assert!(recs[0]
        .spotify_url()
        .is_some_and(|url| url.starts_with("https://open.spotify.com/track/")));
}

#[tokio::test]
async fn test_unknown_song_reports_not_found() {
    let client = start_backend().await;

    let err = client.recommend("Not A Real Song").await.unwrap_err();
    assert_eq!(err.detail(), Some("Song 'Not A Real Song' not found in database"));

    let mut page = MusicPage::new();
    assert!(page.choose(&client, "Not A Real Song".to_string()).await);
    assert!(page.recommendations().is_empty());
    assert_eq!(
        page.error(),
        Some("Failed to get recommendations. Please try again.")
    );
}

#[tokio::test]
async fn test_blank_query_does_not_search() {
    let client = start_backend().await;
    let mut page = MusicPage::new();

    page.set_query("   ");
    assert!(!page.search(&client).await);
    assert!(!page.flow().is_list_open());
}
