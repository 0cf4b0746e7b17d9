use super::seed::{SeedSong, SONGS};
use super::Failure;
use crate::api::{RecommendationResponse, Song, SongList};
use axum::{extract::Query, Json};
use serde::Deserialize;
use tracing::debug;

const RECOMMENDATION_COUNT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    song: String,
}

fn to_song(seed: &SeedSong) -> Song {
    Song {
        name: seed.title.to_string(),
        artist: seed.artist.to_string(),
        album_cover_url: seed.cover.to_string(),
        spotify_uri: Some(format!("spotify:track:{}", seed.track_id)),
    }
}

pub async fn list_songs() -> Json<SongList> {
    Json(SongList {
        songs: SONGS.iter().map(|s| s.title.to_string()).collect(),
    })
}

/// Songs sharing the input's mood come first, then the rest of the catalog
pub async fn recommend(Query(query): Query<RecommendQuery>) -> Result<Json<RecommendationResponse>, Failure> {
    let input = SONGS
        .iter()
        .find(|s| s.title == query.song)
        .ok_or_else(|| Failure::not_found(format!("Song '{}' not found in database", query.song)))?;

    let (same, other): (Vec<&SeedSong>, Vec<&SeedSong>) = SONGS
        .iter()
        .filter(|s| s.title != input.title)
        .partition(|s| s.mood == input.mood);

    let recommendations: Vec<Song> = same
        .into_iter()
        .chain(other)
        .take(RECOMMENDATION_COUNT)
        .map(to_song)
        .collect();
    debug!("Recommending {} song(s) for '{}'", recommendations.len(), input.title);

    Ok(Json(RecommendationResponse {
        input_song: input.title.to_string(),
        recommendations,
    }))
}
