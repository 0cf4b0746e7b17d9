//! In-memory stand-in for the CalmVerse HTTP backend.
//!
//! Serves the same routes the desktop client talks to, with seeded songs,
//! therapists and generated availability. Used by the integration tests and
//! the `calmverse-dev-backend` binary.

mod chat;
mod journal;
mod music;
pub mod seed;
mod therapists;

use crate::api::{Appointment, JournalEntry, Therapist, TimeSlot};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

/// Days of availability generated per therapist
const AVAILABILITY_DAYS: i64 = 14;

#[derive(Debug, Clone)]
struct TherapistRecord {
    profile: Therapist,
    slots: Vec<TimeSlot>,
}

#[derive(Debug, Default)]
struct Store {
    therapists: Vec<TherapistRecord>,
    appointments: Vec<Appointment>,
    journal: Vec<JournalEntry>,
    sessions: HashMap<String, Vec<String>>,
}

/// Shared backend state
#[derive(Clone, Default)]
pub struct DevState {
    store: Arc<Mutex<Store>>,
}

impl DevState {
    /// State with the seeded therapists and fresh availability
    pub fn seeded() -> Self {
        let therapists = seed::therapists()
            .into_iter()
            .map(|profile| TherapistRecord {
                profile,
                slots: seed::availability(AVAILABILITY_DAYS),
            })
            .collect();

        Self {
            store: Arc::new(Mutex::new(Store {
                therapists,
                ..Store::default()
            })),
        }
    }
}

/// FastAPI-style `{"detail": ...}` error response
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    detail: String,
}

impl Failure {
    fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        warn!("✗ {}: {}", self.status, self.detail);
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}

/// Create the backend router
pub fn create_router(state: DevState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/songs", get(music::list_songs))
        .route("/recommend", get(music::recommend))
        .route("/therapists/", get(therapists::list))
        .route("/therapists/specializations", get(therapists::specializations))
        .route("/therapists/appointments", post(therapists::book))
        .route(
            "/therapists/appointments/user/:user_id",
            get(therapists::user_appointments),
        )
        .route("/therapists/appointments/:appointment_id", delete(therapists::cancel))
        .route("/therapists/:therapist_id", get(therapists::detail))
        .route("/journal/entries", get(journal::list).post(journal::create))
        .route(
            "/journal/entries/:entry_id",
            get(journal::fetch).put(journal::update).delete(journal::remove),
        )
        .route("/journal/prompts", get(journal::prompts))
        .route("/journal/insights", get(journal::insights))
        .route("/mental-health/chat", post(chat::respond))
        .route("/mental-health/chat/:session_id", delete(chat::end_session))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Welcome to CalmVerse API",
        "endpoints": {
            "music": "/songs, /recommend",
            "therapists": "/therapists",
            "journal": "/journal",
            "chat": "/mental-health/chat"
        }
    }))
}

/// Serve until the process exits
pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("🌿 Dev backend listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(DevState::seeded())).await
}

/// Start a seeded backend in the background, returning the bound address
pub async fn spawn(addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    let app = create_router(DevState::seeded());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Dev backend stopped: {}", e);
        }
    });

    info!("🌿 Dev backend started on http://{}", local);
    Ok(local)
}
