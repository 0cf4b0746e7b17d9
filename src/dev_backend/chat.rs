use super::seed::{crisis_resources, CRISIS_INDICATORS, TOPIC_RESOURCES};
use super::{DevState, Failure};
use crate::api::{ChatPayload, ChatReply, ChatResource};
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info};

const CRISIS_RESPONSE: &str = "I've detected some concerning language in your message. \
If you're in immediate danger or having thoughts of harming yourself, \
please contact emergency services (911/988 in the US) or a crisis helpline:\n\n\
- National Suicide Prevention Lifeline: 988 or 1-800-273-8255\n\
- Crisis Text Line: Text HOME to 741741\n\n\
Would you like me to provide information about mental health resources available through CalmVerse?";

pub fn is_crisis(message: &str) -> bool {
    let lowered = message.to_lowercase();
    CRISIS_INDICATORS.iter().any(|i| lowered.contains(i))
}

fn topic_resources(message: &str) -> Vec<ChatResource> {
    let lowered = message.to_lowercase();
    TOPIC_RESOURCES
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword))
        .flat_map(|(_, resources)| resources.iter())
        .map(|(name, kind, url)| ChatResource {
            name: name.to_string(),
            kind: Some(kind.to_string()),
            url: Some(url.to_string()),
            contact: None,
        })
        .collect()
}

/// Keyword responder: crisis language wins, then topic resources, then general advice
pub fn reply_for(message: &str, session_id: String) -> ChatReply {
    if is_crisis(message) {
        return ChatReply {
            response: CRISIS_RESPONSE.to_string(),
            session_id,
            resources: Some(crisis_resources()),
            emergency_contact: true,
        };
    }

    let resources = topic_resources(message);
    let mut response = "Thank you for sharing that with me. Some strategies that often help: \
practice mindfulness, maintain regular physical activity, protect your sleep, \
connect with supportive people, and consider journaling your thoughts."
        .to_string();
    if !resources.is_empty() {
        response.push_str("\n\nBased on what you mentioned, you might find these resources helpful:");
        for resource in &resources {
            response.push_str(&format!(
                "\n- {} ({})",
                resource.name,
                resource.kind.as_deref().unwrap_or("resource")
            ));
        }
    }

    ChatReply {
        response,
        session_id,
        resources: (!resources.is_empty()).then_some(resources),
        emergency_contact: false,
    }
}

pub async fn respond(State(state): State<DevState>, Json(payload): Json<ChatPayload>) -> Json<ChatReply> {
    let session_id = payload
        .session_id
        .clone()
        .unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4().simple()));

    let mut store = state.store.lock().await;
    let history = store.sessions.entry(session_id.clone()).or_default();
    history.push(payload.message.clone());
    debug!(
        "Session {} for {} has {} message(s)",
        session_id,
        payload.user_id,
        history.len()
    );

    Json(reply_for(&payload.message, session_id))
}

pub async fn end_session(
    State(state): State<DevState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, Failure> {
    let mut store = state.store.lock().await;
    if store.sessions.remove(&session_id).is_none() {
        return Err(Failure::not_found(format!(
            "Session with ID {} not found",
            session_id
        )));
    }

    info!("✓ Ended chat session {}", session_id);
    Ok(Json(serde_json::json!({
        "message": format!("Session {} ended successfully", session_id)
    })))
}
