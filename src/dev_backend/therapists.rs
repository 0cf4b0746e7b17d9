use super::{DevState, Failure};
use crate::api::{
    Appointment, AppointmentStatus, NewAppointment, Specializations, Therapist, TherapistDetail,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    specialization: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    status: Option<String>,
}

fn any_contains(values: &[String], needle: &Option<String>) -> bool {
    match needle.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(needle) => {
            let needle = needle.to_lowercase();
            values.iter().any(|v| v.to_lowercase().contains(&needle))
        }
        None => true,
    }
}

pub async fn list(State(state): State<DevState>, Query(query): Query<ListQuery>) -> Json<Vec<Therapist>> {
    let store = state.store.lock().await;
    let therapists = store
        .therapists
        .iter()
        .map(|record| &record.profile)
        .filter(|t| any_contains(&t.specializations, &query.specialization))
        .filter(|t| any_contains(&t.languages, &query.language))
        .cloned()
        .collect();
    Json(therapists)
}

pub async fn specializations(State(state): State<DevState>) -> Json<Specializations> {
    let store = state.store.lock().await;
    let distinct: BTreeSet<String> = store
        .therapists
        .iter()
        .flat_map(|record| record.profile.specializations.iter().cloned())
        .collect();
    Json(Specializations {
        specializations: distinct.into_iter().collect(),
    })
}

/// Profile plus future slots that are still open
pub async fn detail(
    State(state): State<DevState>,
    Path(therapist_id): Path<String>,
) -> Result<Json<TherapistDetail>, Failure> {
    let store = state.store.lock().await;
    let record = store
        .therapists
        .iter()
        .find(|record| record.profile.id == therapist_id)
        .ok_or_else(|| Failure::not_found("Therapist not found"))?;

    let now = Utc::now();
    Ok(Json(TherapistDetail {
        therapist: record.profile.clone(),
        available_slots: record
            .slots
            .iter()
            .filter(|slot| slot.start_time > now && !slot.is_booked)
            .cloned()
            .collect(),
    }))
}

pub async fn user_appointments(
    State(state): State<DevState>,
    Path(user_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Json<Vec<Appointment>> {
    let store = state.store.lock().await;
    let mut appointments: Vec<Appointment> = store
        .appointments
        .iter()
        .filter(|a| a.user_id == user_id)
        .filter(|a| query.status.as_deref().map_or(true, |s| a.status.as_str() == s))
        .cloned()
        .collect();
    appointments.sort_by_key(|a| a.start_time);
    Json(appointments)
}

/// Book an open slot; the slot must match exactly and be unbooked
pub async fn book(
    State(state): State<DevState>,
    Json(request): Json<NewAppointment>,
) -> Result<Json<Appointment>, Failure> {
    let mut store = state.store.lock().await;
    let record = store
        .therapists
        .iter_mut()
        .find(|record| record.profile.id == request.therapist_id)
        .ok_or_else(|| Failure::not_found("Therapist not found"))?;

    let slot = record
        .slots
        .iter_mut()
        .find(|slot| {
            slot.start_time == request.start_time
                && slot.end_time == request.end_time
                && !slot.is_booked
        })
        .ok_or_else(|| Failure::bad_request("This time slot is not available"))?;
    slot.is_booked = true;

    let appointment = Appointment {
        appointment_id: uuid::Uuid::new_v4().to_string(),
        user_id: request.user_id,
        therapist_id: request.therapist_id,
        therapist_name: record.profile.name.clone(),
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        status: AppointmentStatus::Scheduled,
        notes: Some(request.notes),
        created_at: Some(Utc::now()),
    };
    info!(
        "✓ Booked {} with {} at {}",
        appointment.appointment_id, appointment.therapist_name, appointment.start_time
    );

    store.appointments.push(appointment.clone());
    Ok(Json(appointment))
}

/// Cancel a scheduled appointment and free its slot
pub async fn cancel(
    State(state): State<DevState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<serde_json::Value>, Failure> {
    let mut store = state.store.lock().await;
    let appointment = store
        .appointments
        .iter_mut()
        .find(|a| a.appointment_id == appointment_id)
        .ok_or_else(|| Failure::not_found("Appointment not found"))?;

    if appointment.status != AppointmentStatus::Scheduled {
        return Err(Failure::bad_request(format!(
            "Cannot cancel appointment with status: {}",
            appointment.status.as_str()
        )));
    }
    appointment.status = AppointmentStatus::Cancelled;

    let therapist_id = appointment.therapist_id.clone();
    let start_time = appointment.start_time;
    if let Some(slot) = store
        .therapists
        .iter_mut()
        .filter(|record| record.profile.id == therapist_id)
        .flat_map(|record| record.slots.iter_mut())
        .find(|slot| slot.start_time == start_time)
    {
        slot.is_booked = false;
    }

    info!("✓ Cancelled appointment {}", appointment_id);
    Ok(Json(serde_json::json!({
        "message": "Appointment cancelled successfully"
    })))
}
