use super::status::{ErrorBanner, LoadingSpinner, SuccessBanner};
use crate::api::{Appointment, AppointmentStatus, Therapist, TherapistApi, TimeSlot};
use crate::config::use_config;
use crate::flows::therapists::{group_slots_by_day, AppointmentsRequest, ListRequest, LANGUAGES};
use crate::flows::{BookingPhase, BookingStatus, TherapistsPage};
use crate::ui::use_services;
use dioxus::prelude::*;
use std::sync::Arc;
use tracing::debug;

fn run_listing(mut page: Signal<TherapistsPage>, api: Arc<dyn TherapistApi>, request: Option<ListRequest>) {
    let Some(request) = request else {
        return;
    };
    spawn(async move {
        let result = api.list_therapists(&request.filter).await;
        page.write().finish_listing(&request, result);
    });
}

fn run_appointments(mut page: Signal<TherapistsPage>, api: Arc<dyn TherapistApi>, request: AppointmentsRequest) {
    spawn(async move {
        let result = api.user_appointments(&request.user_id, request.status).await;
        page.write().finish_appointments(&request, result);
    });
}

fn refresh_appointments(mut page: Signal<TherapistsPage>, api: Arc<dyn TherapistApi>) {
    let request = page.write().begin_appointments_refresh();
    run_appointments(page, api, request);
}

fn parse_status(value: &str) -> Option<AppointmentStatus> {
    [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ]
    .into_iter()
    .find(|status| status.as_str() == value)
}

fn choose_therapist(mut page: Signal<TherapistsPage>, api: Arc<dyn TherapistApi>, therapist: Therapist) {
    let request = page.write().select_therapist(therapist);
    spawn(async move {
        let result = api.therapist(&request.key).await;
        page.write().finish_availability(&request, result);
    });
}

fn retry_availability(mut page: Signal<TherapistsPage>, api: Arc<dyn TherapistApi>) {
    let Some(request) = page.write().retry_availability() else {
        return;
    };
    spawn(async move {
        let result = api.therapist(&request.key).await;
        page.write().finish_availability(&request, result);
    });
}

fn book_selected(mut page: Signal<TherapistsPage>, api: Arc<dyn TherapistApi>) {
    let request = match page.write().begin_booking() {
        Ok(request) => request,
        Err(e) => {
            debug!("Booking not sent: {}", e);
            return;
        }
    };
    spawn(async move {
        let result = api.book(&request.appointment).await;
        let booked = page.write().finish_booking(&request, result);
        if booked {
            refresh_appointments(page, api.clone());
            let listing = page.write().begin_listing();
            run_listing(page, api, listing);
        }
    });
}

fn cancel_appointment(mut page: Signal<TherapistsPage>, api: Arc<dyn TherapistApi>, appointment_id: String) {
    let Some(request) = page.write().begin_cancel(&appointment_id) else {
        return;
    };
    spawn(async move {
        let result = api.cancel(&request.appointment_id).await;
        let cancelled = page.write().finish_cancel(&request, result);
        if cancelled {
            refresh_appointments(page, api.clone());
            let listing = page.write().begin_listing();
            run_listing(page, api, listing);
        }
    });
}

/// Therapist directory, availability and booking
#[component]
pub fn TherapistAppointments() -> Element {
    let services = use_services();
    let config = use_config();
    let mut page = use_signal(move || TherapistsPage::new(config.user_id.clone()));

    use_effect({
        let api = services.therapists.clone();
        move || {
            let listing = page.write().begin_listing();
            run_listing(page, api.clone(), listing);

            let specializations = api.clone();
            spawn(async move {
                let result = specializations.specializations().await;
                page.write().finish_specializations(result);
            });

            refresh_appointments(page, api.clone());
        }
    });

    let view = page.read().clone();
    let therapists = view.therapists().data().cloned().unwrap_or_default();
    let selected_id = view.selected_therapist().map(|t| t.id.clone());
    let phase = view.phase();

    rsx! {
        div { class: "max-w-7xl mx-auto px-4 py-12",
            div { class: "text-center mb-12",
                h1 { class: "text-4xl font-bold text-indigo-900", "Find a Therapist" }
                p { class: "mt-4 text-lg text-gray-600",
                    "Browse licensed professionals and book a session at a time that suits you."
                }
            }

            {match view.booking() {
                BookingStatus::Booked => rsx! {
                    SuccessBanner {
                        message: "Your appointment has been booked!",
                        on_dismiss: move |_| page.write().dismiss_booking_banner(),
                    }
                },
                BookingStatus::Failed(message) => rsx! {
                    ErrorBanner {
                        message: message.clone(),
                        on_dismiss: move |_| page.write().dismiss_booking_banner(),
                    }
                },
                _ => rsx! {},
            }}

            if let Some(message) = view.therapists().error() {
                ErrorBanner { message: message.to_string() }
            }
            if let Some(message) = view.notice() {
                ErrorBanner {
                    message: message.to_string(),
                    on_dismiss: move |_| page.write().dismiss_notice(),
                }
            }

            FilterBar {
                specializations: view.specializations().to_vec(),
                specialization: view.filter().specialization.clone().unwrap_or_default(),
                language: view.filter().language.clone().unwrap_or_default(),
                disabled: view.therapists().is_loading(),
                on_specialization: {
                    let api = services.therapists.clone();
                    move |value: String| {
                        let listing = page.write().set_specialization(Some(value));
                        run_listing(page, api.clone(), listing);
                    }
                },
                on_language: {
                    let api = services.therapists.clone();
                    move |value: String| {
                        let listing = page.write().set_language(Some(value));
                        run_listing(page, api.clone(), listing);
                    }
                },
            }

            div { class: "grid grid-cols-1 lg:grid-cols-3 gap-8",
                div { class: "lg:col-span-2",
                    if view.therapists().is_loading() && therapists.is_empty() {
                        LoadingSpinner { label: "Loading therapists..." }
                    } else if therapists.is_empty() {
                        p { class: "text-gray-500", "No therapists match these filters." }
                    }
                    div { class: "grid grid-cols-1 md:grid-cols-2 gap-6",
                        for therapist in therapists {
                            TherapistCard {
                                key: "{therapist.id}",
                                selected: selected_id.as_deref() == Some(therapist.id.as_str()),
                                disabled: phase == BookingPhase::Booking,
                                therapist: therapist.clone(),
                                on_select: {
                                    let api = services.therapists.clone();
                                    move |therapist: Therapist| choose_therapist(page, api.clone(), therapist)
                                },
                            }
                        }
                    }
                }

                div { class: "space-y-8",
                    div { class: "bg-white rounded-xl shadow-md p-6",
                        h2 { class: "text-xl font-semibold text-indigo-900 mb-4", "Book a Session" }
                        if let Some(therapist) = view.selected_therapist() {
                            p { class: "text-gray-700 mb-4", "with {therapist.name}" }
                            if view.slots().is_loading() {
                                LoadingSpinner { label: "Loading availability..." }
                            } else if let Some(message) = view.slots().error() {
                                ErrorBanner { message: message.to_string() }
                                button {
                                    class: "text-sm text-indigo-600 hover:text-indigo-800",
                                    onclick: {
                                        let api = services.therapists.clone();
                                        move |_| retry_availability(page, api.clone())
                                    },
                                    "Try again"
                                }
                            } else {
                                SlotPicker {
                                    slots: view.slots().data().cloned().unwrap_or_default(),
                                    selected: view.selected_slot().cloned(),
                                    on_pick: move |slot: TimeSlot| page.write().select_slot(slot),
                                }
                            }
                            button {
                                class: "mt-6 w-full px-4 py-3 bg-teal-600 hover:bg-teal-700 text-white rounded-lg disabled:opacity-50",
                                disabled: !matches!(phase, BookingPhase::SlotSelected | BookingPhase::BookingFailed),
                                onclick: {
                                    let api = services.therapists.clone();
                                    move |_| book_selected(page, api.clone())
                                },
                                if phase == BookingPhase::Booking { "Booking..." } else { "Book Appointment" }
                            }
                        } else {
                            p { class: "text-gray-500", "Select a therapist to see open time slots." }
                        }
                    }

                    div { class: "bg-white rounded-xl shadow-md p-6",
                        div { class: "flex justify-between items-center mb-4",
                            h2 { class: "text-xl font-semibold text-indigo-900", "Your Appointments" }
                            select {
                                class: "px-2 py-1 border border-gray-300 rounded-lg text-sm",
                                value: view.appointment_status().map(|s| s.as_str()).unwrap_or_default(),
                                onchange: {
                                    let api = services.therapists.clone();
                                    move |event: FormEvent| {
                                        let request = page.write().set_appointment_status(parse_status(&event.value()));
                                        run_appointments(page, api.clone(), request);
                                    }
                                },
                                option { value: "", "All" }
                                option { value: "scheduled", "Scheduled" }
                                option { value: "completed", "Completed" }
                                option { value: "cancelled", "Cancelled" }
                            }
                        }
                        if let Some(message) = view.appointments().error() {
                            ErrorBanner { message: message.to_string() }
                        }
                        AppointmentList {
                            appointments: view.appointments().data().cloned().unwrap_or_default(),
                            cancelling: view.cancelling().map(str::to_string),
                            on_cancel: {
                                let api = services.therapists.clone();
                                move |id: String| cancel_appointment(page, api.clone(), id)
                            },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FilterBar(
    specializations: Vec<String>,
    specialization: String,
    language: String,
    disabled: bool,
    on_specialization: EventHandler<String>,
    on_language: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "flex flex-wrap gap-4 mb-8",
            select {
                class: "px-4 py-2 border border-gray-300 rounded-lg",
                disabled,
                value: "{specialization}",
                onchange: move |event: FormEvent| on_specialization.call(event.value()),
                option { value: "", "All specializations" }
                for name in specializations {
                    option { key: "{name}", value: "{name}", "{name}" }
                }
            }
            select {
                class: "px-4 py-2 border border-gray-300 rounded-lg",
                disabled,
                value: "{language}",
                onchange: move |event: FormEvent| on_language.call(event.value()),
                option { value: "", "All languages" }
                for name in LANGUAGES.iter() {
                    option { key: "{name}", value: "{name}", "{name}" }
                }
            }
        }
    }
}

#[component]
fn TherapistCard(therapist: Therapist, selected: bool, disabled: bool, on_select: EventHandler<Therapist>) -> Element {
    let border = if selected { "ring-2 ring-teal-500" } else { "" };
    let specializations = therapist.specializations.join(", ");
    let languages = therapist.languages.join(", ");
    let rate = format!("${:.0}/hour", therapist.hourly_rate);
    let picked = therapist.clone();
    rsx! {
        button {
            class: "text-left bg-white rounded-xl shadow-md p-6 hover:shadow-lg transition-shadow disabled:opacity-60 {border}",
            disabled,
            onclick: move |_| on_select.call(picked.clone()),
            h3 { class: "text-lg font-semibold text-indigo-900", "{therapist.name}" }
            p { class: "text-sm text-gray-600 mt-1", "{specializations}" }
            p { class: "text-sm text-gray-500 mt-2",
                "{therapist.experience_years} years · {rate}"
            }
            p { class: "text-sm text-gray-500", "Languages: {languages}" }
            if !therapist.bio.is_empty() {
                p { class: "text-sm text-gray-700 mt-3", "{therapist.bio}" }
            }
        }
    }
}

#[component]
fn SlotPicker(slots: Vec<TimeSlot>, selected: Option<TimeSlot>, on_pick: EventHandler<TimeSlot>) -> Element {
    if slots.is_empty() {
        return rsx! {
            p { class: "text-gray-500", "No open slots in the coming days." }
        };
    }

    let days = group_slots_by_day(&slots);
    rsx! {
        div { class: "space-y-4 max-h-96 overflow-y-auto",
            for (day, day_slots) in days {
                div { key: "{day}",
                    p { class: "text-sm font-medium text-gray-700 mb-2", {day.format("%A, %B %-d").to_string()} }
                    div { class: "flex flex-wrap gap-2",
                        for slot in day_slots {
                            SlotButton {
                                key: "{slot.start_time}",
                                active: selected.as_ref() == Some(&slot),
                                slot: slot.clone(),
                                on_pick,
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SlotButton(slot: TimeSlot, active: bool, on_pick: EventHandler<TimeSlot>) -> Element {
    let style = if active {
        "bg-teal-600 text-white"
    } else {
        "bg-indigo-50 text-indigo-900 hover:bg-indigo-100"
    };
    let label = format!(
        "{} - {}",
        slot.start_time.format("%H:%M"),
        slot.end_time.format("%H:%M")
    );
    let picked = slot.clone();
    rsx! {
        button {
            class: "px-3 py-2 rounded-lg text-sm {style}",
            onclick: move |_| on_pick.call(picked.clone()),
            "{label}"
        }
    }
}

#[component]
fn AppointmentList(
    appointments: Vec<Appointment>,
    cancelling: Option<String>,
    on_cancel: EventHandler<String>,
) -> Element {
    if appointments.is_empty() {
        return rsx! {
            p { class: "text-gray-500", "You have no appointments yet." }
        };
    }

    rsx! {
        ul { class: "space-y-4",
            for appointment in appointments {
                li { key: "{appointment.appointment_id}", class: "border-b border-gray-100 pb-3",
                    p { class: "font-medium text-indigo-900", "{appointment.therapist_name}" }
                    p { class: "text-sm text-gray-600",
                        {format!("{} · {}", appointment.start_time.format("%b %-d, %H:%M"), appointment.status.as_str())}
                    }
                    if appointment.status == AppointmentStatus::Scheduled {
                        button {
                            class: "mt-2 text-sm text-red-600 hover:text-red-700 disabled:opacity-50",
                            disabled: cancelling.is_some(),
                            onclick: {
                                let id = appointment.appointment_id.clone();
                                move |_| on_cancel.call(id.clone())
                            },
                            if cancelling.as_deref() == Some(appointment.appointment_id.as_str()) {
                                "Cancelling..."
                            } else {
                                "Cancel"
                            }
                        }
                    }
                }
            }
        }
    }
}
