use super::search_select::{Candidate, DetailRequest, FailureMessages, SearchRequest, SearchSelect};
use crate::api::{
    report_failure, ApiError, Appointment, AppointmentStatus, NewAppointment, Therapist,
    TherapistApi, TherapistDetail, TherapistFilter, TimeSlot,
};
use crate::resource::{Resource, Ticket, TicketCounter};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

/// Languages offered in the filter
pub const LANGUAGES: &[&str] = &["English", "Spanish", "Mandarin", "Hindi", "Gujarati"];

const MESSAGES: FailureMessages = FailureMessages {
    search: "Failed to load therapists. Please try again later.",
    detail: "Failed to load availability for this therapist.",
};
const BOOKING_FAILED: &str = "Failed to book appointment. Please try again.";
const APPOINTMENTS_FAILED: &str = "Failed to load your appointments.";
const CANCEL_FAILED: &str = "Failed to cancel appointment. Please try again.";

impl Candidate for Therapist {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Select a therapist first")]
    NoTherapist,
    #[error("Select a time slot first")]
    NoSlot,
    #[error("A booking is already in progress")]
    InFlight,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingStatus {
    Idle,
    Booking,
    Booked,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPhase {
    NoSelection,
    TherapistSelected,
    SlotSelected,
    Booking,
    Booked,
    BookingFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    pub search: SearchRequest,
    pub filter: TherapistFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub ticket: Ticket,
    pub appointment: NewAppointment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentsRequest {
    pub ticket: Ticket,
    pub user_id: String,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CancelRequest {
    pub appointment_id: String,
}

/// Unbooked slots in start order
pub fn open_slots(mut slots: Vec<TimeSlot>) -> Vec<TimeSlot> {
    slots.retain(|slot| !slot.is_booked);
    slots.sort_by_key(|slot| slot.start_time);
    slots
}

/// Group slots by their UTC calendar day, days ascending
pub fn group_slots_by_day(slots: &[TimeSlot]) -> Vec<(NaiveDate, Vec<TimeSlot>)> {
    let mut groups: BTreeMap<NaiveDate, Vec<TimeSlot>> = BTreeMap::new();
    for slot in slots {
        groups
            .entry(slot.start_time.date_naive())
            .or_default()
            .push(slot.clone());
    }
    groups.into_iter().collect()
}

/// Therapist directory, availability and booking state
#[derive(Debug, Clone)]
pub struct TherapistsPage {
    user_id: String,
    filter: TherapistFilter,
    directory: SearchSelect<Therapist, Vec<TimeSlot>>,
    specializations: Vec<String>,
    selected_slot: Option<TimeSlot>,
    booking: BookingStatus,
    booking_tickets: TicketCounter,
    appointments: Resource<Vec<Appointment>>,
    appointment_status: Option<AppointmentStatus>,
    appointment_tickets: TicketCounter,
    reset_after_refresh: bool,
    cancelling: Option<String>,
    notice: Option<String>,
}

impl TherapistsPage {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            filter: TherapistFilter::default(),
            directory: SearchSelect::new(MESSAGES),
            specializations: Vec::new(),
            selected_slot: None,
            booking: BookingStatus::Idle,
            booking_tickets: TicketCounter::default(),
            appointments: Resource::Idle,
            appointment_status: None,
            appointment_tickets: TicketCounter::default(),
            reset_after_refresh: false,
            cancelling: None,
            notice: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn filter(&self) -> &TherapistFilter {
        &self.filter
    }

    pub fn therapists(&self) -> &Resource<Vec<Therapist>> {
        self.directory.candidates()
    }

    pub fn specializations(&self) -> &[String] {
        &self.specializations
    }

    pub fn selected_therapist(&self) -> Option<&Therapist> {
        self.directory.selection()
    }

    pub fn slots(&self) -> &Resource<Vec<TimeSlot>> {
        self.directory.detail()
    }

    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        self.selected_slot.as_ref()
    }

    pub fn booking(&self) -> &BookingStatus {
        &self.booking
    }

    pub fn appointments(&self) -> &Resource<Vec<Appointment>> {
        &self.appointments
    }

    /// Status the appointments list is narrowed to, `None` for all
    pub fn appointment_status(&self) -> Option<AppointmentStatus> {
        self.appointment_status
    }

    pub fn cancelling(&self) -> Option<&str> {
        self.cancelling.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn phase(&self) -> BookingPhase {
        match self.booking {
            BookingStatus::Booking => BookingPhase::Booking,
            BookingStatus::Booked => BookingPhase::Booked,
            BookingStatus::Failed(_) => BookingPhase::BookingFailed,
            BookingStatus::Idle => {
                if self.selected_slot.is_some() {
                    BookingPhase::SlotSelected
                } else if self.directory.selection().is_some() {
                    BookingPhase::TherapistSelected
                } else {
                    BookingPhase::NoSelection
                }
            }
        }
    }

    /// Fetch the therapist list for the current filter
    pub fn begin_listing(&mut self) -> Option<ListRequest> {
        let filter = self.filter.clone();
        let label = filter
            .query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        let search = self.directory.begin_lookup(label)?;
        Some(ListRequest { search, filter })
    }

    pub fn finish_listing(&mut self, request: &ListRequest, result: Result<Vec<Therapist>, ApiError>) -> bool {
        self.directory.finish_search(&request.search, result)
    }

    /// Change the specialization filter; refused while the list is loading
    pub fn set_specialization(&mut self, value: Option<String>) -> Option<ListRequest> {
        if self.directory.is_searching() {
            return None;
        }
        self.filter.specialization = value.filter(|v| !v.is_empty());
        self.begin_listing()
    }

    pub fn set_language(&mut self, value: Option<String>) -> Option<ListRequest> {
        if self.directory.is_searching() {
            return None;
        }
        self.filter.language = value.filter(|v| !v.is_empty());
        self.begin_listing()
    }

    /// Unexpected shapes and failures leave the filter with no options
    pub fn finish_specializations(&mut self, result: Result<Vec<String>, ApiError>) {
        self.specializations = match result {
            Ok(list) => list,
            Err(e) => {
                report_failure("Loading specializations", &e);
                Vec::new()
            }
        };
    }

    /// Select a therapist and request their availability. Any slot choice is dropped.
    pub fn select_therapist(&mut self, therapist: Therapist) -> DetailRequest<String> {
        self.selected_slot = None;
        if self.booking != BookingStatus::Booking {
            self.booking = BookingStatus::Idle;
        }
        self.reset_after_refresh = false;
        self.directory.select(therapist)
    }

    pub fn finish_availability(
        &mut self,
        request: &DetailRequest<String>,
        result: Result<TherapistDetail, ApiError>,
    ) -> bool {
        let slots = result.map(|detail| open_slots(detail.available_slots));
        self.directory.finish_detail(request, slots)
    }

    /// Fetch the selected therapist's availability again after a failure
    pub fn retry_availability(&mut self) -> Option<DetailRequest<String>> {
        if self.directory.detail().error().is_none() {
            return None;
        }
        self.directory.reload_detail()
    }

    pub fn select_slot(&mut self, slot: TimeSlot) {
        if self.directory.selection().is_none() || self.booking == BookingStatus::Booking {
            return;
        }
        self.selected_slot = Some(slot);
        if matches!(self.booking, BookingStatus::Failed(_)) {
            self.booking = BookingStatus::Idle;
        }
    }

    /// Build the booking request; rejected locally without both selections
    pub fn begin_booking(&mut self) -> Result<BookingRequest, BookingError> {
        if self.booking == BookingStatus::Booking {
            return Err(BookingError::InFlight);
        }
        let therapist = self
            .directory
            .selection()
            .ok_or(BookingError::NoTherapist)?;
        let slot = self.selected_slot.as_ref().ok_or(BookingError::NoSlot)?;

        let appointment = NewAppointment {
            user_id: self.user_id.clone(),
            therapist_id: therapist.id.clone(),
            date: slot.start_time,
            start_time: slot.start_time,
            end_time: slot.end_time,
            notes: String::new(),
        };

        self.booking = BookingStatus::Booking;
        Ok(BookingRequest {
            ticket: self.booking_tickets.issue(),
            appointment,
        })
    }

    /// Returns true when the booking went through and a refresh should follow
    pub fn finish_booking(&mut self, request: &BookingRequest, result: Result<Appointment, ApiError>) -> bool {
        if !self.booking_tickets.is_current(request.ticket) {
            return false;
        }

        match result {
            Ok(appointment) => {
                info!(
                    "✓ Booked appointment {} with {}",
                    appointment.appointment_id, appointment.therapist_name
                );
                let start = appointment.start_time;
                let listed = self
                    .appointment_status
                    .map_or(true, |status| status == appointment.status);
                if listed {
                    match self.appointments.data_mut() {
                        Some(list) => list.push(appointment),
                        None => self.appointments.resolve(vec![appointment]),
                    }
                }
                // The user may have moved on to another therapist while this was in flight
                let still_selected = self
                    .directory
                    .selection()
                    .map_or(false, |t| t.id == request.appointment.therapist_id);
                if still_selected {
                    if let Some(slots) = self.directory.detail_mut().data_mut() {
                        slots.retain(|slot| slot.start_time != start);
                    }
                    self.reset_after_refresh = true;
                } else {
                    debug!("Booking resolved after the selection changed, keeping it");
                }
                self.booking = BookingStatus::Booked;
                true
            }
            Err(e) => {
                report_failure("Booking", &e);
                let message = e.detail().unwrap_or(BOOKING_FAILED).to_string();
                self.booking = BookingStatus::Failed(message);
                false
            }
        }
    }

    pub fn dismiss_booking_banner(&mut self) {
        if matches!(self.booking, BookingStatus::Booked | BookingStatus::Failed(_)) {
            self.booking = BookingStatus::Idle;
        }
    }

    /// Reload the user's appointments; a newer refresh supersedes an older one
    pub fn begin_appointments_refresh(&mut self) -> AppointmentsRequest {
        self.appointments.start();
        AppointmentsRequest {
            ticket: self.appointment_tickets.issue(),
            user_id: self.user_id.clone(),
            status: self.appointment_status,
        }
    }

    /// Narrow the appointments list to one status and reload it
    pub fn set_appointment_status(&mut self, status: Option<AppointmentStatus>) -> AppointmentsRequest {
        self.appointment_status = status;
        self.begin_appointments_refresh()
    }

    pub fn finish_appointments(
        &mut self,
        request: &AppointmentsRequest,
        result: Result<Vec<Appointment>, ApiError>,
    ) -> bool {
        if !self.appointment_tickets.is_current(request.ticket) {
            return false;
        }

        match result {
            Ok(list) => self.appointments.resolve(list),
            Err(e) => {
                report_failure("Loading appointments", &e);
                self.appointments.fail(APPOINTMENTS_FAILED);
            }
        }

        if self.reset_after_refresh {
            debug!("Refresh after booking finished, resetting selection");
            self.reset_after_refresh = false;
            self.selected_slot = None;
            self.directory.clear_selection();
        }
        true
    }

    /// Only scheduled appointments can be cancelled, one at a time
    pub fn begin_cancel(&mut self, appointment_id: &str) -> Option<CancelRequest> {
        if self.cancelling.is_some() {
            return None;
        }
        let cancellable = self
            .appointments
            .data()
            .map(|list| {
                list.iter().any(|a| {
                    a.appointment_id == appointment_id && a.status == AppointmentStatus::Scheduled
                })
            })
            .unwrap_or(false);
        if !cancellable {
            return None;
        }

        self.notice = None;
        self.cancelling = Some(appointment_id.to_string());
        Some(CancelRequest {
            appointment_id: appointment_id.to_string(),
        })
    }

    /// Returns true when the appointment was cancelled and lists should refresh
    pub fn finish_cancel(&mut self, request: &CancelRequest, result: Result<(), ApiError>) -> bool {
        self.cancelling = None;

        match result {
            Ok(()) => {
                if let Some(list) = self.appointments.data_mut() {
                    for appointment in list
                        .iter_mut()
                        .filter(|a| a.appointment_id == request.appointment_id)
                    {
                        appointment.status = AppointmentStatus::Cancelled;
                    }
                }
                true
            }
            Err(e) => {
                report_failure("Cancelling appointment", &e);
                self.notice = Some(CANCEL_FAILED.to_string());
                false
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Initial load: therapist list, specializations and the user's appointments
    pub async fn load(&mut self, api: &dyn TherapistApi) {
        if let Some(request) = self.begin_listing() {
            let result = api.list_therapists(&request.filter).await;
            self.finish_listing(&request, result);
        }

        let result = api.specializations().await;
        self.finish_specializations(result);

        self.refresh_appointments(api).await;
    }

    pub async fn refresh_appointments(&mut self, api: &dyn TherapistApi) {
        let request = self.begin_appointments_refresh();
        let result = api.user_appointments(&request.user_id, request.status).await;
        self.finish_appointments(&request, result);
    }

    pub async fn choose_therapist(&mut self, api: &dyn TherapistApi, therapist: Therapist) -> bool {
        let request = self.select_therapist(therapist);
        let result = api.therapist(&request.key).await;
        self.finish_availability(&request, result)
    }

    /// Book the selected slot, then run the refresh cycle on success
    pub async fn book(&mut self, api: &dyn TherapistApi) -> Result<bool, BookingError> {
        let request = self.begin_booking()?;
        let result = api.book(&request.appointment).await;
        if !self.finish_booking(&request, result) {
            return Ok(false);
        }

        self.refresh_appointments(api).await;
        if let Some(request) = self.begin_listing() {
            let result = api.list_therapists(&request.filter).await;
            self.finish_listing(&request, result);
        }
        Ok(true)
    }

    pub async fn cancel(&mut self, api: &dyn TherapistApi, appointment_id: &str) -> bool {
        let Some(request) = self.begin_cancel(appointment_id) else {
            return false;
        };
        let result = api.cancel(&request.appointment_id).await;
        if !self.finish_cancel(&request, result) {
            return false;
        }

        self.refresh_appointments(api).await;
        if let Some(request) = self.begin_listing() {
            let result = api.list_therapists(&request.filter).await;
            self.finish_listing(&request, result);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use reqwest::StatusCode;
    use std::sync::Mutex;

    fn at(hour: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 4, day, hour, 0, 0).unwrap()
    }

    fn slot(hour: u32, day: u32) -> TimeSlot {
        TimeSlot {
            start_time: at(hour, day),
            end_time: at(hour, day) + Duration::hours(1),
            is_booked: false,
        }
    }

    fn therapist(id: &str) -> Therapist {
        Therapist {
            id: id.to_string(),
            name: format!("Dr. {}", id),
            specializations: vec!["Anxiety".to_string()],
            experience_years: 10,
            education: "Ph.D".to_string(),
            bio: String::new(),
            photo_url: None,
            hourly_rate: 120.0,
            languages: vec!["English".to_string()],
        }
    }

    #[derive(Default)]
    struct FakeTherapists {
        booked: Mutex<Vec<NewAppointment>>,
        cancelled: Mutex<Vec<String>>,
        appointments: Mutex<Vec<Appointment>>,
        reject_booking: Option<String>,
    }

    #[async_trait::async_trait]
    impl TherapistApi for FakeTherapists {
        async fn list_therapists(&self, _filter: &TherapistFilter) -> Result<Vec<Therapist>, ApiError> {
            Ok(vec![therapist("a"), therapist("b")])
        }

        async fn specializations(&self) -> Result<Vec<String>, ApiError> {
            Ok(vec!["Anxiety".to_string()])
        }

        async fn therapist(&self, id: &str) -> Result<TherapistDetail, ApiError> {
            let mut booked = slot(9, 2);
            booked.is_booked = true;
            Ok(TherapistDetail {
                therapist: therapist(id),
                available_slots: vec![slot(11, 2), booked, slot(10, 1)],
            })
        }

        async fn user_appointments(
            &self,
            _user_id: &str,
            _status: Option<AppointmentStatus>,
        ) -> Result<Vec<Appointment>, ApiError> {
            Ok(self.appointments.lock().unwrap().clone())
        }

        async fn book(&self, appointment: &NewAppointment) -> Result<Appointment, ApiError> {
            if let Some(detail) = &self.reject_booking {
                return Err(ApiError::from_status(
                    StatusCode::BAD_REQUEST,
                    &serde_json::json!({ "detail": detail }).to_string(),
                ));
            }
            self.booked.lock().unwrap().push(appointment.clone());
            let created = Appointment {
                appointment_id: format!("appt-{}", self.booked.lock().unwrap().len()),
                user_id: appointment.user_id.clone(),
                therapist_id: appointment.therapist_id.clone(),
                therapist_name: "Dr. a".to_string(),
                date: appointment.date,
                start_time: appointment.start_time,
                end_time: appointment.end_time,
                status: AppointmentStatus::Scheduled,
                notes: Some(appointment.notes.clone()),
                created_at: None,
            };
            self.appointments.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn cancel(&self, appointment_id: &str) -> Result<(), ApiError> {
            self.cancelled.lock().unwrap().push(appointment_id.to_string());
            for appointment in self.appointments.lock().unwrap().iter_mut() {
                if appointment.appointment_id == appointment_id {
                    appointment.status = AppointmentStatus::Cancelled;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_open_slots_sorted_and_unbooked() {
        let mut booked = slot(8, 1);
        booked.is_booked = true;
        let slots = open_slots(vec![slot(12, 1), booked, slot(9, 1)]);
        let hours: Vec<_> = slots.iter().map(|s| s.start_time).collect();
        assert_eq!(hours, vec![at(9, 1), at(12, 1)]);
    }

    #[test]
    fn test_slots_grouped_by_day() {
        let groups = group_slots_by_day(&[slot(9, 3), slot(10, 1), slot(11, 3)]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, NaiveDate::from_ymd_opt(2030, 4, 1).unwrap());
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn test_booking_rejected_locally_without_selection() {
        let mut page = TherapistsPage::new("user123");
        assert_eq!(page.begin_booking().unwrap_err(), BookingError::NoTherapist);
        assert_eq!(page.phase(), BookingPhase::NoSelection);

        page.select_therapist(therapist("a"));
        assert_eq!(page.phase(), BookingPhase::TherapistSelected);
        assert_eq!(page.begin_booking().unwrap_err(), BookingError::NoSlot);
    }

    #[test]
    fn test_slot_requires_therapist() {
        let mut page = TherapistsPage::new("user123");
        page.select_slot(slot(9, 1));
        assert!(page.selected_slot().is_none());
    }

    #[tokio::test]
    async fn test_no_request_sent_without_both_selections() {
        let api = FakeTherapists::default();
        let mut page = TherapistsPage::new("user123");
        page.choose_therapist(&api, therapist("a")).await;

        assert_eq!(page.book(&api).await, Err(BookingError::NoSlot));
        assert!(api.booked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_availability_is_sorted_open_slots() {
        let api = FakeTherapists::default();
        let mut page = TherapistsPage::new("user123");
        assert!(page.choose_therapist(&api, therapist("a")).await);

        let slots = page.slots().data().unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].start_time, at(10, 1));
        assert_eq!(slots[1].start_time, at(11, 2));
    }

    #[tokio::test]
    async fn test_successful_booking_resets_selection_after_refresh() {
        let api = FakeTherapists::default();
        let mut page = TherapistsPage::new("user123");
        page.load(&api).await;
        page.choose_therapist(&api, therapist("a")).await;
        let chosen = page.slots().data().unwrap()[0].clone();
        page.select_slot(chosen.clone());
        assert_eq!(page.phase(), BookingPhase::SlotSelected);

        assert_eq!(page.book(&api).await, Ok(true));

        let sent = api.booked.lock().unwrap()[0].clone();
        assert_eq!(sent.user_id, "user123");
        assert_eq!(sent.therapist_id, "a");
        assert_eq!(sent.start_time, chosen.start_time);
        assert_eq!(sent.date, chosen.start_time);
        assert_eq!(sent.notes, "");

        assert_eq!(page.booking(), &BookingStatus::Booked);
        assert_eq!(page.phase(), BookingPhase::Booked);
        assert!(page.selected_therapist().is_none());
        assert!(page.selected_slot().is_none());
        assert_eq!(page.appointments().data().unwrap().len(), 1);

        page.dismiss_booking_banner();
        assert_eq!(page.phase(), BookingPhase::NoSelection);
    }

    #[tokio::test]
    async fn test_selection_survives_until_refresh_completes() {
        let api = FakeTherapists::default();
        let mut page = TherapistsPage::new("user123");
        page.choose_therapist(&api, therapist("a")).await;
        page.select_slot(slot(10, 1));

        let request = page.begin_booking().unwrap();
        let result = api.book(&request.appointment).await;
        assert!(page.finish_booking(&request, result));

        // Banner is up but the refresh cycle has not run yet
        assert_eq!(page.booking(), &BookingStatus::Booked);
        assert!(page.selected_therapist().is_some());

        let refresh = page.begin_appointments_refresh();
        page.finish_appointments(&refresh, Ok(Vec::new()));
        assert!(page.selected_therapist().is_none());
    }

    #[tokio::test]
    async fn test_late_booking_leaves_newer_selection_alone() {
        let api = FakeTherapists::default();
        let mut page = TherapistsPage::new("user123");
        page.choose_therapist(&api, therapist("a")).await;
        page.select_slot(slot(10, 1));
        let request = page.begin_booking().unwrap();

        let other = page.select_therapist(therapist("b"));
        let detail = TherapistDetail {
            therapist: therapist("b"),
            available_slots: vec![slot(10, 1), slot(11, 1)],
        };
        assert!(page.finish_availability(&other, Ok(detail)));

        let result = api.book(&request.appointment).await;
        assert!(page.finish_booking(&request, result));
        assert_eq!(page.booking(), &BookingStatus::Booked);

        let starts: Vec<_> = page.slots().data().unwrap().iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![at(10, 1), at(11, 1)]);

        let refresh = page.begin_appointments_refresh();
        page.finish_appointments(&refresh, Ok(Vec::new()));
        assert_eq!(page.selected_therapist().map(|t| t.id.as_str()), Some("b"));
        assert!(page.slots().is_ready());
    }

    #[tokio::test]
    async fn test_failed_booking_keeps_slot_and_shows_server_detail() {
        let api = FakeTherapists {
            reject_booking: Some("This time slot is not available".to_string()),
            ..Default::default()
        };
        let mut page = TherapistsPage::new("user123");
        page.choose_therapist(&api, therapist("a")).await;
        page.select_slot(slot(10, 1));

        assert_eq!(page.book(&api).await, Ok(false));
        assert_eq!(
            page.booking(),
            &BookingStatus::Failed("This time slot is not available".to_string())
        );
        assert_eq!(page.phase(), BookingPhase::BookingFailed);
        assert!(page.selected_slot().is_some());

        // Retry is allowed with the same slot
        assert!(page.begin_booking().is_ok());
    }

    #[tokio::test]
    async fn test_booking_refused_while_in_flight() {
        let api = FakeTherapists::default();
        let mut page = TherapistsPage::new("user123");
        page.choose_therapist(&api, therapist("a")).await;
        page.select_slot(slot(10, 1));

        let _pending = page.begin_booking().unwrap();
        assert_eq!(page.begin_booking().unwrap_err(), BookingError::InFlight);
    }

    #[tokio::test]
    async fn test_cancel_marks_appointment_cancelled() {
        let api = FakeTherapists::default();
        let mut page = TherapistsPage::new("user123");
        page.choose_therapist(&api, therapist("a")).await;
        page.select_slot(slot(10, 1));
        page.book(&api).await.unwrap();

        let id = page.appointments().data().unwrap()[0].appointment_id.clone();
        assert!(page.cancel(&api, &id).await);
        assert_eq!(api.cancelled.lock().unwrap().as_slice(), &[id.clone()]);

        let appointment = &page.appointments().data().unwrap()[0];
        assert_eq!(appointment.status, AppointmentStatus::Cancelled);

        // Already cancelled, nothing more to send
        assert!(page.begin_cancel(&id).is_none());
    }

    #[test]
    fn test_stale_availability_is_ignored() {
        let mut page = TherapistsPage::new("user123");
        let first = page.select_therapist(therapist("a"));
        let second = page.select_therapist(therapist("b"));

        let detail = |id: &str, hour| TherapistDetail {
            therapist: therapist(id),
            available_slots: vec![slot(hour, 1)],
        };

        assert!(page.finish_availability(&second, Ok(detail("b", 14))));
        assert!(!page.finish_availability(&first, Ok(detail("a", 9))));
        assert_eq!(page.slots().data().unwrap()[0].start_time, at(14, 1));
    }

    #[test]
    fn test_failed_availability_can_be_retried() {
        let mut page = TherapistsPage::new("user123");
        assert!(page.retry_availability().is_none());

        let request = page.select_therapist(therapist("a"));
        assert!(page.retry_availability().is_none(), "still loading");
        page.finish_availability(
            &request,
            Err(ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, "")),
        );
        assert_eq!(page.slots().error(), Some(MESSAGES.detail));

        let retry = page.retry_availability().unwrap();
        assert_eq!(retry.key, "a");
        assert!(page.slots().is_loading());
        let stale = TherapistDetail {
            therapist: therapist("a"),
            available_slots: vec![slot(9, 1)],
        };
        assert!(!page.finish_availability(&request, Ok(stale)));

        let detail = TherapistDetail {
            therapist: therapist("a"),
            available_slots: vec![slot(12, 1)],
        };
        assert!(page.finish_availability(&retry, Ok(detail)));
        assert_eq!(page.slots().data().unwrap()[0].start_time, at(12, 1));
    }

    #[test]
    fn test_listing_label_names_active_filters() {
        let mut page = TherapistsPage::new("user123");
        let request = page.begin_listing().unwrap();
        assert_eq!(request.search.query, "");
        page.finish_listing(&request, Ok(Vec::new()));

        let request = page.set_specialization(Some("Anxiety".to_string())).unwrap();
        assert_eq!(request.search.query, "specialization=Anxiety");
        page.finish_listing(&request, Ok(Vec::new()));

        let request = page.set_language(Some("Hindi".to_string())).unwrap();
        assert_eq!(request.search.query, "specialization=Anxiety&language=Hindi");
    }

    #[tokio::test]
    async fn test_status_filter_travels_with_the_refresh() {
        let api = FakeTherapists::default();
        let mut page = TherapistsPage::new("user123");
        let request = page.set_appointment_status(Some(AppointmentStatus::Cancelled));
        assert_eq!(request.status, Some(AppointmentStatus::Cancelled));
        page.finish_appointments(&request, Ok(Vec::new()));

        // A fresh booking is scheduled, so it stays out of a cancelled-only list
        page.choose_therapist(&api, therapist("a")).await;
        page.select_slot(slot(10, 1));
        let booking = page.begin_booking().unwrap();
        let result = api.book(&booking.appointment).await;
        assert!(page.finish_booking(&booking, result));
        assert!(page.appointments().data().unwrap().is_empty());

        let request = page.set_appointment_status(None);
        assert_eq!(request.status, None);
        assert_eq!(page.appointment_status(), None);
    }

    #[test]
    fn test_filter_change_refused_while_listing() {
        let mut page = TherapistsPage::new("user123");
        let request = page.begin_listing().unwrap();
        assert!(page.set_language(Some("Spanish".to_string())).is_none());
        assert_eq!(page.filter().language, None);

        page.finish_listing(&request, Ok(vec![therapist("a")]));
        let request = page.set_language(Some("Spanish".to_string())).unwrap();
        assert_eq!(request.filter.language.as_deref(), Some("Spanish"));
    }

    #[test]
    fn test_bad_specializations_payload_leaves_empty_list() {
        let mut page = TherapistsPage::new("user123");
        let bad = serde_json::from_str::<crate::api::Specializations>("[1, 2]").unwrap_err();
        page.finish_specializations(Err(ApiError::Payload(bad)));
        assert!(page.specializations().is_empty());
    }
}
