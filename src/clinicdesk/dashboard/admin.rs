use super::{
    ADD_DOCTOR_MODAL, BookingRequest, LOGIN_ROUTE, PageMessage, PageResult, RequestSequence,
    Ticket,
};
use crate::client::{ClinicApi, DoctorFilter};
use crate::error::Result;
use crate::model::{Doctor, NewDoctor};
use crate::session::Session;
use crate::view::card::{CardAction, DoctorList, NO_DOCTORS_MESSAGE};
use tracing::{debug, error, info, warn};

pub const FILTER_FAILED: &str = "Failed to filter doctors. Please try again.";
pub const DOCTOR_DELETED: &str = "Doctor deleted.";
pub const DELETE_FAILED: &str = "Error deleting doctor.";
pub const LOGIN_TO_BOOK: &str = "Please log in as a patient to book.";
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const TOKEN_MISSING: &str = "Authorization token is missing. Please log in again.";
pub const DOCTOR_ADDED: &str = "Doctor added successfully";
pub const ADD_REJECTED: &str = "Failed to add doctor.";
pub const ADD_FAILED: &str = "An error occurred while saving the doctor.";

/// Controller for the admin dashboard: the doctor card list.
pub struct AdminDashboard<A: ClinicApi> {
    api: A,
    session: Session,
    content: DoctorList,
    filter: DoctorFilter,
    sequence: RequestSequence,
}

impl<A: ClinicApi> AdminDashboard<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            content: DoctorList::new(),
            filter: DoctorFilter::default(),
            sequence: RequestSequence::new(),
        }
    }

    pub fn content(&self) -> &DoctorList {
        &self.content
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn filter(&self) -> &DoctorFilter {
        &self.filter
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    pub fn into_api(self) -> A {
        self.api
    }

    /// Page ready: fetch every doctor and render one card each.
    pub fn load(&mut self) -> PageResult {
        let ticket = self.begin_load();
        let result = self.api.list_doctors();
        self.apply_load(ticket, result)
    }

    pub fn begin_load(&self) -> Ticket {
        self.sequence.issue()
    }

    /// A failed load is logged and leaves the container as it was.
    pub fn apply_load(&mut self, ticket: Ticket, result: Result<Vec<Doctor>>) -> PageResult {
        if !self.sequence.is_latest(ticket) {
            debug!(ticket = ticket.number(), "discarding superseded doctor list");
            return PageResult::stale();
        }
        match result {
            Ok(doctors) => {
                debug!(count = doctors.len(), "rendering doctor cards");
                self.content.show_doctors(&doctors, &self.session.viewer());
            }
            Err(e) => error!(error = %e, "error loading doctors"),
        }
        PageResult::applied()
    }

    /// Input/change on any of the three filter fields.
    pub fn on_filter_change(&mut self, name: &str, time: &str, specialty: &str) -> PageResult {
        let filter = DoctorFilter::from_fields(name, time, specialty);
        let ticket = self.begin_filter(filter.clone());
        let result = self.fetch_doctors(&filter);
        self.apply_filter(ticket, result)
    }

    /// Record the filter and take a ticket for its fetch.
    pub fn begin_filter(&mut self, filter: DoctorFilter) -> Ticket {
        self.filter = filter;
        self.sequence.issue()
    }

    pub fn fetch_doctors(&mut self, filter: &DoctorFilter) -> Result<Vec<Doctor>> {
        self.api.filter_doctors(filter)
    }

    pub fn apply_filter(&mut self, ticket: Ticket, result: Result<Vec<Doctor>>) -> PageResult {
        if !self.sequence.is_latest(ticket) {
            debug!(ticket = ticket.number(), "discarding superseded filter result");
            return PageResult::stale();
        }
        match result {
            Ok(doctors) if doctors.is_empty() => {
                self.content.show_message(NO_DOCTORS_MESSAGE);
                PageResult::applied()
            }
            Ok(doctors) => {
                self.content.show_doctors(&doctors, &self.session.viewer());
                PageResult::applied()
            }
            Err(e) => {
                error!(error = %e, "filter error");
                PageResult::applied().with_message(PageMessage::error(FILTER_FAILED))
            }
        }
    }

    /// Confirmation text for the delete action of a card.
    pub fn delete_prompt(&self, id: i64) -> Option<String> {
        self.content
            .card(id)
            .map(|card| format!("Delete Dr. {}?", card.doctor.name))
    }

    /// Delete action of a card. `confirmed` is the user's answer to [`Self::delete_prompt`].
    pub fn delete_doctor(&mut self, id: i64, confirmed: bool) -> PageResult {
        let Some(card) = self.content.card(id) else {
            return PageResult::default()
                .with_message(PageMessage::warning(format!("No doctor card with id {}.", id)));
        };
        if card.action != CardAction::Delete {
            return PageResult::default()
                .with_message(PageMessage::warning("Only admins can delete doctors."));
        }
        if !confirmed {
            return PageResult::default();
        }
        let Some(token) = self.session.token().map(str::to_string) else {
            return PageResult::default().with_message(PageMessage::error(TOKEN_MISSING));
        };

        match self.api.delete_doctor(id, &token) {
            Ok(outcome) if outcome.success => {
                // lists fetched before the delete still hold the card
                self.sequence.issue();
                self.content.remove_card(id);
                info!(doctor_id = id, "doctor deleted");
                PageResult::applied().with_message(PageMessage::success(DOCTOR_DELETED))
            }
            Ok(outcome) => {
                warn!(doctor_id = id, message = ?outcome.message, "delete rejected");
                PageResult::applied().with_message(PageMessage::error(DELETE_FAILED))
            }
            Err(e) => {
                error!(doctor_id = id, error = %e, "delete failed");
                PageResult::applied().with_message(PageMessage::error(DELETE_FAILED))
            }
        }
    }

    /// "Book Now" on a card.
    pub fn book(&mut self, id: i64) -> PageResult {
        let (action, doctor) = match self.content.card(id) {
            Some(card) => (card.action, card.doctor.clone()),
            None => {
                return PageResult::default().with_message(PageMessage::warning(format!(
                    "No doctor card with id {}.",
                    id
                )));
            }
        };
        match action {
            CardAction::LoginPrompt => {
                PageResult::default().with_message(PageMessage::info(LOGIN_TO_BOOK))
            }
            CardAction::Book => self.open_booking(doctor),
            CardAction::Delete | CardAction::NoAction => PageResult::default()
                .with_message(PageMessage::warning("Booking is only available to patients.")),
        }
    }

    fn open_booking(&mut self, doctor: Doctor) -> PageResult {
        let patient = match self.session.token() {
            Some(token) => {
                let token = token.to_string();
                self.api.patient_profile(&token).unwrap_or_else(|e| {
                    error!(error = %e, "patient lookup failed");
                    None
                })
            }
            None => None,
        };
        match patient {
            Some(patient) => PageResult::applied().with_booking(BookingRequest { doctor, patient }),
            None => {
                warn!("patient session no longer valid");
                PageResult::default()
                    .with_message(PageMessage::warning(SESSION_EXPIRED))
                    .with_navigation(LOGIN_ROUTE)
            }
        }
    }

    /// Submit of the add-doctor modal form.
    pub fn add_doctor(&mut self, form: &NewDoctor) -> PageResult {
        let Some(token) = self.session.token().map(str::to_string) else {
            return PageResult::default().with_message(PageMessage::error(TOKEN_MISSING));
        };

        match self.api.save_doctor(form, &token) {
            Ok(outcome) if outcome.success => {
                info!(name = %form.name, "doctor added");
                let mut result = PageResult::applied()
                    .with_message(PageMessage::success(
                        outcome.message.unwrap_or_else(|| DOCTOR_ADDED.to_string()),
                    ))
                    .with_closed_modal(ADD_DOCTOR_MODAL);
                result.merge(self.load());
                result
            }
            Ok(outcome) => PageResult::default().with_message(PageMessage::error(
                outcome.message.unwrap_or_else(|| ADD_REJECTED.to_string()),
            )),
            Err(e) => {
                error!(error = %e, "save doctor failed");
                PageResult::default().with_message(PageMessage::error(ADD_FAILED))
            }
        }
    }
}
