use super::{PageMessage, PageResult, RequestSequence, Ticket};
use crate::client::{AppointmentQuery, ClinicApi, non_blank};
use crate::error::{ClinicError, Result};
use crate::model::Appointment;
use crate::session::Session;
use crate::view::row::AppointmentTable;
use chrono::{Local, NaiveDate};
use tracing::{debug, error};

use super::admin::TOKEN_MISSING;

type Clock = Box<dyn Fn() -> NaiveDate + Send>;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Controller for the doctor dashboard: the patient table for one day.
///
/// Filter state is the selected date (today by default), an optional patient
/// name and the session token. Every trigger changes that state and re-fetches.
pub struct DoctorDashboard<A: ClinicApi> {
    api: A,
    session: Session,
    selected_date: NaiveDate,
    patient_name: Option<String>,
    table: AppointmentTable,
    sequence: RequestSequence,
    today: Clock,
}

impl<A: ClinicApi> DoctorDashboard<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            selected_date: local_today(),
            patient_name: None,
            table: AppointmentTable::default(),
            sequence: RequestSequence::new(),
            today: Box::new(local_today),
        }
    }

    /// Replace the source of "today". A selected date still on the old today
    /// moves to the new one; a date set with [`with_date`](Self::with_date) stays.
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + Send + 'static) -> Self {
        if self.selected_date == (self.today)() {
            self.selected_date = today();
        }
        self.today = Box::new(today);
        self
    }

    /// Start on `date` instead of today. Takes effect on the next fetch.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.selected_date = date;
        self
    }

    pub fn with_patient_name(mut self, name: &str) -> Self {
        self.patient_name = non_blank(name);
        self
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Value shown in the date picker, `YYYY-MM-DD`.
    pub fn date_picker_value(&self) -> String {
        self.selected_date.format("%Y-%m-%d").to_string()
    }

    pub fn patient_name(&self) -> Option<&str> {
        self.patient_name.as_deref()
    }

    pub fn table(&self) -> &AppointmentTable {
        &self.table
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

    /// Page ready.
    pub fn load(&mut self) -> PageResult {
        self.reload()
    }

    /// Input on the search bar.
    pub fn on_search(&mut self, text: &str) -> PageResult {
        self.patient_name = non_blank(text);
        self.reload()
    }

    /// The "today" button.
    pub fn on_today(&mut self) -> PageResult {
        self.selected_date = (self.today)();
        self.reload()
    }

    /// Change on the date picker.
    pub fn on_date_picked(&mut self, date: NaiveDate) -> PageResult {
        self.selected_date = date;
        self.reload()
    }

    fn reload(&mut self) -> PageResult {
        let (ticket, query) = self.begin_fetch();
        let result = self.fetch(&query);
        self.apply(ticket, result)
    }

    /// Take a ticket for the current filter state.
    pub fn begin_fetch(&self) -> (Ticket, AppointmentQuery) {
        let query = AppointmentQuery {
            date: self.selected_date,
            patient_name: self.patient_name.clone(),
        };
        (self.sequence.issue(), query)
    }

    pub fn fetch(&mut self, query: &AppointmentQuery) -> Result<Vec<Appointment>> {
        let token = self
            .session
            .token()
            .map(str::to_string)
            .ok_or(ClinicError::MissingToken)?;
        self.api.list_appointments(query, &token)
    }

    /// Clear and repopulate the table, unless a newer fetch was issued meanwhile.
    pub fn apply(&mut self, ticket: Ticket, result: Result<Vec<Appointment>>) -> PageResult {
        if !self.sequence.is_latest(ticket) {
            debug!(ticket = ticket.number(), "discarding superseded appointment list");
            return PageResult::stale();
        }
        match result {
            Ok(appointments) => {
                debug!(count = appointments.len(), date = %self.selected_date, "rendering appointments");
                self.table = AppointmentTable::from_appointments(&appointments);
                PageResult::applied()
            }
            Err(ClinicError::MissingToken) => {
                self.table = AppointmentTable::Failed;
                PageResult::applied().with_message(PageMessage::error(TOKEN_MISSING))
            }
            Err(e) => {
                error!(error = %e, "error loading appointments");
                self.table = AppointmentTable::Failed;
                PageResult::applied()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::{DEMO_DOCTOR_TOKEN, InMemoryClinic};
    use crate::session::Role;
    use crate::view::row::NO_APPOINTMENTS_MESSAGE;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dashboard() -> DoctorDashboard<InMemoryClinic> {
        let clinic = InMemoryClinic::demo(day("2024-06-01")).with_appointment(
            1,
            day("2024-05-20"),
            "Ola Berg",
            "555-0150",
            "ola.berg@mail.com",
        );
        DoctorDashboard::new(clinic, Session::new(Role::Doctor, DEMO_DOCTOR_TOKEN))
            .with_clock(|| day("2024-06-01"))
    }

    fn row_names(dash: &DoctorDashboard<InMemoryClinic>) -> Vec<String> {
        dash.table().rows().iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn defaults_to_today() {
        let mut dash = dashboard();
        assert_eq!(dash.date_picker_value(), "2024-06-01");
        assert!(dash.patient_name().is_none());
        dash.load();
        assert_eq!(row_names(&dash), vec!["Jane Doe", "Mark Owens"]);
    }

    #[test]
    fn today_resets_after_picking_a_date() {
        let mut dash = dashboard();
        dash.load();
        dash.on_date_picked(day("2024-05-20"));
        assert_eq!(row_names(&dash), vec!["Ola Berg"]);

        dash.on_today();
        assert_eq!(dash.date_picker_value(), "2024-06-01");
        assert_eq!(row_names(&dash), vec!["Jane Doe", "Mark Owens"]);
    }

    #[test]
    fn unmatched_search_shows_placeholder() {
        let mut dash = dashboard();
        dash.on_search("No Name Matches XYZ");
        assert_eq!(dash.table(), &AppointmentTable::Empty);
        let html = dash.table().to_html().unwrap();
        assert!(html.contains(NO_APPOINTMENTS_MESSAGE));
    }

    #[test]
    fn blank_search_clears_name_filter() {
        let mut dash = dashboard();
        dash.on_search("mark");
        assert_eq!(dash.patient_name(), Some("mark"));
        assert_eq!(row_names(&dash), vec!["Mark Owens"]);
        dash.on_search("   ");
        assert!(dash.patient_name().is_none());
        assert_eq!(row_names(&dash).len(), 2);
    }

    #[test]
    fn initial_date_and_name_apply_on_load() {
        let mut dash = dashboard()
            .with_date(day("2024-05-20"))
            .with_patient_name(" ola ");
        assert!(dash.api().calls().is_empty());
        dash.load();
        assert_eq!(dash.date_picker_value(), "2024-05-20");
        assert_eq!(dash.patient_name(), Some("ola"));
        assert_eq!(row_names(&dash), vec!["Ola Berg"]);
    }

    #[test]
    fn clock_after_date_keeps_the_date() {
        let clinic = InMemoryClinic::demo(day("2024-06-01"));
        let mut dash = DoctorDashboard::new(clinic, Session::new(Role::Doctor, DEMO_DOCTOR_TOKEN))
            .with_date(day("2024-05-20"))
            .with_clock(|| day("2024-06-01"));
        assert_eq!(dash.date_picker_value(), "2024-05-20");
        dash.on_today();
        assert_eq!(dash.date_picker_value(), "2024-06-01");
    }

    #[test]
    fn fetch_failure_shows_error_row() {
        let mut dash = dashboard();
        dash.api_mut().set_offline(true);
        let result = dash.load();
        assert!(result.messages.is_empty());
        assert_eq!(dash.table(), &AppointmentTable::Failed);
    }

    #[test]
    fn missing_token_skips_the_call() {
        let clinic = InMemoryClinic::demo(day("2024-06-01"));
        let mut dash =
            DoctorDashboard::new(clinic, Session::anonymous()).with_clock(|| day("2024-06-01"));
        let result = dash.load();
        assert_eq!(result.messages, vec![PageMessage::error(TOKEN_MISSING)]);
        assert_eq!(dash.table(), &AppointmentTable::Failed);
        assert!(dash.api().calls().is_empty());
    }

    #[test]
    fn late_response_for_older_date_is_dropped() {
        let mut dash = dashboard();
        dash.selected_date = day("2024-05-20");
        let (old_ticket, old_query) = dash.begin_fetch();
        dash.selected_date = day("2024-06-01");
        let (new_ticket, new_query) = dash.begin_fetch();

        let new_result = dash.fetch(&new_query);
        let old_result = dash.fetch(&old_query);
        assert!(dash.apply(new_ticket, new_result).applied);
        assert!(!dash.apply(old_ticket, old_result).applied);
        assert_eq!(row_names(&dash), vec!["Jane Doe", "Mark Owens"]);
    }
}
