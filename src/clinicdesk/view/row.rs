use super::{APPOINTMENT_ROWS_TEMPLATE, render};
use crate::error::Result;
use crate::model::{Appointment, PatientRow};

pub const NO_APPOINTMENTS_MESSAGE: &str = "No Appointments found for today.";
pub const APPOINTMENTS_ERROR_MESSAGE: &str = "Error loading appointments. Try again later.";

/// Body of the doctor dashboard's patient table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppointmentTable {
    #[default]
    Blank,
    Rows(Vec<PatientRow>),
    /// The fetch succeeded with nothing to show.
    Empty,
    /// The fetch failed.
    Failed,
}

impl AppointmentTable {
    /// Clear and repopulate from a listing. An empty listing becomes the placeholder row.
    pub fn from_appointments(appointments: &[Appointment]) -> Self {
        if appointments.is_empty() {
            return AppointmentTable::Empty;
        }
        AppointmentTable::Rows(appointments.iter().map(Appointment::patient_row).collect())
    }

    pub fn rows(&self) -> &[PatientRow] {
        match self {
            AppointmentTable::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Text of the single full-width row, when one is shown.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            AppointmentTable::Empty => Some(NO_APPOINTMENTS_MESSAGE),
            AppointmentTable::Failed => Some(APPOINTMENTS_ERROR_MESSAGE),
            AppointmentTable::Blank | AppointmentTable::Rows(_) => None,
        }
    }

    pub fn to_html(&self) -> Result<String> {
        if matches!(self, AppointmentTable::Blank) {
            return Ok(String::new());
        }
        render(
            APPOINTMENT_ROWS_TEMPLATE,
            minijinja::context! { rows => self.rows(), notice => self.notice() },
        )
    }
}
