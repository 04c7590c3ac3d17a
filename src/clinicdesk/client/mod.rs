//! # API Client Layer
//!
//! The clinic backend is reached through the [`ClinicApi`] trait, so the
//! dashboards never know whether they talk to a real server or not.
//!
//! ## Implementations
//!
//! - [`http::HttpClinic`]: the REST/JSON backend over `reqwest`
//! - [`memory::InMemoryClinic`]: seeded in-process backend for tests and `--demo`
//!
//! Every call either returns parsed data or an error. Retrying is never done
//! here; a failed call ends that user action.

use crate::error::Result;
use crate::model::{Appointment, Doctor, NewDoctor, Patient};
use chrono::NaiveDate;

pub mod http;
pub mod memory;

/// Doctor filter as typed into the three filter fields. Blank means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub name: Option<String>,
    pub time: Option<String>,
    pub specialty: Option<String>,
}

impl DoctorFilter {
    /// Build a filter from raw field values, mapping blank input to `None`.
    pub fn from_fields(name: &str, time: &str, specialty: &str) -> Self {
        Self {
            name: non_blank(name),
            time: non_blank(time),
            specialty: non_blank(specialty),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.name.is_none() && self.time.is_none() && self.specialty.is_none()
    }

    /// Name is a case-insensitive substring, time a slot prefix, specialty an
    /// exact case-insensitive match.
    pub fn matches(&self, doctor: &Doctor) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .is_none_or(|name| contains_ignore_case(&doctor.name, name));
        let specialty_ok = self
            .specialty
            .as_deref()
            .is_none_or(|s| doctor.specialty.eq_ignore_ascii_case(s));
        let time_ok = self
            .time
            .as_deref()
            .is_none_or(|time| doctor.available_times.iter().any(|slot| slot.starts_with(time)));
        name_ok && specialty_ok && time_ok
    }
}

/// Doctor-side appointment listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub date: NaiveDate,
    pub patient_name: Option<String>,
}

/// Result of a create call. `success == false` is a rejection, not a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: Option<String>,
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Abstract interface to the clinic backend.
pub trait ClinicApi {
    fn list_doctors(&mut self) -> Result<Vec<Doctor>>;

    fn filter_doctors(&mut self, filter: &DoctorFilter) -> Result<Vec<Doctor>>;

    fn save_doctor(&mut self, doctor: &NewDoctor, token: &str) -> Result<SaveOutcome>;

    fn delete_doctor(&mut self, id: i64, token: &str) -> Result<DeleteOutcome>;

    fn list_appointments(&mut self, query: &AppointmentQuery, token: &str)
    -> Result<Vec<Appointment>>;

    /// `Ok(None)` when the token no longer resolves to a patient.
    fn patient_profile(&mut self, token: &str) -> Result<Option<Patient>>;
}

impl<A: ClinicApi + ?Sized> ClinicApi for Box<A> {
    fn list_doctors(&mut self) -> Result<Vec<Doctor>> {
        (**self).list_doctors()
    }

    fn filter_doctors(&mut self, filter: &DoctorFilter) -> Result<Vec<Doctor>> {
        (**self).filter_doctors(filter)
    }

    fn save_doctor(&mut self, doctor: &NewDoctor, token: &str) -> Result<SaveOutcome> {
        (**self).save_doctor(doctor, token)
    }

    fn delete_doctor(&mut self, id: i64, token: &str) -> Result<DeleteOutcome> {
        (**self).delete_doctor(id, token)
    }

    fn list_appointments(
        &mut self,
        query: &AppointmentQuery,
        token: &str,
    ) -> Result<Vec<Appointment>> {
        (**self).list_appointments(query, token)
    }

    fn patient_profile(&mut self, token: &str) -> Result<Option<Patient>> {
        (**self).patient_profile(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_unconstrained() {
        let filter = DoctorFilter::from_fields("  ", "", "\t");
        assert!(filter.is_unconstrained());
        assert_eq!(filter, DoctorFilter::default());
    }

    #[test]
    fn fields_are_trimmed() {
        let filter = DoctorFilter::from_fields(" ana ", "09:00", "");
        assert_eq!(filter.name.as_deref(), Some("ana"));
        assert_eq!(filter.time.as_deref(), Some("09:00"));
        assert!(filter.specialty.is_none());
    }
}
