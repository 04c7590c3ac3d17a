use super::{
    AppointmentQuery, ClinicApi, DeleteOutcome, DoctorFilter, SaveOutcome, contains_ignore_case,
};
use crate::config::ClinicConfig;
use crate::error::{ClinicError, Result};
use crate::model::{Appointment, Doctor, NewDoctor, Patient};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Placeholder the backend expects for an absent path filter.
const NULL_SEGMENT: &str = "null";

/// REST/JSON client for the clinic backend.
pub struct HttpClinic {
    client: Client,
    base: Url,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DoctorsBody {
    Envelope { doctors: Vec<Doctor> },
    Bare(Vec<Doctor>),
}

impl DoctorsBody {
    fn into_vec(self) -> Vec<Doctor> {
        match self {
            DoctorsBody::Envelope { doctors } => doctors,
            DoctorsBody::Bare(doctors) => doctors,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AppointmentsBody {
    Envelope { appointments: Vec<Appointment> },
    Bare(Vec<Appointment>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PatientBody {
    Envelope { patient: Patient },
    Bare(Patient),
}

impl HttpClinic {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| ClinicError::Url(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClinicError::Url(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &ClinicConfig) -> Result<Self> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append percent-encoded path segments to the base url.
    ///
    /// `.` and `..` are refused: the url parser collapses them (and their
    /// `%2E` forms), which would silently change the route.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(dots) = segments.iter().find(|s| is_dot_segment(s)) {
            return Err(ClinicError::Url(format!(
                "path segment {:?} cannot be sent",
                dots
            )));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClinicError::Url(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, op: &str, url: Url) -> Result<T> {
        debug!(op, "request");
        let response = self.client.get(url).send()?;
        let status = response.status();
        decode_json(op, status, &response.text()?)
    }
}

/// Non-2xx becomes [`ClinicError::Status`] with the server's message.
fn decode_json<T: DeserializeOwned>(op: &str, status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        warn!(op, status = status.as_u16(), "backend rejected request");
        return Err(ClinicError::Status {
            status: status.as_u16(),
            message: response_message(body).unwrap_or_default(),
        });
    }
    debug!(op, status = status.as_u16(), bytes = body.len(), "response");
    Ok(serde_json::from_str(body)?)
}

/// Create and delete report rejections as `success: false`, never as errors.
fn write_outcome(status: StatusCode, body: &str) -> (bool, Option<String>) {
    (status.is_success(), response_message(body))
}

/// An unknown or unauthorized token means there is no patient to book for.
fn decode_profile(status: StatusCode, body: &str) -> Result<Option<Patient>> {
    match status {
        StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
        _ => {
            let body: PatientBody = decode_json("patient_profile", status, body)?;
            Ok(Some(match body {
                PatientBody::Envelope { patient } => patient,
                PatientBody::Bare(patient) => patient,
            }))
        }
    }
}

/// Human-readable message out of a response body: either plain text or a JSON
/// object carrying `message`/`error`.
fn response_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(trimmed) {
        return ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string);
    }
    Some(trimmed.trim_matches('"').to_string())
}

fn segment(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NULL_SEGMENT)
}

fn is_dot_segment(value: &str) -> bool {
    matches!(value, "." | "..")
}

/// Moves a `.`/`..` value out of `value`; it is sent as `null` and applied locally.
fn take_dot_value(value: &mut Option<String>) -> Option<String> {
    if value.as_deref().is_some_and(is_dot_segment) {
        value.take()
    } else {
        None
    }
}

impl ClinicApi for HttpClinic {
    fn list_doctors(&mut self) -> Result<Vec<Doctor>> {
        let url = self.endpoint(&["doctor"])?;
        let body: DoctorsBody = self.get_json("list_doctors", url)?;
        Ok(body.into_vec())
    }

    fn filter_doctors(&mut self, filter: &DoctorFilter) -> Result<Vec<Doctor>> {
        let mut remote = filter.clone();
        let local = DoctorFilter {
            name: take_dot_value(&mut remote.name),
            time: take_dot_value(&mut remote.time),
            specialty: take_dot_value(&mut remote.specialty),
        };
        let url = self.endpoint(&[
            "doctor",
            "filter",
            segment(&remote.name),
            segment(&remote.time),
            segment(&remote.specialty),
        ])?;
        let body: DoctorsBody = self.get_json("filter_doctors", url)?;
        let mut doctors = body.into_vec();
        doctors.retain(|d| local.matches(d));
        Ok(doctors)
    }

    fn save_doctor(&mut self, doctor: &NewDoctor, token: &str) -> Result<SaveOutcome> {
        let url = self.endpoint(&["doctor", "register", token])?;
        debug!(op = "save_doctor", "request");
        let response = self.client.post(url).json(doctor).send()?;
        let status = response.status();
        let (success, message) = write_outcome(status, &response.text()?);
        Ok(SaveOutcome { success, message })
    }

    fn delete_doctor(&mut self, id: i64, token: &str) -> Result<DeleteOutcome> {
        let id = id.to_string();
        let url = self.endpoint(&["doctor", "delete", &id, token])?;
        debug!(op = "delete_doctor", "request");
        let response = self.client.delete(url).send()?;
        let status = response.status();
        let (success, message) = write_outcome(status, &response.text()?);
        Ok(DeleteOutcome { success, message })
    }

    fn list_appointments(
        &mut self,
        query: &AppointmentQuery,
        token: &str,
    ) -> Result<Vec<Appointment>> {
        let date = query.date.format("%Y-%m-%d").to_string();
        let mut remote_name = query.patient_name.clone();
        let local_name = take_dot_value(&mut remote_name);
        let url = self.endpoint(&["appointments", token, &date, segment(&remote_name)])?;
        let body: AppointmentsBody = self.get_json("list_appointments", url)?;
        let mut appointments = match body {
            AppointmentsBody::Envelope { appointments } => appointments,
            AppointmentsBody::Bare(appointments) => appointments,
        };
        if let Some(name) = local_name {
            appointments.retain(|a| contains_ignore_case(&a.name, &name));
        }
        Ok(appointments)
    }

    fn patient_profile(&mut self, token: &str) -> Result<Option<Patient>> {
        let url = self.endpoint(&["patient", "profile", token])?;
        debug!(op = "patient_profile", "request");
        let response = self.client.get(url).send()?;
        let status = response.status();
        decode_profile(status, &response.text()?)
    }
}
