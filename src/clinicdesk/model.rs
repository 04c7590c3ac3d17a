use serde::{Deserialize, Serialize};

/// A doctor as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Ordered slot labels, e.g. `"09:00-10:00"`.
    #[serde(default)]
    pub available_times: Vec<String>,
}

impl Doctor {
    pub fn new(id: i64, name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            specialty: specialty.into(),
            email: String::new(),
            phone: String::new(),
            available_times: Vec::new(),
        }
    }

    pub fn with_contact(mut self, email: impl Into<String>, phone: impl Into<String>) -> Self {
        self.email = email.into();
        self.phone = phone.into();
        self
    }

    pub fn with_times<I, S>(mut self, times: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_times = times.into_iter().map(Into::into).collect();
        self
    }
}

/// Creation payload for a doctor. The password only ever travels in this direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDoctor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub specialty: String,
    pub time: String,
}

/// An appointment as returned by the doctor's appointment listing.
///
/// The backend sends more than we need; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    #[serde(default, alias = "patientName")]
    pub name: String,
    #[serde(default, alias = "patientPhone")]
    pub phone: String,
    #[serde(default, alias = "patientEmail")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_time: Option<String>,
}

impl Appointment {
    pub fn patient_row(&self) -> PatientRow {
        PatientRow {
            id: self.id,
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}

/// The patient projection of an appointment, one table row each.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PatientRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Profile of the logged-in patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
