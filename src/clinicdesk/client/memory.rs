use super::{
    AppointmentQuery, ClinicApi, DeleteOutcome, DoctorFilter, SaveOutcome, contains_ignore_case,
};
use crate::error::{ClinicError, Result};
use crate::model::{Appointment, Doctor, NewDoctor, Patient};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const DEMO_ADMIN_TOKEN: &str = "admin-demo-token";
pub const DEMO_DOCTOR_TOKEN: &str = "doctor-demo-token";
pub const DEMO_PATIENT_TOKEN: &str = "patient-demo-token";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAppointment {
    doctor_id: i64,
    date: NaiveDate,
    appointment: Appointment,
}

/// In-process clinic backend for testing and the `--demo` mode.
///
/// Mirrors the backend's answers (rejection messages included) closely enough
/// that the dashboards cannot tell the difference. Can be persisted to a JSON
/// file so state survives between CLI invocations.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InMemoryClinic {
    doctors: Vec<Doctor>,
    appointments: Vec<StoredAppointment>,
    admin_tokens: Vec<String>,
    /// token -> doctor id
    doctor_tokens: HashMap<String, i64>,
    /// token -> patient
    patient_tokens: HashMap<String, Patient>,
    next_id: i64,
    /// Day the demo seed was dated for; appointments move along with it.
    #[serde(default)]
    seeded_on: Option<NaiveDate>,
    #[serde(skip)]
    offline: bool,
    #[serde(skip)]
    calls: Vec<&'static str>,
}

impl InMemoryClinic {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// A small seeded clinic with one admin, one doctor and one patient session,
    /// and a few appointments on `today`.
    pub fn demo(today: NaiveDate) -> Self {
        let mut clinic = Self::new()
            .with_admin_token(DEMO_ADMIN_TOKEN)
            .with_doctor(
                Doctor::new(0, "Emily Adams", "Cardiology")
                    .with_contact("emily.adams@clinic.org", "555-0101")
                    .with_times(["09:00-10:00", "10:00-11:00", "14:00-15:00"]),
            )
            .with_doctor(
                Doctor::new(0, "Rahul Mehta", "Dermatology")
                    .with_contact("rahul.mehta@clinic.org", "555-0102")
                    .with_times(["11:00-12:00", "15:00-16:00"]),
            )
            .with_doctor(
                Doctor::new(0, "Sofia Lind", "Pediatrics")
                    .with_contact("sofia.lind@clinic.org", "555-0103")
                    .with_times(["09:00-10:00", "13:00-14:00"]),
            )
            .with_patient(
                DEMO_PATIENT_TOKEN,
                Patient {
                    id: 1,
                    name: "Jane Doe".into(),
                    email: "jane.doe@mail.com".into(),
                    phone: "555-0199".into(),
                    address: Some("12 Elm Street".into()),
                },
            );
        clinic = clinic.with_doctor_token(DEMO_DOCTOR_TOKEN, 1);
        for (name, phone, email) in [
            ("Jane Doe", "555-0199", "jane.doe@mail.com"),
            ("Mark Owens", "555-0177", "mark.owens@mail.com"),
        ] {
            clinic = clinic.with_appointment(1, today, name, phone, email);
        }
        clinic.seeded_on = Some(today);
        clinic
    }

    pub fn with_doctor(mut self, mut doctor: Doctor) -> Self {
        doctor.id = self.allocate_id();
        self.doctors.push(doctor);
        self
    }

    pub fn with_admin_token(mut self, token: &str) -> Self {
        self.admin_tokens.push(token.to_string());
        self
    }

    pub fn with_doctor_token(mut self, token: &str, doctor_id: i64) -> Self {
        self.doctor_tokens.insert(token.to_string(), doctor_id);
        self
    }

    pub fn with_patient(mut self, token: &str, patient: Patient) -> Self {
        self.patient_tokens.insert(token.to_string(), patient);
        self
    }

    pub fn with_appointment(
        mut self,
        doctor_id: i64,
        date: NaiveDate,
        name: &str,
        phone: &str,
        email: &str,
    ) -> Self {
        let id = self.allocate_id();
        self.appointments.push(StoredAppointment {
            doctor_id,
            date,
            appointment: Appointment {
                id,
                name: name.to_string(),
                phone: phone.to_string(),
                email: email.to_string(),
                appointment_time: None,
            },
        });
        self
    }

    /// Every call fails with a transport-style error while offline.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Names of the trait methods called so far, in order.
    pub fn calls(&self) -> &[&'static str] {
        &self.calls
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Load a persisted clinic, seeding a demo one if the file does not exist.
    ///
    /// A persisted demo is re-dated so its schedule keeps the same offsets
    /// from `today` it had from the day it was seeded.
    pub fn load_or_seed(path: &Path, today: NaiveDate) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::demo(today));
        }
        let content = fs::read_to_string(path)?;
        let mut clinic: Self = serde_json::from_str(&content)?;
        clinic.redate(today);
        Ok(clinic)
    }

    fn redate(&mut self, today: NaiveDate) {
        let Some(seeded_on) = self.seeded_on else {
            return;
        };
        let shift = today - seeded_on;
        if shift.num_days() == 0 {
            return;
        }
        for stored in &mut self.appointments {
            stored.date = stored.date.checked_add_signed(shift).unwrap_or(stored.date);
        }
        self.seeded_on = Some(today);
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn allocate_id(&mut self) -> i64 {
        if self.next_id < 1 {
            self.next_id = 1;
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn enter(&mut self, call: &'static str) -> Result<()> {
        self.calls.push(call);
        if self.offline {
            return Err(ClinicError::Api("backend unreachable".into()));
        }
        Ok(())
    }

    fn is_admin(&self, token: &str) -> bool {
        self.admin_tokens.iter().any(|t| t == token)
    }
}

impl ClinicApi for InMemoryClinic {
    fn list_doctors(&mut self) -> Result<Vec<Doctor>> {
        self.enter("list_doctors")?;
        Ok(self.doctors.clone())
    }

    fn filter_doctors(&mut self, filter: &DoctorFilter) -> Result<Vec<Doctor>> {
        self.enter("filter_doctors")?;
        Ok(self
            .doctors
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    fn save_doctor(&mut self, doctor: &NewDoctor, token: &str) -> Result<SaveOutcome> {
        self.enter("save_doctor")?;
        if !self.is_admin(token) {
            return Ok(SaveOutcome {
                success: false,
                message: Some("Unauthorized access.".into()),
            });
        }
        let duplicate = !doctor.email.is_empty()
            && self
                .doctors
                .iter()
                .any(|d| d.email.eq_ignore_ascii_case(&doctor.email));
        if duplicate {
            return Ok(SaveOutcome {
                success: false,
                message: Some("Doctor already exists.".into()),
            });
        }
        let mut record = Doctor::new(0, doctor.name.clone(), doctor.specialty.clone())
            .with_contact(doctor.email.clone(), doctor.phone.clone())
            .with_times(
                doctor
                    .time
                    .split(',')
                    .map(str::trim)
                    .filter(|slot| !slot.is_empty()),
            );
        record.id = self.allocate_id();
        self.doctors.push(record);
        Ok(SaveOutcome {
            success: true,
            message: Some("Doctor registered.".into()),
        })
    }

    fn delete_doctor(&mut self, id: i64, token: &str) -> Result<DeleteOutcome> {
        self.enter("delete_doctor")?;
        if !self.is_admin(token) {
            return Ok(DeleteOutcome {
                success: false,
                message: Some("Unauthorized.".into()),
            });
        }
        let before = self.doctors.len();
        self.doctors.retain(|d| d.id != id);
        if self.doctors.len() == before {
            return Ok(DeleteOutcome {
                success: false,
                message: Some("Doctor not found.".into()),
            });
        }
        self.appointments.retain(|a| a.doctor_id != id);
        Ok(DeleteOutcome {
            success: true,
            message: Some("Doctor deleted.".into()),
        })
    }

    fn list_appointments(
        &mut self,
        query: &AppointmentQuery,
        token: &str,
    ) -> Result<Vec<Appointment>> {
        self.enter("list_appointments")?;
        let doctor_id = *self
            .doctor_tokens
            .get(token)
            .ok_or_else(|| ClinicError::Status {
                status: 401,
                message: "Invalid or expired token".into(),
            })?;
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id && a.date == query.date)
            .filter(|a| {
                query
                    .patient_name
                    .as_deref()
                    .is_none_or(|name| contains_ignore_case(&a.appointment.name, name))
            })
            .map(|a| a.appointment.clone())
            .collect())
    }

    fn patient_profile(&mut self, token: &str) -> Result<Option<Patient>> {
        self.enter("patient_profile")?;
        Ok(self.patient_tokens.get(token).cloned())
    }
}
