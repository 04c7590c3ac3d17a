//! # Rendering Module
//!
//! Terminal output for the CLI host. Templates live in `templates/` and are
//! rendered with `outstanding`, whose `style` filter applies the named styles
//! from [`CLINIC_THEME`] and drops them when stdout is not a color terminal.
//!
//! Column widths and padding are computed here because they need Unicode-aware
//! width handling; templates only arrange the pieces.

use super::styles::CLINIC_THEME;
use super::templates::{
    APPOINTMENTS_TEMPLATE, BOOKING_TEMPLATE, DOCTOR_LIST_TEMPLATE, SESSION_TEMPLATE,
};
use clinicdesk::dashboard::{BookingRequest, MessageLevel, PageMessage};
use clinicdesk::session::Session;
use clinicdesk::view::card::{CardAction, DoctorList};
use clinicdesk::view::row::AppointmentTable;
use colored::*;
use outstanding::{render, render_with_color, ThemeChoice};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

#[derive(Serialize)]
struct CardLine {
    index: String,
    indent: String,
    name: String,
    specialty: String,
    contact: String,
    times: String,
    action: String,
}

#[derive(Serialize)]
struct DoctorListData {
    cards: Vec<CardLine>,
    message: Option<String>,
}

#[derive(Serialize)]
struct RowLine {
    id: String,
    rest: String,
}

#[derive(Serialize)]
struct AppointmentsData {
    title: String,
    header: String,
    rows: Vec<RowLine>,
    notice: Option<String>,
}

#[derive(Serialize)]
struct BookingData {
    doctor: String,
    patient: String,
    times: String,
}

#[derive(Serialize)]
struct SessionData {
    viewer: String,
    role: String,
    token: String,
}

fn render_themed<T: Serialize>(template: &str, data: &T, use_color: Option<bool>) -> String {
    match use_color {
        Some(c) => render_with_color(template, data, ThemeChoice::from(&*CLINIC_THEME), c),
        None => render(template, data, ThemeChoice::from(&*CLINIC_THEME)),
    }
    .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(|v| v.width()).max().unwrap_or(0).max(header.width())
}

/// Renders the admin dashboard's container: cards, or the container message.
pub fn render_doctor_list(list: &DoctorList) -> String {
    render_doctor_list_internal(list, None)
}

fn render_doctor_list_internal(list: &DoctorList, use_color: Option<bool>) -> String {
    if list.message().is_none() && list.cards().is_empty() {
        return "No doctors listed.\n".to_string();
    }

    let index_width = list
        .cards()
        .iter()
        .map(|c| format!("#{}", c.id()).width())
        .max()
        .unwrap_or(0);

    let cards = list
        .cards()
        .iter()
        .map(|card| {
            let doctor = &card.doctor;
            let contact = [doctor.email.as_str(), doctor.phone.as_str()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" · ");
            let times = if doctor.available_times.is_empty() {
                "no available times".to_string()
            } else {
                doctor.available_times.join(", ")
            };
            let action = match card.action {
                CardAction::Delete => format!("delete: clinicdesk delete-doctor {}", doctor.id),
                CardAction::Book => format!("book: clinicdesk book {}", doctor.id),
                CardAction::LoginPrompt => "book: log in as a patient first".to_string(),
                CardAction::NoAction => String::new(),
            };
            CardLine {
                index: pad(&format!("#{}", doctor.id), index_width),
                indent: " ".repeat(index_width + 1),
                name: doctor.name.clone(),
                specialty: doctor.specialty.clone(),
                contact,
                times,
                action,
            }
        })
        .collect();

    let data = DoctorListData {
        cards,
        message: list.message().map(str::to_string),
    };
    render_themed(DOCTOR_LIST_TEMPLATE, &data, use_color)
}

/// Renders the doctor dashboard's patient table with aligned columns.
pub fn render_appointments(date: &str, patient: Option<&str>, table: &AppointmentTable) -> String {
    render_appointments_internal(date, patient, table, None)
}

fn render_appointments_internal(
    date: &str,
    patient: Option<&str>,
    table: &AppointmentTable,
    use_color: Option<bool>,
) -> String {
    let title = match patient {
        Some(name) => format!("Appointments for {} (patient: {})", date, name),
        None => format!("Appointments for {}", date),
    };

    let rows = table.rows();
    let ids: Vec<String> = rows.iter().map(|r| r.id.to_string()).collect();
    let id_w = column_width("ID", ids.iter().map(String::as_str));
    let name_w = column_width("Name", rows.iter().map(|r| r.name.as_str()));
    let phone_w = column_width("Phone", rows.iter().map(|r| r.phone.as_str()));

    let header = [
        pad("ID", id_w),
        pad("Name", name_w),
        pad("Phone", phone_w),
        "Email".to_string(),
    ]
    .join(COLUMN_GAP);

    let lines = rows
        .iter()
        .zip(&ids)
        .map(|(row, id)| RowLine {
            id: pad(id, id_w),
            rest: format!(
                "{gap}{}{gap}{}{gap}{}",
                pad(&row.name, name_w),
                pad(&row.phone, phone_w),
                row.email,
                gap = COLUMN_GAP
            ),
        })
        .collect();

    let data = AppointmentsData {
        title,
        header,
        rows: lines,
        notice: table.notice().map(str::to_string),
    };
    render_themed(APPOINTMENTS_TEMPLATE, &data, use_color)
}

pub fn render_booking(booking: &BookingRequest) -> String {
    render_booking_internal(booking, None)
}

fn render_booking_internal(booking: &BookingRequest, use_color: Option<bool>) -> String {
    let doctor = &booking.doctor;
    let patient = &booking.patient;
    let data = BookingData {
        doctor: format!("Dr. {} ({})", doctor.name, doctor.specialty),
        patient: if patient.email.is_empty() {
            patient.name.clone()
        } else {
            format!("{} <{}>", patient.name, patient.email)
        },
        times: if doctor.available_times.is_empty() {
            "none".to_string()
        } else {
            doctor.available_times.join(", ")
        },
    };
    render_themed(BOOKING_TEMPLATE, &data, use_color)
}

pub fn render_session(session: &Session) -> String {
    render_session_internal(session, None)
}

fn render_session_internal(session: &Session, use_color: Option<bool>) -> String {
    let token = match session.token() {
        Some(t) if t.chars().count() > 6 => format!("{}…", t.chars().take(6).collect::<String>()),
        Some(t) => t.to_string(),
        None => "(none)".to_string(),
    };
    let data = SessionData {
        viewer: session.viewer().to_string(),
        role: session
            .role
            .map(|r| r.to_string())
            .unwrap_or_else(|| "(none)".to_string()),
        token,
    };
    render_themed(SESSION_TEMPLATE, &data, use_color)
}

pub fn render_messages(messages: &[PageMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let styled = match message.level {
                MessageLevel::Info => message.content.as_str().dimmed(),
                MessageLevel::Success => message.content.as_str().green(),
                MessageLevel::Warning => message.content.as_str().yellow(),
                MessageLevel::Error => message.content.as_str().red(),
            };
            format!("{}\n", styled)
        })
        .collect()
}

/// Prints page messages (the page's alerts) to stdout.
pub fn print_messages(messages: &[PageMessage]) {
    print!("{}", render_messages(messages));
}
