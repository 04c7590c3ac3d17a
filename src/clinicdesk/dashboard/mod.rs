//! # Page Controllers
//!
//! One controller per dashboard page. A controller owns its API client, its
//! session and the container it renders into, and reacts to triggers:
//!
//! - [`admin::AdminDashboard`]: doctor cards, filters, create and delete
//! - [`doctor::DoctorDashboard`]: the day's appointments, search and date picker
//!
//! ## No I/O in controllers
//!
//! Controllers never print, prompt or navigate. What the page should do as a
//! result of a trigger (alert, close a modal, go to the login route, open the
//! booking overlay) is returned as a [`PageResult`] and carried out by the host.
//! User failures (network errors, rejections, expired sessions) are results,
//! not `Err`s.
//!
//! ## Ordering
//!
//! Every fetching trigger takes a ticket from the controller's
//! [`RequestSequence`]. Only the newest ticket's response is rendered; a
//! response that resolves after a newer request was issued is dropped.

use crate::model::{Doctor, Patient};

pub mod admin;
pub mod doctor;
pub mod sequence;

pub use sequence::{RequestSequence, Ticket};

pub const LOGIN_ROUTE: &str = "/login";
pub const ADD_DOCTOR_MODAL: &str = "addDoctor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl PageMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Payload for the booking overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub doctor: Doctor,
    pub patient: Patient,
}

/// What the host page should do after a trigger.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub messages: Vec<PageMessage>,
    pub navigate_to: Option<String>,
    pub close_modal: Option<String>,
    pub booking: Option<BookingRequest>,
    /// False when the response was superseded and nothing was rendered.
    pub applied: bool,
}

impl PageResult {
    pub fn applied() -> Self {
        Self {
            applied: true,
            ..Self::default()
        }
    }

    pub fn stale() -> Self {
        Self::default()
    }

    pub fn add_message(&mut self, message: PageMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: PageMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_navigation(mut self, route: impl Into<String>) -> Self {
        self.navigate_to = Some(route.into());
        self
    }

    pub fn with_closed_modal(mut self, modal: impl Into<String>) -> Self {
        self.close_modal = Some(modal.into());
        self
    }

    pub fn with_booking(mut self, booking: BookingRequest) -> Self {
        self.booking = Some(booking);
        self
    }

    pub fn merge(&mut self, other: PageResult) {
        self.messages.extend(other.messages);
        if other.navigate_to.is_some() {
            self.navigate_to = other.navigate_to;
        }
        if other.close_modal.is_some() {
            self.close_modal = other.close_modal;
        }
        if other.booking.is_some() {
            self.booking = other.booking;
        }
        self.applied |= other.applied;
    }
}
