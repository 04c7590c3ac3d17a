//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as standalone
//! files, so they can be edited and diffed apart from the code. They are
//! included here as string constants.
//!
//! Templates end lines explicitly; blocks use `-%}` so loops and conditionals
//! do not leak blank lines. Layout math (column widths, padding) is done in
//! Rust and handed to the template as ready strings.

pub const DOCTOR_LIST_TEMPLATE: &str = include_str!("templates/doctor_list.tmp");
pub const APPOINTMENTS_TEMPLATE: &str = include_str!("templates/appointments.tmp");
pub const BOOKING_TEMPLATE: &str = include_str!("templates/booking.tmp");
pub const SESSION_TEMPLATE: &str = include_str!("templates/session.tmp");
