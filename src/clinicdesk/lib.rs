//! # clinicdesk Architecture
//!
//! clinicdesk is the **view layer of a clinic-management application** packaged as a
//! library: doctor cards, appointment tables and the controllers that drive them,
//! on top of the clinic's REST backend. The CLI in `main.rs` is one host for it; a
//! browser or desktop shell would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host (cli/, wired by main.rs)                              │
//! │  - Parses arguments, asks for confirmation, prints output   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Controllers (dashboard/)                                   │
//! │  - One per page: admin dashboard, doctor dashboard          │
//! │  - Trigger in, PageResult out (alerts, navigation, overlay) │
//! │  - Stale responses dropped via request tickets              │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Renderers (view/)           │ │  API client (client/)      │
//! │  - Pure: data in, HTML out   │ │  - ClinicApi trait         │
//! │  - Cards, rows, containers   │ │  - HttpClinic, InMemory    │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Session
//!
//! Token and role are an explicit [`session::Session`] handed to each controller.
//! Card actions are chosen by matching on the derived [`session::Viewer`], so a
//! card exposes exactly one action set.
//!
//! ## Testing Strategy
//!
//! 1. **Renderers**: assert on the produced fragments directly.
//! 2. **Controllers**: run against [`client::memory::InMemoryClinic`], including
//!    offline failures and out-of-order responses.
//! 3. **CLI**: integration tests in `tests/` against the `--demo` backend.
//!
//! ## Module Overview
//!
//! - [`client`]: backend access
//! - [`config`]: configuration management
//! - [`dashboard`]: page controllers
//! - [`error`]: error types
//! - [`model`]: records (`Doctor`, `Appointment`, `Patient`, ...)
//! - [`session`]: session context and its persistence
//! - [`view`]: renderers

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod session;
pub mod view;
