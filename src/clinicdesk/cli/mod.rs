//! # CLI Behavior
//!
//! This is **one possible host** for the clinicdesk dashboards, not the application
//! itself. Everything it shows comes from the page controllers in
//! `clinicdesk::dashboard`; this module turns triggers into commands and page
//! state into terminal output.
//!
//! ## Session
//!
//! `clinicdesk login <role> <token>` stores the session in the data directory
//! (`CLINICDESK_HOME`, or the platform data dir). Every other command reads it and
//! hands it to the controller it drives. `logout` clears it.
//!
//! ## Output
//!
//! Page messages (the dashboards' alerts) are printed first, colored by level.
//! Then the page content: the doctor card list or the appointment table. With
//! `--html` the content is printed as the HTML fragment the page would insert.
//!
//! ## Module Structure
//!
//! - `args`: argument parsing via clap
//! - `commands`: context setup and per-command handlers
//! - `render`: terminal output (templates, colors, columns)
//! - `styles`: named terminal styles
//! - `templates`: output templates

mod args;
mod commands;
mod render;
mod styles;
mod templates;

pub use commands::run;
