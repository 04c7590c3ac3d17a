//! # CLI Layer
//!
//! This module is **one host** for the clinicdesk dashboards. It is the only place
//! that knows about terminal I/O, prompts and exit codes.
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments become typed [`Commands`] via clap
//! 2. **Context Setup**: data directory, config, stored session and backend
//! 3. **Dispatch**: each command drives a page controller through its triggers
//! 4. **Output**: page messages, then the page content (terminal or `--html`)
//!
//! ## Pages
//!
//! `doctors`, `add-doctor`, `delete-doctor` and `book` drive the admin dashboard;
//! `appointments` drives the doctor dashboard. Running `clinicdesk` with no
//! command lists doctors.

use super::args::{Cli, Commands};
use super::render::{
    print_messages, render_appointments, render_booking, render_doctor_list, render_session,
};
use chrono::{Local, NaiveDate};
use clap::Parser;
use clinicdesk::client::http::HttpClinic;
use clinicdesk::client::memory::InMemoryClinic;
use clinicdesk::client::{
    AppointmentQuery, ClinicApi, DeleteOutcome, DoctorFilter, SaveOutcome,
};
use clinicdesk::config::ClinicConfig;
use clinicdesk::dashboard::admin::AdminDashboard;
use clinicdesk::dashboard::doctor::DoctorDashboard;
use clinicdesk::dashboard::{PageMessage, PageResult, LOGIN_ROUTE};
use clinicdesk::error::{ClinicError, Result};
use clinicdesk::model::{Appointment, Doctor, NewDoctor, Patient};
use clinicdesk::session::{FileSessionStore, Role, Session, SessionStore};
use clinicdesk::view::card::CardAction;
use console::Term;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Overrides the platform data directory.
const HOME_ENV: &str = "CLINICDESK_HOME";

const DEMO_FILENAME: &str = "demo.json";

/// The backend a command talks to.
enum Backend {
    Http(HttpClinic),
    /// Seeded in-memory clinic, written back to `path` after each command.
    Demo { clinic: InMemoryClinic, path: PathBuf },
}

impl Backend {
    fn persist(&self) -> Result<()> {
        match self {
            Backend::Http(_) => Ok(()),
            Backend::Demo { clinic, path } => clinic.save(path),
        }
    }

    fn inner(&mut self) -> &mut dyn ClinicApi {
        match self {
            Backend::Http(http) => http,
            Backend::Demo { clinic, .. } => clinic,
        }
    }
}

impl ClinicApi for Backend {
    fn list_doctors(&mut self) -> Result<Vec<Doctor>> {
        self.inner().list_doctors()
    }

    fn filter_doctors(&mut self, filter: &DoctorFilter) -> Result<Vec<Doctor>> {
        self.inner().filter_doctors(filter)
    }

    fn save_doctor(&mut self, doctor: &NewDoctor, token: &str) -> Result<SaveOutcome> {
        self.inner().save_doctor(doctor, token)
    }

    fn delete_doctor(&mut self, id: i64, token: &str) -> Result<DeleteOutcome> {
        self.inner().delete_doctor(id, token)
    }

    fn list_appointments(
        &mut self,
        query: &AppointmentQuery,
        token: &str,
    ) -> Result<Vec<Appointment>> {
        self.inner().list_appointments(query, token)
    }

    fn patient_profile(&mut self, token: &str) -> Result<Option<Patient>> {
        self.inner().patient_profile(token)
    }
}

struct AppContext {
    data_dir: PathBuf,
    config: ClinicConfig,
    sessions: FileSessionStore,
    demo: bool,
    html: bool,
}

impl AppContext {
    fn backend(&self) -> Result<Backend> {
        if self.demo {
            let path = self.data_dir.join(DEMO_FILENAME);
            let clinic = InMemoryClinic::load_or_seed(&path, today())?;
            debug!(path = %path.display(), "using demo backend");
            return Ok(Backend::Demo { clinic, path });
        }
        Ok(Backend::Http(HttpClinic::from_config(&self.config)?))
    }

    fn session(&self) -> Result<Session> {
        self.sessions.load()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        None => handle_doctors(&ctx, "", "", ""),
        Some(Commands::Login { role, token }) => handle_login(&mut ctx, role.into(), &token),
        Some(Commands::Logout) => handle_logout(&mut ctx),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::Doctors {
            name,
            time,
            specialty,
        }) => handle_doctors(&ctx, &name, &time, &specialty),
        Some(Commands::AddDoctor {
            name,
            email,
            phone,
            password,
            specialty,
            time,
        }) => {
            let form = NewDoctor {
                name,
                email,
                phone,
                password,
                specialty,
                time,
            };
            handle_add_doctor(&ctx, &form)
        }
        Some(Commands::DeleteDoctor { id, yes }) => handle_delete_doctor(&ctx, id, yes),
        Some(Commands::Book { id }) => handle_book(&ctx, id),
        Some(Commands::Appointments {
            date,
            today,
            patient,
        }) => handle_appointments(&ctx, date, today, patient),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    match std::env::var(HOME_ENV) {
        Ok(home) if !home.trim().is_empty() => Ok(PathBuf::from(home)),
        _ => ProjectDirs::from("org", "clinicdesk", "clinicdesk")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| ClinicError::Api("Could not determine a data directory.".to_string())),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = data_dir()?;
    let mut config = ClinicConfig::load(&data_dir)?.with_env_overrides();
    if let Some(url) = &cli.api_url {
        config.set_api_url(url)?;
    }
    debug!(data_dir = %data_dir.display(), api_url = %config.api_url, "context ready");

    Ok(AppContext {
        sessions: FileSessionStore::new(&data_dir),
        data_dir,
        config,
        demo: cli.demo,
        html: cli.html,
    })
}

fn print_result(result: &PageResult) {
    print_messages(&result.messages);
    if result.navigate_to.as_deref() == Some(LOGIN_ROUTE) {
        print_messages(&[PageMessage::info(
            "Log in again with `clinicdesk login <role> <token>`.",
        )]);
    }
}

/// Prints the admin page content after a trigger ran.
fn print_doctor_page(ctx: &AppContext, dash: &AdminDashboard<Backend>) -> Result<()> {
    if ctx.html {
        println!("{}", dash.content().to_html()?);
    } else {
        print!("{}", render_doctor_list(dash.content()));
    }
    Ok(())
}

fn admin_page(ctx: &AppContext) -> Result<AdminDashboard<Backend>> {
    let mut dash = AdminDashboard::new(ctx.backend()?, ctx.session()?);
    let result = dash.load();
    print_result(&result);
    Ok(dash)
}

fn handle_login(ctx: &mut AppContext, role: Role, token: &str) -> Result<()> {
    let session = Session::new(role, token);
    if session.token().is_none() {
        return Err(ClinicError::MissingToken);
    }
    ctx.sessions.save(&session)?;
    info!(role = %role, "session stored");
    print_messages(&[PageMessage::success(format!("Logged in as {}.", role))]);
    Ok(())
}

fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    ctx.sessions.clear()?;
    print_messages(&[PageMessage::success("Logged out.")]);
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    print!("{}", render_session(&ctx.session()?));
    Ok(())
}

fn handle_doctors(ctx: &AppContext, name: &str, time: &str, specialty: &str) -> Result<()> {
    let filter = DoctorFilter::from_fields(name, time, specialty);
    let mut dash = AdminDashboard::new(ctx.backend()?, ctx.session()?);
    let result = if filter.is_unconstrained() {
        dash.load()
    } else {
        dash.on_filter_change(name, time, specialty)
    };
    print_result(&result);
    print_doctor_page(ctx, &dash)
}

fn handle_add_doctor(ctx: &AppContext, form: &NewDoctor) -> Result<()> {
    let mut dash = admin_page(ctx)?;
    let result = dash.add_doctor(form);
    if let Some(modal) = &result.close_modal {
        debug!(modal = %modal, "form closed");
    }
    print_result(&result);
    dash.api().persist()?;
    if result.applied {
        print_doctor_page(ctx, &dash)?;
    }
    Ok(())
}

fn handle_delete_doctor(ctx: &AppContext, id: i64, yes: bool) -> Result<()> {
    let mut dash = admin_page(ctx)?;
    let deletable = dash
        .content()
        .card(id)
        .is_some_and(|card| card.action == CardAction::Delete);

    let confirmed = match dash.delete_prompt(id) {
        Some(prompt) if deletable && !yes => confirm(&prompt)?,
        _ => true,
    };
    if !confirmed {
        print_messages(&[PageMessage::info("Deletion cancelled.")]);
        return Ok(());
    }

    let result = dash.delete_doctor(id, true);
    print_result(&result);
    dash.api().persist()?;
    if result.applied {
        print_doctor_page(ctx, &dash)?;
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    let term = Term::stderr();
    term.write_str(&format!("{} [y/N] ", prompt))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn handle_book(ctx: &AppContext, id: i64) -> Result<()> {
    let mut dash = admin_page(ctx)?;
    let result = dash.book(id);
    print_result(&result);
    if let Some(booking) = &result.booking {
        print!("{}", render_booking(booking));
    }
    Ok(())
}

fn handle_appointments(
    ctx: &AppContext,
    date: Option<NaiveDate>,
    jump_to_today: bool,
    patient: Option<String>,
) -> Result<()> {
    let mut dash = DoctorDashboard::new(ctx.backend()?, ctx.session()?);
    if let Some(date) = date {
        dash = dash.with_date(date);
    }
    if let Some(patient) = &patient {
        dash = dash.with_patient_name(patient);
    }
    let result = if jump_to_today {
        dash.on_today()
    } else {
        dash.load()
    };
    print_result(&result);

    if ctx.html {
        println!("{}", dash.table().to_html()?);
    } else {
        print!(
            "{}",
            render_appointments(&dash.date_picker_value(), dash.patient_name(), dash.table())
        );
    }
    Ok(())
}

fn config_lines(config: &ClinicConfig) -> Vec<String> {
    vec![
        format!("api-url = {}", config.api_url),
        format!("timeout = {}", config.timeout_secs),
    ]
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let key = match key {
        None => {
            for line in config_lines(&ctx.config) {
                println!("{}", line);
            }
            return Ok(());
        }
        Some(key) => key,
    };

    // Saved config must not pick up the env/flag overrides of this run.
    let mut stored = ClinicConfig::load(&ctx.data_dir)?;
    match (key.as_str(), value) {
        ("api-url", None) => println!("api-url = {}", ctx.config.api_url),
        ("timeout", None) => println!("timeout = {}", ctx.config.timeout_secs),
        ("api-url", Some(v)) => {
            stored.set_api_url(&v)?;
            save_config(&ctx.data_dir, &stored, "api-url", &stored.api_url)?;
        }
        ("timeout", Some(v)) => {
            stored.set_timeout_secs(&v)?;
            save_config(
                &ctx.data_dir,
                &stored,
                "timeout",
                &stored.timeout_secs.to_string(),
            )?;
        }
        (other, _) => {
            return Err(ClinicError::Api(format!("Unknown config key: {}", other)));
        }
    }
    Ok(())
}

fn save_config(dir: &Path, config: &ClinicConfig, key: &str, value: &str) -> Result<()> {
    config.save(dir)?;
    print_messages(&[PageMessage::success(format!("{} set to {}", key, value))]);
    Ok(())
}
