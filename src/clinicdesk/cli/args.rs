use clap::{Parser, Subcommand, ValueEnum};
use clinicdesk::session::Role;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "clinicdesk")]
#[command(version = VERSION)]
#[command(about = "Admin and doctor dashboards of the clinic, from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base url (overrides config and CLINICDESK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Use the built-in demo clinic instead of a backend
    #[arg(long, global = true)]
    pub demo: bool,

    /// Print HTML fragments instead of terminal output
    #[arg(long, global = true)]
    pub html: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    Admin,
    Doctor,
    Patient,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Doctor => Role::Doctor,
            RoleArg::Patient => Role::Patient,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a session token and role
    Login {
        #[arg(value_enum)]
        role: RoleArg,
        token: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// List doctors, optionally filtered
    #[command(alias = "ls")]
    Doctors {
        /// Name substring
        #[arg(short, long, default_value = "")]
        name: String,

        /// Available time slot (e.g. 09:00)
        #[arg(short, long, default_value = "")]
        time: String,

        /// Specialty
        #[arg(short, long, default_value = "")]
        specialty: String,
    },

    /// Add a doctor (admin)
    #[command(alias = "add")]
    AddDoctor {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        specialty: String,
        /// Available times, comma separated
        #[arg(long, default_value = "")]
        time: String,
    },

    /// Delete a doctor (admin)
    #[command(alias = "rm")]
    DeleteDoctor {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Book a doctor (patient)
    Book { id: i64 },

    /// List the logged-in doctor's appointments for a day
    #[command(alias = "appts")]
    Appointments {
        /// Day to show, YYYY-MM-DD (defaults to today)
        #[arg(short, long, conflicts_with = "today")]
        date: Option<chrono::NaiveDate>,

        /// Jump to today
        #[arg(long)]
        today: bool,

        /// Patient name substring
        #[arg(short, long)]
        patient: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (api-url, timeout)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_flags() {
        let cli = Cli::parse_from(["clinicdesk", "doctors", "-n", "emily", "-s", "cardiology"]);
        match cli.command {
            Some(Commands::Doctors {
                name,
                time,
                specialty,
            }) => {
                assert_eq!(name, "emily");
                assert_eq!(time, "");
                assert_eq!(specialty, "cardiology");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_iso_date() {
        let cli = Cli::parse_from(["clinicdesk", "--demo", "appts", "--date", "2024-05-20"]);
        assert!(cli.demo);
        match cli.command {
            Some(Commands::Appointments { date, .. }) => {
                assert_eq!(date.unwrap().to_string(), "2024-05-20");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn date_and_today_conflict() {
        let parsed =
            Cli::try_parse_from(["clinicdesk", "appointments", "--date", "2024-05-20", "--today"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn login_requires_known_role() {
        assert!(Cli::try_parse_from(["clinicdesk", "login", "nurse", "t"]).is_err());
        let cli = Cli::parse_from(["clinicdesk", "login", "admin", "t"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Login {
                role: RoleArg::Admin,
                ..
            })
        ));
    }
}
