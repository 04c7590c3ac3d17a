//! # Session Context
//!
//! Who is looking at the page: a bearer token and a role tag. Both are set at
//! login, read by every controller and renderer, and cleared at logout.
//!
//! The session is an explicit value. Controllers receive it at construction and
//! renderers receive the [`Viewer`] derived from it, so nothing reads ambient
//! global state.
//!
//! Persistence goes through [`SessionStore`]:
//! - [`FileSessionStore`]: `session.json` in the data directory (production)
//! - [`MemorySessionStore`]: no persistence (testing)

use crate::error::{ClinicError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const SESSION_FILENAME: &str = "session.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            other => Err(ClinicError::Api(format!("Unknown role: {}", other))),
        }
    }
}

/// Token and role as stored between page loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(role: Role, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            role: Some(role),
        }
    }

    /// The token, if one is present and not blank.
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn viewer(&self) -> Viewer {
        match (self.role, self.token()) {
            (Some(Role::Admin), _) => Viewer::Admin,
            (Some(Role::Doctor), _) => Viewer::Doctor,
            (Some(Role::Patient), Some(token)) => Viewer::Patient {
                token: token.to_string(),
            },
            (Some(Role::Patient), None) | (None, _) => Viewer::Guest,
        }
    }
}

/// The rendering-relevant view of a session.
///
/// Every card renders exactly one action set per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Admin,
    /// Nobody logged in, or a patient whose token is gone.
    Guest,
    Patient { token: String },
    Doctor,
}

impl fmt::Display for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Viewer::Admin => f.write_str("admin"),
            Viewer::Guest => f.write_str("guest"),
            Viewer::Patient { .. } => f.write_str("patient"),
            Viewer::Doctor => f.write_str("doctor"),
        }
    }
}

pub trait SessionStore {
    fn load(&self) -> Result<Session>;

    fn save(&mut self, session: &Session) -> Result<()>;

    fn clear(&mut self) -> Result<()>;
}

/// Session persisted as `session.json` inside a data directory.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILENAME)
    }

    fn ensure_dir(dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session> {
        let path = self.path();
        if !path.exists() {
            return Ok(Session::anonymous());
        }
        let content = fs::read_to_string(&path)?;
        let session = serde_json::from_str(&content)?;
        Ok(session)
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        Self::ensure_dir(&self.dir)?;
        let content = serde_json::to_string_pretty(session)?;
        fs::write(self.path(), content)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    session: Session,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self { session }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        self.session = session.clone();
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.session = Session::anonymous();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_admin_with_or_without_token() {
        assert_eq!(Session::new(Role::Admin, "t").viewer(), Viewer::Admin);
        let no_token = Session {
            token: None,
            role: Some(Role::Admin),
        };
        assert_eq!(no_token.viewer(), Viewer::Admin);
    }

    #[test]
    fn patient_without_token_is_guest() {
        let session = Session {
            token: Some("   ".into()),
            role: Some(Role::Patient),
        };
        assert_eq!(session.viewer(), Viewer::Guest);
        assert_eq!(Session::anonymous().viewer(), Viewer::Guest);
    }

    #[test]
    fn stray_token_without_role_is_guest() {
        let session = Session {
            token: Some("stale".into()),
            role: None,
        };
        assert_eq!(session.viewer(), Viewer::Guest);
    }

    #[test]
    fn patient_with_token_carries_it() {
        let viewer = Session::new(Role::Patient, " abc ").viewer();
        assert_eq!(
            viewer,
            Viewer::Patient {
                token: "abc".into()
            }
        );
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("nurse".parse::<Role>().is_err());
    }

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(dir.path().join("nested"));

        assert_eq!(store.load().unwrap(), Session::anonymous());

        store.save(&Session::new(Role::Doctor, "doc-token")).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.role, Some(Role::Doctor));
        assert_eq!(loaded.token(), Some("doc-token"));

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap(), Session::anonymous());
    }

    #[test]
    fn memory_store_clear_resets() {
        let mut store = MemorySessionStore::with_session(Session::new(Role::Admin, "x"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap().viewer(), Viewer::Guest);
    }
}
