//! # YAML Session Repository
//!
//! File-based stand-in for the browser's local-storage session keys, kept
//! as a single `session.yaml` under the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! lailaTovUsername: "levi-family"
//! lailaTovUserRole: "parent"
//! ```
//!
//! The key names are the external interface and must not change. There is
//! no password, token, or server-side verification behind this file; it is
//! a convenience flag for page-level guards, never a security boundary.

use anyhow::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::models::session::{SessionUser, UserRole};
use crate::storage::traits::SessionStorage;

const SESSION_FILE_NAME: &str = "session.yaml";

/// On-disk session shape. Role is kept as a raw string so an unknown value
/// degrades to "logged out" instead of failing the load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "lailaTovUsername", skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(rename = "lailaTovUserRole", skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

/// YAML-file session repository.
#[derive(Clone)]
pub struct SessionRepository {
    base_directory: PathBuf,
}

impl SessionRepository {
    /// Create a session repository rooted at `base_directory`,
    /// creating the directory if needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }
        Ok(Self {
            base_directory: base_path,
        })
    }

    fn session_file_path(&self) -> PathBuf {
        self.base_directory.join(SESSION_FILE_NAME)
    }

    /// Save the session file atomically using a temp file
    fn write_session_file(&self, file: &SessionFile) -> Result<()> {
        let session_path = self.session_file_path();
        let yaml_content = serde_yaml::to_string(file)?;

        let temp_path = session_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &session_path)?;

        debug!("Wrote session file at {:?}", session_path);
        Ok(())
    }
}

impl SessionStorage for SessionRepository {
    fn load_session(&self) -> Result<SessionUser> {
        let session_path = self.session_file_path();

        if !session_path.exists() {
            debug!("No session file present, treating as logged out");
            return Ok(SessionUser::logged_out());
        }

        let yaml_content = fs::read_to_string(&session_path)?;
        let file: SessionFile = serde_yaml::from_str(&yaml_content)?;

        Ok(SessionUser {
            username: file.username,
            role: file.role.as_deref().and_then(UserRole::parse),
        })
    }

    fn save_session(&self, username: &str, role: UserRole) -> Result<()> {
        let file = SessionFile {
            username: Some(username.to_string()),
            role: Some(role.as_str().to_string()),
        };
        self.write_session_file(&file)?;
        info!("Saved session for {} as {}", username, role);
        Ok(())
    }

    fn clear_session(&self) -> Result<()> {
        let session_path = self.session_file_path();
        match fs::remove_file(&session_path) {
            Ok(()) => {
                info!("Cleared session file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
