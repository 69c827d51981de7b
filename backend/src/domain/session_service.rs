use anyhow::Result;
use log::info;

use crate::domain::models::session::{SessionUser, UserRole};
use crate::storage::traits::SessionStorage;
use crate::storage::yaml::SessionRepository;

/// Maps the domain session to the presentation DTOs in the `shared` crate.
struct SessionMapper;

impl SessionMapper {
    pub fn to_dto(user: SessionUser) -> shared::SessionInfo {
        shared::SessionInfo {
            username: user.username,
            role: user.role.map(|role| match role {
                UserRole::Coach => shared::UserRole::Coach,
                UserRole::Parent => shared::UserRole::Parent,
            }),
        }
    }
}

/// Service for the username/role session stub consulted by page-level
/// route guards.
///
/// There is no password, token, or server-side verification here; the
/// session is a convenience flag only and must never be relied upon to
/// protect sensitive data.
#[derive(Clone)]
pub struct SessionService {
    session_repository: SessionRepository,
}

impl SessionService {
    /// Create a new SessionService
    pub fn new(session_repository: SessionRepository) -> Self {
        Self { session_repository }
    }

    /// Record a login, overwriting any existing session
    pub fn login(&self, username: &str, role: UserRole) -> Result<()> {
        info!("Logging in {} as {}", username, role);
        self.session_repository.save_session(username, role)
    }

    /// Clear the session
    pub fn logout(&self) -> Result<()> {
        info!("Logging out");
        self.session_repository.clear_session()
    }

    /// The current user; both fields are `None` when nobody is logged in
    pub fn current_user(&self) -> Result<SessionUser> {
        self.session_repository.load_session()
    }

    /// The current session as a presentation DTO for page-level guards
    pub fn current_session_info(&self) -> Result<shared::SessionInfo> {
        let user = self.session_repository.load_session()?;
        Ok(SessionMapper::to_dto(user))
    }

    /// True iff the current role is coach
    pub fn is_coach(&self) -> Result<bool> {
        let user = self.session_repository.load_session()?;
        Ok(user.role == Some(UserRole::Coach))
    }

    /// True iff the current role is parent and the username matches
    /// `expected_username` exactly (case-sensitive)
    pub fn is_parent(&self, expected_username: &str) -> Result<bool> {
        let user = self.session_repository.load_session()?;
        Ok(user.role == Some(UserRole::Parent)
            && user.username.as_deref() == Some(expected_username))
    }
}
