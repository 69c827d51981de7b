//! backend/src/domain/models/session.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the logged-in user.
///
/// The wire strings are fixed: `"coach"` and `"parent"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "coach")]
    Coach,
    #[serde(rename = "parent")]
    Parent,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Coach => "coach",
            UserRole::Parent => "parent",
        }
    }

    /// Parse a stored role string; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<UserRole> {
        match value {
            "coach" => Some(UserRole::Coach),
            "parent" => Some(UserRole::Parent),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current user as recorded by the session stub.
///
/// Both fields are `None` when nobody is logged in. This carries no
/// credential of any kind and must not be treated as a security boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: Option<String>,
    pub role: Option<UserRole>,
}

impl SessionUser {
    pub fn logged_out() -> Self {
        Self {
            username: None,
            role: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(UserRole::parse("coach"), Some(UserRole::Coach));
        assert_eq!(UserRole::parse("parent"), Some(UserRole::Parent));
        assert_eq!(UserRole::parse("admin"), None);
        assert_eq!(UserRole::Coach.as_str(), "coach");
        assert_eq!(UserRole::Parent.to_string(), "parent");
    }

    #[test]
    fn test_logged_out() {
        let user = SessionUser::logged_out();
        assert!(user.username.is_none());
        assert!(user.role.is_none());
    }
}
