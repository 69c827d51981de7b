//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use crate::domain::models::baby::Baby as DomainBaby;
use crate::domain::models::session::{SessionUser, UserRole};

/// Trait defining the interface for baby storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (in-memory, files, databases) without modification.
///
/// Reads are pure: they never mutate stored state, they tolerate an empty
/// store, and they return babies with sleep records sorted by date
/// descending.
pub trait BabyStorage: Send + Sync {
    /// Store a new baby
    fn store_baby(&self, baby: &DomainBaby) -> Result<()>;

    /// Retrieve a specific baby by ID, regardless of archived state
    fn get_baby(&self, baby_id: &str) -> Result<Option<DomainBaby>>;

    /// Retrieve the unique non-archived baby with this parent username
    fn get_baby_by_parent_username(&self, parent_username: &str) -> Result<Option<DomainBaby>>;

    /// List all non-archived babies
    fn list_active_babies(&self) -> Result<Vec<DomainBaby>>;

    /// List all archived babies
    fn list_archived_babies(&self) -> Result<Vec<DomainBaby>>;

    /// Replace an existing baby wholesale; fails if the ID is unknown
    fn update_baby(&self, baby: &DomainBaby) -> Result<()>;

    /// Remove a baby entirely
    /// Returns true if the baby was found and deleted, false otherwise
    fn delete_baby(&self, baby_id: &str) -> Result<bool>;
}

/// Trait defining the interface for session storage operations
///
/// The session holds nothing but a username and a role. It is a convenience
/// flag for page-level guards, not an authentication mechanism, and must
/// never be relied upon to protect sensitive data.
pub trait SessionStorage: Send + Sync {
    /// Load the current session; a missing session yields a logged-out user
    fn load_session(&self) -> Result<SessionUser>;

    /// Persist a session, overwriting any existing one
    fn save_session(&self, username: &str, role: UserRole) -> Result<()>;

    /// Clear the session
    fn clear_session(&self) -> Result<()>;
}
