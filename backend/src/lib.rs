//! # LailaTov Backend
//!
//! Backend for the LailaTov baby-sleep-coaching service. This crate
//! provides direct, synchronous access to the domain services and storage
//! for a presentation shell to embed:
//! - Baby profiles live in an in-memory store (optionally seeded with the
//!   demo roster); persistence ends with the process.
//! - The session stub is a YAML file standing in for the browser's local
//!   storage keys. It is a convenience flag, not an authentication
//!   mechanism.
//! - There is no IO/REST layer; pages call the services directly.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use storage::memory::MemoryConnection;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub baby_service: domain::BabyService,
    pub sleep_record_service: domain::SleepRecordService,
    pub export_service: domain::ExportService,
    pub session_service: domain::SessionService,
}

impl Backend {
    /// Create a backend with an empty baby store
    pub fn new<P: AsRef<Path>>(session_dir: P) -> Result<Self> {
        Self::with_connection(Arc::new(MemoryConnection::new()), session_dir)
    }

    /// Create a backend seeded with the demo fixture roster
    pub fn seeded<P: AsRef<Path>>(session_dir: P) -> Result<Self> {
        Self::with_connection(Arc::new(MemoryConnection::seeded()), session_dir)
    }

    /// Wire all services onto a shared store connection
    pub fn with_connection<P: AsRef<Path>>(
        connection: Arc<MemoryConnection>,
        session_dir: P,
    ) -> Result<Self> {
        let baby_service = domain::BabyService::new(connection.clone());
        let sleep_record_service = domain::SleepRecordService::new(connection);
        let export_service = domain::ExportService::new();
        let session_service =
            domain::SessionService::new(storage::SessionRepository::new(session_dir)?);

        Ok(Backend {
            baby_service,
            sleep_record_service,
            export_service,
            session_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::domain::commands::babies::GetBabyByParentCommand;
    use crate::domain::commands::sleep::{AddSleepRecordCommand, SleepCycleInput};
    use crate::domain::models::session::UserRole;

    #[test]
    fn test_seeded_backend_wires_services_on_one_store() {
        let temp_dir = tempdir().unwrap();
        let backend = Backend::seeded(temp_dir.path()).unwrap();

        // A parent logs in and reads their child
        backend
            .session_service
            .login("cohen-family", UserRole::Parent)
            .unwrap();
        assert!(backend.session_service.is_parent("cohen-family").unwrap());

        let baby = backend
            .baby_service
            .get_baby_by_parent_username(GetBabyByParentCommand {
                parent_username: "cohen-family".to_string(),
            })
            .unwrap()
            .baby
            .unwrap();
        assert_eq!(baby.name, "אורי");

        // Logging a record through one service is visible through the other
        backend
            .sleep_record_service
            .add_sleep_record(AddSleepRecordCommand {
                baby_id: baby.id,
                date: NaiveDate::from_ymd_opt(2024, 7, 25).unwrap(),
                stage: "ביסוס הרגלים".to_string(),
                cycles: vec![SleepCycleInput {
                    bedtime: "19:45".to_string(),
                    time_to_sleep: "10 דקות".to_string(),
                    who_put_to_sleep: "אבא".to_string(),
                    how_fell_asleep: "ליטוף".to_string(),
                    wake_time: None,
                }],
            })
            .unwrap();

        let reread = backend
            .baby_service
            .get_baby_by_parent_username(GetBabyByParentCommand {
                parent_username: "cohen-family".to_string(),
            })
            .unwrap()
            .baby
            .unwrap();
        assert_eq!(reread.sleep_records.len(), 2);
        assert_eq!(
            reread.sleep_records[0].date,
            NaiveDate::from_ymd_opt(2024, 7, 25).unwrap()
        );

        // And the export sees the same data
        let export = backend
            .export_service
            .export_csv(&backend.baby_service)
            .unwrap();
        assert_eq!(export.baby_count, 3);
    }

    #[test]
    fn test_empty_backend_starts_blank() {
        let temp_dir = tempdir().unwrap();
        let backend = Backend::new(temp_dir.path()).unwrap();
        assert!(backend
            .baby_service
            .list_active_babies()
            .unwrap()
            .babies
            .is_empty());
    }
}
