//! # Domain Module
//!
//! Contains all business logic for the sleep-coaching backend.
//!
//! This module encapsulates the entities and services that define how baby
//! profiles and their sleep data are modeled and managed. It operates
//! independently of any specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **baby_service**: Baby profile CRUD and the archive lifecycle
//! - **sleep_record_service**: Logging, editing and deleting sleep records
//! - **export_service**: Per-baby CSV files and the printable RTL report
//! - **session_service**: The username/role session stub used by route
//!   guards (explicitly not an authentication mechanism)
//!
//! ## Core Concepts
//!
//! - **Baby**: a coaching subject profile, owning its sleep records
//! - **Sleep record**: the cycles logged for one date and coaching stage
//! - **Sleep cycle**: one discrete sleep attempt within a record
//! - **Archived**: a reversible soft-deleted state that hides a baby from
//!   the active roster and from parent lookup without losing data

pub mod baby_service;
pub mod commands;
pub mod export_service;
pub mod models;
pub mod session_service;
pub mod sleep_record_service;

pub use baby_service::BabyService;
pub use export_service::ExportService;
pub use session_service::SessionService;
pub use sleep_record_service::SleepRecordService;
