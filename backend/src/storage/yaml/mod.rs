//! # YAML Storage Module
//!
//! Single-file YAML storage used for the session stub.

pub mod session_repository;

pub use session_repository::SessionRepository;
