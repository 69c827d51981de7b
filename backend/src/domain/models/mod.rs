//! Domain models for the sleep-coaching backend.

pub mod baby;
pub mod session;
