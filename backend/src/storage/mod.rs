//! # Storage Module
//!
//! Storage backends for the sleep-coaching service. The domain layer only
//! depends on the traits defined here; the concrete implementations are an
//! in-memory baby store and a YAML-file session store.

pub mod traits;
pub mod memory;
pub mod yaml;

pub use traits::{BabyStorage, SessionStorage};
pub use memory::{BabyRepository, MemoryConnection};
pub use yaml::SessionRepository;
