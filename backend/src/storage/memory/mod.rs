//! # In-Memory Storage Module
//!
//! This module provides the in-memory storage implementation backing the
//! sleep-coaching service. The store is a single process-wide list of
//! babies behind a shared connection handle; repositories created from the
//! same connection operate on the same list.
//!
//! Persistence ends with the process. `MemoryConnection::seeded()` starts
//! the store with the demo fixture roster.

pub mod baby_repository;
pub mod seed;

pub use baby_repository::{BabyRepository, MemoryConnection};
