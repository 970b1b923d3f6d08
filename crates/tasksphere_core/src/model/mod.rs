//! Domain model for the task tracker.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep view-only state (filters) separate from persisted records.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal; there are no tombstones.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod filter;
pub mod stats;
pub mod task;
pub mod theme;
