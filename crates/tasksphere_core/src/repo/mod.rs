//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the raw key-value contract persisted state is written through.
//! - Map well-known keys to typed task and theme payloads.
//! - Isolate SQLite and JSON details from the store layer.
//!
//! # Invariants
//! - Malformed payloads read back as "absent", never as errors.
//! - Transport failures (SQLite, serialization) surface as `RepoError`.
//!
//! # See also
//! - docs/architecture/storage.md

pub mod kv_store;
pub mod state_repo;
