//! Core use-case services.
//!
//! # Responsibility
//! - Hold authoritative session state over repository implementations.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_store;
pub mod theme_service;
