//! Flutter-facing bindings for TaskSphere core.

pub mod api;
