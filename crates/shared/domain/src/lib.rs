//! # Domain
//!
//! Plain types shared across the recap workspace: configuration sections,
//! well-known names, report feature flags and the slice registry.
//! Only `serde` and `bitflags` are allowed here; no I/O.

pub mod config;
pub mod constants;
pub mod features;
pub mod registry;
