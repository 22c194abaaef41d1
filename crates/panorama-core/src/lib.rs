//! Core types and shared validation rules for the Panorama intake service.
//!
//! This crate is deliberately free of HTTP and runtime dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod store;
pub mod submission;
pub mod taxid;
pub mod validate;
