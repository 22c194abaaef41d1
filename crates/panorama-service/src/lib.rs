//! The submission pipeline for the Panorama intake endpoint.
//!
//! One lead submission runs validation, token verification, protocol
//! generation, storage, and best-effort notifications, in that order. The
//! store and every external collaborator are injected; nothing in this crate
//! holds global state.

pub mod error;
pub mod notify;
pub mod protocol;
pub mod service;

pub use error::SubmitError;
pub use service::{SubmissionService, SubmitOutcome};
