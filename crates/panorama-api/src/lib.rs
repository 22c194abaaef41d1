//! JSON intake API for Panorama.
//!
//! Exposes an axum [`Router`] backed by any [`LeadStore`] and collaborator
//! set. TLS and transport concerns are the caller's responsibility.

pub mod contact;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::post};
use panorama_core::store::LeadStore;
use panorama_service::{
  SubmissionService,
  notify::{CaptchaVerifier, CrmGateway, MailNotifier},
};

pub use error::ApiError;

/// Build a fully-materialised intake router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, C, M, G>(
  service: Arc<SubmissionService<S, C, M, G>>,
) -> Router<()>
where
  S: LeadStore + 'static,
  C: CaptchaVerifier + 'static,
  M: MailNotifier + 'static,
  G: CrmGateway + 'static,
{
  Router::new()
    .route("/api/external/contact", post(contact::submit::<S, C, M, G>))
    .with_state(service)
}

// ─── Integration tests ───────────────────────────────────────────────────────
