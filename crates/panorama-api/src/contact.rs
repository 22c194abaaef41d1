//! Handler for `POST /api/external/contact`.

use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use axum::{
  Json,
  extract::{ConnectInfo, FromRequestParts, State},
  http::{StatusCode, request::Parts},
  response::IntoResponse,
};
use panorama_core::{
  store::LeadStore,
  submission::SubmitPayload,
  validate::FieldError,
};
use panorama_service::{
  SubmissionService, SubmitError,
  notify::{CaptchaVerifier, CrmGateway, MailNotifier},
};
use serde_json::json;

use crate::error::ApiError;

/// Submitter network address: connect info when the listener provides it,
/// `"unknown"` otherwise.
pub struct ClientAddr(pub String);

impl<S> FromRequestParts<S> for ClientAddr
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let ip = parts
      .extensions
      .get::<ConnectInfo<SocketAddr>>()
      .map(|ConnectInfo(addr)| addr.ip().to_string())
      .unwrap_or_else(|| "unknown".to_string());
    Ok(Self(ip))
  }
}

/// `POST /api/external/contact` — validates, stores, and notifies; responds
/// 201 with the protocol and the confirmation redirect.
///
/// The body is taken as a raw JSON value first so a type-level mismatch
/// still comes back through the error envelope rather than as an extractor
/// rejection.
pub async fn submit<S, C, M, G>(
  State(svc): State<Arc<SubmissionService<S, C, M, G>>>,
  ClientAddr(ip): ClientAddr,
  Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeadStore,
  C: CaptchaVerifier,
  M: MailNotifier,
  G: CrmGateway,
{
  let payload: SubmitPayload = serde_json::from_value(body).map_err(|e| {
    ApiError(SubmitError::Validation(vec![FieldError::new(
      "body",
      &e.to_string(),
    )]))
  })?;

  let outcome = svc.submit(&payload, &ip).await?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "success": true, "data": outcome })),
  ))
}
