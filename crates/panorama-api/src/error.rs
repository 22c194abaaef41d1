//! API error envelope and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use panorama_service::SubmitError;
use serde_json::json;

/// Wire shape of a failed request:
/// `{"success":false,"error":{"code","message","details?"}}`.
///
/// `details` is present only for validation failures and carries the
/// field-scoped error list.
#[derive(Debug)]
pub struct ApiError(pub SubmitError);

impl From<SubmitError> for ApiError {
  fn from(e: SubmitError) -> Self {
    Self(e)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self.0 {
      SubmitError::Validation(_) | SubmitError::Captcha => {
        StatusCode::BAD_REQUEST
      }
      SubmitError::Submission => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let mut error = json!({
      "code": self.0.code(),
      "message": self.0.message(),
    });
    if let SubmitError::Validation(details) = &self.0 {
      error["details"] = json!(details);
    }

    (status, Json(json!({ "success": false, "error": error }))).into_response()
  }
}
