//! Error taxonomy for the submission pipeline.

use panorama_core::validate::FieldError;
use thiserror::Error;

/// Terminal failure states of a submission.
///
/// `Validation` and `Captcha` are client-fixable and map to 400.
/// `Submission` means the record could not be stored; it maps to 500 and is
/// opaque — the cause is logged, never returned to the caller.
#[derive(Debug, Error)]
pub enum SubmitError {
  #[error("validation failed")]
  Validation(Vec<FieldError>),

  #[error("captcha verification failed")]
  Captcha,

  #[error("submission processing failed")]
  Submission,
}

impl SubmitError {
  /// Machine-readable wire code.
  pub fn code(&self) -> &'static str {
    match self {
      Self::Validation(_) => "VALIDATION_ERROR",
      Self::Captcha => "CAPTCHA_ERROR",
      Self::Submission => "SUBMISSION_ERROR",
    }
  }

  /// Human-readable message for the response body.
  pub fn message(&self) -> &'static str {
    match self {
      Self::Validation(_) => "Validation failed",
      Self::Captcha => "Por favor, complete a verificação de segurança",
      Self::Submission => "Erro ao processar formulário. Tente novamente.",
    }
  }
}

pub type Result<T, E = SubmitError> = std::result::Result<T, E>;
