//! Collaborator seams: captcha verification and outbound notifications.
//!
//! Each collaborator is swappable without touching the pipeline's control
//! flow. The simulated implementations stand in for the real integrations
//! and log what would have been sent.

use std::future::Future;

use panorama_core::submission::Lead;

/// Collaborator failures cross this boundary type-erased; the pipeline only
/// logs them.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Verifies the form's anti-bot token.
pub trait CaptchaVerifier: Send + Sync {
  /// `true` if the token passes verification.
  fn verify<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = bool> + Send + 'a;
}

/// Sends the outbound mail for a stored lead.
pub trait MailNotifier: Send + Sync {
  /// Confirmation to the submitter, quoting the protocol and the
  /// return-time expectation.
  fn send_confirmation<'a>(
    &'a self,
    lead: &'a Lead,
    deadline: &'a str,
  ) -> impl Future<Output = Result<(), BoxError>> + Send + 'a;

  /// Summary to the internal team inbox.
  fn notify_team<'a>(
    &'a self,
    lead: &'a Lead,
  ) -> impl Future<Output = Result<(), BoxError>> + Send + 'a;
}

/// Pushes a stored lead into the CRM.
pub trait CrmGateway: Send + Sync {
  fn ingest_lead<'a>(
    &'a self,
    lead: &'a Lead,
  ) -> impl Future<Output = Result<(), BoxError>> + Send + 'a;
}

// ─── Simulated implementations ───────────────────────────────────────────────

/// Simulated captcha verification — any non-empty token passes. A real
/// deployment would call out to a verification service here.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedCaptcha;

impl CaptchaVerifier for SimulatedCaptcha {
  async fn verify(&self, token: &str) -> bool {
    !token.is_empty()
  }
}

/// Simulated mail delivery — logs what the real mailer would send.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedMailer;

impl MailNotifier for SimulatedMailer {
  async fn send_confirmation(
    &self,
    lead: &Lead,
    deadline: &str,
  ) -> Result<(), BoxError> {
    tracing::info!(
      to = %lead.email,
      protocol = %lead.protocolo,
      %deadline,
      "confirmation email sent"
    );
    Ok(())
  }

  async fn notify_team(&self, lead: &Lead) -> Result<(), BoxError> {
    tracing::info!(
      urgency = %lead.nivel_urgencia,
      area = %lead.area_juridica,
      "team notification sent"
    );
    Ok(())
  }
}

/// Simulated CRM ingestion — logs the lead the real gateway would create.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedCrm;

impl CrmGateway for SimulatedCrm {
  async fn ingest_lead(&self, lead: &Lead) -> Result<(), BoxError> {
    tracing::info!(
      name = %lead.nome_completo,
      email = %lead.email,
      phone = %lead.telefone,
      area = %lead.area_juridica,
      urgency = %lead.nivel_urgencia,
      "lead created in CRM"
    );
    Ok(())
  }
}
