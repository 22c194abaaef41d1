//! [`SubmissionService`] — the orchestration for one lead submission.

use std::sync::Arc;

use chrono::Utc;
use panorama_core::{
  store::LeadStore,
  submission::{Lead, SubmitPayload},
  validate::validate,
};
use serde::{Deserialize, Serialize};

use crate::{
  error::{Result, SubmitError},
  notify::{CaptchaVerifier, CrmGateway, MailNotifier},
  protocol::generate_protocol,
};

/// Attempts at drawing a protocol that is not already in the store.
const PROTOCOL_DRAWS: usize = 5;

/// Successful-submission response: the confirmation message, the protocol,
/// and the relative URL of the thank-you view carrying the protocol, the
/// submitter's first name, and the urgency level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
  pub message:      String,
  pub protocol:     String,
  #[serde(rename = "redirectUrl")]
  pub redirect_url: String,
}

/// Runs one submission end to end: authoritative validation, token
/// verification, protocol generation, storage, notifications, response.
///
/// The steps are strictly sequential. Once the record is stored the
/// submission has succeeded; notification failures are logged and never
/// surfaced to the caller.
pub struct SubmissionService<S, C, M, G> {
  store:   Arc<S>,
  captcha: C,
  mailer:  M,
  crm:     G,
}

impl<S, C, M, G> SubmissionService<S, C, M, G>
where
  S: LeadStore,
  C: CaptchaVerifier,
  M: MailNotifier,
  G: CrmGateway,
{
  pub fn new(store: Arc<S>, captcha: C, mailer: M, crm: G) -> Self {
    Self { store, captcha, mailer, crm }
  }

  /// Process one submission from `ip`.
  pub async fn submit(
    &self,
    payload: &SubmitPayload,
    ip: &str,
  ) -> Result<SubmitOutcome> {
    let submission = validate(payload).map_err(SubmitError::Validation)?;

    if !self.captcha.verify(&payload.captcha).await {
      return Err(SubmitError::Captcha);
    }

    let deadline = submission.nivel_urgencia.return_deadline();
    let protocolo = self.draw_protocol().await?;

    let id = self.store.next_id().await.map_err(|e| {
      tracing::error!(error = %e, "id allocation failed");
      SubmitError::Submission
    })?;

    let lead = Lead::assemble(
      id,
      protocolo,
      submission,
      Utc::now(),
      ip.to_string(),
    );

    let lead = self.store.insert(lead).await.map_err(|e| {
      tracing::error!(error = %e, "lead insert failed");
      SubmitError::Submission
    })?;

    tracing::info!(
      id = lead.id,
      protocol = %lead.protocolo,
      urgency = %lead.nivel_urgencia,
      "lead stored"
    );

    // The record is committed; failures past this point must not undo that.
    self.dispatch_notifications(&lead, deadline).await;

    let redirect_url = format!(
      "/obrigado?p={}&n={}&u={}",
      urlencoding::encode(&lead.protocolo),
      urlencoding::encode(lead.first_name()),
      urlencoding::encode(&lead.nivel_urgencia.to_string()),
    );

    Ok(SubmitOutcome {
      message:      "Formulário enviado com sucesso".to_string(),
      protocol:     lead.protocolo.clone(),
      redirect_url,
    })
  }

  /// Generate a protocol and verify it is unused. The store rejects
  /// duplicates at insert as well; this check keeps the failure out of the
  /// insert path.
  async fn draw_protocol(&self) -> Result<String> {
    for _ in 0..PROTOCOL_DRAWS {
      let candidate = generate_protocol();
      let taken = self.store.get_by_protocol(&candidate).await.map_err(|e| {
        tracing::error!(error = %e, "protocol lookup failed");
        SubmitError::Submission
      })?;
      if taken.is_none() {
        return Ok(candidate);
      }
    }
    tracing::error!("exhausted protocol draws");
    Err(SubmitError::Submission)
  }

  /// Confirmation to the submitter, summary to the team, lead to the CRM —
  /// sequential, best-effort.
  async fn dispatch_notifications(&self, lead: &Lead, deadline: &str) {
    if let Err(e) = self.mailer.send_confirmation(lead, deadline).await {
      tracing::warn!(error = %e, protocol = %lead.protocolo, "confirmation email failed");
    }
    if let Err(e) = self.mailer.notify_team(lead).await {
      tracing::warn!(error = %e, protocol = %lead.protocolo, "team notification failed");
    }
    if let Err(e) = self.crm.ingest_lead(lead).await {
      tracing::warn!(error = %e, protocol = %lead.protocolo, "CRM ingestion failed");
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use panorama_core::store::LeadStore;
  use panorama_store_memory::MemoryStore;

  use crate::notify::{
    BoxError, SimulatedCaptcha, SimulatedCrm, SimulatedMailer,
  };

  fn payload() -> SubmitPayload {
    SubmitPayload {
      tipo_pessoa: "Física".to_string(),
      nome_completo: "Maria Silva".to_string(),
      email: "maria@x.com".to_string(),
      telefone: "(11) 98765-4321".to_string(),
      cpf: Some("123.456.789-09".to_string()),
      cnpj: None,
      razao_social: None,
      area_juridica: "Direito Civil".to_string(),
      descricao_necessidade: "Preciso de orientação sobre um contrato de locação."
        .to_string(),
      nivel_urgencia: "Alta".to_string(),
      preferencia_contato: "Email".to_string(),
      horario_preferencial: "Tarde (12h-18h)".to_string(),
      aceite_termos: Some(true),
      aceite_newsletter: None,
      captcha: "abc".to_string(),
    }
  }

  fn service(
    store: Arc<MemoryStore>,
  ) -> SubmissionService<MemoryStore, SimulatedCaptcha, SimulatedMailer, SimulatedCrm>
  {
    SubmissionService::new(store, SimulatedCaptcha, SimulatedMailer, SimulatedCrm)
  }

  #[tokio::test]
  async fn successful_submission_returns_protocol_and_redirect() {
    let store = Arc::new(MemoryStore::new());
    let svc = service(store.clone());

    let outcome = svc.submit(&payload(), "10.0.0.1").await.unwrap();

    assert_eq!(outcome.message, "Formulário enviado com sucesso");
    let shape = regex_lite::Regex::new(r"^PAN-\d+-\d{4}$").unwrap();
    assert!(shape.is_match(&outcome.protocol), "protocol {:?}", outcome.protocol);
    assert!(outcome.redirect_url.starts_with("/obrigado?p=PAN-"));
    assert!(outcome.redirect_url.contains("&n=Maria"));
    assert!(outcome.redirect_url.ends_with("&u=Alta"));

    let stored = store.get_by_protocol(&outcome.protocol).await.unwrap().unwrap();
    assert_eq!(stored.id, 1);
    assert_eq!(stored.ip_usuario, "10.0.0.1");
    assert_eq!(stored.origem, "landing-page");
  }

  #[tokio::test]
  async fn accented_urgency_is_percent_encoded_in_redirect() {
    let store = Arc::new(MemoryStore::new());
    let svc = service(store);

    let payload = SubmitPayload {
      nivel_urgencia: "Média".to_string(),
      ..payload()
    };
    let outcome = svc.submit(&payload, "10.0.0.1").await.unwrap();
    assert!(outcome.redirect_url.ends_with("&u=M%C3%A9dia"));
  }

  #[tokio::test]
  async fn sequential_submissions_get_increasing_ids_and_distinct_protocols() {
    let store = Arc::new(MemoryStore::new());
    let svc = service(store.clone());

    let first = svc.submit(&payload(), "10.0.0.1").await.unwrap();
    let second = svc.submit(&payload(), "10.0.0.2").await.unwrap();

    assert_ne!(first.protocol, second.protocol);
    assert_eq!(store.count().await.unwrap(), 2);

    let ids: Vec<u64> =
      store.list_all().await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
  }

  #[tokio::test]
  async fn invalid_payload_is_rejected_before_the_captcha_check() {
    let store = Arc::new(MemoryStore::new());
    let svc = service(store.clone());

    // Both the email and the token are bad; validation must win.
    let payload = SubmitPayload {
      email: "not-an-email".to_string(),
      captcha: String::new(),
      ..payload()
    };
    let err = svc.submit(&payload, "10.0.0.1").await.unwrap_err();
    assert!(matches!(err, SubmitError::Validation(_)));
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn empty_token_fails_the_captcha_stage() {
    let store = Arc::new(MemoryStore::new());
    let svc = service(store.clone());

    let payload = SubmitPayload { captcha: String::new(), ..payload() };
    let err = svc.submit(&payload, "10.0.0.1").await.unwrap_err();
    assert!(matches!(err, SubmitError::Captcha));
    assert_eq!(err.code(), "CAPTCHA_ERROR");
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn terms_refusal_carries_the_field_error() {
    let store = Arc::new(MemoryStore::new());
    let svc = service(store);

    let payload = SubmitPayload { aceite_termos: Some(false), ..payload() };
    let err = svc.submit(&payload, "10.0.0.1").await.unwrap_err();
    let SubmitError::Validation(details) = err else {
      panic!("expected validation error");
    };
    assert!(details.iter().any(|e| e.field == "aceite_termos"));
  }

  // ── Notification failures ───────────────────────────────────────────────

  struct FailingMailer;

  impl MailNotifier for FailingMailer {
    async fn send_confirmation(
      &self,
      _lead: &Lead,
      _deadline: &str,
    ) -> Result<(), BoxError> {
      Err("smtp down".into())
    }

    async fn notify_team(&self, _lead: &Lead) -> Result<(), BoxError> {
      Err("smtp down".into())
    }
  }

  struct FailingCrm;

  impl CrmGateway for FailingCrm {
    async fn ingest_lead(&self, _lead: &Lead) -> Result<(), BoxError> {
      Err("crm offline".into())
    }
  }

  #[tokio::test]
  async fn notification_failures_do_not_fail_a_stored_submission() {
    let store = Arc::new(MemoryStore::new());
    let svc = SubmissionService::new(
      store.clone(),
      SimulatedCaptcha,
      FailingMailer,
      FailingCrm,
    );

    let outcome = svc.submit(&payload(), "10.0.0.1").await.unwrap();
    assert_eq!(store.count().await.unwrap(), 1);
    assert!(
      store.get_by_protocol(&outcome.protocol).await.unwrap().is_some()
    );
  }

  #[tokio::test]
  async fn outcome_serializes_the_redirect_key_in_camel_case() {
    let outcome = SubmitOutcome {
      message:      "ok".to_string(),
      protocol:     "PAN-1-0001".to_string(),
      redirect_url: "/obrigado?p=PAN-1-0001&n=Maria&u=Alta".to_string(),
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert!(json.get("redirectUrl").is_some());
    assert!(json.get("redirect_url").is_none());
  }
}
