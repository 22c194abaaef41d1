//! Lead types — the wire payload and the persisted record.
//!
//! Field names are the wire names posted by the landing-page form. The enum
//! wire literals are locale-specific and carry accents; one declaration per
//! enum drives serde, parsing, and display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Acquisition-source tag stamped on every stored lead.
pub const LEAD_SOURCE: &str = "landing-page";

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Whether the submitter is a natural person or a company. Gates which
/// identity fields are mandatory.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum PersonType {
  #[serde(rename = "Física")]
  #[strum(serialize = "Física")]
  Fisica,
  #[serde(rename = "Jurídica")]
  #[strum(serialize = "Jurídica")]
  Juridica,
}

/// How quickly the submitter expects a first response.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum UrgencyLevel {
  Baixa,
  #[serde(rename = "Média")]
  #[strum(serialize = "Média")]
  Media,
  Alta,
  Emergencial,
}

impl UrgencyLevel {
  /// Return-time expectation quoted in the confirmation notification.
  pub fn return_deadline(&self) -> &'static str {
    match self {
      Self::Emergencial => "até 4 horas úteis",
      Self::Alta => "até 24 horas úteis",
      Self::Media => "até 48 horas úteis",
      Self::Baixa => "até 72 horas úteis",
    }
  }
}

/// Preferred channel for the follow-up contact.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum ContactPreference {
  Telefone,
  Email,
  WhatsApp,
  Presencial,
}

/// Preferred time window for the follow-up contact. The display ranges are
/// part of the wire literal.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum TimeWindow {
  #[serde(rename = "Manhã (8h-12h)")]
  #[strum(serialize = "Manhã (8h-12h)")]
  Manha,
  #[serde(rename = "Tarde (12h-18h)")]
  #[strum(serialize = "Tarde (12h-18h)")]
  Tarde,
  #[serde(rename = "Noite (18h-20h)")]
  #[strum(serialize = "Noite (18h-20h)")]
  Noite,
}

// ─── Wire payload ────────────────────────────────────────────────────────────

/// The raw payload as posted by the form.
///
/// Deserialisation is lenient — every field defaults, enums arrive as plain
/// strings, and the consent flags tolerate any JSON value — so that a bad or
/// missing field surfaces as a field-scoped validation error instead of a
/// body-level parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitPayload {
  pub tipo_pessoa:           String,
  pub nome_completo:         String,
  pub email:                 String,
  pub telefone:              String,
  pub cpf:                   Option<String>,
  pub cnpj:                  Option<String>,
  pub razao_social:          Option<String>,
  pub area_juridica:         String,
  pub descricao_necessidade: String,
  pub nivel_urgencia:        String,
  pub preferencia_contato:   String,
  pub horario_preferencial:  String,
  #[serde(deserialize_with = "lenient_bool")]
  pub aceite_termos:         Option<bool>,
  #[serde(deserialize_with = "lenient_bool")]
  pub aceite_newsletter:     Option<bool>,
  pub captcha:               String,
}

/// Accept any value; only a literal boolean produces `Some`. A string
/// `"true"` is not acceptance.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(
    serde_json::Value::deserialize(deserializer)
      .ok()
      .and_then(|v| v.as_bool()),
  )
}

// ─── Validated submission ────────────────────────────────────────────────────

/// A submission that has passed the shared rule set
/// ([`crate::validate::validate`]). Enums are parsed to their typed forms and
/// the identity fields are consistent with the person type.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
  pub tipo_pessoa:           PersonType,
  pub nome_completo:         String,
  pub email:                 String,
  pub telefone:              String,
  pub cpf:                   Option<String>,
  pub cnpj:                  Option<String>,
  pub razao_social:          Option<String>,
  pub area_juridica:         String,
  pub descricao_necessidade: String,
  pub nivel_urgencia:        UrgencyLevel,
  pub preferencia_contato:   ContactPreference,
  pub horario_preferencial:  TimeWindow,
  pub aceite_termos:         bool,
  pub aceite_newsletter:     bool,
}

// ─── Lead ────────────────────────────────────────────────────────────────────

/// The persisted lead record. Immutable once inserted — the store exposes no
/// update or delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
  pub id:                    u64,
  pub tipo_pessoa:           PersonType,
  pub nome_completo:         String,
  pub email:                 String,
  pub telefone:              String,
  pub cpf:                   Option<String>,
  pub cnpj:                  Option<String>,
  pub razao_social:          Option<String>,
  pub area_juridica:         String,
  pub descricao_necessidade: String,
  pub nivel_urgencia:        UrgencyLevel,
  pub preferencia_contato:   ContactPreference,
  pub horario_preferencial:  TimeWindow,
  pub aceite_termos:         bool,
  pub aceite_newsletter:     bool,
  /// Server-assigned timestamp; never changes after creation.
  pub data_submissao:        DateTime<Utc>,
  pub ip_usuario:            String,
  pub origem:                String,
  pub protocolo:             String,
}

impl Lead {
  /// Assemble the record from a validated submission plus the
  /// server-assigned fields.
  pub fn assemble(
    id: u64,
    protocolo: String,
    submission: ValidSubmission,
    data_submissao: DateTime<Utc>,
    ip_usuario: String,
  ) -> Self {
    Self {
      id,
      tipo_pessoa: submission.tipo_pessoa,
      nome_completo: submission.nome_completo,
      email: submission.email,
      telefone: submission.telefone,
      cpf: submission.cpf,
      cnpj: submission.cnpj,
      razao_social: submission.razao_social,
      area_juridica: submission.area_juridica,
      descricao_necessidade: submission.descricao_necessidade,
      nivel_urgencia: submission.nivel_urgencia,
      preferencia_contato: submission.preferencia_contato,
      horario_preferencial: submission.horario_preferencial,
      aceite_termos: submission.aceite_termos,
      aceite_newsletter: submission.aceite_newsletter,
      data_submissao,
      ip_usuario,
      origem: LEAD_SOURCE.to_string(),
      protocolo,
    }
  }

  /// First whitespace-separated token of the full name.
  pub fn first_name(&self) -> &str {
    self.nome_completo.split_whitespace().next().unwrap_or("")
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
