//! The shared rule set for submission payloads.
//!
//! One definition serves both boundaries: the server pipeline runs it as the
//! authoritative check, the client runs the same function as an advisory
//! pre-flight. All failing fields are reported together, each scoped to the
//! payload key it belongs to.

use std::str::FromStr as _;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::{
  submission::{
    ContactPreference, PersonType, SubmitPayload, TimeWindow, UrgencyLevel,
    ValidSubmission,
  },
  taxid,
};

// ─── Field limits ────────────────────────────────────────────────────────────

pub const NOME_MIN: usize = 5;
pub const NOME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 100;
pub const RAZAO_SOCIAL_MIN: usize = 5;
pub const RAZAO_SOCIAL_MAX: usize = 150;
pub const DESCRICAO_MIN: usize = 20;
pub const DESCRICAO_MAX: usize = 2000;

// ─── Shape patterns ──────────────────────────────────────────────────────────

static CPF_SHAPE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").unwrap());

static CNPJ_SHAPE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}$").unwrap());

/// `(XX) XXXXX-XXXX` or `(XX) XXXX-XXXX`.
static PHONE_SHAPE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\(\d{2}\)\s\d{4,5}-\d{4}$").unwrap());

static EMAIL_SHAPE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// ─── Field errors ────────────────────────────────────────────────────────────

/// A single rule failure, scoped to the payload key it attaches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field:   String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: &str, message: &str) -> Self {
    Self {
      field:   field.to_string(),
      message: message.to_string(),
    }
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Check `payload` against every field rule and the cross-field person-type
/// gating. Returns the normalized submission, or every failure found.
///
/// The verification token is deliberately not checked here; token
/// verification is a separate pipeline stage that runs strictly after this
/// one.
pub fn validate(payload: &SubmitPayload) -> Result<ValidSubmission, Vec<FieldError>> {
  let mut errors = Vec::new();

  let tipo_pessoa = PersonType::from_str(&payload.tipo_pessoa).ok();
  if tipo_pessoa.is_none() {
    errors.push(FieldError::new("tipo_pessoa", "Selecione o tipo de pessoa"));
  }

  let nome = payload.nome_completo.trim();
  let nome_len = nome.chars().count();
  if nome_len < NOME_MIN {
    errors.push(FieldError::new(
      "nome_completo",
      "Por favor, informe seu nome completo",
    ));
  } else if nome_len > NOME_MAX {
    errors.push(FieldError::new("nome_completo", "Nome muito longo"));
  } else if nome.split_whitespace().count() < 2 {
    errors.push(FieldError::new("nome_completo", "Informe nome e sobrenome"));
  }

  if payload.email.is_empty() {
    errors.push(FieldError::new("email", "Por favor, informe seu email"));
  } else if !EMAIL_SHAPE.is_match(&payload.email) {
    errors.push(FieldError::new(
      "email",
      "Por favor, informe um email válido",
    ));
  } else if payload.email.chars().count() > EMAIL_MAX {
    errors.push(FieldError::new("email", "Email muito longo"));
  }

  if payload.telefone.is_empty() {
    errors.push(FieldError::new("telefone", "Por favor, informe seu telefone"));
  } else if !PHONE_SHAPE.is_match(&payload.telefone) {
    errors.push(FieldError::new(
      "telefone",
      "Informe um telefone válido no formato (XX) XXXXX-XXXX",
    ));
  }

  if let Some(cpf) = &payload.cpf
    && (!CPF_SHAPE.is_match(cpf) || !taxid::valid_cpf(cpf))
  {
    errors.push(FieldError::new("cpf", "Informe um CPF válido"));
  }

  if let Some(cnpj) = &payload.cnpj
    && (!CNPJ_SHAPE.is_match(cnpj) || !taxid::valid_cnpj(cnpj))
  {
    errors.push(FieldError::new("cnpj", "Informe um CNPJ válido"));
  }

  if let Some(razao) = &payload.razao_social {
    let len = razao.chars().count();
    if len < RAZAO_SOCIAL_MIN {
      errors.push(FieldError::new(
        "razao_social",
        "Por favor, informe a razão social da empresa",
      ));
    } else if len > RAZAO_SOCIAL_MAX {
      errors.push(FieldError::new("razao_social", "Razão social muito longa"));
    }
  }

  if payload.area_juridica.is_empty() {
    errors.push(FieldError::new(
      "area_juridica",
      "Por favor, selecione a área jurídica de interesse",
    ));
  }

  let descricao_len = payload.descricao_necessidade.chars().count();
  if descricao_len < DESCRICAO_MIN {
    errors.push(FieldError::new(
      "descricao_necessidade",
      "Por favor, forneça mais detalhes sobre sua necessidade",
    ));
  } else if descricao_len > DESCRICAO_MAX {
    errors.push(FieldError::new(
      "descricao_necessidade",
      "Descrição muito longa",
    ));
  }

  let nivel_urgencia = UrgencyLevel::from_str(&payload.nivel_urgencia).ok();
  if nivel_urgencia.is_none() {
    errors.push(FieldError::new(
      "nivel_urgencia",
      "Por favor, selecione o nível de urgência",
    ));
  }

  let preferencia_contato =
    ContactPreference::from_str(&payload.preferencia_contato).ok();
  if preferencia_contato.is_none() {
    errors.push(FieldError::new(
      "preferencia_contato",
      "Por favor, selecione sua preferência de contato",
    ));
  }

  let horario_preferencial =
    TimeWindow::from_str(&payload.horario_preferencial).ok();
  if horario_preferencial.is_none() {
    errors.push(FieldError::new(
      "horario_preferencial",
      "Por favor, selecione o horário preferencial para contato",
    ));
  }

  if payload.aceite_termos != Some(true) {
    errors.push(FieldError::new(
      "aceite_termos",
      "É necessário aceitar os termos de uso e política de privacidade",
    ));
  }

  // The person type decides which identity branch is mandatory. Errors are
  // scoped to the missing field, not to `tipo_pessoa`.
  match tipo_pessoa {
    Some(PersonType::Fisica) => {
      if payload.cpf.is_none() {
        errors.push(FieldError::new("cpf", "CPF é obrigatório para pessoa física"));
      }
    }
    Some(PersonType::Juridica) => {
      if payload.cnpj.is_none() {
        errors.push(FieldError::new(
          "cnpj",
          "CNPJ é obrigatório para pessoa jurídica",
        ));
      }
      if payload.razao_social.is_none() {
        errors.push(FieldError::new(
          "razao_social",
          "Razão social é obrigatória para pessoa jurídica",
        ));
      }
    }
    None => {}
  }

  if !errors.is_empty() {
    return Err(errors);
  }

  let (
    Some(tipo_pessoa),
    Some(nivel_urgencia),
    Some(preferencia_contato),
    Some(horario_preferencial),
  ) = (tipo_pessoa, nivel_urgencia, preferencia_contato, horario_preferencial)
  else {
    // Unreachable: a failed parse always records an error above.
    return Err(errors);
  };

  Ok(ValidSubmission {
    tipo_pessoa,
    nome_completo: payload.nome_completo.clone(),
    email: payload.email.clone(),
    telefone: payload.telefone.clone(),
    cpf: payload.cpf.clone(),
    cnpj: payload.cnpj.clone(),
    razao_social: payload.razao_social.clone(),
    area_juridica: payload.area_juridica.clone(),
    descricao_necessidade: payload.descricao_necessidade.clone(),
    nivel_urgencia,
    preferencia_contato,
    horario_preferencial,
    aceite_termos: true,
    aceite_newsletter: payload.aceite_newsletter.unwrap_or(false),
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
