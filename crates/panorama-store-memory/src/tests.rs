//! Tests for `MemoryStore`.

use chrono::Utc;
use panorama_core::{
  store::LeadStore,
  submission::{
    ContactPreference, Lead, PersonType, TimeWindow, UrgencyLevel,
    ValidSubmission,
  },
};

use crate::{Error, MemoryStore};

fn submission(urgency: UrgencyLevel, area: &str) -> ValidSubmission {
  ValidSubmission {
    tipo_pessoa:           PersonType::Fisica,
    nome_completo:         "Maria Silva".to_string(),
    email:                 "maria@x.com".to_string(),
    telefone:              "(11) 98765-4321".to_string(),
    cpf:                   Some("529.982.247-25".to_string()),
    cnpj:                  None,
    razao_social:          None,
    area_juridica:         area.to_string(),
    descricao_necessidade: "Preciso de orientação sobre um contrato.".to_string(),
    nivel_urgencia:        urgency,
    preferencia_contato:   ContactPreference::Email,
    horario_preferencial:  TimeWindow::Tarde,
    aceite_termos:         true,
    aceite_newsletter:     false,
  }
}

fn lead(id: u64, protocol: &str, urgency: UrgencyLevel, area: &str) -> Lead {
  Lead::assemble(
    id,
    protocol.to_string(),
    submission(urgency, area),
    Utc::now(),
    "127.0.0.1".to_string(),
  )
}

// ─── Id allocation ───────────────────────────────────────────────────────────

#[tokio::test]
async fn ids_start_at_one_and_strictly_increase() {
  let s = MemoryStore::new();
  assert_eq!(s.next_id().await.unwrap(), 1);
  assert_eq!(s.next_id().await.unwrap(), 2);
  assert_eq!(s.next_id().await.unwrap(), 3);
}

#[tokio::test]
async fn allocated_ids_are_not_reissued_without_insert() {
  let s = MemoryStore::new();
  let first = s.next_id().await.unwrap();
  // No insert happened; the next allocation still moves forward.
  assert_eq!(s.next_id().await.unwrap(), first + 1);
}

// ─── Insert and fetch ────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_by_id() {
  let s = MemoryStore::new();
  let id = s.next_id().await.unwrap();
  s.insert(lead(id, "PAN-1-0001", UrgencyLevel::Alta, "Direito Civil"))
    .await
    .unwrap();

  let fetched = s.get(id).await.unwrap().unwrap();
  assert_eq!(fetched.id, id);
  assert_eq!(fetched.protocolo, "PAN-1-0001");
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = MemoryStore::new();
  assert!(s.get(42).await.unwrap().is_none());
  assert!(s.get_by_protocol("PAN-0-0000").await.unwrap().is_none());
}

#[tokio::test]
async fn get_by_protocol_finds_the_record() {
  let s = MemoryStore::new();
  let id = s.next_id().await.unwrap();
  s.insert(lead(id, "PAN-1-0001", UrgencyLevel::Baixa, "Direito Civil"))
    .await
    .unwrap();

  let fetched = s.get_by_protocol("PAN-1-0001").await.unwrap().unwrap();
  assert_eq!(fetched.id, id);
}

#[tokio::test]
async fn duplicate_id_is_rejected() {
  let s = MemoryStore::new();
  let id = s.next_id().await.unwrap();
  s.insert(lead(id, "PAN-1-0001", UrgencyLevel::Alta, "Direito Civil"))
    .await
    .unwrap();

  let err = s
    .insert(lead(id, "PAN-1-0002", UrgencyLevel::Alta, "Direito Civil"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateId(d) if d == id));
}

#[tokio::test]
async fn duplicate_protocol_is_rejected() {
  let s = MemoryStore::new();
  let a = s.next_id().await.unwrap();
  let b = s.next_id().await.unwrap();
  s.insert(lead(a, "PAN-1-0001", UrgencyLevel::Alta, "Direito Civil"))
    .await
    .unwrap();

  let err = s
    .insert(lead(b, "PAN-1-0001", UrgencyLevel::Alta, "Direito Civil"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateProtocol(p) if p == "PAN-1-0001"));
  assert_eq!(s.count().await.unwrap(), 1);
}

// ─── Listing and filters ─────────────────────────────────────────────────────

#[tokio::test]
async fn list_all_is_ordered_by_id() {
  let s = MemoryStore::new();
  for (protocol, urgency) in [
    ("PAN-1-0001", UrgencyLevel::Baixa),
    ("PAN-1-0002", UrgencyLevel::Alta),
    ("PAN-1-0003", UrgencyLevel::Media),
  ] {
    let id = s.next_id().await.unwrap();
    s.insert(lead(id, protocol, urgency, "Direito Civil")).await.unwrap();
  }

  let all = s.list_all().await.unwrap();
  let ids: Vec<u64> = all.iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn filter_by_urgency() {
  let s = MemoryStore::new();
  for (protocol, urgency) in [
    ("PAN-1-0001", UrgencyLevel::Alta),
    ("PAN-1-0002", UrgencyLevel::Baixa),
    ("PAN-1-0003", UrgencyLevel::Alta),
  ] {
    let id = s.next_id().await.unwrap();
    s.insert(lead(id, protocol, urgency, "Direito Civil")).await.unwrap();
  }

  let high = s.filter_by_urgency(UrgencyLevel::Alta).await.unwrap();
  assert_eq!(high.len(), 2);
  assert!(high.iter().all(|r| r.nivel_urgencia == UrgencyLevel::Alta));

  let emergencies = s.filter_by_urgency(UrgencyLevel::Emergencial).await.unwrap();
  assert!(emergencies.is_empty());
}

#[tokio::test]
async fn filter_by_area() {
  let s = MemoryStore::new();
  for (protocol, area) in [
    ("PAN-1-0001", "Direito Civil"),
    ("PAN-1-0002", "Direito Trabalhista"),
    ("PAN-1-0003", "Direito Civil"),
  ] {
    let id = s.next_id().await.unwrap();
    s.insert(lead(id, protocol, UrgencyLevel::Media, area)).await.unwrap();
  }

  let civil = s.filter_by_area("Direito Civil").await.unwrap();
  assert_eq!(civil.len(), 2);
}

// ─── Count and reset ─────────────────────────────────────────────────────────

#[tokio::test]
async fn count_tracks_inserts() {
  let s = MemoryStore::new();
  assert_eq!(s.count().await.unwrap(), 0);

  let id = s.next_id().await.unwrap();
  s.insert(lead(id, "PAN-1-0001", UrgencyLevel::Alta, "Direito Civil"))
    .await
    .unwrap();
  assert_eq!(s.count().await.unwrap(), 1);
}

#[tokio::test]
async fn reset_clears_records_and_restarts_ids() {
  let s = MemoryStore::new();
  let id = s.next_id().await.unwrap();
  s.insert(lead(id, "PAN-1-0001", UrgencyLevel::Alta, "Direito Civil"))
    .await
    .unwrap();

  s.reset().await.unwrap();
  assert_eq!(s.count().await.unwrap(), 0);
  assert!(s.get(id).await.unwrap().is_none());
  assert_eq!(s.next_id().await.unwrap(), 1);
}
