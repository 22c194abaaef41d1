//! [`MemoryStore`] — process-lifetime lead storage.

use std::{collections::HashMap, sync::Arc};

use panorama_core::{
  store::LeadStore,
  submission::{Lead, UrgencyLevel},
};
use tokio::sync::Mutex;

use crate::{Error, Result};

/// Id allocation and the backing map move together behind one lock;
/// otherwise two concurrent submissions could observe the same id.
#[derive(Default)]
struct Inner {
  records:    HashMap<u64, Lead>,
  current_id: u64,
}

impl Inner {
  fn sorted(&self, mut keep: impl FnMut(&Lead) -> bool) -> Vec<Lead> {
    let mut out: Vec<Lead> =
      self.records.values().filter(|r| keep(r)).cloned().collect();
    out.sort_by_key(|r| r.id);
    out
  }
}

/// A lead store held entirely in process memory.
///
/// Cloning is cheap — the state is shared behind an [`Arc`].
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl LeadStore for MemoryStore {
  type Error = Error;

  async fn next_id(&self) -> Result<u64> {
    let mut inner = self.inner.lock().await;
    inner.current_id += 1;
    Ok(inner.current_id)
  }

  async fn insert(&self, lead: Lead) -> Result<Lead> {
    let mut inner = self.inner.lock().await;
    if inner.records.contains_key(&lead.id) {
      return Err(Error::DuplicateId(lead.id));
    }
    if inner.records.values().any(|r| r.protocolo == lead.protocolo) {
      return Err(Error::DuplicateProtocol(lead.protocolo.clone()));
    }
    inner.records.insert(lead.id, lead.clone());
    Ok(lead)
  }

  async fn get(&self, id: u64) -> Result<Option<Lead>> {
    Ok(self.inner.lock().await.records.get(&id).cloned())
  }

  async fn get_by_protocol(&self, protocol: &str) -> Result<Option<Lead>> {
    let inner = self.inner.lock().await;
    Ok(inner.records.values().find(|r| r.protocolo == protocol).cloned())
  }

  async fn list_all(&self) -> Result<Vec<Lead>> {
    Ok(self.inner.lock().await.sorted(|_| true))
  }

  async fn filter_by_urgency(&self, urgency: UrgencyLevel) -> Result<Vec<Lead>> {
    Ok(self.inner.lock().await.sorted(|r| r.nivel_urgencia == urgency))
  }

  async fn filter_by_area(&self, area: &str) -> Result<Vec<Lead>> {
    Ok(self.inner.lock().await.sorted(|r| r.area_juridica == area))
  }

  async fn count(&self) -> Result<usize> {
    Ok(self.inner.lock().await.records.len())
  }

  async fn reset(&self) -> Result<()> {
    let mut inner = self.inner.lock().await;
    inner.records.clear();
    inner.current_id = 0;
    Ok(())
  }
}
