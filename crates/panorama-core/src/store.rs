//! The `LeadStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `panorama-store-memory`). Higher layers depend on this abstraction, not on
//! any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::submission::{Lead, UrgencyLevel};

/// Abstraction over a lead store backend.
///
/// Writes are append-only: a record is inserted once under a pre-allocated
/// id and never updated or deleted. Backends must treat id allocation and
/// insertion as serialized operations so concurrent submissions cannot
/// observe the same id.
pub trait LeadStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Allocate the next record id. Strictly increasing, starting at 1; an
  /// allocated id is never reissued, even if the insert never happens.
  fn next_id(&self)
  -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Insert a lead under its pre-allocated id and return the stored record.
  ///
  /// Rejects an id or protocol that is already present.
  fn insert(
    &self,
    lead: Lead,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + '_;

  /// Fetch by id. Returns `None` if absent — a valid empty result, not an
  /// error.
  fn get(
    &self,
    id: u64,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + '_;

  /// Fetch by protocol. Protocol uniqueness is enforced at insert time, so
  /// the first match is the only match.
  fn get_by_protocol<'a>(
    &'a self,
    protocol: &'a str,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + 'a;

  /// All records, ordered by id.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Lead>, Self::Error>> + Send + '_;

  /// Records with the given urgency level, ordered by id.
  fn filter_by_urgency(
    &self,
    urgency: UrgencyLevel,
  ) -> impl Future<Output = Result<Vec<Lead>, Self::Error>> + Send + '_;

  /// Records with the given inquiry area, ordered by id.
  fn filter_by_area<'a>(
    &'a self,
    area: &'a str,
  ) -> impl Future<Output = Result<Vec<Lead>, Self::Error>> + Send + 'a;

  /// Total number of stored records.
  fn count(&self)
  -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Clear all records and reset the id counter to 0.
  ///
  /// Test isolation only — never called in the request path.
  fn reset(&self)
  -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
