//! Error type for `panorama-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Attempted to insert a record under an id that is already taken.
  #[error("lead id {0} already present")]
  DuplicateId(u64),

  /// Attempted to insert a record under a protocol that is already taken.
  #[error("protocol {0:?} already present")]
  DuplicateProtocol(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
