//! Error types for `planner-core`.

use thiserror::Error;

use crate::subject::SubjectId;

/// Domain-level failures shared by every store backend.
#[derive(Debug, Error)]
pub enum Error {
  #[error("subject code already exists: {0:?}")]
  DuplicateSubjectCode(String),

  #[error("subject not found: {0}")]
  SubjectNotFound(SubjectId),
}

// ─── Classification ──────────────────────────────────────────────────────────

/// Coarse classification of a store failure, independent of the backend.
///
/// The API layer maps each kind onto a response status without knowing which
/// concrete store produced the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A unique constraint was violated (subject `code` collision).
  DuplicateKey,
  /// The targeted record does not exist and the operation cares.
  NotFound,
  /// The storage lock could not be acquired within the busy timeout.
  Timeout,
  /// Any other storage failure.
  Storage,
}

/// Implemented by every backend error type so callers can classify it.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> ErrorKind;
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::DuplicateSubjectCode(_) => ErrorKind::DuplicateKey,
      Error::SubjectNotFound(_) => ErrorKind::NotFound,
    }
  }
}
