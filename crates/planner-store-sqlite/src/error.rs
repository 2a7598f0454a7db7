//! Error type for `planner-store-sqlite`.

use planner_core::{ErrorKind, StoreError};
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] planner_core::Error),

  /// The writer lock was still held when the busy timeout expired.
  #[error("timed out waiting for the database lock: {0}")]
  Timeout(#[source] tokio_rusqlite::Error),

  #[error("database error: {0}")]
  Database(#[source] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<tokio_rusqlite::Error> for Error {
  fn from(err: tokio_rusqlite::Error) -> Self {
    let busy = match &err {
      tokio_rusqlite::Error::Rusqlite(e) => matches!(
        e.sqlite_error_code(),
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
      ),
      _ => false,
    };
    if busy { Error::Timeout(err) } else { Error::Database(err) }
  }
}

impl From<rusqlite::Error> for Error {
  fn from(err: rusqlite::Error) -> Self { tokio_rusqlite::Error::Rusqlite(err).into() }
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::Core(e) => e.kind(),
      Error::Timeout(_) => ErrorKind::Timeout,
      Error::Database(_) => ErrorKind::Storage,
    }
  }
}

/// Whether `err` is a violation of a `UNIQUE` constraint.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}
