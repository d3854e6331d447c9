//! Error type for `storia-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] storia_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The procedure fast path was skipped or failed; the pipeline treats
  /// this as the normal trigger for the fallback query.
  #[error("procedure path unavailable: {0}")]
  ProcedureUnavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
