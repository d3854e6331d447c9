//! Error types for `storia-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown facet kind: {0:?}")]
  UnknownFacetKind(String),

  #[error("unknown media role: {0:?}")]
  UnknownMediaRole(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
