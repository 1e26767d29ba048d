//! Error types for `somnus-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Ingest input is missing a required field or has the wrong shape.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// A stored payload could not be read back as a sample.
  #[error("malformed payload in record {id}: {source}")]
  MalformedPayload {
    id:     i64,
    #[source]
    source: serde_json::Error,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
