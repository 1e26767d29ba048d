//! Error type for `somnus-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("failed to open store at {path}: {source}")]
  Open {
    path:   String,
    #[source]
    source: tokio_rusqlite::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
