//! The ingest writer: validates one incoming sample and appends it to the
//! store under a session.

use std::sync::Arc;

use serde_json::Value;

use crate::{
  Error, Result,
  sample::Sample,
  store::{NewRecord, SampleStore},
};

/// Session used when the caller does not name one.
pub const DEFAULT_SESSION_ID: &str = "demo";

/// Validates and persists samples. No retries are attempted; a store failure
/// is returned to the caller as [`Error::Store`].
pub struct IngestWriter<S> {
  store: Arc<S>,
}

impl<S> Clone for IngestWriter<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: SampleStore> IngestWriter<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate an untyped body and store it. Returns the assigned row id.
  pub async fn ingest(&self, session_id: &str, body: Value) -> Result<i64> {
    let sample = Sample::from_json(body)?;
    self.write(session_id, &sample).await
  }

  /// Store an already-typed sample. Returns the assigned row id.
  pub async fn write(&self, session_id: &str, sample: &Sample) -> Result<i64> {
    let record = NewRecord {
      session_id: session_id.to_owned(),
      timestamp:  sample.timestamp,
      data_type:  sample.kind.as_str().to_owned(),
      payload:    sample.to_payload()?,
    };

    let id = self.store.append(record).await.map_err(Error::store)?;
    tracing::debug!(id, session_id, data_type = %sample.kind, "stored sample");
    Ok(id)
  }
}
