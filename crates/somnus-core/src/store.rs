//! The `SampleStore` trait and its row types.
//!
//! The trait is implemented by storage backends (e.g. `somnus-store-sqlite`).
//! The ingest writer and the report aggregator depend on this abstraction,
//! never on a concrete backend.

use std::future::Future;

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Input to [`SampleStore::append`]. The `id` is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
  pub session_id: String,
  pub timestamp:  i64,
  pub data_type:  String,
  /// The full serialised sample.
  pub payload:    String,
}

/// A payload read back from the store together with its surrogate key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPayload {
  pub id:      i64,
  pub payload: String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over durable, append-only sample storage.
///
/// There is no update or delete: ids are assigned in arrival order and never
/// reused. All methods return `Send` futures so the trait can be used behind
/// axum handlers on a multi-threaded runtime.
pub trait SampleStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Ensure the backing table exists. Idempotent; never truncates.
  fn initialize(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert one row and return the id the store assigned to it.
  fn append(
    &self,
    record: NewRecord,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// All payloads for `session_id` tagged `data_type`, in ascending id order.
  /// An empty result is not an error.
  fn query_by_session_and_type<'a>(
    &'a self,
    session_id: &'a str,
    data_type: &'a str,
  ) -> impl Future<Output = Result<Vec<StoredPayload>, Self::Error>> + Send + 'a;
}
