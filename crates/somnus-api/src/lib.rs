//! JSON HTTP API for Somnus.
//!
//! Exposes an axum [`Router`] backed by any [`SampleStore`]. CORS, TLS and
//! request tracing are the caller's responsibility.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Liveness message |
//! | `POST` | `/api/sleep-data` | See [`samples`] |
//! | `GET`  | `/api/sleep-report/{session_id}` | See [`reports`] |

pub mod error;
pub mod reports;
pub mod samples;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, post},
};
use serde_json::{Value, json};
use somnus_core::{
  ingest::IngestWriter,
  report::{ReportAggregator, ReportPolicy},
  store::SampleStore,
};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers. Both halves hold the same
/// store.
pub struct ApiState<S> {
  pub writer:  IngestWriter<S>,
  pub reports: ReportAggregator<S>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { writer: self.writer.clone(), reports: self.reports.clone() }
  }
}

impl<S: SampleStore> ApiState<S> {
  pub fn new(store: Arc<S>, policy: ReportPolicy) -> Self {
    Self {
      writer:  IngestWriter::new(Arc::clone(&store)),
      reports: ReportAggregator::new(store, policy),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full router for `state`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn router<S>(state: ApiState<S>) -> Router<()>
where
  S: SampleStore + 'static,
{
  let api = Router::new()
    .route("/sleep-data", post(samples::create::<S>))
    .route("/sleep-report/{session_id}", get(reports::get_one::<S>));

  Router::new()
    .route("/", get(root))
    .nest("/api", api)
    .with_state(state)
}

/// `GET /`
async fn root() -> Json<Value> {
  Json(json!({ "message": "Sleep Tracker API is running!" }))
}

// ─── Integration tests ────────────────────────────────────────────────────────
