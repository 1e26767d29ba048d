//! Handler for `POST /api/sleep-data`.
//!
//! | Query | Notes |
//! |-------|-------|
//! | `session_id` | Optional; defaults to `"demo"` |
//!
//! Body: one sample, e.g. `{"type":"audio","timestamp":1000,"snoreEnergy":6000}`.
//! Returns `{"status":"ok"}`; the assigned row id is not exposed.

use axum::{
  Json,
  extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
};
use serde::Deserialize;
use serde_json::{Value, json};
use somnus_core::{ingest::DEFAULT_SESSION_ID, store::SampleStore};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct IngestParams {
  pub session_id: Option<String>,
}

/// `POST /api/sleep-data[?session_id=<id>]`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<IngestParams>, QueryRejection>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
  S: SampleStore + 'static,
{
  let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let session_id = params.session_id.as_deref().unwrap_or(DEFAULT_SESSION_ID);

  state.writer.ingest(session_id, body).await?;
  Ok(Json(json!({ "status": "ok" })))
}
