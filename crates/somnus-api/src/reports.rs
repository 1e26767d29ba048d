//! Handler for `GET /api/sleep-report/{session_id}`.

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use somnus_core::{report::SleepReport, store::SampleStore};

use crate::{ApiState, error::ApiError};

/// `GET /api/sleep-report/{session_id}`. Unknown sessions yield an all-zero
/// report, never a 404.
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  session_id: Result<Path<String>, PathRejection>,
) -> Result<Json<SleepReport>, ApiError>
where
  S: SampleStore + 'static,
{
  let Path(session_id) = session_id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let report = state.reports.report(&session_id).await?;
  Ok(Json(report))
}
