//! The report aggregator: derives snore minutes for a session from its stored
//! audio samples.
//!
//! Reports are never stored; each one is recomputed from the store on demand,
//! so two reports with no intervening writes are identical.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::{
  Error, Result,
  sample::SampleKind,
  store::{SampleStore, StoredPayload},
};

/// An audio sample whose `snoreEnergy` exceeds this value is a snore event.
pub const SNORE_ENERGY_THRESHOLD: f64 = 5000.0;

/// Seconds of audio one sample represents unless configured otherwise.
pub const DEFAULT_WINDOW_SECS: u32 = 5;

// ─── Policy ──────────────────────────────────────────────────────────────────

/// What to do with a stored payload that is not a JSON object or whose
/// `snoreEnergy` is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPayloadPolicy {
  /// Log it, leave it out of the snore count and report how many there were.
  #[default]
  Skip,
  /// Fail the whole report with [`Error::MalformedPayload`].
  Fail,
}

/// Tunables for report computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPolicy {
  /// The acquisition window of one audio sample, in seconds. Must match the
  /// client's sampling interval.
  pub window_secs:  u32,
  pub on_malformed: MalformedPayloadPolicy,
}

impl Default for ReportPolicy {
  fn default() -> Self {
    Self {
      window_secs:  DEFAULT_WINDOW_SECS,
      on_malformed: MalformedPayloadPolicy::default(),
    }
  }
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// The derived summary for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepReport {
  pub session_id:          String,
  pub snore_minutes:       u64,
  /// Every stored audio row for the session, snoring or not.
  pub total_audio_samples: u64,
  /// Audio rows whose payload could not be read; included in
  /// `total_audio_samples` but never counted as snoring.
  pub malformed_samples:   u64,
}

/// Compute a report from already-fetched audio payloads.
pub fn summarize(
  session_id: &str,
  payloads: &[StoredPayload],
  policy: &ReportPolicy,
) -> Result<SleepReport> {
  let mut snore_count: u64 = 0;
  let mut malformed: u64 = 0;

  for stored in payloads {
    match snore_energy(&stored.payload) {
      Ok(energy) => {
        if energy > SNORE_ENERGY_THRESHOLD {
          snore_count += 1;
        }
      }
      Err(source) => match policy.on_malformed {
        MalformedPayloadPolicy::Skip => {
          tracing::warn!(id = stored.id, session_id, error = %source, "skipping malformed payload");
          malformed += 1;
        }
        MalformedPayloadPolicy::Fail => {
          return Err(Error::MalformedPayload { id: stored.id, source });
        }
      },
    }
  }

  Ok(SleepReport {
    session_id:          session_id.to_owned(),
    snore_minutes:       snore_count * u64::from(policy.window_secs) / 60,
    total_audio_samples: payloads.len() as u64,
    malformed_samples:   malformed,
  })
}

/// Read `snoreEnergy` from a stored payload, zero when absent or null.
///
/// Only this field is inspected, so rows written by older clients without a
/// `timestamp` or `type` still count. The payload must be a JSON object and
/// the field, when present, a number.
fn snore_energy(payload: &str) -> serde_json::Result<f64> {
  let mut fields: Map<String, Value> = serde_json::from_str(payload)?;
  let energy: Option<Number> = match fields.remove("snoreEnergy") {
    Some(value) => serde_json::from_value(value)?,
    None => None,
  };
  Ok(energy.as_ref().and_then(Number::as_f64).unwrap_or(0.0))
}

// ─── Aggregator ──────────────────────────────────────────────────────────────

/// Reads audio samples from the store and summarises them.
pub struct ReportAggregator<S> {
  store:  Arc<S>,
  policy: ReportPolicy,
}

impl<S> Clone for ReportAggregator<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), policy: self.policy }
  }
}

impl<S: SampleStore> ReportAggregator<S> {
  pub fn new(store: Arc<S>, policy: ReportPolicy) -> Self { Self { store, policy } }

  /// Build the report for `session_id`. A session with no samples yields an
  /// all-zero report rather than an error.
  pub async fn report(&self, session_id: &str) -> Result<SleepReport> {
    let payloads = self
      .store
      .query_by_session_and_type(session_id, SampleKind::Audio.as_str())
      .await
      .map_err(Error::store)?;
    summarize(session_id, &payloads, &self.policy)
  }
}
