//! Sample types: the unit of data ingested from a client device.
//!
//! A sample is an immutable, timestamped sensor observation. The `type` tag is
//! modelled explicitly as [`SampleKind`]; a small set of numeric readings is
//! promoted to typed fields and anything else the client sends is kept in an
//! open attribute map, so new per-type fields need no schema change.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::{Error, Result};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The `type` tag of a sample. Determines which readings are meaningful, but
/// no reading is rejected because of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SampleKind {
  Audio,
  Motion,
  /// Any other free-form tag, kept verbatim.
  Other(String),
}

impl SampleKind {
  /// The discriminant string stored in the `data_type` column.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Audio => "audio",
      Self::Motion => "motion",
      Self::Other(s) => s,
    }
  }
}

impl From<String> for SampleKind {
  fn from(s: String) -> Self {
    match s.as_str() {
      "audio" => Self::Audio,
      "motion" => Self::Motion,
      _ => Self::Other(s),
    }
  }
}

impl From<&str> for SampleKind {
  fn from(s: &str) -> Self { Self::from(s.to_owned()) }
}

impl From<SampleKind> for String {
  fn from(k: SampleKind) -> Self {
    match k {
      SampleKind::Other(s) => s,
      other => other.as_str().to_owned(),
    }
  }
}

impl fmt::Display for SampleKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Sample ──────────────────────────────────────────────────────────────────

/// One sensor observation as sent by the client and stored as the payload.
///
/// Numeric readings keep their JSON representation (integer or float), so
/// the stored payload matches what the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
  #[serde(rename = "type")]
  pub kind:         SampleKind,
  /// Client-supplied, typically epoch seconds or millis. Never checked.
  pub timestamp:    i64,

  // ── Audio ───────────────────────────────────────────────────────────────
  #[serde(rename = "snoreEnergy", default, skip_serializing_if = "Option::is_none")]
  pub snore_energy: Option<Number>,
  #[serde(rename = "avgVolume", default, skip_serializing_if = "Option::is_none")]
  pub avg_volume:   Option<Number>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rms:          Option<Number>,

  // ── Motion ──────────────────────────────────────────────────────────────
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub x:            Option<Number>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub y:            Option<Number>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub z:            Option<Number>,

  /// Fields the client sent that are not promoted above.
  #[serde(flatten)]
  pub attributes:   Map<String, Value>,
}

impl Sample {
  /// A sample with the given tag and timestamp and no readings.
  pub fn new(kind: impl Into<SampleKind>, timestamp: i64) -> Self {
    Self {
      kind: kind.into(),
      timestamp,
      snore_energy: None,
      avg_volume: None,
      rms: None,
      x: None,
      y: None,
      z: None,
      attributes: Map::new(),
    }
  }

  /// Validate an untyped JSON body into a sample.
  ///
  /// `type` must be a string, `timestamp` an integer, and every promoted
  /// reading a number (or null) when present.
  pub fn from_json(value: Value) -> Result<Self> {
    if !value.is_object() {
      return Err(Error::Validation("sample must be a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| Error::Validation(e.to_string()))
  }

  /// Parse a stored payload back into a sample.
  pub fn from_payload(payload: &str) -> serde_json::Result<Self> {
    serde_json::from_str(payload)
  }

  /// Serialise the full sample for the `payload` column.
  pub fn to_payload(&self) -> Result<String> { Ok(serde_json::to_string(self)?) }

  /// `snoreEnergy` as a float, zero when absent.
  pub fn snore_energy_or_zero(&self) -> f64 {
    self
      .snore_energy
      .as_ref()
      .and_then(Number::as_f64)
      .unwrap_or(0.0)
  }

  pub fn with_snore_energy(mut self, value: impl Into<Number>) -> Self {
    self.snore_energy = Some(value.into());
    self
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn audio_sample_parses_with_mixed_number_shapes() {
    let sample = Sample::from_json(json!({
      "type": "audio",
      "timestamp": 1000,
      "snoreEnergy": 6000,
      "avgVolume": 12.5,
    }))
    .unwrap();

    assert_eq!(sample.kind, SampleKind::Audio);
    assert_eq!(sample.timestamp, 1000);
    assert!(sample.snore_energy.as_ref().unwrap().is_i64());
    assert!(sample.avg_volume.as_ref().unwrap().is_f64());
    assert_eq!(sample.snore_energy_or_zero(), 6000.0);
    assert!(sample.attributes.is_empty());
  }

  #[test]
  fn missing_timestamp_is_a_validation_error() {
    let err = Sample::from_json(json!({ "type": "audio", "snoreEnergy": 1 }))
      .unwrap_err();
    match err {
      Error::Validation(msg) => assert!(msg.contains("timestamp"), "{msg}"),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn missing_type_is_a_validation_error() {
    let err = Sample::from_json(json!({ "timestamp": 1 })).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn wrongly_shaped_fields_are_rejected() {
    for body in [
      json!({ "type": 7, "timestamp": 1 }),
      json!({ "type": "audio", "timestamp": "soon" }),
      json!({ "type": "audio", "timestamp": 1.5 }),
      json!({ "type": "audio", "timestamp": 1, "snoreEnergy": "loud" }),
      json!({ "type": "motion", "timestamp": 1, "x": [0.1] }),
      json!(["audio", 1]),
    ] {
      let result = Sample::from_json(body.clone());
      assert!(
        matches!(result, Err(Error::Validation(_))),
        "accepted {body}"
      );
    }
  }

  #[test]
  fn readings_are_not_cross_checked_against_kind() {
    let sample = Sample::from_json(json!({
      "type": "motion",
      "timestamp": 5,
      "snoreEnergy": 9000,
    }))
    .unwrap();
    assert_eq!(sample.kind, SampleKind::Motion);
    assert_eq!(sample.snore_energy_or_zero(), 9000.0);
  }

  #[test]
  fn null_readings_are_treated_as_absent() {
    let sample = Sample::from_json(json!({
      "type": "motion",
      "timestamp": 5,
      "x": null,
    }))
    .unwrap();
    assert!(sample.x.is_none());
    assert!(!sample.to_payload().unwrap().contains("\"x\""));
  }

  #[test]
  fn payload_keeps_supplied_fields_and_omits_absent_ones() {
    let sample = Sample::from_json(json!({
      "type": "motion",
      "timestamp": 1000,
      "x": 0.1,
      "y": 0.2,
      "z": 9.8,
      "rms": 5.66,
      "orientation": "face-down",
    }))
    .unwrap();

    let payload: Value = serde_json::from_str(&sample.to_payload().unwrap()).unwrap();
    assert_eq!(
      payload,
      json!({
        "type": "motion",
        "timestamp": 1000,
        "x": 0.1,
        "y": 0.2,
        "z": 9.8,
        "rms": 5.66,
        "orientation": "face-down",
      })
    );
  }

  #[test]
  fn unknown_kind_round_trips_verbatim() {
    let sample = Sample::new("accelerometer_raw", 3);
    assert_eq!(sample.kind, SampleKind::Other("accelerometer_raw".into()));

    let back = Sample::from_payload(&sample.to_payload().unwrap()).unwrap();
    assert_eq!(back.kind.as_str(), "accelerometer_raw");
    assert_eq!(back, sample);
  }

  #[test]
  fn absent_snore_energy_reads_as_zero() {
    assert_eq!(Sample::new(SampleKind::Audio, 0).snore_energy_or_zero(), 0.0);
  }
}
