//! Server assembly for Somnus: configuration, CORS, and request tracing
//! wrapped around the [`somnus_api`] router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Router,
  http::{HeaderValue, Method, header, header::InvalidHeaderValue},
};
use serde::Deserialize;
use somnus_api::ApiState;
use somnus_core::{
  report::{DEFAULT_WINDOW_SECS, MalformedPayloadPolicy, ReportPolicy},
  store::SampleStore,
};
use tower_http::{
  cors::{AllowOrigin, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SOMNUS_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                    String,
  pub port:                    u16,
  pub store_path:              PathBuf,
  /// Browser origins allowed to call the API.
  pub cors_origins:            Vec<String>,
  /// Seconds of audio represented by one audio sample.
  pub acquisition_window_secs: u32,
  pub on_malformed_payload:    MalformedPayloadPolicy,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                    "127.0.0.1".to_string(),
      port:                    8000,
      store_path:              PathBuf::from("sleep_data.db"),
      cors_origins:            vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
      ],
      acquisition_window_secs: DEFAULT_WINDOW_SECS,
      on_malformed_payload:    MalformedPayloadPolicy::default(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `SOMNUS_*` environment
  /// variables. `SOMNUS_CORS_ORIGINS` is comma-separated.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(
        config::Environment::with_prefix("SOMNUS")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("cors_origins"),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn report_policy(&self) -> ReportPolicy {
    ReportPolicy {
      window_secs:  self.acquisition_window_secs,
      on_malformed: self.on_malformed_payload,
    }
  }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// CORS for the configured browser origins. Credentials are allowed, so
/// methods and headers are listed explicitly rather than wildcarded.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
  let origins = origins
    .iter()
    .map(|o| o.parse::<HeaderValue>())
    .collect::<Result<Vec<_>, _>>()?;

  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(origins))
      .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
      .allow_headers([header::CONTENT_TYPE])
      .allow_credentials(true),
  )
}

/// Build the complete application for `store` under `cfg`.
pub fn app<S>(store: Arc<S>, cfg: &ServerConfig) -> Result<Router, InvalidHeaderValue>
where
  S: SampleStore + 'static,
{
  let state = ApiState::new(store, cfg.report_policy());
  Ok(
    somnus_api::router(state)
      .layer(cors_layer(&cfg.cors_origins)?)
      .layer(TraceLayer::new_for_http()),
  )
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
