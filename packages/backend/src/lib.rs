#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Hosted backend client for road reports.
//!
//! The dashboard reads its data from a hosted database exposing a
//! `PostgREST`-style read-only HTTP API. This crate defines the
//! [`ReportBackend`] seam the rest of the system depends on, the
//! environment-driven connection configuration, and the production
//! [`postgrest::PostgrestBackend`] implementation.

pub mod postgrest;

use async_trait::async_trait;
use road_report_report_models::Report;

/// Environment variable holding the backend base URL.
pub const ENV_URL: &str = "SUPABASE_URL";

/// Environment variable holding the anonymous API key.
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// Errors that can occur while querying the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
}

/// Read-only report query seam.
///
/// One query shape only: all columns, ordered by creation time descending,
/// no filters or pagination. The store issues it once per surface lifetime.
#[async_trait]
pub trait ReportBackend: Send + Sync {
    /// Fetches every report, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the request or response decoding fails.
    async fn fetch_reports(&self) -> Result<Vec<Report>, BackendError>;
}

/// Connection settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend base URL (e.g. `https://xyzcompany.supabase.co`).
    pub url: String,
    /// Anonymous API key sent as `apikey` and bearer token.
    pub anon_key: String,
}

impl BackendConfig {
    /// Reads the connection settings from `SUPABASE_URL` and
    /// `SUPABASE_ANON_KEY`.
    ///
    /// Missing values are a startup-time diagnostic, not a failure: the
    /// client is still constructed and the first request surfaces the
    /// problem as a fetch error.
    #[must_use]
    pub fn from_env() -> Self {
        let url = std::env::var(ENV_URL).unwrap_or_default();
        let anon_key = std::env::var(ENV_ANON_KEY).unwrap_or_default();

        if url.is_empty() || anon_key.is_empty() {
            log::error!(
                "{ENV_URL} / {ENV_ANON_KEY} are not set; report fetches will fail until both are provided"
            );
        }

        Self { url, anon_key }
    }
}
