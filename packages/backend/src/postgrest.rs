//! `PostgREST` implementation of the report backend.
//!
//! Issues a single read-only query against the hosted reports view:
//! `GET {base}/rest/v1/road_reports_view?select=*&order=created_at.desc`
//! authenticated with the anonymous key.

use async_trait::async_trait;
use road_report_report_models::Report;

use crate::{BackendConfig, BackendError, ReportBackend};

/// View exposed by the hosted database for read access to reports.
const REPORTS_VIEW: &str = "road_reports_view";

/// HTTP client for the hosted `PostgREST` API.
pub struct PostgrestBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl PostgrestBackend {
    /// Creates a client from the given connection settings.
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Builds the full query URL for the reports view.
    fn reports_url(&self) -> String {
        format!(
            "{}/rest/v1/{REPORTS_VIEW}?select=*&order=created_at.desc",
            self.config.url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ReportBackend for PostgrestBackend {
    async fn fetch_reports(&self) -> Result<Vec<Report>, BackendError> {
        let url = self.reports_url();
        log::info!("Fetching reports from {REPORTS_VIEW}");

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let reports: Vec<Report> = serde_json::from_str(&body)?;
        log::info!("Fetched {} reports", reports.len());
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(url: &str) -> PostgrestBackend {
        PostgrestBackend::new(BackendConfig {
            url: url.to_string(),
            anon_key: "anon".to_string(),
        })
    }

    #[test]
    fn builds_reports_url() {
        assert_eq!(
            backend("https://example.supabase.co").reports_url(),
            "https://example.supabase.co/rest/v1/road_reports_view?select=*&order=created_at.desc"
        );
    }

    #[test]
    fn strips_trailing_slash_from_base_url() {
        assert_eq!(
            backend("https://example.supabase.co/").reports_url(),
            "https://example.supabase.co/rest/v1/road_reports_view?select=*&order=created_at.desc"
        );
    }
}
