#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! In-memory report store.
//!
//! The single source of truth for report content. Refreshed wholesale from
//! the backend, once per surface lifetime; the map projection and the list
//! panel both derive from it. A failed refresh keeps the previous sequence
//! so the dashboard degrades to stale-but-interactive rather than empty.

use road_report_backend::ReportBackend;
use road_report_report_models::Report;

/// Ordered sequence of reports plus fetch state.
///
/// Ordering contract: after a successful [`refresh`](Self::refresh) the
/// sequence is sorted by `created_at` descending, ties keeping their
/// arrival order.
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: Vec<Report>,
    loading: bool,
    fetch_error: Option<String>,
}

impl ReportStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports, newest first. Includes records whose geometry does not
    /// parse; only the map projection filters those.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Whether a refresh is in flight. Callers render a loading indicator
    /// while true.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last refresh failure, if the most recent refresh failed.
    #[must_use]
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    /// Looks up a report by id. Misses are expected for stale selections.
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Report> {
        self.reports.iter().find(|report| report.id == id)
    }

    /// Number of reports currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether the store holds no reports.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Replaces the store contents from the backend.
    ///
    /// On success the entire prior sequence is replaced and re-sorted newest
    /// first. On failure the prior sequence is kept, the failure is logged
    /// and recorded for the view's error banner, and `loading` is cleared
    /// either way.
    pub async fn refresh<B: ReportBackend + ?Sized>(&mut self, backend: &B) {
        self.loading = true;

        match backend.fetch_reports().await {
            Ok(mut reports) => {
                // Stable sort: equal timestamps keep their arrival order.
                reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                self.reports = reports;
                self.fetch_error = None;
            }
            Err(e) => {
                log::error!("Failed to fetch reports: {e}");
                self.fetch_error = Some(e.to_string());
            }
        }

        self.loading = false;
    }
}
