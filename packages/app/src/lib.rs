#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Dashboard wiring: list panel view model and selection sync.
//!
//! Owns the three pieces of domain state (report store, hovered-report
//! selection, map adapter) and funnels every input source through one
//! [`Dashboard::handle_event`] path. The list panel and the popup both
//! re-derive from current selection + current store on every change; there
//! is no incremental update path anywhere.

use geo::Point;
use road_report_backend::ReportBackend;
use road_report_map::adapter::MapAdapter;
use road_report_map::surface::RenderSurface;
use road_report_report_models::Report;
use road_report_store::ReportStore;

/// Input events from the list panel and the map layer.
///
/// These are the only state-transition mechanism: producers (list pointer
/// events, map pointer events, clicks, the surface ready signal) stay
/// decoupled from consumers (popup, list highlight, camera) through the
/// single selection value.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The rendering surface finished loading and became interactive.
    /// Signalled exactly once per surface lifetime.
    SurfaceReady,
    /// Pointer entered a list item.
    ListItemEntered(i64),
    /// Pointer left the list panel's hovered item.
    ListItemLeft,
    /// Pointer entered an unclustered map marker. Never fires for clusters.
    MarkerEntered(i64),
    /// Pointer left an unclustered map marker.
    MarkerLeft,
    /// Click on a list item: camera flight only, selection unchanged.
    ListItemClicked(i64),
    /// Click on a cluster bubble.
    ClusterClicked {
        /// Cluster id from the clustering index.
        cluster_id: u64,
        /// Cluster position, longitude/latitude.
        at: Point<f64>,
    },
}

/// One row of the list panel, derived from store order plus selection.
#[derive(Debug, Clone, Copy)]
pub struct ListEntry<'a> {
    /// The underlying report.
    pub report: &'a Report,
    /// Whether this row is the hovered one.
    pub highlighted: bool,
}

/// The dashboard: report store, selection, and map adapter under one roof.
pub struct Dashboard<S: RenderSurface, B: ReportBackend> {
    store: ReportStore,
    hovered_id: Option<i64>,
    adapter: MapAdapter<S>,
    backend: B,
}

impl<S: RenderSurface, B: ReportBackend> Dashboard<S, B> {
    /// Creates a dashboard with an empty store and no surface bound.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            store: ReportStore::new(),
            hovered_id: None,
            adapter: MapAdapter::new(),
            backend,
        }
    }

    /// Binds a freshly created rendering surface to the map adapter.
    pub fn initialize(&mut self, surface: S) {
        self.adapter.initialize(surface);
    }

    /// Handles one input event. The only place domain state mutates.
    pub async fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SurfaceReady => {
                if self.adapter.surface_ready() {
                    self.store.refresh(&self.backend).await;
                    self.adapter.set_data(self.store.reports());
                }
            }
            DashboardEvent::ListItemEntered(id) => self.set_hovered(Some(id), false),
            DashboardEvent::ListItemLeft => self.set_hovered(None, false),
            DashboardEvent::MarkerEntered(id) => self.set_hovered(Some(id), true),
            DashboardEvent::MarkerLeft => self.set_hovered(None, true),
            DashboardEvent::ListItemClicked(id) => {
                if let Some(report) = self.store.find(id) {
                    self.adapter.fly_to_report(report);
                } else {
                    log::warn!("List click for unknown report {id}; ignoring");
                }
            }
            DashboardEvent::ClusterClicked { cluster_id, at } => {
                self.adapter.cluster_click(cluster_id, at).await;
            }
        }
    }

    /// Writes the single selection value and re-derives everything that
    /// depends on it. Last writer wins across both sources.
    fn set_hovered(&mut self, hovered: Option<i64>, from_map: bool) {
        self.hovered_id = hovered;
        if from_map {
            self.adapter.set_hover_cursor(hovered.is_some());
        }
        self.adapter
            .apply_selection(self.hovered_id, self.store.reports());
    }

    /// List rows in store order with their highlight flags.
    #[must_use]
    pub fn list_entries(&self) -> Vec<ListEntry<'_>> {
        self.store
            .reports()
            .iter()
            .map(|report| ListEntry {
                report,
                highlighted: self.hovered_id == Some(report.id),
            })
            .collect()
    }

    /// Whether the loading indicator should render.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    /// Report count for the list header.
    #[must_use]
    pub fn report_count(&self) -> usize {
        self.store.len()
    }

    /// Non-fatal error banner text, if the last refresh failed.
    #[must_use]
    pub fn fetch_error(&self) -> Option<&str> {
        self.store.fetch_error()
    }

    /// Currently hovered report id, if any.
    #[must_use]
    pub const fn hovered_id(&self) -> Option<i64> {
        self.hovered_id
    }

    /// The bound rendering surface, for headless export and inspection.
    #[must_use]
    pub const fn surface(&self) -> Option<&S> {
        self.adapter.surface()
    }

    /// Releases the surface and clears the selection.
    pub fn teardown(&mut self) {
        self.adapter.teardown();
        self.hovered_id = None;
    }
}
