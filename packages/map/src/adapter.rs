//! Surface lifecycle and domain-event bridging.
//!
//! The adapter owns the rendering surface and everything attached to it
//! (popup, source, layers) and is the only component allowed to touch them.
//! Domain state (reports, selection) stays outside; the adapter receives it
//! as arguments and derives rendering state from scratch each time.

use geo::Point;
use geojson::FeatureCollection;
use road_report_report_models::Report;

use crate::features;
use crate::popup::{PopupContent, PopupOptions};
use crate::style::{ClusterOptions, REPORTS_SOURCE, report_layers};
use crate::surface::{ControlPosition, Cursor, RenderSurface};

/// Initial camera center (Taipei) in longitude/latitude.
const INITIAL_CENTER: (f64, f64) = (121.53, 25.04);

/// Initial camera zoom.
const INITIAL_ZOOM: f64 = 11.0;

/// Fixed target zoom for list-item click flights. Cluster clicks compute
/// their zoom from the clustering index instead.
const LIST_CLICK_ZOOM: f64 = 15.0;

/// Rendering-surface lifecycle.
///
/// Data, selection, and camera commands are honored only in `Ready`;
/// earlier calls queue or no-op, never crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceLifecycle {
    /// No surface bound.
    #[default]
    Uninitialized,
    /// Surface bound, style still loading.
    LoadingStyle,
    /// Interactive; all commands accepted.
    Ready,
}

/// Bridge between the rendering surface and the dashboard.
pub struct MapAdapter<S: RenderSurface> {
    surface: Option<S>,
    lifecycle: SurfaceLifecycle,
    ready_signalled: bool,
    pending_data: Option<FeatureCollection>,
}

impl<S: RenderSurface> Default for MapAdapter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RenderSurface> MapAdapter<S> {
    /// Creates an adapter with no surface bound.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: None,
            lifecycle: SurfaceLifecycle::Uninitialized,
            ready_signalled: false,
            pending_data: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn lifecycle(&self) -> SurfaceLifecycle {
        self.lifecycle
    }

    /// The bound surface, if any. Read-only; mutation goes through the
    /// adapter's methods.
    #[must_use]
    pub const fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Binds a freshly created surface and performs initial setup: camera
    /// position, navigation control (bottom right, no compass), and the
    /// reusable unanchored popup. The surface then loads its style; data
    /// and layers wait for [`surface_ready`](Self::surface_ready).
    pub fn initialize(&mut self, mut surface: S) {
        if self.surface.is_some() {
            log::warn!("initialize called with a surface already bound; ignoring");
            return;
        }

        surface.jump_to(Point::new(INITIAL_CENTER.0, INITIAL_CENTER.1), INITIAL_ZOOM);
        surface.add_navigation_control(ControlPosition::BottomRight, false);
        surface.create_popup(PopupOptions::default());

        self.surface = Some(surface);
        self.lifecycle = SurfaceLifecycle::LoadingStyle;
        self.ready_signalled = false;
    }

    /// Marks the surface interactive: installs the clustered source and the
    /// three report layers, then flushes any queued data.
    ///
    /// Returns `true` on the first signal for this surface; the caller uses
    /// that as the trigger for the initial report fetch. Duplicate signals
    /// are tolerated and return `false`.
    pub fn surface_ready(&mut self) -> bool {
        if self.lifecycle == SurfaceLifecycle::Ready {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            log::warn!("surface_ready before initialize; ignoring");
            return false;
        };

        surface.add_cluster_source(REPORTS_SOURCE, ClusterOptions::default());
        for layer in report_layers() {
            surface.add_layer(layer);
        }
        self.lifecycle = SurfaceLifecycle::Ready;

        if let Some(data) = self.pending_data.take() {
            surface.set_source_data(REPORTS_SOURCE, data);
        }

        let first = !self.ready_signalled;
        self.ready_signalled = true;
        first
    }

    /// Rebuilds the point source from the full report sequence, dropping
    /// records with unparseable geometry. Before the surface is ready the
    /// projection is queued and applied on readiness.
    pub fn set_data(&mut self, reports: &[Report]) {
        let collection = features::feature_collection(reports);

        if self.lifecycle == SurfaceLifecycle::Ready {
            if let Some(surface) = self.surface.as_mut() {
                surface.set_source_data(REPORTS_SOURCE, collection);
                return;
            }
        }

        log::debug!(
            "Surface not ready; queueing {} projected features",
            collection.features.len()
        );
        self.pending_data = Some(collection);
    }

    /// Toggles the hover-affordance cursor for unclustered-point hover.
    pub fn set_hover_cursor(&mut self, hovering: bool) {
        if self.lifecycle != SurfaceLifecycle::Ready {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.set_cursor(if hovering {
                Cursor::Pointer
            } else {
                Cursor::Default
            });
        }
    }

    /// Applies the current selection: anchors the popup at the hovered
    /// report with fresh content, or fully detaches it.
    ///
    /// Everything is re-derived from the arguments. A stale id (absent from
    /// `reports`) and unparseable geometry both resolve to detachment.
    pub fn apply_selection(&mut self, hovered: Option<i64>, reports: &[Report]) {
        if self.lifecycle != SurfaceLifecycle::Ready {
            log::debug!("Selection change before surface ready; ignoring");
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let target = hovered.and_then(|id| reports.iter().find(|report| report.id == id));
        match target {
            Some(report) => match road_report_geometry::parse_point(&report.geom_wkt) {
                Ok(point) => surface.show_popup(point, PopupContent::for_report(report)),
                Err(e) => {
                    log::debug!("Cannot anchor popup for report {}: {e}", report.id);
                    surface.remove_popup();
                }
            },
            None => surface.remove_popup(),
        }
    }

    /// Expands a clicked cluster: queries the zoom that splits this cluster
    /// apart and eases the camera there. Suspends only on the expansion
    /// query; other interaction continues meanwhile.
    pub async fn cluster_click(&mut self, cluster_id: u64, at: Point<f64>) {
        if self.lifecycle != SurfaceLifecycle::Ready {
            log::debug!("Cluster click before surface ready; ignoring");
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match surface.cluster_expansion_zoom(REPORTS_SOURCE, cluster_id).await {
            Ok(zoom) => surface.ease_to(at, zoom),
            Err(e) => log::warn!("Cluster expansion query failed: {e}"),
        }
    }

    /// Flies the camera to a report at the fixed list-click zoom.
    ///
    /// Unparseable geometry makes this a logged no-op rather than an error.
    pub fn fly_to_report(&mut self, report: &Report) {
        if self.lifecycle != SurfaceLifecycle::Ready {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match road_report_geometry::parse_point(&report.geom_wkt) {
            Ok(point) => surface.fly_to(point, LIST_CLICK_ZOOM),
            Err(e) => log::warn!("Cannot fly to report {}: {e}", report.id),
        }
    }

    /// Releases the surface and everything attached to it. Afterwards the
    /// adapter is uninitialized and a new surface may be bound, starting a
    /// new lifetime (with its own single fetch trigger).
    pub fn teardown(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.remove_popup();
            surface.remove();
        }
        self.lifecycle = SurfaceLifecycle::Uninitialized;
        self.pending_data = None;
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::headless::{CameraMove, HeadlessSurface};
    use crate::style::{CLUSTERS_LAYER, UNCLUSTERED_LAYER};

    fn report(id: i64, wkt: &str) -> Report {
        Report {
            id,
            geom_wkt: wkt.to_string(),
            report_type: "路面破損".to_string(),
            severity: "一般".to_string(),
            description: Some("坑洞".to_string()),
            status: "待處理".to_string(),
            created_at: DateTime::from_timestamp(1_700_000_000 + id, 0).unwrap(),
        }
    }

    fn ready_adapter() -> MapAdapter<HeadlessSurface> {
        let mut adapter = MapAdapter::new();
        adapter.initialize(HeadlessSurface::new());
        adapter.surface_ready();
        adapter
    }

    #[test]
    fn initialize_sets_up_camera_control_and_popup() {
        let mut adapter = MapAdapter::new();
        adapter.initialize(HeadlessSurface::new());

        assert_eq!(adapter.lifecycle(), SurfaceLifecycle::LoadingStyle);
        let surface = adapter.surface().unwrap();
        assert_eq!(surface.nav_controls, vec![(ControlPosition::BottomRight, false)]);
        assert_eq!(surface.popup_options, Some(PopupOptions::default()));
        assert_eq!(
            surface.camera,
            vec![CameraMove::Jump {
                center: Point::new(121.53, 25.04),
                zoom: 11.0
            }]
        );
    }

    #[test]
    fn surface_ready_installs_source_and_layers_once() {
        let mut adapter = MapAdapter::new();
        adapter.initialize(HeadlessSurface::new());

        assert!(adapter.surface_ready());
        assert!(!adapter.surface_ready());

        let surface = adapter.surface().unwrap();
        assert!(surface.sources.contains_key(REPORTS_SOURCE));
        let layer_ids: Vec<&str> = surface.layers.iter().map(|layer| layer.id).collect();
        assert_eq!(
            layer_ids,
            vec![CLUSTERS_LAYER, "cluster-count", UNCLUSTERED_LAYER]
        );
    }

    #[test]
    fn set_data_before_ready_queues_and_flushes_on_ready() {
        let mut adapter = MapAdapter::new();
        adapter.initialize(HeadlessSurface::new());

        adapter.set_data(&[report(1, "POINT(121.5 25.1)")]);
        assert!(adapter.surface().unwrap().data.is_empty());

        adapter.surface_ready();
        let data = adapter.surface().unwrap().source_data(REPORTS_SOURCE).unwrap();
        assert_eq!(data.features.len(), 1);
    }

    #[test]
    fn set_data_replaces_source_contents_wholesale() {
        let mut adapter = ready_adapter();
        adapter.set_data(&[
            report(1, "POINT(121.5 25.1)"),
            report(2, "POINT(121.6 25.0)"),
        ]);
        adapter.set_data(&[report(3, "POINT(121.7 24.9)")]);

        let data = adapter.surface().unwrap().source_data(REPORTS_SOURCE).unwrap();
        assert_eq!(data.features.len(), 1);
    }

    #[test]
    fn selection_anchors_popup_at_report_point() {
        let reports = [
            report(1, "POINT(121.5 25.1)"),
            report(2, "POINT(121.6 25.0)"),
        ];
        let mut adapter = ready_adapter();
        adapter.set_data(&reports);

        adapter.apply_selection(Some(2), &reports);
        let (at, content) = adapter.surface().unwrap().popup.clone().unwrap();
        assert!((at.x() - 121.6).abs() < f64::EPSILON);
        assert!((at.y() - 25.0).abs() < f64::EPSILON);
        assert_eq!(content.tag, "路面破損");
        assert_eq!(content.body, "坑洞");

        adapter.apply_selection(None, &reports);
        assert!(adapter.surface().unwrap().popup.is_none());
    }

    #[test]
    fn stale_selection_detaches_popup() {
        let reports = [report(1, "POINT(121.5 25.1)")];
        let mut adapter = ready_adapter();

        adapter.apply_selection(Some(1), &reports);
        assert!(adapter.surface().unwrap().popup.is_some());

        adapter.apply_selection(Some(99), &reports);
        assert!(adapter.surface().unwrap().popup.is_none());
    }

    #[test]
    fn unparseable_geometry_detaches_popup() {
        let reports = [report(1, "POINT(abc)")];
        let mut adapter = ready_adapter();

        adapter.apply_selection(Some(1), &reports);
        assert!(adapter.surface().unwrap().popup.is_none());
    }

    #[test]
    fn hover_cursor_toggles_pointer() {
        let mut adapter = ready_adapter();

        adapter.set_hover_cursor(true);
        assert_eq!(adapter.surface().unwrap().cursor, Cursor::Pointer);

        adapter.set_hover_cursor(false);
        assert_eq!(adapter.surface().unwrap().cursor, Cursor::Default);
    }

    #[tokio::test]
    async fn cluster_click_eases_to_expansion_zoom() {
        let mut adapter = MapAdapter::new();
        adapter.initialize(HeadlessSurface::new().with_expansion_zoom(42, 13.5));
        adapter.surface_ready();

        adapter.cluster_click(42, Point::new(121.55, 25.02)).await;

        let surface = adapter.surface().unwrap();
        assert_eq!(
            surface.camera.last(),
            Some(&CameraMove::Ease {
                center: Point::new(121.55, 25.02),
                zoom: 13.5
            })
        );
    }

    #[tokio::test]
    async fn unknown_cluster_leaves_camera_untouched() {
        let mut adapter = ready_adapter();
        let moves_before = adapter.surface().unwrap().camera.len();

        adapter.cluster_click(7, Point::new(121.55, 25.02)).await;

        assert_eq!(adapter.surface().unwrap().camera.len(), moves_before);
    }

    #[test]
    fn fly_to_report_uses_fixed_zoom() {
        let mut adapter = ready_adapter();
        adapter.fly_to_report(&report(1, "POINT(121.5 25.1)"));

        assert_eq!(
            adapter.surface().unwrap().camera.last(),
            Some(&CameraMove::Fly {
                center: Point::new(121.5, 25.1),
                zoom: 15.0
            })
        );
    }

    #[test]
    fn fly_to_unparseable_report_is_a_no_op() {
        let mut adapter = ready_adapter();
        let moves_before = adapter.surface().unwrap().camera.len();

        adapter.fly_to_report(&report(1, "POINT(abc)"));

        assert_eq!(adapter.surface().unwrap().camera.len(), moves_before);
    }

    #[test]
    fn commands_before_initialize_are_no_ops() {
        let mut adapter: MapAdapter<HeadlessSurface> = MapAdapter::new();

        adapter.set_data(&[report(1, "POINT(121.5 25.1)")]);
        adapter.apply_selection(Some(1), &[]);
        adapter.set_hover_cursor(true);
        adapter.fly_to_report(&report(1, "POINT(121.5 25.1)"));
        adapter.teardown();

        assert_eq!(adapter.lifecycle(), SurfaceLifecycle::Uninitialized);
        assert!(adapter.surface().is_none());
    }

    #[test]
    fn teardown_releases_surface_and_allows_rebind() {
        let mut adapter = ready_adapter();
        adapter.teardown();
        assert_eq!(adapter.lifecycle(), SurfaceLifecycle::Uninitialized);

        adapter.initialize(HeadlessSurface::new());
        assert!(adapter.surface_ready(), "new surface lifetime refetches");
    }
}
