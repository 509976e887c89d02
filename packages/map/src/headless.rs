//! In-memory rendering surface.
//!
//! Records every adapter call instead of rendering: installed controls,
//! sources, layers, the current source data, popup and cursor state, and the
//! full camera command history. Used by the test suites and by the headless
//! export binary; cluster expansion zooms are scripted per cluster id.

use std::collections::BTreeMap;

use async_trait::async_trait;
use geo::Point;
use geojson::FeatureCollection;

use crate::popup::{PopupContent, PopupOptions};
use crate::style::{ClusterOptions, LayerSpec};
use crate::surface::{ControlPosition, Cursor, RenderSurface, SurfaceError};

/// One recorded camera command.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraMove {
    /// Immediate move.
    Jump {
        /// Target center.
        center: Point<f64>,
        /// Target zoom.
        zoom: f64,
    },
    /// Eased transition.
    Ease {
        /// Target center.
        center: Point<f64>,
        /// Target zoom.
        zoom: f64,
    },
    /// Flight transition.
    Fly {
        /// Target center.
        center: Point<f64>,
        /// Target zoom.
        zoom: f64,
    },
}

/// Recording implementation of [`RenderSurface`].
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    /// Docked navigation controls, in install order.
    pub nav_controls: Vec<(ControlPosition, bool)>,
    /// Options the reusable popup was created with.
    pub popup_options: Option<PopupOptions>,
    /// Installed sources by id.
    pub sources: BTreeMap<String, ClusterOptions>,
    /// Installed layers, in paint order.
    pub layers: Vec<LayerSpec>,
    /// Current data per source id.
    pub data: BTreeMap<String, FeatureCollection>,
    /// Current canvas cursor.
    pub cursor: Cursor,
    /// Anchored popup, if any.
    pub popup: Option<(Point<f64>, PopupContent)>,
    /// Camera command history.
    pub camera: Vec<CameraMove>,
    /// Scripted expansion zoom per cluster id.
    pub expansion_zooms: BTreeMap<u64, f64>,
    /// Whether [`RenderSurface::remove`] ran.
    pub removed: bool,
}

impl HeadlessSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the expansion zoom returned for a cluster id.
    #[must_use]
    pub fn with_expansion_zoom(mut self, cluster_id: u64, zoom: f64) -> Self {
        self.expansion_zooms.insert(cluster_id, zoom);
        self
    }

    /// Current contents of a source, if set.
    #[must_use]
    pub fn source_data(&self, source_id: &str) -> Option<&FeatureCollection> {
        self.data.get(source_id)
    }
}

#[async_trait]
impl RenderSurface for HeadlessSurface {
    fn add_navigation_control(&mut self, position: ControlPosition, show_compass: bool) {
        self.nav_controls.push((position, show_compass));
    }

    fn create_popup(&mut self, options: PopupOptions) {
        self.popup_options = Some(options);
    }

    fn add_cluster_source(&mut self, id: &str, options: ClusterOptions) {
        self.sources.insert(id.to_string(), options);
    }

    fn add_layer(&mut self, layer: LayerSpec) {
        self.layers.push(layer);
    }

    fn set_source_data(&mut self, source_id: &str, data: FeatureCollection) {
        self.data.insert(source_id.to_string(), data);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn show_popup(&mut self, at: Point<f64>, content: PopupContent) {
        self.popup = Some((at, content));
    }

    fn remove_popup(&mut self) {
        self.popup = None;
    }

    fn jump_to(&mut self, center: Point<f64>, zoom: f64) {
        self.camera.push(CameraMove::Jump { center, zoom });
    }

    fn ease_to(&mut self, center: Point<f64>, zoom: f64) {
        self.camera.push(CameraMove::Ease { center, zoom });
    }

    fn fly_to(&mut self, center: Point<f64>, zoom: f64) {
        self.camera.push(CameraMove::Fly { center, zoom });
    }

    async fn cluster_expansion_zoom(
        &mut self,
        _source_id: &str,
        cluster_id: u64,
    ) -> Result<f64, SurfaceError> {
        self.expansion_zooms
            .get(&cluster_id)
            .copied()
            .ok_or(SurfaceError::UnknownCluster(cluster_id))
    }

    fn remove(&mut self) {
        self.removed = true;
    }
}
