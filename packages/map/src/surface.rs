//! Seam to the external map rendering engine.
//!
//! Everything the adapter needs from the engine is expressed here as an
//! imperative trait: source/layer installation, wholesale data replacement,
//! the reusable popup, cursor affordance, camera commands, and the
//! cluster-expansion query (the one suspension point). A production
//! implementation bridges to the real engine; [`crate::HeadlessSurface`]
//! records calls in memory for tests and headless export.

use async_trait::async_trait;
use geo::Point;
use geojson::FeatureCollection;

use crate::popup::{PopupContent, PopupOptions};
use crate::style::{ClusterOptions, LayerSpec};

/// Screen corner a control is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    /// Top left corner.
    TopLeft,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}

/// Pointer cursor shown over the map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Engine default cursor.
    #[default]
    Default,
    /// Hover-affordance pointer.
    Pointer,
}

/// Errors surfaced by the rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The clustering index has no cluster with this id.
    #[error("unknown cluster id: {0}")]
    UnknownCluster(u64),
}

/// Imperative API of the rendering engine, as consumed by the adapter.
///
/// All positions are longitude/latitude points. Implementations are driven
/// from a single logical thread; no internal locking is expected.
#[async_trait]
pub trait RenderSurface {
    /// Docks a navigation control.
    fn add_navigation_control(&mut self, position: ControlPosition, show_compass: bool);

    /// Creates the reusable, initially unanchored popup.
    fn create_popup(&mut self, options: PopupOptions);

    /// Installs a clustering-enabled point source.
    fn add_cluster_source(&mut self, id: &str, options: ClusterOptions);

    /// Installs a visual layer.
    fn add_layer(&mut self, layer: LayerSpec);

    /// Replaces a source's contents atomically.
    fn set_source_data(&mut self, source_id: &str, data: FeatureCollection);

    /// Sets the pointer cursor over the canvas.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Anchors the popup at a point with fresh content.
    fn show_popup(&mut self, at: Point<f64>, content: PopupContent);

    /// Fully detaches the popup from the surface.
    fn remove_popup(&mut self);

    /// Moves the camera immediately, without animation.
    fn jump_to(&mut self, center: Point<f64>, zoom: f64);

    /// Animates the camera with the engine's easing transition.
    fn ease_to(&mut self, center: Point<f64>, zoom: f64);

    /// Animates the camera with the engine's flight transition.
    fn fly_to(&mut self, center: Point<f64>, zoom: f64);

    /// Resolves the zoom level at which the given cluster fully expands.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownCluster`] if the clustering index no
    /// longer knows the cluster (it may have re-aggregated since the click).
    async fn cluster_expansion_zoom(
        &mut self,
        source_id: &str,
        cluster_id: u64,
    ) -> Result<f64, SurfaceError>;

    /// Releases the surface and every attached listener and control.
    fn remove(&mut self);
}
