//! Declarative source and layer specifications.
//!
//! Three layers over one clustering-enabled point source, mirroring what the
//! rendering engine consumes: a cluster bubble layer whose color and radius
//! step on contained point count, a numeric label layer, and a fixed-style
//! layer for unclustered points. Step expressions are evaluable in-process
//! so tier selection is testable without the engine, and serialize to the
//! engine's JSON expression format.

use serde_json::{Value, json};

/// Id of the clustered report point source.
pub const REPORTS_SOURCE: &str = "reports-src";

/// Id of the cluster bubble layer.
pub const CLUSTERS_LAYER: &str = "clusters";

/// Id of the cluster count label layer.
pub const CLUSTER_COUNT_LAYER: &str = "cluster-count";

/// Id of the unclustered single-point layer.
pub const UNCLUSTERED_LAYER: &str = "unclustered-point";

/// Feature property the engine writes the aggregated point count to.
pub const POINT_COUNT: &str = "point_count";

/// Spatial aggregation settings for the point source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOptions {
    /// Whether aggregation is enabled at all.
    pub cluster: bool,
    /// Zoom level past which points always render individually.
    pub cluster_max_zoom: f64,
    /// Aggregation radius in screen pixels.
    pub cluster_radius: u32,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            cluster: true,
            cluster_max_zoom: 14.0,
            cluster_radius: 50,
        }
    }
}

/// Layer visibility filter over the aggregation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFilter {
    /// Only aggregated cluster features.
    HasPointCount,
    /// Only single, non-aggregated points.
    NotHasPointCount,
}

impl LayerFilter {
    /// Engine filter expression.
    #[must_use]
    pub fn to_expression(self) -> Value {
        match self {
            Self::HasPointCount => json!(["has", POINT_COUNT]),
            Self::NotHasPointCount => json!(["!", ["has", POINT_COUNT]]),
        }
    }
}

/// Two-threshold step function over an integer feature property.
///
/// `base` applies below the first threshold; each `(threshold, value)` pair
/// applies from that threshold upward.
#[derive(Debug, Clone, PartialEq)]
pub struct StepExpr<T> {
    /// Property the step input is read from.
    pub input: &'static str,
    /// Value below the first threshold.
    pub base: T,
    /// Ascending `(threshold, value)` tiers.
    pub steps: Vec<(u64, T)>,
}

impl<T: Clone> StepExpr<T> {
    /// Evaluates the step function for a property value.
    #[must_use]
    pub fn evaluate(&self, value: u64) -> T {
        let mut out = self.base.clone();
        for (threshold, tier) in &self.steps {
            if value >= *threshold {
                out = tier.clone();
            } else {
                break;
            }
        }
        out
    }
}

impl<T: Clone + Into<Value>> StepExpr<T> {
    /// Engine `step` expression: `["step", ["get", input], base, t1, v1, …]`.
    #[must_use]
    pub fn to_expression(&self) -> Value {
        let mut expr = vec![json!("step"), json!(["get", self.input])];
        expr.push(self.base.clone().into());
        for (threshold, tier) in &self.steps {
            expr.push(json!(threshold));
            expr.push(tier.clone().into());
        }
        Value::Array(expr)
    }
}

/// Paint and layout rules for one layer kind.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Aggregated cluster bubbles; color and radius step on point count.
    ClusterCircle {
        /// Bubble fill color per count tier.
        color: StepExpr<&'static str>,
        /// Bubble radius per count tier.
        radius: StepExpr<f64>,
    },
    /// Numeric count label centered on each cluster bubble.
    ClusterCount {
        /// Font stack name.
        text_font: &'static str,
        /// Label size in points.
        text_size: f64,
        /// Label color.
        text_color: &'static str,
    },
    /// Individual report points with fixed styling.
    Circle {
        /// Fill color.
        color: &'static str,
        /// Radius in pixels.
        radius: f64,
        /// Stroke width in pixels.
        stroke_width: f64,
        /// Stroke color.
        stroke_color: &'static str,
    },
}

/// One visual layer over the report source.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    /// Layer id.
    pub id: &'static str,
    /// Source id the layer reads from.
    pub source: &'static str,
    /// Aggregation-state filter.
    pub filter: LayerFilter,
    /// Paint/layout rules.
    pub kind: LayerKind,
}

impl LayerSpec {
    /// Serializes to the engine's layer JSON.
    #[must_use]
    pub fn to_style_json(&self) -> Value {
        match &self.kind {
            LayerKind::ClusterCircle { color, radius } => json!({
                "id": self.id,
                "type": "circle",
                "source": self.source,
                "filter": self.filter.to_expression(),
                "paint": {
                    "circle-color": color.to_expression(),
                    "circle-radius": radius.to_expression(),
                    "circle-stroke-width": 0,
                },
            }),
            LayerKind::ClusterCount {
                text_font,
                text_size,
                text_color,
            } => json!({
                "id": self.id,
                "type": "symbol",
                "source": self.source,
                "filter": self.filter.to_expression(),
                "layout": {
                    "text-field": format!("{{{POINT_COUNT}}}"),
                    "text-font": [text_font],
                    "text-size": text_size,
                },
                "paint": { "text-color": text_color },
            }),
            LayerKind::Circle {
                color,
                radius,
                stroke_width,
                stroke_color,
            } => json!({
                "id": self.id,
                "type": "circle",
                "source": self.source,
                "filter": self.filter.to_expression(),
                "paint": {
                    "circle-color": color,
                    "circle-radius": radius,
                    "circle-stroke-width": stroke_width,
                    "circle-stroke-color": stroke_color,
                },
            }),
        }
    }
}

/// Cluster bubble color tiers: <10, 10–30, ≥30.
#[must_use]
pub fn cluster_color_steps() -> StepExpr<&'static str> {
    StepExpr {
        input: POINT_COUNT,
        base: "#ff6d63ff",
        steps: vec![(10, "#f99c9cff"), (30, "#EF4444")],
    }
}

/// Cluster bubble radius tiers: <10, 10–30, ≥30.
#[must_use]
pub fn cluster_radius_steps() -> StepExpr<f64> {
    StepExpr {
        input: POINT_COUNT,
        base: 20.0,
        steps: vec![(10, 30.0), (30, 40.0)],
    }
}

/// The three layers installed over the report source, in paint order.
#[must_use]
pub fn report_layers() -> [LayerSpec; 3] {
    [
        LayerSpec {
            id: CLUSTERS_LAYER,
            source: REPORTS_SOURCE,
            filter: LayerFilter::HasPointCount,
            kind: LayerKind::ClusterCircle {
                color: cluster_color_steps(),
                radius: cluster_radius_steps(),
            },
        },
        LayerSpec {
            id: CLUSTER_COUNT_LAYER,
            source: REPORTS_SOURCE,
            filter: LayerFilter::HasPointCount,
            kind: LayerKind::ClusterCount {
                text_font: "Noto Sans Regular",
                text_size: 14.0,
                text_color: "#ffffff",
            },
        },
        LayerSpec {
            id: UNCLUSTERED_LAYER,
            source: REPORTS_SOURCE,
            filter: LayerFilter::NotHasPointCount,
            kind: LayerKind::Circle {
                color: "#EF4444",
                radius: 8.0,
                stroke_width: 2.0,
                stroke_color: "#fff",
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn step_tiers_select_by_threshold() {
        let color = cluster_color_steps();
        assert_eq!(color.evaluate(0), "#ff6d63ff");
        assert_eq!(color.evaluate(9), "#ff6d63ff");
        assert_eq!(color.evaluate(10), "#f99c9cff");
        assert_eq!(color.evaluate(29), "#f99c9cff");
        assert_eq!(color.evaluate(30), "#EF4444");
        assert_eq!(color.evaluate(1000), "#EF4444");
    }

    #[test]
    fn fifteen_point_cluster_uses_mid_tier() {
        assert_eq!(cluster_color_steps().evaluate(15), "#f99c9cff");
        assert!((cluster_radius_steps().evaluate(15) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn step_expression_json_shape() {
        assert_eq!(
            cluster_color_steps().to_expression(),
            json!([
                "step",
                ["get", "point_count"],
                "#ff6d63ff",
                10,
                "#f99c9cff",
                30,
                "#EF4444"
            ])
        );
    }

    #[test]
    fn filters_split_on_aggregation_state() {
        assert_eq!(
            LayerFilter::HasPointCount.to_expression(),
            json!(["has", "point_count"])
        );
        assert_eq!(
            LayerFilter::NotHasPointCount.to_expression(),
            json!(["!", ["has", "point_count"]])
        );
    }

    #[test]
    fn unclustered_layer_style_json() {
        let layers = report_layers();
        let unclustered = layers
            .iter()
            .find(|layer| layer.id == UNCLUSTERED_LAYER)
            .unwrap();
        assert_eq!(
            unclustered.to_style_json(),
            json!({
                "id": "unclustered-point",
                "type": "circle",
                "source": "reports-src",
                "filter": ["!", ["has", "point_count"]],
                "paint": {
                    "circle-color": "#EF4444",
                    "circle-radius": 8.0,
                    "circle-stroke-width": 2.0,
                    "circle-stroke-color": "#fff",
                },
            })
        );
    }

    #[test]
    fn cluster_count_label_reads_point_count() {
        let layers = report_layers();
        let count = layers
            .iter()
            .find(|layer| layer.id == CLUSTER_COUNT_LAYER)
            .unwrap();
        let style = count.to_style_json();
        assert_eq!(style["layout"]["text-field"], "{point_count}");
        assert_eq!(style["type"], "symbol");
    }
}
