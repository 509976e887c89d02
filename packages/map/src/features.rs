//! Report-to-feature projection.
//!
//! Rebuilds the full feature collection for the clustered source from the
//! report sequence. Records whose geometry fails to parse are excluded here
//! and only here; the store and the list panel keep them.

use geojson::{Feature, FeatureCollection, Geometry, Value, feature::Id};
use road_report_report_models::Report;

/// Projects reports into the engine's feature collection.
///
/// Each feature carries the full serialized report as its properties bag.
/// Unparseable geometry drops the record from the projection with a
/// per-record debug log and one aggregate warning.
#[must_use]
pub fn feature_collection(reports: &[Report]) -> FeatureCollection {
    let mut features = Vec::with_capacity(reports.len());
    let mut skipped = 0_usize;

    for report in reports {
        match road_report_geometry::parse_point(&report.geom_wkt) {
            Ok(point) => {
                let properties = serde_json::to_value(report).ok().and_then(|value| {
                    if let serde_json::Value::Object(map) = value {
                        Some(map)
                    } else {
                        None
                    }
                });

                features.push(Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Point(vec![point.x(), point.y()]))),
                    id: Some(Id::Number(report.id.into())),
                    properties,
                    foreign_members: None,
                });
            }
            Err(e) => {
                skipped += 1;
                log::debug!("Skipping report {}: {e}", report.id);
            }
        }
    }

    if skipped > 0 {
        log::warn!("Excluded {skipped} reports with unparseable geometry from the map source");
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
