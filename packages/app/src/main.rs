#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Headless entry point for the road report dashboard.
//!
//! Drives the full stack without a rendering engine: reads backend
//! credentials from the environment, fetches the report view once (the same
//! surface-ready trigger the interactive dashboard uses), and writes the
//! projected clustered-source feature collection to `data/reports.geojson`.

use road_report_app::{Dashboard, DashboardEvent};
use road_report_backend::BackendConfig;
use road_report_backend::postgrest::PostgrestBackend;
use road_report_map::HeadlessSurface;
use road_report_map::style::REPORTS_SOURCE;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = BackendConfig::from_env();
    let backend = PostgrestBackend::new(config);

    let mut dashboard = Dashboard::new(backend);
    dashboard.initialize(HeadlessSurface::new());
    dashboard.handle_event(DashboardEvent::SurfaceReady).await;

    if let Some(error) = dashboard.fetch_error() {
        log::error!("Report fetch failed: {error}");
    }
    log::info!("Store holds {} reports", dashboard.report_count());

    if let Some(collection) = dashboard
        .surface()
        .and_then(|surface| surface.source_data(REPORTS_SOURCE))
    {
        let out_dir = std::path::Path::new("data");
        std::fs::create_dir_all(out_dir)?;
        let path = out_dir.join("reports.geojson");
        std::fs::write(&path, serde_json::to_string_pretty(collection)?)?;
        log::info!(
            "Wrote {} projected features to {}",
            collection.features.len(),
            path.display()
        );
    }

    dashboard.teardown();
    Ok(())
}
