#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Map adapter for the road report dashboard.
//!
//! Bridges the rendering engine's native data/event model and the
//! dashboard's domain events. The engine itself (tiles, clustering math,
//! pixels) sits behind the [`surface::RenderSurface`] trait; this crate owns
//! everything derived from it: the clustered source and layer
//! specifications, the report-to-feature projection, the reusable hover
//! popup, the surface lifecycle state machine, and camera commands.

pub mod adapter;
pub mod features;
pub mod headless;
pub mod popup;
pub mod style;
pub mod surface;

pub use adapter::{MapAdapter, SurfaceLifecycle};
pub use headless::HeadlessSurface;
pub use surface::RenderSurface;
