//! # Choropleth
//!
//! Value-driven choropleth maps rendered as vector shapes, plus an overlay
//! that keeps a map aligned with a slippy host map while it pans and zooms.
//!
//! The crate never touches a real canvas or map widget. Drawing goes through
//! [`traits::DrawingSurface`] and host access through [`traits::MapHost`];
//! [`rendering::surface`] and [`layers::headless`] provide in-memory versions.

pub mod animation;
pub mod core;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::ChoroplethBuilder,
    color::Color,
    config::ChoroplethOptions,
    geo::{LatLng, Point, SurfaceSize},
    map::{ramp_index, ChoroplethMap},
    projection::{ProjectionDefinition, ProjectionRegistry, ProjectionRegistryBuilder},
    shape::{PathHandle, PathStyle, Shape},
    viewport::Viewport,
};

pub use layers::{
    headless::HeadlessHost,
    overlay::{scale_for_zoom, scale_for_zoom_level, ChoroplethOverlay, DrawState, OverlayState},
};

pub use rendering::surface::{MemoryContainer, MemorySurface};

pub use animation::transitions::{FillTransition, TransitionManager};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    #[error("Invalid option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid projection definition: {0}")]
    InvalidProjection(String),

    #[error("Reserved path key: {0}")]
    ReservedKey(String),

    #[error("Projection already registered: {0}")]
    DuplicateProjection(String),

    #[error("Overlay is not attached to a map")]
    NotAttached,

    #[error("Overlay is already attached to a map")]
    AlreadyAttached,

    #[error("Host error: {0}")]
    Host(String),

    #[error("Surface error: {0}")]
    Surface(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Initialize `env_logger` from `RUST_LOG`. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
