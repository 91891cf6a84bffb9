//! Prelude module for common choropleth types and traits
//!
//! Re-exports the most commonly used types, traits, and functions
//! for easy importing with `use choropleth::prelude::*;`

pub use crate::core::{
    builder::ChoroplethBuilder,
    color::Color,
    config::ChoroplethOptions,
    geo::{LatLng, Point, SurfaceSize},
    map::{ramp_index, ChoroplethMap},
    projection::{ProjectionDefinition, ProjectionRegistry},
    shape::{PathHandle, PathStyle, Shape},
    viewport::Viewport,
};

pub use crate::layers::{
    headless::HeadlessHost,
    overlay::{scale_for_zoom, ChoroplethOverlay, DrawState, OverlayState},
};

pub use crate::animation::{FillTransition, TransitionManager};

pub use crate::rendering::surface::{MemoryContainer, MemorySurface};

pub use crate::traits::{
    DrawingSurface, MapHost, OverlayContainer, OverlayLifecycle, SurfaceFactory, ViewportAware,
};

pub use crate::{Error as MapError, Result};

pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
