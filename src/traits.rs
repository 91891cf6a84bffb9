//! Collaborator contracts
//!
//! The choropleth core never talks to a concrete canvas or map widget. It
//! drives a [`DrawingSurface`] created by a [`SurfaceFactory`], and the
//! overlay reads its viewport through a [`MapHost`].

use crate::{
    core::{
        color::Color,
        geo::{LatLng, Point, SurfaceSize},
        shape::{PathHandle, PathStyle},
    },
    Result,
};
use std::time::Duration;

/// Vector canvas the map draws its region paths on
pub trait DrawingSurface {
    /// Size the surface was created with, before any scale transform
    fn size(&self) -> SurfaceSize;

    /// Render a path tagged with `id` and return a handle to it
    fn add_path(&mut self, id: &str, path: &str, style: &PathStyle) -> Result<PathHandle>;

    /// Set a path's fill immediately, superseding any running fill animation
    fn set_fill(&mut self, handle: PathHandle, color: Color) -> Result<()>;

    /// Start animating a path's fill towards `target`.
    ///
    /// Returns as soon as the animation is registered; completion is not
    /// reported. A second call on the same path redirects the running
    /// animation. A zero duration behaves like [`DrawingSurface::set_fill`].
    fn animate_fill(&mut self, handle: PathHandle, target: Color, duration: Duration) -> Result<()>;

    /// Fill currently shown for a path
    fn fill(&self, handle: PathHandle) -> Option<Color>;

    /// Apply a uniform scale transform to the whole surface.
    /// The factor is absolute, not relative to the current scale.
    fn scale_all(&mut self, factor: f64);

    /// Scale factor currently applied
    fn scale(&self) -> f64;
}

/// Something a drawing surface can be created inside of
pub trait SurfaceFactory {
    type Surface: DrawingSurface;

    fn create_surface(&mut self, size: SurfaceSize) -> Result<Self::Surface>;
}

/// Positioned element in the host's overlay layer hosting a drawing surface
pub trait OverlayContainer: SurfaceFactory {
    fn size(&self) -> SurfaceSize;

    /// Top-left corner in host div pixels
    fn position(&self) -> Point;

    fn set_position(&mut self, top_left: Point);

    /// Remove the container from the host layer
    fn detach(&mut self);
}

/// Host map widget the overlay is synchronized with
pub trait MapHost {
    type Container: OverlayContainer;

    /// Current viewport dimensions in pixels
    fn viewport_size(&self) -> SurfaceSize;

    /// Current discrete zoom level
    fn zoom(&self) -> f64;

    /// Project a geographic coordinate to a div pixel; `None` when the host
    /// has no projection to offer yet
    fn lat_lng_to_div_pixel(&self, lat_lng: &LatLng) -> Option<Point>;

    /// Create a container in the host's overlay image layer
    fn create_overlay_container(&mut self, size: SurfaceSize) -> Result<Self::Container>;
}

/// Lifecycle a host map drives on its overlays
pub trait OverlayLifecycle<H: MapHost> {
    /// Called once when the overlay is added to the host
    fn on_add(&mut self, host: &mut H) -> Result<()>;

    /// Called whenever the host's projection changes (pan, zoom, resize)
    fn draw(&mut self, host: &H) -> Result<()>;

    /// Called when the overlay is removed from the host
    fn on_remove(&mut self) -> Result<()>;
}

/// Trait for viewport-aware components
pub trait ViewportAware<H: MapHost> {
    /// Handle viewport changes
    fn on_viewport_changed(&mut self, host: &H) -> Result<()>;

    /// Check if component requires viewport updates
    fn requires_viewport_updates(&self) -> bool {
        true
    }
}
