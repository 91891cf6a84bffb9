//! In-memory host map
//!
//! [`HeadlessHost`] is a Web Mercator [`Viewport`] that hands out
//! [`MemoryContainer`]s. It stands in for an interactive map widget in tests
//! and in the demo binary.

use crate::{
    core::{
        geo::{LatLng, Point, SurfaceSize},
        viewport::Viewport,
    },
    rendering::surface::MemoryContainer,
    traits::MapHost,
    MapError, Result,
};

pub struct HeadlessHost {
    viewport: Viewport,
    containers_created: usize,
    /// When false the host reports no projection, like a widget that is not laid out yet
    projection_ready: bool,
}

impl HeadlessHost {
    pub fn new(center: LatLng, zoom: f64, size: SurfaceSize) -> Self {
        Self {
            viewport: Viewport::new(center, zoom, size),
            containers_created: 0,
            projection_ready: true,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.viewport.set_center(center);
    }

    pub fn set_size(&mut self, size: SurfaceSize) {
        self.viewport.set_size(size);
    }

    pub fn pan(&mut self, delta: Point) {
        self.viewport.pan(delta);
    }

    pub fn set_projection_ready(&mut self, ready: bool) {
        self.projection_ready = ready;
    }

    pub fn containers_created(&self) -> usize {
        self.containers_created
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(LatLng::new(38.0, -97.0), 4.0, SurfaceSize::new(800.0, 600.0))
    }
}

impl MapHost for HeadlessHost {
    type Container = MemoryContainer;

    fn viewport_size(&self) -> SurfaceSize {
        self.viewport.size
    }

    fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    fn lat_lng_to_div_pixel(&self, lat_lng: &LatLng) -> Option<Point> {
        self.projection_ready
            .then(|| self.viewport.lat_lng_to_pixel(lat_lng))
    }

    fn create_overlay_container(&mut self, size: SurfaceSize) -> Result<MemoryContainer> {
        if size.is_empty() {
            return Err(MapError::Host(format!(
                "cannot create a {}x{} overlay container",
                size.width, size.height
            )));
        }
        self.containers_created += 1;
        Ok(MemoryContainer::new(
            format!("overlay-{}", self.containers_created),
            size,
        ))
    }
}
