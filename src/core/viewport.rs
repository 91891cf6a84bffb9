use crate::core::geo::{LatLng, Point, SurfaceSize, EARTH_RADIUS};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Size of a world tile at zoom 0, in pixels
const TILE_SIZE: f64 = 256.0;

/// Current view of a Web Mercator map: center, zoom and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: SurfaceSize,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Projected center, floored; keeps layer coordinates small
    pixel_origin: Point,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, size: SurfaceSize) -> Self {
        let mut viewport = Self {
            center,
            zoom: zoom.clamp(0.0, 18.0),
            size,
            min_zoom: 0.0,
            max_zoom: 18.0,
            pixel_origin: Point::default(),
        };
        viewport.update_pixel_origin();
        viewport
    }

    /// Sets the center of the viewport, clamping latitude to the Mercator range
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(LatLng::clamp_lat(center.lat), LatLng::wrap_lng(center.lng));
        self.update_pixel_origin();
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.update_pixel_origin();
    }

    pub fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let world = TILE_SIZE * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let meters = lat_lng.to_mercator();
        let half_circumference = PI * EARTH_RADIUS;

        Point::new(
            (meters.x + half_circumference) / (2.0 * half_circumference) * world,
            (half_circumference - meters.y) / (2.0 * half_circumference) * world,
        )
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let world = TILE_SIZE * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let half_circumference = PI * EARTH_RADIUS;

        LatLng::from_mercator(Point::new(
            pixel.x / world * (2.0 * half_circumference) - half_circumference,
            half_circumference - pixel.y / world * (2.0 * half_circumference),
        ))
    }

    pub fn pixel_origin(&self) -> Point {
        self.pixel_origin
    }

    fn update_pixel_origin(&mut self) {
        self.pixel_origin = self.project(&self.center, None).floor();
    }

    /// Converts a geographical coordinate to pixel coordinates relative to
    /// the viewport's top-left corner
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let layer_point = self.project(lat_lng, None).subtract(&self.pixel_origin);
        Point::new(
            layer_point.x + self.size.width / 2.0,
            layer_point.y + self.size.height / 2.0,
        )
    }

    /// Pans the viewport by the given pixel offset
    pub fn pan(&mut self, delta: Point) {
        let center = self.project(&self.center, None).add(&delta);
        let center = self.unproject(&center, None);
        self.set_center(center);
    }
}
