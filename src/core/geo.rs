use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator projection constants
pub(crate) const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Clamps latitude to the range Web Mercator can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Converts to Web Mercator meters (EPSG:3857)
    pub fn to_mercator(&self) -> Point {
        let lat = Self::clamp_lat(self.lat);
        let x = self.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        Point::new(x, y)
    }

    /// Creates LatLng from Web Mercator meters
    pub fn from_mercator(point: Point) -> Self {
        let lng = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Self::new(lat, lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Pixel dimensions of a drawing surface or overlay container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size after a uniform scale transform
    pub fn scaled(&self, factor: f64) -> SurfaceSize {
        SurfaceSize::new(self.width * factor, self.height * factor)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(38.0, -97.0);
        assert_eq!(coord.lat, 38.0);
        assert_eq!(coord.lng, -97.0);
        assert_eq!(LatLng::clamp_lat(95.0), 85.0511287798);
    }

    #[test]
    fn test_wrap_lng() {
        assert_eq!(LatLng::wrap_lng(190.0), -170.0);
        assert_eq!(LatLng::wrap_lng(-190.0), 170.0);
        assert_eq!(LatLng::wrap_lng(-180.0), -180.0);
    }

    #[test]
    fn test_mercator_roundtrip() {
        let coord = LatLng::new(38.0, -97.0);
        let back = LatLng::from_mercator(coord.to_mercator());

        assert!((back.lat - coord.lat).abs() < 1e-9);
        assert!((back.lng - coord.lng).abs() < 1e-9);
    }

    #[test]
    fn test_surface_size_scaled() {
        let size = SurfaceSize::new(960.0, 600.0).scaled(0.5);
        assert_eq!(size, SurfaceSize::new(480.0, 300.0));
        assert!(!size.is_empty());
        assert!(SurfaceSize::new(0.0, 10.0).is_empty());
    }

    #[test]
    fn test_point_math() {
        let a = Point::new(3.0, 4.0);
        assert_eq!(a.subtract(&Point::new(1.0, 1.0)), Point::new(2.0, 3.0));
        assert_eq!(a.add(&Point::new(0.5, 0.5)).floor(), Point::new(3.0, 4.0));
    }
}
