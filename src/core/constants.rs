//! Widget defaults, reference points and the zoom scale table.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

use crate::core::{color::Color, geo::LatLng};

/// Key inside a projection's path table that holds the bounding box, never a shape.
pub const BOUNDS_KEY: &str = "bounds";

/// Projection used when no override is given.
pub const DEFAULT_PROJECTION: &str = "Conical";

/// Projection the viewport overlay always binds its map to.
pub const OVERLAY_PROJECTION: &str = "SphericalMercator";

pub const DEFAULT_FILL: Color = Color::rgb(0x92, 0x92, 0x92);
pub const DEFAULT_FILL_OPACITY: f64 = 0.6;
pub const DEFAULT_STROKE: Color = Color::WHITE;
pub const DEFAULT_STROKE_OPACITY: f64 = 1.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;
pub const DEFAULT_SCALE: f64 = 1.0;

/// Fill transition duration in milliseconds.
pub const DEFAULT_SPEED_MS: u64 = 800;

/// Dark grey through sand to a deep red.
pub const DEFAULT_COLORS: [Color; 5] = [
    Color::rgb(0x33, 0x33, 0x33),
    Color::rgb(0xb3, 0x9f, 0x7b),
    Color::rgb(0xef, 0xc7, 0x7f),
    Color::rgb(0xc4, 0x78, 0x5d),
    Color::rgb(0x98, 0x29, 0x3a),
];

/// Geographic anchor of the spherical mercator artwork's visual center.
pub const CENTER_REFERENCE: LatLng = LatLng::new(38.0, -97.0);

/// Geographic position of the artwork's top-left corner.
pub const TOP_LEFT_REFERENCE: LatLng = LatLng::new(74.03, -180.0);

/// Overlay scale at which the artwork matches the host map one-to-one.
pub const BASELINE_SCALE: f64 = 1.0;

/// Overlay scale per host zoom level, indexed by zoom. Level 5 is the baseline;
/// level 0 is 0.0315 rather than an exact halving of level 1.
pub const ZOOM_SCALES: [f64; 16] = [
    0.0315, 0.0625, 0.125, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 128.0, 256.0, 512.0,
    1024.0,
];
