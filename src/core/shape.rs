use crate::core::{color::Color, config::ChoroplethOptions};
use serde::{Deserialize, Serialize};

/// Opaque handle to a path owned by a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathHandle(pub usize);

/// Styling attributes a path is rendered with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub fill: Color,
    pub fill_opacity: f64,
    pub stroke: Color,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
}

impl PathStyle {
    /// Default region style for a set of options
    pub fn from_options(options: &ChoroplethOptions) -> Self {
        Self {
            fill: options.fill,
            fill_opacity: options.fill_opacity,
            stroke: options.stroke,
            stroke_opacity: options.stroke_opacity,
            stroke_width: options.stroke_width,
        }
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::from_options(&ChoroplethOptions::default())
    }
}

/// State of one region on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub(crate) key: String,
    pub(crate) handle: PathHandle,
    pub(crate) value: f64,
    pub(crate) color: Color,
}

impl Shape {
    pub(crate) fn new(key: impl Into<String>, handle: PathHandle, color: Color) -> Self {
        Self {
            key: key.into(),
            handle,
            value: 0.0,
            color,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Geometry handle on the owning map's drawing surface
    pub fn handle(&self) -> PathHandle {
        self.handle
    }

    /// Last value assigned, exactly as the caller passed it
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Target of the latest fill change. While a transition runs the surface
    /// still shows an intermediate color; read that from the surface.
    pub fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_shape_is_zeroed() {
        let shape = Shape::new("TX", PathHandle(3), Color::WHITE);
        assert_eq!(shape.key(), "TX");
        assert_eq!(shape.handle(), PathHandle(3));
        assert_eq!(shape.value(), 0.0);
        assert_eq!(shape.color(), Color::WHITE);
    }

    #[test]
    fn test_style_from_options() {
        let options = ChoroplethOptions::default().with_fill(Color::BLACK);
        let style = PathStyle::from_options(&options);
        assert_eq!(style.fill, Color::BLACK);
        assert_eq!(style.fill_opacity, options.fill_opacity);
        assert_eq!(style.stroke_width, options.stroke_width);
    }
}
