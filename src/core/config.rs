//! Rendering configuration for a choropleth map
//!
//! Options start from the widget defaults and are overridden key by key,
//! either through the typed `with_*` setters or from a loosely typed JSON
//! object as a host page would hand it over. Keys that are not recognized
//! configuration keys are ignored.

use crate::{
    core::{color::Color, constants},
    MapError, Result,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Option keys accepted by [`ChoroplethOptions::apply_overrides`].
pub const OPTION_KEYS: [&str; 9] = [
    "fill",
    "fillOpacity",
    "stroke",
    "strokeOpacity",
    "strokeWidth",
    "scale",
    "projection",
    "colors",
    "speed",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChoroplethOptions {
    /// Default color of each shape
    pub fill: Color,
    pub fill_opacity: f64,
    pub stroke: Color,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
    /// Initial scale ratio of the drawing surface
    pub scale: f64,
    /// Identifier of the projection definition to draw
    pub projection: String,
    /// Color ramp used to quantize shape values
    pub colors: Vec<Color>,
    /// Fill transition duration in milliseconds
    pub speed: u64,
}

impl Default for ChoroplethOptions {
    fn default() -> Self {
        Self {
            fill: constants::DEFAULT_FILL,
            fill_opacity: constants::DEFAULT_FILL_OPACITY,
            stroke: constants::DEFAULT_STROKE,
            stroke_opacity: constants::DEFAULT_STROKE_OPACITY,
            stroke_width: constants::DEFAULT_STROKE_WIDTH,
            scale: constants::DEFAULT_SCALE,
            projection: constants::DEFAULT_PROJECTION.to_string(),
            colors: constants::DEFAULT_COLORS.to_vec(),
            speed: constants::DEFAULT_SPEED_MS,
        }
    }
}

impl ChoroplethOptions {
    /// Defaults overlaid with `overrides`
    pub fn from_overrides(overrides: &Value) -> Result<Self> {
        let mut options = Self::default();
        options.apply_overrides(overrides)?;
        Ok(options)
    }

    /// Overlay recognized keys of a JSON object onto these options.
    ///
    /// `null` means "no overrides". Either every recognized key applies or,
    /// on the first malformed value, none do.
    pub fn apply_overrides(&mut self, overrides: &Value) -> Result<()> {
        let object = match overrides {
            Value::Null => return Ok(()),
            Value::Object(object) => object,
            other => {
                return Err(MapError::InvalidOption {
                    key: String::new(),
                    reason: format!("expected an object of overrides, got {other}"),
                })
            }
        };

        let mut next = self.clone();
        for (key, value) in object {
            match key.as_str() {
                "fill" => next.fill = option_value(key, value)?,
                "fillOpacity" => next.fill_opacity = option_value(key, value)?,
                "stroke" => next.stroke = option_value(key, value)?,
                "strokeOpacity" => next.stroke_opacity = option_value(key, value)?,
                "strokeWidth" => next.stroke_width = option_value(key, value)?,
                "scale" => next.scale = option_value(key, value)?,
                "projection" => next.projection = option_value(key, value)?,
                "colors" => next.colors = option_value(key, value)?,
                "speed" => next.speed = option_value(key, value)?,
                _ => log::trace!("ignoring unrecognized option '{key}'"),
            }
        }

        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Check invariants the map relies on
    pub fn validate(&self) -> Result<()> {
        if self.colors.is_empty() {
            return Err(invalid("colors", "color ramp must not be empty"));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(invalid("scale", format!("expected a positive factor, got {}", self.scale)));
        }
        for (key, opacity) in [
            ("fillOpacity", self.fill_opacity),
            ("strokeOpacity", self.stroke_opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(invalid(key, format!("opacity {opacity} outside [0, 1]")));
            }
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(invalid("strokeWidth", format!("got {}", self.stroke_width)));
        }
        Ok(())
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = projection.into();
        self
    }

    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    /// Fill transition duration in milliseconds; zero makes fills instantaneous
    pub fn with_speed(mut self, speed_ms: u64) -> Self {
        self.speed = speed_ms;
        self
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.speed)
    }
}

fn option_value<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|e| invalid(key, e.to_string()))
}

fn invalid(key: &str, reason: impl Into<String>) -> MapError {
    MapError::InvalidOption {
        key: key.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_widget() {
        let options = ChoroplethOptions::default();
        assert_eq!(options.fill.to_hex(), "#929292");
        assert_eq!(options.fill_opacity, 0.6);
        assert_eq!(options.stroke.to_hex(), "#ffffff");
        assert_eq!(options.projection, "Conical");
        assert_eq!(options.colors.len(), 5);
        assert_eq!(options.transition_duration(), Duration::from_millis(800));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_overrides_apply_key_by_key() {
        let options = ChoroplethOptions::from_overrides(&json!({
            "fill": "#000",
            "speed": 0,
            "projection": "SphericalMercator",
        }))
        .unwrap();

        assert_eq!(options.fill, Color::BLACK);
        assert_eq!(options.speed, 0);
        assert_eq!(options.projection, "SphericalMercator");
        // untouched keys keep defaults
        assert_eq!(options.stroke_width, 1.0);
        assert_eq!(options.colors, constants::DEFAULT_COLORS.to_vec());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let options = ChoroplethOptions::from_overrides(&json!({
            "tooltip": true,
            "strokeWidth": 2.5,
        }))
        .unwrap();

        let mut expected = ChoroplethOptions::default();
        expected.stroke_width = 2.5;
        assert_eq!(options, expected);
    }

    #[test]
    fn test_null_means_defaults() {
        let options = ChoroplethOptions::from_overrides(&Value::Null).unwrap();
        assert_eq!(options, ChoroplethOptions::default());
    }

    #[test]
    fn test_malformed_override_is_rejected_atomically() {
        let mut options = ChoroplethOptions::default();
        let err = options
            .apply_overrides(&json!({ "speed": 10, "colors": "#fff" }))
            .unwrap_err();

        assert!(matches!(err, MapError::InvalidOption { ref key, .. } if key == "colors"));
        assert_eq!(options.speed, constants::DEFAULT_SPEED_MS);
    }

    #[test]
    fn test_validation_rules() {
        assert!(ChoroplethOptions::from_overrides(&json!({ "colors": [] })).is_err());
        assert!(ChoroplethOptions::from_overrides(&json!({ "scale": 0 })).is_err());
        assert!(ChoroplethOptions::from_overrides(&json!({ "fillOpacity": 1.5 })).is_err());
        assert!(ChoroplethOptions::from_overrides(&json!({ "fill": "grey" })).is_err());
        assert!(ChoroplethOptions::from_overrides(&json!(["fill"])).is_err());
    }

    #[test]
    fn test_every_recognized_key_is_applied() {
        let overrides = json!({
            "fill": "#010203",
            "fillOpacity": 0.1,
            "stroke": "#040506",
            "strokeOpacity": 0.2,
            "strokeWidth": 3,
            "scale": 2,
            "projection": "Custom",
            "colors": ["#000000", "#ffffff"],
            "speed": 5,
        });
        let object = overrides.as_object().unwrap();
        assert!(OPTION_KEYS.iter().all(|key| object.contains_key(*key)));

        let options = ChoroplethOptions::from_overrides(&overrides).unwrap();
        assert_eq!(options.fill, Color::rgb(1, 2, 3));
        assert_eq!(options.fill_opacity, 0.1);
        assert_eq!(options.stroke, Color::rgb(4, 5, 6));
        assert_eq!(options.stroke_opacity, 0.2);
        assert_eq!(options.stroke_width, 3.0);
        assert_eq!(options.scale, 2.0);
        assert_eq!(options.projection, "Custom");
        assert_eq!(options.colors, vec![Color::BLACK, Color::WHITE]);
        assert_eq!(options.speed, 5);
    }
}
