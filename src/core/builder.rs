//! Fluent construction API for choropleth maps
//!
//! [`ChoroplethBuilder`] resolves options the same way the overlay does:
//! defaults first, then a JSON override object, key by key. Construction
//! errors surface from [`ChoroplethBuilder::build`], never later.

use crate::{
    core::{config::ChoroplethOptions, map::ChoroplethMap, projection::ProjectionRegistry},
    traits::{DrawingSurface, SurfaceFactory},
    Result,
};
use serde_json::Value;

/// Builder for [`ChoroplethMap`] instances
pub struct ChoroplethBuilder<'a> {
    registry: &'a ProjectionRegistry,
    options: ChoroplethOptions,
    on_ready: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> ChoroplethBuilder<'a> {
    /// Start from the default options
    pub fn new(registry: &'a ProjectionRegistry) -> Self {
        Self {
            registry,
            options: ChoroplethOptions::default(),
            on_ready: None,
        }
    }

    /// Replace the options wholesale
    pub fn options(mut self, options: ChoroplethOptions) -> Self {
        self.options = options;
        self
    }

    /// Overlay a JSON object of option overrides onto the current options.
    /// Unknown keys are ignored, badly typed recognized keys are rejected.
    pub fn overrides(mut self, overrides: &Value) -> Result<Self> {
        self.options.apply_overrides(overrides)?;
        Ok(self)
    }

    pub fn projection(mut self, projection: impl Into<String>) -> Self {
        self.options.projection = projection.into();
        self
    }

    /// Callback run once the map has rendered its shapes and initial scale
    pub fn on_ready<F: FnOnce() + 'a>(mut self, callback: F) -> Self {
        self.on_ready = Some(Box::new(callback));
        self
    }

    /// Build the map inside `container`
    pub fn build<F, S>(self, container: &mut F) -> Result<ChoroplethMap<S>>
    where
        F: SurfaceFactory<Surface = S>,
        S: DrawingSurface,
    {
        let map = ChoroplethMap::new(container, self.registry, self.options)?;
        if let Some(on_ready) = self.on_ready {
            on_ready();
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{color::Color, geo::SurfaceSize, projection::ProjectionDefinition};
    use crate::rendering::surface::MemoryContainer;
    use crate::MapError;
    use serde_json::json;
    use std::cell::Cell;

    fn registry() -> ProjectionRegistry {
        let conical = ProjectionDefinition::new("Conical", SurfaceSize::new(960.0, 600.0))
            .with_path("TX", "M0,0Z")
            .unwrap();
        let mercator = ProjectionDefinition::new("SphericalMercator", SurfaceSize::new(256.0, 256.0))
            .with_path("TX", "M1,1Z")
            .unwrap()
            .with_path("OK", "M2,2Z")
            .unwrap();
        ProjectionRegistry::builder()
            .register(conical)
            .unwrap()
            .register(mercator)
            .unwrap()
            .build()
    }

    fn container() -> MemoryContainer {
        MemoryContainer::new("gmapCanvas", SurfaceSize::new(800.0, 600.0))
    }

    #[test]
    fn test_build_with_defaults() {
        let registry = registry();
        let map = ChoroplethBuilder::new(&registry)
            .build(&mut container())
            .unwrap();
        assert_eq!(map.projection().name(), "Conical");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_overrides_and_ready_callback() {
        let registry = registry();
        let ready = Cell::new(0);

        let map = ChoroplethBuilder::new(&registry)
            .overrides(&json!({
                "projection": "SphericalMercator",
                "scale": 2.0,
                "fill": "#000",
                "somethingElse": true
            }))
            .unwrap()
            .on_ready(|| ready.set(ready.get() + 1))
            .build(&mut container())
            .unwrap();

        assert_eq!(ready.get(), 1);
        assert_eq!(map.len(), 2);
        assert_eq!(map.scale(), 2.0);
        assert_eq!(map.options().fill, Color::BLACK);
    }

    #[test]
    fn test_bad_override_type_is_rejected() {
        let registry = registry();
        let result = ChoroplethBuilder::new(&registry).overrides(&json!({ "speed": "fast" }));
        assert!(matches!(result, Err(MapError::InvalidOption { key, .. }) if key == "speed"));
    }

    #[test]
    fn test_ready_not_called_on_failure() {
        let registry = registry();
        let ready = Cell::new(false);

        let result = ChoroplethBuilder::new(&registry)
            .projection("Albers")
            .on_ready(|| ready.set(true))
            .build(&mut container());

        assert!(matches!(result, Err(MapError::UnknownProjection(_))));
        assert!(!ready.get());
    }
}
