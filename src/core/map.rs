use crate::{
    core::{
        color::Color,
        config::ChoroplethOptions,
        projection::{ProjectionDefinition, ProjectionRegistry},
        shape::{PathStyle, Shape},
    },
    prelude::HashMap,
    traits::{DrawingSurface, SurfaceFactory},
    Result,
};
use std::sync::Arc;

/// Bucket a value into a color ramp of `ramp_len` entries.
///
/// `[0, 1)` is split into `ramp_len` equal buckets and 1.0 folds into the
/// last one. Values outside `[0, 1]` are clamped first and NaN lands in the
/// first bucket, so the result is always a valid index for a non-empty ramp.
pub fn ramp_index(value: f64, ramp_len: usize) -> usize {
    let last = ramp_len.saturating_sub(1);
    let clamped = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    };
    let index = (clamped * ramp_len as f64).floor() as usize;
    index.min(last)
}

/// Choropleth map model: one shape per projection path, colored by value
pub struct ChoroplethMap<S: DrawingSurface> {
    options: ChoroplethOptions,
    projection: Arc<ProjectionDefinition>,
    surface: S,
    shapes: HashMap<String, Shape>,
}

impl<S: DrawingSurface> ChoroplethMap<S> {
    /// Create a map inside `container`.
    ///
    /// Fails when `options.projection` is not registered; a map is never
    /// created with an empty shape set in that case.
    pub fn new<F>(container: &mut F, registry: &ProjectionRegistry, options: ChoroplethOptions) -> Result<Self>
    where
        F: SurfaceFactory<Surface = S>,
    {
        options.validate()?;
        let projection = registry.get(&options.projection)?;
        let mut surface = container.create_surface(projection.bounds())?;

        let style = PathStyle::from_options(&options);
        let mut shapes = HashMap::default();
        for (key, path) in projection.paths() {
            let handle = surface.add_path(key, path, &style)?;
            shapes.insert(key.to_string(), Shape::new(key, handle, options.fill));
        }

        log::debug!(
            "created choropleth map: projection={} shapes={} surface={}x{}",
            projection.name(),
            shapes.len(),
            projection.bounds().width,
            projection.bounds().height
        );

        let mut map = Self {
            options,
            projection,
            surface,
            shapes,
        };
        map.scale_to(map.options.scale);
        Ok(map)
    }

    /// Scale the whole drawing surface. The factor is absolute, so repeated
    /// calls with the same factor leave the same transform in place.
    pub fn scale_to(&mut self, factor: f64) {
        log::trace!("scaling surface to {factor}");
        self.surface.scale_all(factor);
    }

    /// [`ChoroplethMap::scale_to`], then `on_complete` once the transform is applied
    pub fn scale_to_with<F: FnOnce()>(&mut self, factor: f64, on_complete: F) {
        self.scale_to(factor);
        on_complete();
    }

    /// Put every shape back on the default fill, immediately. Stored values are kept.
    pub fn reset(&mut self) -> Result<()> {
        let fill = self.options.fill;
        for shape in self.shapes.values_mut() {
            shape.color = fill;
            self.surface.set_fill(shape.handle, fill)?;
        }
        Ok(())
    }

    /// Reset one shape; unknown keys are ignored
    pub fn reset_shape(&mut self, key: &str) -> Result<()> {
        let Some(shape) = self.shapes.get_mut(key) else {
            return Ok(());
        };
        shape.color = self.options.fill;
        self.surface.set_fill(shape.handle, self.options.fill)
    }

    /// Assign a value to a shape and start its fill transition to the
    /// matching ramp color. Unknown keys are ignored.
    pub fn set_value(&mut self, key: &str, value: f64) -> Result<()> {
        let Some(shape) = self.shapes.get_mut(key) else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&value) {
            log::debug!("value {value} for '{key}' is outside [0, 1], clamping for color lookup");
        }

        let color = self.options.colors[ramp_index(value, self.options.colors.len())];
        shape.value = value;
        shape.color = color;
        self.surface
            .animate_fill(shape.handle, color, self.options.transition_duration())
    }

    /// [`ChoroplethMap::set_value`] for each pair
    pub fn set_values<'a, I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        for (key, value) in values {
            self.set_value(key, value)?;
        }
        Ok(())
    }

    pub fn shape(&self, key: &str) -> Option<&Shape> {
        self.shapes.get(key)
    }

    /// All shape keys, in no particular order
    pub fn shape_keys(&self) -> Vec<&str> {
        self.shapes.keys().map(String::as_str).collect()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// Ramp color a value would be drawn with
    pub fn color_for_value(&self, value: f64) -> Color {
        self.options.colors[ramp_index(value, self.options.colors.len())]
    }

    pub fn options(&self) -> &ChoroplethOptions {
        &self.options
    }

    pub fn projection(&self) -> &ProjectionDefinition {
        &self.projection
    }

    pub fn scale(&self) -> f64 {
        self.surface.scale()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
