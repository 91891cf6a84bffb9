//! Choropleth overlay for slippy host maps
//!
//! The overlay owns a [`ChoroplethMap`] drawn in the host's overlay layer and
//! keeps it registered with the host viewport: on every redraw the map is
//! rescaled for the host zoom and its container is moved so the artwork's
//! top-left corner sits on the projected top-left reference point.

use crate::{
    core::{
        config::ChoroplethOptions,
        constants::{
            BASELINE_SCALE, CENTER_REFERENCE, OVERLAY_PROJECTION, TOP_LEFT_REFERENCE, ZOOM_SCALES,
        },
        geo::{LatLng, Point},
        map::ChoroplethMap,
        projection::ProjectionRegistry,
        shape::Shape,
    },
    traits::{MapHost, OverlayContainer, OverlayLifecycle, ViewportAware},
    MapError, Result,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Overlay scale for a host zoom level. Levels outside 0..=15 and fractional
/// zooms fall back to the baseline scale.
pub fn scale_for_zoom(zoom: f64) -> f64 {
    if zoom.fract() == 0.0 && zoom >= 0.0 && zoom < ZOOM_SCALES.len() as f64 {
        ZOOM_SCALES[zoom as usize]
    } else {
        BASELINE_SCALE
    }
}

pub fn scale_for_zoom_level(level: u32) -> f64 {
    ZOOM_SCALES
        .get(level as usize)
        .copied()
        .unwrap_or(BASELINE_SCALE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverlayState {
    Detached,
    Attached,
}

/// What the last redraw computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawState {
    pub zoom: f64,
    pub scale: f64,
    /// Projected top-left reference, where the container was moved to
    pub top_left: Point,
    /// Projected center reference
    pub center: Point,
}

struct Attached<C: OverlayContainer> {
    container: C,
    map: ChoroplethMap<C::Surface>,
    last_draw: Option<DrawState>,
}

/// Choropleth map kept in sync with a host map's viewport
pub struct ChoroplethOverlay<C: OverlayContainer> {
    registry: Arc<ProjectionRegistry>,
    options: ChoroplethOptions,
    attached: Option<Attached<C>>,
}

impl<C: OverlayContainer> ChoroplethOverlay<C> {
    pub fn new(registry: Arc<ProjectionRegistry>) -> Self {
        Self::with_options(registry, ChoroplethOptions::default())
    }

    /// Overlay with custom options. The projection is always replaced with
    /// the spherical mercator artwork when the overlay attaches.
    pub fn with_options(registry: Arc<ProjectionRegistry>, options: ChoroplethOptions) -> Self {
        Self {
            registry,
            options,
            attached: None,
        }
    }

    /// Overlay with a JSON object of option overrides
    pub fn from_overrides(registry: Arc<ProjectionRegistry>, overrides: &Value) -> Result<Self> {
        let options = ChoroplethOptions::from_overrides(overrides)?;
        Ok(Self::with_options(registry, options))
    }

    /// Create the container in the host's overlay layer and build the map in it
    pub fn attach<H>(&mut self, host: &mut H) -> Result<()>
    where
        H: MapHost<Container = C>,
    {
        if self.attached.is_some() {
            return Err(MapError::AlreadyAttached);
        }

        let size = host.viewport_size();
        let mut container = host.create_overlay_container(size)?;
        container.set_position(Point::new(0.0, 0.0));

        let mut options = self.options.clone();
        options.projection = OVERLAY_PROJECTION.to_string();

        let map = match ChoroplethMap::new(&mut container, &self.registry, options) {
            Ok(map) => map,
            Err(err) => {
                log::warn!("failed to build overlay map: {err}");
                container.detach();
                return Err(err);
            }
        };

        log::debug!("choropleth overlay attached with {} shapes", map.len());
        self.attached = Some(Attached {
            container,
            map,
            last_draw: None,
        });
        Ok(())
    }

    /// Rescale for the host zoom and reposition the container
    pub fn redraw<H>(&mut self, host: &H) -> Result<()>
    where
        H: MapHost<Container = C>,
    {
        let attached = self.attached.as_mut().ok_or(MapError::NotAttached)?;

        let center = project(host, &CENTER_REFERENCE)?;
        let top_left = project(host, &TOP_LEFT_REFERENCE)?;
        let zoom = host.zoom();
        let scale = scale_for_zoom(zoom);

        attached.map.scale_to(scale);
        attached.container.set_position(top_left);
        attached.last_draw = Some(DrawState {
            zoom,
            scale,
            top_left,
            center,
        });

        log::trace!(
            "overlay redraw: zoom={zoom} scale={scale} top_left=({}, {})",
            top_left.x,
            top_left.y
        );
        Ok(())
    }

    /// Remove the container and drop the map; a no-op when detached
    pub fn detach(&mut self) {
        if let Some(mut attached) = self.attached.take() {
            attached.container.detach();
            log::debug!("choropleth overlay detached");
        }
    }

    pub fn state(&self) -> OverlayState {
        if self.attached.is_some() {
            OverlayState::Attached
        } else {
            OverlayState::Detached
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Options the overlay builds its map with, before the projection is forced
    pub fn options(&self) -> &ChoroplethOptions {
        &self.options
    }

    pub fn map(&self) -> Result<&ChoroplethMap<C::Surface>> {
        self.attached
            .as_ref()
            .map(|attached| &attached.map)
            .ok_or(MapError::NotAttached)
    }

    pub fn map_mut(&mut self) -> Result<&mut ChoroplethMap<C::Surface>> {
        self.attached
            .as_mut()
            .map(|attached| &mut attached.map)
            .ok_or(MapError::NotAttached)
    }

    pub fn container(&self) -> Result<&C> {
        self.attached
            .as_ref()
            .map(|attached| &attached.container)
            .ok_or(MapError::NotAttached)
    }

    /// State computed by the most recent redraw, if any
    pub fn last_draw(&self) -> Option<DrawState> {
        self.attached.as_ref().and_then(|attached| attached.last_draw)
    }

    pub fn scale_to(&mut self, factor: f64) -> Result<()> {
        self.map_mut()?.scale_to(factor);
        Ok(())
    }

    pub fn scale_to_with<F: FnOnce()>(&mut self, factor: f64, on_complete: F) -> Result<()> {
        self.map_mut()?.scale_to_with(factor, on_complete);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.map_mut()?.reset()
    }

    pub fn reset_shape(&mut self, key: &str) -> Result<()> {
        self.map_mut()?.reset_shape(key)
    }

    pub fn set_value(&mut self, key: &str, value: f64) -> Result<()> {
        self.map_mut()?.set_value(key, value)
    }

    pub fn set_values<'a, I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        self.map_mut()?.set_values(values)
    }

    pub fn shape(&self, key: &str) -> Result<Option<&Shape>> {
        Ok(self.map()?.shape(key))
    }

    pub fn shape_keys(&self) -> Result<Vec<&str>> {
        Ok(self.map()?.shape_keys())
    }
}

fn project<H: MapHost>(host: &H, lat_lng: &LatLng) -> Result<Point> {
    host.lat_lng_to_div_pixel(lat_lng).ok_or_else(|| {
        MapError::Host(format!(
            "no div pixel for ({}, {})",
            lat_lng.lat, lat_lng.lng
        ))
    })
}

impl<C, H> OverlayLifecycle<H> for ChoroplethOverlay<C>
where
    C: OverlayContainer,
    H: MapHost<Container = C>,
{
    fn on_add(&mut self, host: &mut H) -> Result<()> {
        self.attach(host)
    }

    fn draw(&mut self, host: &H) -> Result<()> {
        self.redraw(host)
    }

    fn on_remove(&mut self) -> Result<()> {
        self.detach();
        Ok(())
    }
}

impl<C, H> ViewportAware<H> for ChoroplethOverlay<C>
where
    C: OverlayContainer,
    H: MapHost<Container = C>,
{
    fn on_viewport_changed(&mut self, host: &H) -> Result<()> {
        self.redraw(host)
    }

    fn requires_viewport_updates(&self) -> bool {
        self.is_attached()
    }
}
