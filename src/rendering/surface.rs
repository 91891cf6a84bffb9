//! In-memory drawing surface and overlay container
//!
//! [`MemorySurface`] keeps every path, its style and the surface transform in
//! plain data and runs fill animations through a [`TransitionManager`]. Hosts
//! advance animations by calling [`MemorySurface::tick`] from their frame
//! loop; nothing is reported back to whoever started a transition.

use crate::{
    animation::transitions::{FillTransition, TransitionManager},
    core::{
        color::Color,
        geo::{Point, SurfaceSize},
        shape::{PathHandle, PathStyle},
    },
    traits::{DrawingSurface, OverlayContainer, SurfaceFactory},
    MapError, Result,
};
use instant::Instant;
use std::time::Duration;

/// A path as rendered on a [`MemorySurface`]
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePath {
    pub id: String,
    pub path: String,
    pub style: PathStyle,
}

pub struct MemorySurface {
    size: SurfaceSize,
    scale: f64,
    /// Number of scale transforms applied since creation
    scale_operations: usize,
    paths: Vec<SurfacePath>,
    transitions: TransitionManager,
    last_tick: Option<Instant>,
}

impl MemorySurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            scale: 1.0,
            scale_operations: 0,
            paths: Vec::new(),
            transitions: TransitionManager::new(),
            last_tick: None,
        }
    }

    /// Advance running fill animations by `delta`
    pub fn tick(&mut self, delta: Duration) {
        let frame = self.transitions.update(delta);
        self.apply_frame(frame);
    }

    /// Advance running fill animations by the wall time since the last call
    pub fn tick_now(&mut self) {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map(|last| now.duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);
        self.tick(delta);
    }

    /// Run every animation to its end
    pub fn finish_transitions(&mut self) {
        let frame = self.transitions.finish_all();
        self.apply_frame(frame);
    }

    fn apply_frame(&mut self, frame: Vec<(PathHandle, Color)>) {
        for (handle, color) in frame {
            if let Some(path) = self.paths.get_mut(handle.0) {
                path.style.fill = color;
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.transitions.is_empty()
    }

    pub fn transitions(&self) -> &TransitionManager {
        &self.transitions
    }

    pub fn path(&self, handle: PathHandle) -> Option<&SurfacePath> {
        self.paths.get(handle.0)
    }

    pub fn path_by_id(&self, id: &str) -> Option<&SurfacePath> {
        self.paths.iter().find(|path| path.id == id)
    }

    pub fn paths(&self) -> &[SurfacePath] {
        &self.paths
    }

    pub fn scale_operations(&self) -> usize {
        self.scale_operations
    }

    /// Size on screen after the scale transform
    pub fn rendered_size(&self) -> SurfaceSize {
        self.size.scaled(self.scale)
    }

    fn path_mut(&mut self, handle: PathHandle) -> Result<&mut SurfacePath> {
        self.paths
            .get_mut(handle.0)
            .ok_or_else(|| MapError::Surface(format!("no path for handle {}", handle.0)))
    }
}

impl DrawingSurface for MemorySurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn add_path(&mut self, id: &str, path: &str, style: &PathStyle) -> Result<PathHandle> {
        let handle = PathHandle(self.paths.len());
        self.paths.push(SurfacePath {
            id: id.to_string(),
            path: path.to_string(),
            style: style.clone(),
        });
        Ok(handle)
    }

    fn set_fill(&mut self, handle: PathHandle, color: Color) -> Result<()> {
        self.path_mut(handle)?.style.fill = color;
        self.transitions.cancel(handle);
        Ok(())
    }

    fn animate_fill(&mut self, handle: PathHandle, target: Color, duration: Duration) -> Result<()> {
        let from = self.path_mut(handle)?.style.fill;
        if duration.is_zero() {
            return self.set_fill(handle, target);
        }
        self.transitions
            .start(handle, FillTransition::new(from, target, duration));
        Ok(())
    }

    fn fill(&self, handle: PathHandle) -> Option<Color> {
        self.path(handle).map(|path| path.style.fill)
    }

    fn scale_all(&mut self, factor: f64) {
        self.scale = factor;
        self.scale_operations += 1;
    }

    fn scale(&self) -> f64 {
        self.scale
    }
}

/// Overlay container backed by a [`MemorySurface`]
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryContainer {
    id: String,
    size: SurfaceSize,
    position: Point,
    attached: bool,
    surfaces_created: usize,
}

impl MemoryContainer {
    pub fn new(id: impl Into<String>, size: SurfaceSize) -> Self {
        Self {
            id: id.into(),
            size,
            position: Point::default(),
            attached: true,
            surfaces_created: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn surfaces_created(&self) -> usize {
        self.surfaces_created
    }
}

impl SurfaceFactory for MemoryContainer {
    type Surface = MemorySurface;

    fn create_surface(&mut self, size: SurfaceSize) -> Result<MemorySurface> {
        if !self.attached {
            return Err(MapError::Surface(format!(
                "container '{}' is detached",
                self.id
            )));
        }
        if size.is_empty() {
            return Err(MapError::Surface(format!(
                "cannot create a {}x{} surface",
                size.width, size.height
            )));
        }
        self.surfaces_created += 1;
        Ok(MemorySurface::new(size))
    }
}

impl OverlayContainer for MemoryContainer {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, top_left: Point) {
        self.position = top_left;
    }

    fn detach(&mut self) {
        self.attached = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_with_path() -> (MemorySurface, PathHandle) {
        let mut surface = MemorySurface::new(SurfaceSize::new(100.0, 50.0));
        let handle = surface
            .add_path("TX", "M0,0L1,1Z", &PathStyle::default())
            .unwrap();
        (surface, handle)
    }

    #[test]
    fn test_add_path_tags_id() {
        let (surface, handle) = surface_with_path();
        assert_eq!(surface.path(handle).unwrap().id, "TX");
        assert_eq!(surface.path_by_id("TX").unwrap().path, "M0,0L1,1Z");
        assert_eq!(surface.fill(handle), Some(PathStyle::default().fill));
    }

    #[test]
    fn test_animate_fill_runs_on_tick() {
        let (mut surface, handle) = surface_with_path();
        surface
            .animate_fill(handle, Color::BLACK, Duration::from_millis(800))
            .unwrap();

        assert!(surface.is_animating());
        assert_eq!(surface.fill(handle), Some(PathStyle::default().fill));

        surface.tick(Duration::from_millis(800));
        assert_eq!(surface.fill(handle), Some(Color::BLACK));
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let (mut surface, handle) = surface_with_path();
        surface.animate_fill(handle, Color::BLACK, Duration::ZERO).unwrap();
        assert_eq!(surface.fill(handle), Some(Color::BLACK));
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_set_fill_supersedes_animation() {
        let (mut surface, handle) = surface_with_path();
        surface
            .animate_fill(handle, Color::BLACK, Duration::from_secs(1))
            .unwrap();
        surface.set_fill(handle, Color::WHITE).unwrap();
        surface.finish_transitions();
        assert_eq!(surface.fill(handle), Some(Color::WHITE));
    }

    #[test]
    fn test_long_frame_gap_completes_animation() {
        let (mut surface, handle) = surface_with_path();
        surface
            .animate_fill(handle, Color::BLACK, Duration::from_millis(800))
            .unwrap();
        surface.tick(Duration::from_millis(1));
        surface.tick(Duration::MAX);

        assert_eq!(surface.fill(handle), Some(Color::BLACK));
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_finish_transitions_with_endless_duration() {
        let (mut surface, handle) = surface_with_path();
        surface
            .animate_fill(handle, Color::BLACK, Duration::from_millis(u64::MAX))
            .unwrap();
        surface.finish_transitions();

        assert_eq!(surface.fill(handle), Some(Color::BLACK));
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_tick_now_starts_from_zero() {
        let (mut surface, handle) = surface_with_path();
        surface
            .animate_fill(handle, Color::BLACK, Duration::from_secs(3600))
            .unwrap();
        surface.tick_now();

        assert!(surface.is_animating());
        assert_eq!(surface.fill(handle), Some(PathStyle::default().fill));
    }

    #[test]
    fn test_unknown_handle_is_an_error() {
        let (mut surface, _) = surface_with_path();
        assert!(matches!(
            surface.set_fill(PathHandle(9), Color::BLACK),
            Err(MapError::Surface(_))
        ));
    }

    #[test]
    fn test_scale_is_absolute() {
        let (mut surface, _) = surface_with_path();
        surface.scale_all(2.0);
        surface.scale_all(2.0);
        assert_eq!(surface.scale(), 2.0);
        assert_eq!(surface.scale_operations(), 2);
        assert_eq!(surface.rendered_size(), SurfaceSize::new(200.0, 100.0));
    }

    #[test]
    fn test_detached_container_refuses_surfaces() {
        let mut container = MemoryContainer::new("gmapCanvas", SurfaceSize::new(10.0, 10.0));
        assert!(container.create_surface(SurfaceSize::new(5.0, 5.0)).is_ok());
        assert!(container.create_surface(SurfaceSize::new(0.0, 5.0)).is_err());

        container.detach();
        assert!(!container.is_attached());
        assert!(container.create_surface(SurfaceSize::new(5.0, 5.0)).is_err());
        assert_eq!(container.surfaces_created(), 1);
    }
}
