pub mod headless;
pub mod overlay;

pub use headless::HeadlessHost;
pub use overlay::{scale_for_zoom, scale_for_zoom_level, ChoroplethOverlay, DrawState, OverlayState};
