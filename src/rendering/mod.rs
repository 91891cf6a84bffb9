pub mod surface;

// Re-export main types
pub use surface::{MemoryContainer, MemorySurface, SurfacePath};
