pub mod transitions;

// Re-export commonly used types and functions for convenience
pub use transitions::{FillTransition, TransitionManager, TransitionState};
