pub mod builder;
pub mod color;
pub mod config;
pub mod constants;
pub mod geo;
pub mod map;
pub mod projection;
pub mod shape;
pub mod viewport;
