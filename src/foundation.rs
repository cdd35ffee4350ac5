pub mod core;
pub mod error;
pub mod geometry;
pub(crate) mod math;
