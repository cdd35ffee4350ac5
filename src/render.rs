pub mod cpu;
pub mod raster;
pub mod target;
pub mod transform;
