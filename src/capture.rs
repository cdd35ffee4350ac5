pub mod bubble;
pub mod composite;
pub mod geometry;
pub mod label;
