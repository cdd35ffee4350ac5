pub mod controller;
pub mod input;
pub mod scheduler;
pub mod state;
