pub mod decode;
pub mod slot;
pub mod text;
