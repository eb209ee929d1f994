pub mod frames;
pub mod gif;
pub mod viewer3d;
