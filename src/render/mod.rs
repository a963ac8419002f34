//! 3D trajectory rendering through an orbital camera onto the egui painter

mod camera;
mod viewport;

pub use camera::*;
pub use viewport::*;
