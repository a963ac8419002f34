//! Dashboard UI panels

mod panels;

pub use panels::*;
