//! Element source: the downloaded feed and its parsed element set

mod element_set;
mod fetch;

pub use element_set::*;
pub use fetch::*;
