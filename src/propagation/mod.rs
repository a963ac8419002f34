//! Orbit propagation: query epochs, the SGP4 capability, and the
//! trajectory sampler that turns one element set into a prediction window

mod epoch;
mod propagator;
mod sampler;

pub use epoch::*;
pub use propagator::*;
pub use sampler::*;
