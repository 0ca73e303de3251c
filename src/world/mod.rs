// world/ - Sky queries
//
// Read-only fields sampled by the generator and renderer.
// No per-frame state, no allocation after construction.

mod horizon;
mod noise;

pub use horizon::*;
pub use noise::NoiseField;
