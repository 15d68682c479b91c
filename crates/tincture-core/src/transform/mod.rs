//! Color transforms: the LUT value type and its trilinear sampler.

pub mod lut;
pub mod sampler;
