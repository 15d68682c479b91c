//! Tincture Core: `.cube` LUT parsing and per-pixel color grading.
//!
//! This crate contains the cube parser/writer, trilinear LUT sampling,
//! and the intensity/brightness/contrast pipeline. No platform image codecs
//! or UI dependencies.

pub mod cube;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod transform;

// Re-exports for convenience.
pub use cube::parser::{ParseMode, load_cube, parse, parse_with};
pub use cube::writer::{save_cube, to_cube_string};
pub use error::{ConfigError, ParseError};
pub use frame::{BitDepth, Frame};
pub use pipeline::params::PipelineParams;
pub use pipeline::process::{apply_cube, process, process_in_place, process_pixel};
pub use transform::lut::Lut3D;
pub use transform::sampler::sample;
