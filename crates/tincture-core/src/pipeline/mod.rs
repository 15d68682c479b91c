//! Grading pipeline: parameter definitions and per-pixel processing.

pub mod params;
pub mod process;
