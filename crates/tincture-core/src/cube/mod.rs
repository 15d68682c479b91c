//! `.cube` file I/O: text parsing into [`Lut3D`](crate::Lut3D) and serialization back out.

pub mod parser;
pub mod writer;

/// Directive keywords understood (or deliberately ignored) by the parser.
pub(crate) mod keyword {
    pub const TITLE: &str = "TITLE";
    pub const LUT_3D_SIZE: &str = "LUT_3D_SIZE";
    pub const DOMAIN_MIN: &str = "DOMAIN_MIN";
    pub const DOMAIN_MAX: &str = "DOMAIN_MAX";

    /// Directives with no meaning for a 3D cube; their numbers must not
    /// leak into the size or table.
    pub const IGNORED: [&str; 3] = ["LUT_1D_SIZE", "LUT_1D_INPUT_RANGE", "LUT_3D_INPUT_RANGE"];
}
