//! The dense 3D lookup table produced by the cube parser.

use crate::error::ParseError;

/// A 3D lookup table mapping input RGB to output RGB.
///
/// Entries are stored red-fastest: the output for grid coordinate
/// `(r, g, b)` lives at `r + g·N + b·N²`, which is also the row order of
/// a `.cube` file.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    /// Grid size per axis.
    pub(crate) size: usize,
    /// LUT entries. Length = size³.
    pub(crate) table: Vec<[f32; 3]>,
    /// `TITLE` directive, if the file had one.
    pub title: Option<String>,
    /// `DOMAIN_MIN` directive. Recorded only; sampling assumes `[0, 1]`.
    pub domain_min: [f32; 3],
    /// `DOMAIN_MAX` directive. Recorded only; sampling assumes `[0, 1]`.
    pub domain_max: [f32; 3],
}

impl Lut3D {
    pub const DEFAULT_DOMAIN_MIN: [f32; 3] = [0.0; 3];
    pub const DEFAULT_DOMAIN_MAX: [f32; 3] = [1.0; 3];

    /// Build a LUT from `size` and entries in file order.
    ///
    /// Takes the first `size³` entries; anything after them is dropped.
    pub fn new(size: usize, mut table: Vec<[f32; 3]>) -> Result<Self, ParseError> {
        let expected = cube_len(size).ok_or(ParseError::InvalidSize {
            found: Some(size as f64),
        })?;
        if table.len() < expected {
            return Err(ParseError::TruncatedData {
                expected,
                found: table.len(),
            });
        }
        table.truncate(expected);
        Ok(Self {
            size,
            table,
            title: None,
            domain_min: Self::DEFAULT_DOMAIN_MIN,
            domain_max: Self::DEFAULT_DOMAIN_MAX,
        })
    }

    /// A LUT that maps every grid point to its own coordinate.
    ///
    /// Panics if `size` is zero.
    pub fn identity(size: usize) -> Self {
        assert!(size >= 1, "LUT size must be at least 1");
        let step = if size > 1 { 1.0 / (size - 1) as f32 } else { 0.0 };
        let mut table = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    table.push([r as f32 * step, g as f32 * step, b as f32 * step]);
                }
            }
        }
        Self {
            size,
            table,
            title: None,
            domain_min: Self::DEFAULT_DOMAIN_MIN,
            domain_max: Self::DEFAULT_DOMAIN_MAX,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Grid points per axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All entries, red-fastest.
    pub fn table(&self) -> &[[f32; 3]] {
        &self.table
    }

    /// Number of entries (size³).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Flat index of grid coordinate `(r, g, b)`.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        debug_assert!(r < self.size && g < self.size && b < self.size);
        r + g * self.size + b * self.size * self.size
    }

    /// Entry at grid coordinate `(r, g, b)`.
    #[inline]
    pub fn entry(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.table[self.index(r, g, b)]
    }

    /// Sample with trilinear interpolation. See [`sample`](crate::transform::sampler::sample).
    pub fn sample(&self, rgb: [f32; 3]) -> [f32; 3] {
        super::sampler::sample(self, rgb)
    }

    /// Entries as a flat `[r, g, b, r, g, b, …]` slice.
    pub fn as_f32_slice(&self) -> &[f32] {
        bytemuck::cast_slice(self.table.as_slice())
    }

    /// Entries expanded to RGBA with alpha 1, the layout color-cube filters
    /// and 3D textures upload.
    pub fn to_rgba_f32(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.table.len() * 4);
        for &[r, g, b] in &self.table {
            out.extend_from_slice(&[r, g, b, 1.0]);
        }
        out
    }

    /// Whether the domain directives differ from the `[0, 1]` default.
    pub fn has_custom_domain(&self) -> bool {
        self.domain_min != Self::DEFAULT_DOMAIN_MIN || self.domain_max != Self::DEFAULT_DOMAIN_MAX
    }
}

/// `size³`, or `None` for zero or a size whose table cannot be addressed.
pub(crate) fn cube_len(size: usize) -> Option<usize> {
    if size == 0 {
        return None;
    }
    size.checked_mul(size)?.checked_mul(size)
}
