//! Trilinear sampling of a [`Lut3D`].
//!
//! # Algorithm
//! Each input channel is mapped onto the grid, `x = c × (N − 1)`, split
//! into an integer cell corner and a fractional weight, then the 8 corners
//! of the cell are blended axis by axis:
//! ```text
//!   c00 = lerp(C000, C100, fr)    c10 = lerp(C010, C110, fr)
//!   c01 = lerp(C001, C101, fr)    c11 = lerp(C011, C111, fr)
//!   c0  = lerp(c00, c10, fg)      c1  = lerp(c01, c11, fg)
//!   out = lerp(c0, c1, fb)
//! ```
//! `lerp(a, b, 0) == a` bit-for-bit, so grid points return their entry exactly.

use glam::Vec3;

use crate::transform::lut::Lut3D;

/// Sample `lut` at `rgb` using trilinear interpolation.
///
/// Inputs are clamped to `[0, 1]` (NaN reads as 0), so colors at or past
/// the top of the gamut read the last grid cell. A size-1 LUT returns its
/// only entry for every input.
pub fn sample(lut: &Lut3D, rgb: [f32; 3]) -> [f32; 3] {
    let size = lut.size();
    debug_assert_eq!(lut.len(), size * size * size);
    if size == 1 {
        return lut.table()[0];
    }

    let max = size - 1;
    let (r0, r1, fr) = axis(rgb[0], max);
    let (g0, g1, fg) = axis(rgb[1], max);
    let (b0, b1, fb) = axis(rgb[2], max);

    let corner = |r, g, b| Vec3::from_array(lut.entry(r, g, b));

    let c00 = corner(r0, g0, b0).lerp(corner(r1, g0, b0), fr);
    let c10 = corner(r0, g1, b0).lerp(corner(r1, g1, b0), fr);
    let c01 = corner(r0, g0, b1).lerp(corner(r1, g0, b1), fr);
    let c11 = corner(r0, g1, b1).lerp(corner(r1, g1, b1), fr);

    let c0 = c00.lerp(c10, fg);
    let c1 = c01.lerp(c11, fg);

    c0.lerp(c1, fb).to_array()
}

/// Lower corner, upper corner and fractional weight along one axis.
#[inline]
fn axis(value: f32, max: usize) -> (usize, usize, f32) {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let x = v * max as f32;
    let lo = (x.floor() as usize).min(max);
    let hi = (lo + 1).min(max);
    (lo, hi, x - lo as f32)
}
