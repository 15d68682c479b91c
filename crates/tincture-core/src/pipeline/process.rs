//! Applies a LUT plus intensity/brightness/contrast to every pixel.
//!
//! # Per-pixel chain
//! ```text
//!   sampled = trilinear(lut, rgb)
//!   blended = rgb × (1 − intensity) + sampled × intensity
//!   bright  = blended + brightness
//!   out     = clamp((bright − 0.5) × contrast + 0.5, 0, 1)
//! ```
//! Alpha passes through untouched. Rows are processed in parallel; each
//! output row depends only on the matching input row and the shared,
//! read-only LUT and params.

use rayon::prelude::*;

use crate::cube::parser::parse;
use crate::error::ParseError;
use crate::frame::Frame;
use crate::pipeline::params::PipelineParams;
use crate::transform::lut::Lut3D;
use crate::transform::sampler::sample;

/// Grade `frame` into a new frame.
///
/// Out-of-range params are clamped into range first.
pub fn process(frame: &Frame, lut: &Lut3D, params: &PipelineParams) -> Frame {
    check_frame(frame);
    let params = effective_params(params);
    tracing::debug!(
        "processing {}x{} frame with {}³ LUT (intensity {}, brightness {}, contrast {})",
        frame.width,
        frame.height,
        lut.size(),
        params.intensity,
        params.brightness,
        params.contrast
    );

    let mut pixels = vec![[0.0_f32; 4]; frame.pixels.len()];
    if !pixels.is_empty() {
        let width = frame.width as usize;
        pixels
            .par_chunks_mut(width)
            .zip(frame.pixels.par_chunks(width))
            .for_each(|(dst, src)| {
                for (out, &px) in dst.iter_mut().zip(src) {
                    *out = process_pixel(px, lut, &params);
                }
            });
    }

    Frame {
        width: frame.width,
        height: frame.height,
        pixels,
        source_bit_depth: frame.source_bit_depth,
    }
}

/// Grade `frame` in place.
pub fn process_in_place(frame: &mut Frame, lut: &Lut3D, params: &PipelineParams) {
    check_frame(frame);
    let params = effective_params(params);
    if frame.is_empty() {
        return;
    }
    let width = frame.width as usize;
    frame.pixels.par_chunks_mut(width).for_each(|row| {
        for px in row {
            *px = process_pixel(*px, lut, &params);
        }
    });
}

/// Grade a single RGBA pixel. `params` are used as given.
///
/// `intensity = 0` reproduces the input color without touching the LUT and
/// `intensity = 1` returns the sampled color, both bit-for-bit. Brightness 0
/// with contrast 1 is skipped so the neutral tone stays exact too.
#[inline]
pub fn process_pixel(px: [f32; 4], lut: &Lut3D, params: &PipelineParams) -> [f32; 4] {
    let rgb = [px[0], px[1], px[2]];
    let blended = if params.intensity == 0.0 {
        rgb
    } else {
        let sampled = sample(lut, rgb);
        if params.intensity == 1.0 {
            sampled
        } else {
            let keep = 1.0 - params.intensity;
            [0, 1, 2].map(|c| rgb[c] * keep + sampled[c] * params.intensity)
        }
    };

    let toned = if params.is_neutral_tone() {
        blended
    } else {
        blended.map(|v| {
            (v + params.brightness - PipelineParams::CONTRAST_PIVOT) * params.contrast
                + PipelineParams::CONTRAST_PIVOT
        })
    };

    let [r, g, b] = toned.map(clamp_unit);
    [r, g, b, px[3]]
}

/// Parse `cube_text` and grade `frame` with it.
pub fn apply_cube(
    cube_text: &str,
    frame: &Frame,
    params: &PipelineParams,
) -> Result<Frame, ParseError> {
    let lut = parse(cube_text)?;
    Ok(process(frame, &lut, params))
}

fn effective_params(params: &PipelineParams) -> PipelineParams {
    let clamped = params.clamped();
    if clamped != *params {
        tracing::warn!("pipeline params out of range, clamped: {params:?} -> {clamped:?}");
    }
    clamped
}

fn check_frame(frame: &Frame) {
    assert_eq!(
        frame.pixels.len(),
        frame.pixel_count(),
        "frame pixel count does not match {}x{}",
        frame.width,
        frame.height
    );
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
