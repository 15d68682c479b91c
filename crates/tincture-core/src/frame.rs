//! In-memory pixel grid handed between the caller and the grading pipeline.

use std::fmt;

use image::{ColorType, DynamicImage, ImageBuffer, Rgba};
use serde::{Deserialize, Serialize};

/// Storage precision of the buffer a [`Frame`] was built from.
///
/// Processing always happens in `f32`; the bit depth only decides how
/// [`Frame::to_image`] quantizes the result on the way back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit floating point.
    F32,
}

impl BitDepth {
    /// Largest integer code value, or `1.0` for float storage.
    pub const fn max_value(self) -> f32 {
        match self {
            Self::U8 => u8::MAX as f32,
            Self::U16 => u16::MAX as f32,
            Self::F32 => 1.0,
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "8-bit"),
            Self::U16 => write!(f, "16-bit"),
            Self::F32 => write!(f, "32-bit float"),
        }
    }
}

impl From<ColorType> for BitDepth {
    fn from(color: ColorType) -> Self {
        match color {
            ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => Self::U8,
            ColorType::L16 | ColorType::La16 | ColorType::Rgb16 | ColorType::Rgba16 => Self::U16,
            _ => Self::F32,
        }
    }
}

/// Width × height grid of normalized RGBA samples, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in RGBA f32, nominally `[0, 1]`.
    pub pixels: Vec<[f32; 4]>,
    /// Precision of the buffer this frame was decoded from.
    pub source_bit_depth: BitDepth,
}

impl Frame {
    /// Wrap float pixels. Panics if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel count does not match {width}x{height}"
        );
        Self {
            width,
            height,
            pixels,
            source_bit_depth: BitDepth::F32,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Build a frame from interleaved 8-bit RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Self {
        Self::from_samples(width, height, data, BitDepth::U8)
    }

    /// Build a frame from interleaved 16-bit RGBA samples.
    pub fn from_rgba16(width: u32, height: u32, data: &[u16]) -> Self {
        Self::from_samples(width, height, data, BitDepth::U16)
    }

    /// Quantize to interleaved 8-bit RGBA. Channels are clamped first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| px.map(|v| quantize(v, BitDepth::U8) as u8))
            .collect()
    }

    /// Quantize to interleaved 16-bit RGBA. Channels are clamped first.
    pub fn to_rgba16(&self) -> Vec<u16> {
        self.pixels
            .iter()
            .flat_map(|px| px.map(|v| quantize(v, BitDepth::U16) as u16))
            .collect()
    }

    /// Convert an `image` buffer into a frame, remembering its precision.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        match BitDepth::from(image.color()) {
            BitDepth::U8 => Self::from_rgba8(width, height, image.to_rgba8().as_raw()),
            BitDepth::U16 => Self::from_rgba16(width, height, image.to_rgba16().as_raw()),
            BitDepth::F32 => {
                let buffer = image.to_rgba32f();
                let pixels = buffer.pixels().map(|px| px.0).collect();
                Self::new(width, height, pixels)
            }
        }
    }

    /// Convert back to an `image` buffer at the source bit depth.
    pub fn to_image(&self) -> DynamicImage {
        let width = self.width as usize;
        let at = |x: u32, y: u32| self.pixels[y as usize * width + x as usize];
        match self.source_bit_depth {
            BitDepth::U8 => DynamicImage::ImageRgba8(ImageBuffer::from_fn(
                self.width,
                self.height,
                |x, y| Rgba(at(x, y).map(|v| quantize(v, BitDepth::U8) as u8)),
            )),
            BitDepth::U16 => DynamicImage::ImageRgba16(ImageBuffer::from_fn(
                self.width,
                self.height,
                |x, y| Rgba(at(x, y).map(|v| quantize(v, BitDepth::U16) as u16)),
            )),
            BitDepth::F32 => DynamicImage::ImageRgba32F(ImageBuffer::from_fn(
                self.width,
                self.height,
                |x, y| Rgba(at(x, y)),
            )),
        }
    }

    fn from_samples<T: Copy + Into<f32>>(
        width: u32,
        height: u32,
        data: &[T],
        depth: BitDepth,
    ) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize * 4,
            "sample count does not match {width}x{height} RGBA"
        );
        let max = depth.max_value();
        let pixels = data
            .chunks_exact(4)
            .map(|px| [0, 1, 2, 3].map(|c| Into::<f32>::into(px[c]) / max))
            .collect();
        Self {
            source_bit_depth: depth,
            ..Self::new(width, height, pixels)
        }
    }
}

/// Clamp to `[0, 1]` and scale to the integer code range, rounding to nearest.
fn quantize(value: f32, depth: BitDepth) -> f32 {
    // NaN maps to black rather than saturating unpredictably.
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    (v * depth.max_value()).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_roundtrip_is_lossless() {
        let data: Vec<u8> = (0..=255u8).flat_map(|v| [v, 255 - v, v / 2, 255]).collect();
        let frame = Frame::from_rgba8(16, 16, &data);
        assert_eq!(frame.source_bit_depth, BitDepth::U8);
        assert_eq!(frame.to_rgba8(), data);
    }

    #[test]
    fn test_rgba8_normalizes_to_unit_range() {
        let frame = Frame::from_rgba8(1, 1, &[0, 51, 255, 128]);
        let px = frame.pixels[0];
        assert_eq!(px[0], 0.0);
        assert!((px[1] - 0.2).abs() < 1e-6);
        assert_eq!(px[2], 1.0);
    }

    #[test]
    fn test_quantize_clamps_out_of_range() {
        let frame = Frame::new(1, 1, vec![[-0.5, 1.5, f32::NAN, 0.5]]);
        assert_eq!(frame.to_rgba8(), vec![0, 255, 0, 128]);
    }

    #[test]
    fn test_rgba16_roundtrip_is_lossless() {
        let data = [0u16, 1, 32768, 65535, 12345, 54321, 7, 65534];
        let frame = Frame::from_rgba16(2, 1, &data);
        assert_eq!(frame.to_rgba16(), data.to_vec());
    }

    #[test]
    fn test_image_roundtrip_keeps_bit_depth() {
        let buffer = image::RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 80, y as u8 * 200, 7, 255]));
        let dynamic = DynamicImage::ImageRgba8(buffer.clone());
        let frame = Frame::from_image(&dynamic);
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.source_bit_depth, BitDepth::U8);
        assert_eq!(frame.to_image().to_rgba8(), buffer);
    }

    #[test]
    fn test_image_roundtrip_16_bit() {
        let buffer: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_fn(4, 3, |x, y| Rgba([x as u16 * 16000, y as u16 * 30000, 1, 65535]));
        let frame = Frame::from_image(&DynamicImage::ImageRgba16(buffer.clone()));
        assert_eq!(frame.source_bit_depth, BitDepth::U16);
        assert!((frame.pixels[1][0] - 16000.0 / 65535.0).abs() < 1e-6);

        match frame.to_image() {
            DynamicImage::ImageRgba16(out) => assert_eq!(out, buffer),
            other => panic!("expected 16-bit RGBA, got {:?}", other.color()),
        }
    }

    #[test]
    fn test_image_roundtrip_float() {
        let buffer: image::Rgba32FImage =
            ImageBuffer::from_fn(2, 2, |x, y| Rgba([x as f32 * 0.25, y as f32 * 1.5, -0.125, 0.5]));
        let frame = Frame::from_image(&DynamicImage::ImageRgba32F(buffer.clone()));
        assert_eq!(frame.source_bit_depth, BitDepth::F32);
        // Float frames keep out-of-range values; only integer exports clamp.
        assert_eq!(frame.pixels[3], [0.25, 1.5, -0.125, 0.5]);

        match frame.to_image() {
            DynamicImage::ImageRgba32F(out) => assert_eq!(out, buffer),
            other => panic!("expected float RGBA, got {:?}", other.color()),
        }
    }

    #[test]
    #[should_panic(expected = "pixel count")]
    fn test_new_rejects_mismatched_pixels() {
        let _ = Frame::new(2, 2, vec![[0.0; 4]; 3]);
    }
}
