//! Decoded raster images (PNG input)
//!
//! Samples are kept at their native depth: 8-bit stays 8-bit, 16-bit is
//! written big-endian as PDF expects. Alpha is split into its own plane for
//! use as a soft mask.

use image::{DynamicImage, ImageFormat, ImageResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColorSpace {
    Gray,
    Rgb,
}

impl ColorSpace {
    pub fn pdf_name(self) -> &'static [u8] {
        match self {
            ColorSpace::Gray => b"DeviceGray",
            ColorSpace::Rgb => b"DeviceRGB",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub bits_per_component: u8,
    pub samples: Vec<u8>,
    /// One gray sample per pixel at `bits_per_component`; `None` when the
    /// source has no alpha or every pixel is opaque
    pub alpha: Option<Vec<u8>>,
}

pub(crate) fn decode_png(bytes: &[u8]) -> ImageResult<RasterImage> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    Ok(from_dynamic(decoded))
}

fn from_dynamic(decoded: DynamicImage) -> RasterImage {
    let (width, height) = (decoded.width(), decoded.height());
    let (color_space, bits_per_component, samples, alpha) = match decoded {
        DynamicImage::ImageLuma8(buf) => (ColorSpace::Gray, 8, buf.into_raw(), None),
        DynamicImage::ImageLumaA8(buf) => {
            let (gray, alpha) = split_alpha(buf.as_raw(), 2, u8::MAX);
            (ColorSpace::Gray, 8, gray, alpha)
        }
        DynamicImage::ImageRgb8(buf) => (ColorSpace::Rgb, 8, buf.into_raw(), None),
        DynamicImage::ImageRgba8(buf) => {
            let (rgb, alpha) = split_alpha(buf.as_raw(), 4, u8::MAX);
            (ColorSpace::Rgb, 8, rgb, alpha)
        }
        DynamicImage::ImageLuma16(buf) => (ColorSpace::Gray, 16, be_bytes(buf.as_raw()), None),
        DynamicImage::ImageLumaA16(buf) => {
            let (gray, alpha) = split_alpha(buf.as_raw(), 2, u16::MAX);
            (ColorSpace::Gray, 16, be_bytes(&gray), alpha.map(|a| be_bytes(&a)))
        }
        DynamicImage::ImageRgb16(buf) => (ColorSpace::Rgb, 16, be_bytes(buf.as_raw()), None),
        DynamicImage::ImageRgba16(buf) => {
            let (rgb, alpha) = split_alpha(buf.as_raw(), 4, u16::MAX);
            (ColorSpace::Rgb, 16, be_bytes(&rgb), alpha.map(|a| be_bytes(&a)))
        }
        other if other.color().has_alpha() => {
            let rgba = other.to_rgba8();
            let (rgb, alpha) = split_alpha(rgba.as_raw(), 4, u8::MAX);
            (ColorSpace::Rgb, 8, rgb, alpha)
        }
        other => (ColorSpace::Rgb, 8, other.to_rgb8().into_raw(), None),
    };

    RasterImage {
        width,
        height,
        color_space,
        bits_per_component,
        samples,
        alpha,
    }
}

/// Separate interleaved colour+alpha samples; the alpha plane is dropped
/// when every value equals `opaque`.
fn split_alpha<T: Copy + PartialEq>(
    raw: &[T],
    channels: usize,
    opaque: T,
) -> (Vec<T>, Option<Vec<T>>) {
    let pixels = raw.len() / channels;
    let mut color = Vec::with_capacity(pixels * (channels - 1));
    let mut alpha = Vec::with_capacity(pixels);

    for pixel in raw.chunks_exact(channels) {
        color.extend_from_slice(&pixel[..channels - 1]);
        alpha.push(pixel[channels - 1]);
    }

    let alpha = if alpha.iter().all(|&a| a == opaque) {
        None
    } else {
        Some(alpha)
    };
    (color, alpha)
}

fn be_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_be_bytes()).collect()
}
