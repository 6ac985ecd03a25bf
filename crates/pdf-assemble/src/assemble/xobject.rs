//! Image XObject creation
//!
//! JPEG bytes go into the document untouched behind `DCTDecode`; PNG
//! samples are Flate-compressed, with alpha as a separate soft mask.

use super::jpeg::{self, JpegInfo};
use super::orientation;
use super::raster::{self, RasterImage};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_collect::{ImageKind, ImagePath};
use std::path::Path;

/// An image added to the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EmbeddedImage {
    pub id: ObjectId,
    pub width: u32,
    pub height: u32,
    /// Clockwise page rotation from EXIF orientation
    pub rotation: u16,
}

/// Add `bytes` (the contents of `image`) as an image XObject
pub(crate) fn embed_image(
    output: &mut Document,
    image: &ImagePath,
    bytes: Vec<u8>,
) -> Result<EmbeddedImage> {
    let rotation = orientation::page_rotation(&bytes);
    let embedded = match detect_kind(image, &bytes)? {
        ImageKind::Jpeg => {
            let info = jpeg::inspect(&bytes).map_err(|reason| AssembleError::Jpeg {
                path: image.path().to_path_buf(),
                reason,
            })?;
            embed_jpeg(output, image.path(), info, bytes)
        }
        ImageKind::Png => {
            let raster = raster::decode_png(&bytes).map_err(|source| AssembleError::Decode {
                path: image.path().to_path_buf(),
                source,
            })?;
            embed_raster(output, raster)
        }
    }?;
    Ok(EmbeddedImage {
        rotation,
        ..embedded
    })
}

/// Trust the content over the extension; fall back to the extension only
/// when the signature is unknown.
fn detect_kind(image: &ImagePath, bytes: &[u8]) -> Result<ImageKind> {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Jpeg) => Ok(ImageKind::Jpeg),
        Ok(image::ImageFormat::Png) => Ok(ImageKind::Png),
        Ok(_) => Err(AssembleError::UnsupportedFormat {
            path: image.path().to_path_buf(),
        }),
        Err(_) => Ok(image.kind()),
    }
}

fn embed_jpeg(
    output: &mut Document,
    path: &Path,
    info: JpegInfo,
    bytes: Vec<u8>,
) -> Result<EmbeddedImage> {
    let jpeg_error = |reason: String| AssembleError::Jpeg {
        path: path.to_path_buf(),
        reason,
    };

    if info.precision != 8 {
        return Err(jpeg_error(format!(
            "{}-bit samples are not supported",
            info.precision
        )));
    }

    let color_space: &[u8] = match info.components {
        1 => b"DeviceGray",
        3 => b"DeviceRGB",
        4 => b"DeviceCMYK",
        n => return Err(jpeg_error(format!("{n} colour components are not supported"))),
    };

    let mut dict = image_dictionary(info.width, info.height, color_space, 8);
    dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
    if info.components == 4 && info.adobe {
        dict.set("Decode", inverted_decode(4));
    }

    // Already compressed; must not be deflated again
    let stream = Stream::new(dict, bytes).with_compression(false);
    Ok(EmbeddedImage {
        id: output.add_object(stream),
        width: info.width,
        height: info.height,
        rotation: 0,
    })
}

fn embed_raster(output: &mut Document, raster: RasterImage) -> Result<EmbeddedImage> {
    let bits = raster.bits_per_component;
    let mut dict = image_dictionary(
        raster.width,
        raster.height,
        raster.color_space.pdf_name(),
        bits,
    );

    if let Some(alpha) = raster.alpha {
        let mask_dict = image_dictionary(raster.width, raster.height, b"DeviceGray", bits);
        let mut mask = Stream::new(mask_dict, alpha);
        mask.compress()?;
        let mask_id = output.add_object(mask);
        dict.set("SMask", Object::Reference(mask_id));
    }

    let mut stream = Stream::new(dict, raster.samples);
    stream.compress()?;
    Ok(EmbeddedImage {
        id: output.add_object(stream),
        width: raster.width,
        height: raster.height,
        rotation: 0,
    })
}

fn image_dictionary(width: u32, height: u32, color_space: &[u8], bits: u8) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(width)));
    dict.set("Height", Object::Integer(i64::from(height)));
    dict.set("ColorSpace", Object::Name(color_space.to_vec()));
    dict.set("BitsPerComponent", Object::Integer(i64::from(bits)));
    dict
}

/// `[1 0 1 0 ...]`, flipping every component
fn inverted_decode(components: usize) -> Object {
    Object::Array(
        (0..components)
            .flat_map(|_| [Object::Integer(1), Object::Integer(0)])
            .collect(),
    )
}
