//! EXIF orientation as page rotation
//!
//! Pixels are never rotated. A camera that stored the image sideways gets a
//! page `/Rotate` instead, so viewers show it upright while the MediaBox
//! keeps the stored pixel size.

use std::io::Cursor;

/// Clockwise page rotation for the EXIF Orientation tag in `bytes`; 0 when
/// there is no EXIF data or no tag.
pub(crate) fn page_rotation(bytes: &[u8]) -> u16 {
    read_orientation(bytes).map_or(0, rotation_for)
}

fn read_orientation(bytes: &[u8]) -> Option<u32> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
        .value
        .get_uint(0)
}

/// Orientations 2, 4, 5 and 7 are mirrored; a page can only rotate, so they
/// come out upright but mirrored.
fn rotation_for(orientation: u32) -> u16 {
    if matches!(orientation, 2 | 4 | 5 | 7) {
        log::debug!("EXIF orientation {orientation} is mirrored, applying rotation only");
    }
    match orientation {
        3 | 4 => 180,
        5 | 6 => 90,
        7 | 8 => 270,
        _ => 0,
    }
}
