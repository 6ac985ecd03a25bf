//! JPEG header inspection
//!
//! JPEG data is embedded as-is, so only the frame header is needed: it
//! gives the pixel size and the number of colour components. No pixel data
//! is decoded.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct JpegInfo {
    pub width: u32,
    pub height: u32,
    pub components: u8,
    pub precision: u8,
    /// An Adobe APP14 segment was present (CMYK data is stored inverted)
    pub adobe: bool,
}

const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const TEM: u8 = 0x01;
const APP14: u8 = 0xEE;
const DHT: u8 = 0xC4;
const JPG: u8 = 0xC8;
const DAC: u8 = 0xCC;

fn is_frame_header(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xCF) && !matches!(marker, DHT | JPG | DAC)
}

fn is_standalone(marker: u8) -> bool {
    matches!(marker, SOI | TEM | 0xD0..=0xD7)
}

/// Walk the marker segments up to the first frame header
pub(crate) fn inspect(bytes: &[u8]) -> Result<JpegInfo, String> {
    if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != SOI {
        return Err("missing start-of-image marker".to_string());
    }

    let mut adobe = false;
    let mut pos = 2;

    loop {
        if pos >= bytes.len() || bytes[pos] != 0xFF {
            return Err(format!("expected marker at offset {pos}"));
        }
        // Any number of 0xFF fill bytes may precede a marker
        while pos < bytes.len() && bytes[pos] == 0xFF {
            pos += 1;
        }
        let Some(&marker) = bytes.get(pos) else {
            return Err("truncated marker".to_string());
        };
        pos += 1;

        if is_standalone(marker) {
            continue;
        }
        if marker == EOI || marker == SOS {
            return Err("no frame header before image data".to_string());
        }

        let length = read_u16(bytes, pos).ok_or("truncated segment length")? as usize;
        if length < 2 || pos + length > bytes.len() {
            return Err(format!("segment length {length} out of range at offset {pos}"));
        }
        let segment = &bytes[pos + 2..pos + length];

        if marker == APP14 && segment.starts_with(b"Adobe") {
            adobe = true;
        }

        if is_frame_header(marker) {
            if segment.len() < 6 {
                return Err("frame header too short".to_string());
            }
            let precision = segment[0];
            let height = u32::from(read_u16(segment, 1).ok_or("frame header too short")?);
            let width = u32::from(read_u16(segment, 3).ok_or("frame header too short")?);
            let components = segment[5];

            if width == 0 || height == 0 {
                return Err(format!("unsupported frame size {width}x{height}"));
            }
            return Ok(JpegInfo {
                width,
                height,
                components,
                precision,
                adobe,
            });
        }

        pos += length;
    }
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let hi = *bytes.get(at)?;
    let lo = *bytes.get(at + 1)?;
    Some(u16::from_be_bytes([hi, lo]))
}
