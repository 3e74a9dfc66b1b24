//! Test fixtures: small JPEGs with hand-built EXIF and XMP segments.

#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use std::io::Cursor;
use std::path::Path;

const EXIF_HEADER: &[u8] = b"Exif\0\0";
const XMP_HEADER: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";

pub fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

pub fn ascii(s: &str) -> Value {
    Value::Ascii(vec![s.as_bytes().to_vec()])
}

pub fn rationals(pairs: &[(u32, u32)]) -> Value {
    Value::Rational(
        pairs
            .iter()
            .map(|&(num, denom)| Rational { num, denom })
            .collect(),
    )
}

/// Encode a plain grey JPEG of the given size.
pub fn plain_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::new_rgb8(width, height);
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Jpeg).unwrap();
    buffer.into_inner()
}

/// Serialize fields into a TIFF-structured EXIF block.
pub fn exif_block(fields: &[Field], little_endian: bool) -> Vec<u8> {
    let mut writer = Writer::new();
    for f in fields {
        writer.push_field(f);
    }
    let mut buffer = Cursor::new(Vec::new());
    writer.write(&mut buffer, little_endian).unwrap();
    buffer.into_inner()
}

/// Insert APP1 segments right after the JPEG start-of-image marker.
pub fn with_app1_segments(jpeg: &[u8], payloads: &[Vec<u8>]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");

    let mut out = jpeg[..2].to_vec();
    for payload in payloads {
        let len = u16::try_from(payload.len() + 2).expect("APP1 segment too large");
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(payload);
    }
    out.extend_from_slice(&jpeg[2..]);
    out
}

pub fn exif_segment(fields: &[Field]) -> Vec<u8> {
    let mut payload = EXIF_HEADER.to_vec();
    payload.extend(exif_block(fields, false));
    payload
}

pub fn xmp_segment(xmp: &str) -> Vec<u8> {
    let mut payload = XMP_HEADER.to_vec();
    payload.extend_from_slice(xmp.as_bytes());
    payload
}

/// Write a 64x48 JPEG carrying `fields` (and optionally an XMP packet).
pub fn write_jpeg(path: &Path, fields: &[Field], xmp: Option<&str>) {
    let mut segments = vec![exif_segment(fields)];
    if let Some(xmp) = xmp {
        segments.push(xmp_segment(xmp));
    }
    let bytes = with_app1_segments(&plain_jpeg(64, 48), &segments);
    std::fs::write(path, bytes).unwrap();
}

/// A DJI-style XMP packet with gimbal attributes.
pub fn dji_xmp(pitch: &str, yaw: &str, flight_id: &str) -> String {
    format!(
        r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="DJI Meta Data"
    xmlns:drone-dji="http://www.dji.com/drone-dji/1.0/"
    drone-dji:GimbalRollDegree="+0.00"
    drone-dji:GimbalYawDegree="{yaw}"
    drone-dji:GimbalPitchDegree="{pitch}"
    drone-dji:FlightID="{flight_id}"/>
 </rdf:RDF>
</x:xmpmeta>"#
    )
}

/// A big-endian EXIF payload whose IFD0 holds Make = "DJI", a Model entry
/// pointing past the end of the block, and Orientation = 6.
pub fn exif_segment_with_broken_model() -> Vec<u8> {
    let mut tiff = b"MM\0\x2a\0\0\0\x08".to_vec();
    tiff.extend_from_slice(&3u16.to_be_bytes());
    // Make: ASCII, 4 bytes inline
    tiff.extend_from_slice(&[0x01, 0x0F, 0x00, 0x02, 0, 0, 0, 4]);
    tiff.extend_from_slice(b"DJI\0");
    // Model: ASCII, 20 bytes at an offset outside the block
    tiff.extend_from_slice(&[0x01, 0x10, 0x00, 0x02, 0, 0, 0, 20]);
    tiff.extend_from_slice(&0xFFFFu32.to_be_bytes());
    // Orientation: SHORT, inline
    tiff.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0, 0, 0, 1, 0, 6, 0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let mut payload = EXIF_HEADER.to_vec();
    payload.extend(tiff);
    payload
}
