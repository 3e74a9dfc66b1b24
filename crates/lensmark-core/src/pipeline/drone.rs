//! Drone telemetry from the vendor XMP namespace.
//!
//! Drone cameras (DJI, Parrot, Autel, ...) record flight and gimbal state in
//! an XMP packet under a `drone-<vendor>` namespace, either as attributes
//! (`drone-dji:GimbalPitchDegree="-90.00"`) or as elements
//! (`<drone-parrot:GimbalPitchDegree>-90</drone-parrot:GimbalPitchDegree>`).

use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use crate::types::ExtractedMetadata;

const XMP_START: &[u8] = b"<x:xmpmeta";
const XMP_END: &[u8] = b"</x:xmpmeta>";

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"drone-([A-Za-z0-9]+):([A-Za-z0-9_]+)\s*=\s*"([^"]*)""#)
        .expect("drone attribute pattern is valid")
});

static ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<drone-([A-Za-z0-9]+):([A-Za-z0-9_]+)>([^<]*)<")
        .expect("drone element pattern is valid")
});

/// Telemetry fields read from a drone vendor namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DroneTelemetry {
    /// Vendor prefix, e.g. "dji" for `drone-dji`
    pub vendor: String,
    pub model: Option<String>,
    pub flight_id: Option<String>,
    pub gimbal_pitch: Option<f64>,
    pub gimbal_roll: Option<f64>,
    pub gimbal_yaw: Option<f64>,
}

impl DroneTelemetry {
    /// Parse telemetry out of an XMP packet.
    ///
    /// Returns `None` when the packet has no drone namespace at all.
    pub fn parse(xmp: &str) -> Option<Self> {
        let mut telemetry: Option<Self> = None;

        let pairs = ATTRIBUTE
            .captures_iter(xmp)
            .chain(ELEMENT.captures_iter(xmp));
        for caps in pairs {
            let entry = telemetry.get_or_insert_with(|| Self {
                vendor: caps[1].to_lowercase(),
                ..Default::default()
            });
            entry.set(&caps[2], caps[3].trim());
        }

        telemetry
    }

    fn set(&mut self, key: &str, raw: &str) {
        if raw.is_empty() {
            return;
        }
        match key.to_ascii_lowercase().as_str() {
            "gimbalpitchdegree" => self.gimbal_pitch = self.gimbal_pitch.or(parse_degrees(raw)),
            "gimbalrolldegree" => self.gimbal_roll = self.gimbal_roll.or(parse_degrees(raw)),
            "gimbalyawdegree" => self.gimbal_yaw = self.gimbal_yaw.or(parse_degrees(raw)),
            "flightid" | "flightlogid" => {
                self.flight_id.get_or_insert_with(|| raw.to_string());
            }
            "dronemodel" | "modelname" | "productname" => {
                self.model.get_or_insert_with(|| raw.to_string());
            }
            _ => {}
        }
    }

    /// Fill the drone fields of `meta` that are still empty.
    ///
    /// When the vendor names no drone model, the EXIF camera model stands in:
    /// integrated drone cameras report the aircraft's camera body there.
    pub fn apply_to(self, meta: &mut ExtractedMetadata) {
        let model = self.model.or_else(|| meta.camera_model.clone());
        if meta.drone_model.is_none() {
            meta.drone_model = model;
        }
        if meta.flight_id.is_none() {
            meta.flight_id = self.flight_id;
        }
        meta.gimbal_pitch = meta.gimbal_pitch.or(self.gimbal_pitch);
        meta.gimbal_roll = meta.gimbal_roll.or(self.gimbal_roll);
        meta.gimbal_yaw = meta.gimbal_yaw.or(self.gimbal_yaw);
    }
}

fn parse_degrees(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read the embedded XMP packet from the first `limit` bytes of a file.
///
/// Returns `None` if the file can't be read or carries no packet.
pub fn read_xmp_packet(path: &Path, limit: u64) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut buffer = Vec::new();
    file.take(limit).read_to_end(&mut buffer).ok()?;
    find_xmp_packet(&buffer).map(|packet| String::from_utf8_lossy(packet).into_owned())
}

/// Locate the `<x:xmpmeta> ... </x:xmpmeta>` block inside raw bytes.
pub fn find_xmp_packet(bytes: &[u8]) -> Option<&[u8]> {
    let start = find(bytes, XMP_START)?;
    let end = find(&bytes[start..], XMP_END)? + start + XMP_END.len();
    Some(&bytes[start..end])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
