//! Core data types shared by the extractor, the registrar and the catalog.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Normalized metadata extracted from an image file.
///
/// Every field is optional and serializes only when present, so the JSON form
/// is a sparse mapping of the fields that could actually be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExtractedMetadata {
    /// Capture time as written by the camera (`YYYY:MM:DD HH:MM:SS`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    /// Camera manufacturer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_make: Option<String>,

    /// Camera model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_model: Option<String>,

    /// Lens model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens_model: Option<String>,

    /// Focal length in mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,

    /// Aperture as an f-number (e.g. 2.8)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture: Option<f64>,

    /// ISO sensitivity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,

    /// Exposure time as a fraction string (e.g. "1/250")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<String>,

    /// Orientation code (1-8) as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,

    /// Image width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,

    /// Image height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,

    /// GPS latitude (decimal degrees, negative south)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_latitude: Option<f64>,

    /// GPS longitude (decimal degrees, negative west)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_longitude: Option<f64>,

    /// GPS altitude in meters (negative below sea level)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_altitude: Option<f64>,

    /// Drone model reported by the vendor telemetry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone_model: Option<String>,

    /// Flight identifier reported by the vendor telemetry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_id: Option<String>,

    /// Gimbal pitch in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gimbal_pitch: Option<f64>,

    /// Gimbal roll in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gimbal_roll: Option<f64>,

    /// Gimbal yaw in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gimbal_yaw: Option<f64>,
}

impl ExtractedMetadata {
    /// True when no field could be extracted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of fields that were extracted.
    pub fn len(&self) -> usize {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map.len(),
            _ => 0,
        }
    }

    /// Copy every present field of `other` over `self`, leaving the rest.
    ///
    /// Re-registering an image refreshes what the file still carries without
    /// erasing fields an earlier extraction found.
    pub fn merge_from(&mut self, other: ExtractedMetadata) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            datetime,
            camera_make,
            camera_model,
            lens_model,
            focal_length,
            aperture,
            iso,
            shutter_speed,
            orientation,
            image_width,
            image_height,
            gps_latitude,
            gps_longitude,
            gps_altitude,
            drone_model,
            flight_id,
            gimbal_pitch,
            gimbal_roll,
            gimbal_yaw,
        );
    }
}

/// Metadata extracted from one file, as printed by `lensmark extract`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub metadata: ExtractedMetadata,
}

/// Outcome counts for a directory scan.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanStats {
    /// New image records created
    pub registered: usize,

    /// Existing records refreshed
    pub refreshed: usize,

    /// Files skipped because they failed validation
    pub skipped: usize,

    /// Images that yielded at least one metadata field
    pub with_metadata: usize,

    /// Total scan time in seconds
    pub total_seconds: f64,
}

impl ScanStats {
    /// Files looked at during the scan.
    pub fn total(&self) -> usize {
        self.registered + self.refreshed + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metadata_serializes_to_empty_object() {
        let meta = ExtractedMetadata::default();
        assert!(meta.is_empty());
        assert_eq!(meta.len(), 0);
        assert_eq!(serde_json::to_string(&meta).unwrap(), "{}");
    }

    #[test]
    fn test_sparse_serialization() {
        let meta = ExtractedMetadata {
            focal_length: Some(50.0),
            iso: Some(200),
            ..Default::default()
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"focal_length":50.0,"iso":200}"#);
        assert_eq!(meta.len(), 2);

        let parsed: ExtractedMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, meta);
    }

    #[test]
    fn test_merge_keeps_fields_missing_from_update() {
        let mut stored = ExtractedMetadata {
            camera_make: Some("DJI".into()),
            gps_altitude: Some(120.5),
            ..Default::default()
        };
        let fresh = ExtractedMetadata {
            camera_make: Some("Hasselblad".into()),
            iso: Some(100),
            ..Default::default()
        };
        stored.merge_from(fresh);

        assert_eq!(stored.camera_make.as_deref(), Some("Hasselblad"));
        assert_eq!(stored.gps_altitude, Some(120.5));
        assert_eq!(stored.iso, Some(100));
    }

    #[test]
    fn test_scan_stats_total() {
        let stats = ScanStats {
            registered: 3,
            refreshed: 2,
            skipped: 1,
            ..Default::default()
        };
        assert_eq!(stats.total(), 6);
    }
}
