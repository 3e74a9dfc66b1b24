//! EXIF metadata extraction from images.
//!
//! Extraction is best-effort: a file without metadata, a corrupt file or an
//! unsupported container all yield an empty (or partial) result rather than
//! an error, so image registration never depends on metadata being readable.

use exif::{Exif, Field, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::types::ExtractedMetadata;

use super::drone::{self, DroneTelemetry};
use super::makernote;
use super::rational::{
    apex_aperture, apex_shutter_speed, apply_hemisphere, ascii_text, dms_to_degrees,
    exposure_fraction, first_f64, first_u32,
};

/// Extracts normalized metadata from image files.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    xmp_scan_bytes: u64,
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl MetadataExtractor {
    /// Create an extractor honoring the given limits.
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            xmp_scan_bytes: limits.xmp_scan_bytes(),
        }
    }

    /// Extract metadata from an image file.
    ///
    /// Never fails. Returns an empty mapping when the file has neither a
    /// readable EXIF block nor drone XMP, and a partial one when only some
    /// entries could be decoded.
    pub fn extract(&self, path: &Path) -> ExtractedMetadata {
        let exif = match Self::read_exif(path) {
            Ok(exif) => Some(exif),
            Err(e) => {
                tracing::debug!("No EXIF data for {:?}: {}", path, e);
                None
            }
        };

        // Container dimensions only count alongside EXIF; a bare image stays empty.
        let mut data = match &exif {
            Some(exif) => {
                let mut data = Self::from_fields(exif.fields());
                Self::fill_dimensions(path, &mut data);
                data
            }
            None => ExtractedMetadata::default(),
        };

        self.apply_drone_xmp(path, &mut data);
        if let Some(exif) = &exif {
            Self::apply_maker_note(exif, &mut data);
        }

        tracing::debug!("Extracted {} metadata field(s) from {:?}", data.len(), path);
        data
    }

    fn apply_drone_xmp(&self, path: &Path, data: &mut ExtractedMetadata) {
        let Some(telemetry) = drone::read_xmp_packet(path, self.xmp_scan_bytes)
            .and_then(|xmp| DroneTelemetry::parse(&xmp))
        else {
            return;
        };
        tracing::trace!("Drone telemetry ({}) in {:?}", telemetry.vendor, path);
        telemetry.apply_to(data);
    }

    /// Read the raw tag directory, keeping whatever parsed before an error.
    fn read_exif(path: &Path) -> Result<Exif, exif::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut exif_reader = Reader::new();
        exif_reader.continue_on_error(true);

        match exif_reader.read_from_container(&mut reader) {
            Ok(exif) => Ok(exif),
            Err(exif::Error::PartialResult(partial)) => {
                let (exif, errors) = partial.into_inner();
                tracing::debug!(
                    "Partial EXIF for {:?}: {} entr(y/ies) skipped",
                    path,
                    errors.len()
                );
                Ok(exif)
            }
            Err(e) => Err(e),
        }
    }

    /// Map raw EXIF fields onto normalized metadata.
    ///
    /// Only primary-image fields are considered (the thumbnail IFD describes
    /// the embedded preview). Tags without a mapping rule are skipped.
    pub fn from_fields<'a, I>(fields: I) -> ExtractedMetadata
    where
        I: IntoIterator<Item = &'a Field>,
    {
        let mut data = ExtractedMetadata::default();
        let mut raw = RawFields::default();

        for field in fields {
            if field.ifd_num != In::PRIMARY {
                continue;
            }
            let value = &field.value;
            match field.tag {
                Tag::DateTimeOriginal => raw.datetime_original = ascii_text(value),
                Tag::DateTime => raw.datetime = ascii_text(value),
                Tag::Make => data.camera_make = ascii_text(value),
                Tag::Model => data.camera_model = ascii_text(value),
                Tag::LensModel => data.lens_model = ascii_text(value),
                Tag::FocalLength => data.focal_length = first_f64(value),
                Tag::FNumber => raw.f_number = first_f64(value),
                Tag::ApertureValue => raw.aperture_apex = first_f64(value),
                Tag::PhotographicSensitivity => data.iso = first_u32(value),
                Tag::ExposureTime => raw.exposure_time = exposure_text(value),
                Tag::ShutterSpeedValue => raw.shutter_apex = first_f64(value),
                Tag::Orientation => data.orientation = first_u32(value).map(|o| o.to_string()),
                Tag::ImageWidth => data.image_width = first_u32(value),
                Tag::ImageLength => data.image_height = first_u32(value),
                Tag::PixelXDimension => raw.pixel_x = first_u32(value),
                Tag::PixelYDimension => raw.pixel_y = first_u32(value),
                Tag::GPSLatitude => raw.latitude = dms_to_degrees(value),
                Tag::GPSLatitudeRef => raw.latitude_ref = ascii_text(value),
                Tag::GPSLongitude => raw.longitude = dms_to_degrees(value),
                Tag::GPSLongitudeRef => raw.longitude_ref = ascii_text(value),
                Tag::GPSAltitude => raw.altitude = first_f64(value),
                Tag::GPSAltitudeRef => raw.altitude_ref = first_u32(value),
                _ => tracing::trace!("Skipping unmapped tag {}", field.tag),
            }
        }

        raw.resolve_into(&mut data);
        data
    }

    /// Fall back to the container's pixel dimensions for missing width/height.
    fn fill_dimensions(path: &Path, data: &mut ExtractedMetadata) {
        if data.image_width.is_some() && data.image_height.is_some() {
            return;
        }
        match image::image_dimensions(path) {
            Ok((width, height)) => {
                data.image_width = data.image_width.or(Some(width));
                data.image_height = data.image_height.or(Some(height));
            }
            Err(e) => tracing::debug!("Cannot read dimensions of {:?}: {}", path, e),
        }
    }

    /// Fill gimbal angles from a DJI maker note when XMP didn't provide them.
    fn apply_maker_note(exif: &Exif, data: &mut ExtractedMetadata) {
        if !data.camera_make.as_deref().is_some_and(makernote::is_dji) {
            return;
        }
        let Some(field) = exif.get_field(Tag::MakerNote, In::PRIMARY) else {
            return;
        };
        let Value::Undefined(bytes, _) = &field.value else {
            return;
        };
        if let Some(angles) = makernote::parse_dji(bytes, exif.little_endian()) {
            data.gimbal_pitch = data.gimbal_pitch.or(angles.pitch);
            data.gimbal_roll = data.gimbal_roll.or(angles.roll);
            data.gimbal_yaw = data.gimbal_yaw.or(angles.yaw);
            if data.drone_model.is_none() {
                data.drone_model = data.camera_model.clone();
            }
        }
    }
}

/// Tag values that need combining before they become normalized fields.
#[derive(Default)]
struct RawFields {
    datetime_original: Option<String>,
    datetime: Option<String>,
    f_number: Option<f64>,
    aperture_apex: Option<f64>,
    exposure_time: Option<String>,
    shutter_apex: Option<f64>,
    pixel_x: Option<u32>,
    pixel_y: Option<u32>,
    latitude: Option<f64>,
    latitude_ref: Option<String>,
    longitude: Option<f64>,
    longitude_ref: Option<String>,
    altitude: Option<f64>,
    altitude_ref: Option<u32>,
}

impl RawFields {
    fn resolve_into(self, data: &mut ExtractedMetadata) {
        data.datetime = self.datetime_original.or(self.datetime);
        data.aperture = self
            .f_number
            .or_else(|| self.aperture_apex.and_then(apex_aperture));
        data.shutter_speed = self
            .exposure_time
            .or_else(|| self.shutter_apex.and_then(apex_shutter_speed));
        data.image_width = data.image_width.or(self.pixel_x);
        data.image_height = data.image_height.or(self.pixel_y);

        // A coordinate without its hemisphere is ambiguous.
        if let (Some(lat), Some(r)) = (self.latitude, self.latitude_ref.as_deref()) {
            data.gps_latitude = Some(apply_hemisphere(lat, r));
        }
        if let (Some(lon), Some(r)) = (self.longitude, self.longitude_ref.as_deref()) {
            data.gps_longitude = Some(apply_hemisphere(lon, r));
        }
        // Altitude reference 1 means below sea level.
        data.gps_altitude = self.altitude.map(|alt| match self.altitude_ref {
            Some(1) => -alt,
            _ => alt,
        });
    }
}

fn exposure_text(value: &Value) -> Option<String> {
    match value {
        Value::Rational(v) => v.first().and_then(exposure_fraction),
        _ => first_f64(value).map(|v| v.to_string()),
    }
}
