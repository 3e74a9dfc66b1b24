//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding registered image files
    pub image_dir: PathBuf,

    /// JSON document holding the catalog (users, images, questions, ...)
    pub catalog_path: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("~/.lensmark/image_data"),
            catalog_path: PathBuf::from("~/.lensmark/catalog.json"),
        }
    }
}

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// File extensions picked up by scans and imports
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "tif".to_string(),
                "tiff".to_string(),
                "webp".to_string(),
                "heic".to_string(),
                "dng".to_string(),
            ],
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes accepted for registration
    pub max_file_size_mb: u64,

    /// How far into a file to look for an embedded XMP packet, in kilobytes.
    /// Drone vendors write it into the first APP1 segments, well inside 1 MB.
    pub xmp_scan_kb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            xmp_scan_kb: 1024,
        }
    }
}

impl LimitsConfig {
    /// XMP scan window in bytes.
    pub fn xmp_scan_bytes(&self) -> u64 {
        self.xmp_scan_kb.saturating_mul(1024)
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
