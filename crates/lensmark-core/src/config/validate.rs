//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

const OUTPUT_FORMATS: &[&str] = &["json", "jsonl"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];
/// 1 TB.
const MAX_FILE_SIZE_MB: u64 = 1024 * 1024;
/// 1 GB.
const MAX_XMP_SCAN_KB: u64 = 1024 * 1024;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.general.image_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "general.image_dir must not be empty".into(),
            ));
        }
        if self.general.catalog_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "general.catalog_path must not be empty".into(),
            ));
        }
        if self.processing.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats must list at least one extension".into(),
            ));
        }
        if !(1..=MAX_FILE_SIZE_MB).contains(&self.limits.max_file_size_mb) {
            return Err(ConfigError::ValidationError(format!(
                "limits.max_file_size_mb must be between 1 and {}",
                MAX_FILE_SIZE_MB
            )));
        }
        if !(1..=MAX_XMP_SCAN_KB).contains(&self.limits.xmp_scan_kb) {
            return Err(ConfigError::ValidationError(format!(
                "limits.xmp_scan_kb must be between 1 and {}",
                MAX_XMP_SCAN_KB
            )));
        }
        if !OUTPUT_FORMATS.contains(&self.output.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "output.format must be one of {:?}",
                OUTPUT_FORMATS
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of {:?}",
                LOG_FORMATS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_file_size() {
        let mut config = Config::default();
        config.limits.max_file_size_mb = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_file_size_mb"));
    }

    #[test]
    fn test_validate_rejects_zero_xmp_window() {
        let mut config = Config::default();
        config.limits.xmp_scan_kb = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("xmp_scan_kb"));
    }

    #[test]
    fn test_validate_rejects_oversized_limits() {
        let mut config = Config::default();
        config.limits.max_file_size_mb = u64::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_file_size_mb"));

        let mut config = Config::default();
        config.limits.xmp_scan_kb = MAX_XMP_SCAN_KB + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("xmp_scan_kb"));

        config.limits.xmp_scan_kb = MAX_XMP_SCAN_KB;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_image_dir() {
        let mut config = Config::default();
        config.general.image_dir = PathBuf::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("image_dir"));
    }

    #[test]
    fn test_validate_rejects_unknown_output_format() {
        let mut config = Config::default();
        config.output.format = "yaml".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output.format"));

        config.output.format = "JSONL".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_no_supported_formats() {
        let mut config = Config::default();
        config.processing.supported_formats.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("supported_formats"));
    }
}
