//! Lensmark Core - image metadata extraction and survey catalog.
//!
//! Lensmark registers image files (typically drone survey imagery), extracts
//! normalized EXIF metadata from them, and keeps a catalog in which experts
//! answer questions about images and annotate regions with labels.
//!
//! # Architecture
//!
//! ```text
//! File → Validate → Extract Metadata → Register (upsert by filename) → Catalog (JSON)
//! ```
//!
//! Extraction is infallible: missing or corrupt metadata yields empty fields,
//! never an error.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lensmark_core::{Catalog, Config, Registrar};
//!
//! fn main() -> lensmark_core::Result<()> {
//!     let config = Config::load()?;
//!     let mut catalog = Catalog::open(&config.catalog_path())?;
//!     let registrar = Registrar::new(&config);
//!
//!     let stats = registrar.scan(&mut catalog, |_| {})?;
//!     catalog.save()?;
//!     println!("{} new image(s)", stats.registered);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use catalog::{Catalog, Role};
pub use config::Config;
pub use error::{
    CatalogError, CatalogResult, ConfigError, LensmarkError, RegistrationError, Result,
};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{MetadataExtractor, Registrar, RegistrationOutcome};
pub use types::{ExtractedMetadata, FileMetadata, ScanStats};

use std::path::Path;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract metadata from one file with default limits.
///
/// Never fails: unreadable files and files without EXIF give an empty result.
pub fn extract(path: impl AsRef<Path>) -> ExtractedMetadata {
    MetadataExtractor::default().extract(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_extract_missing_file_is_empty() {
        assert!(extract("/nonexistent/DJI_0001.JPG").is_empty());
    }
}
