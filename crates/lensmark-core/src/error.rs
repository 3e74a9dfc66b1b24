//! Error types for Lensmark.
//!
//! Errors are organized by concern so that messages carry the context a user
//! needs to act on them (file paths, entity names, ids). Metadata extraction
//! has no error type: it degrades to missing fields instead of failing.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Lensmark operations.
#[derive(Error, Debug)]
pub enum LensmarkError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image registration errors
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Catalog lookups, validation and persistence
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while validating or copying an image before it is registered.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// The file does not start with a known image signature
    #[error("Not an image: {path}: {message}")]
    NotAnImage { path: PathBuf, message: String },

    /// The target name is already taken in the image directory
    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),

    /// The source path has no usable file name
    #[error("Invalid file name: {0}")]
    InvalidFileName(PathBuf),

    /// Reading, copying or deleting the file failed
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Catalog errors: missing entities, rule violations and store failures.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    /// No user with the given name
    #[error("User not found: {0}")]
    UnknownUser(String),

    /// A unique name is already taken
    #[error("{entity} already exists: {name}")]
    Duplicate { entity: &'static str, name: String },

    /// The acting user lacks the required role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Input violates a catalog rule
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing the catalog file failed
    #[error("Catalog store error for {path}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON
    #[error("Catalog file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    pub(crate) fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }
}

/// Convenience type alias for Lensmark results.
pub type Result<T> = std::result::Result<T, LensmarkError>;

/// Convenience type alias for catalog-specific results.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_id() {
        let err = CatalogError::not_found("Image type", 7);
        assert_eq!(err.to_string(), "Image type not found: 7");
    }

    #[test]
    fn test_catalog_error_wraps_into_top_level() {
        let err: LensmarkError = CatalogError::Forbidden("admin role required".into()).into();
        assert!(err.to_string().starts_with("Catalog error: Forbidden"));
    }
}
