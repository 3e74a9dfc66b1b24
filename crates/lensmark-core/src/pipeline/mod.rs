//! Image intake pipeline components.
//!
//! - **discovery**: Find image files in directories
//! - **validate**: Pre-registration checks (size, magic bytes)
//! - **metadata**: Extract normalized EXIF metadata
//! - **rational**: EXIF value conversions (rationals, DMS, APEX)
//! - **drone**: Vendor drone telemetry from embedded XMP
//! - **makernote**: Gimbal angles from DJI maker notes
//! - **registrar**: Copy, register and remove images in the catalog

pub mod discovery;
pub mod drone;
pub mod makernote;
pub mod metadata;
pub mod rational;
pub mod registrar;
pub mod validate;

// Re-exports for convenient access
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use metadata::MetadataExtractor;
pub use registrar::{Registered, Registrar, RegistrationOutcome};
pub use validate::Validator;
