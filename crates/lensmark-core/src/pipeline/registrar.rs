//! Registration of image files into the catalog.
//!
//! The registrar owns the image directory: it copies uploads into it, scans
//! it for files the catalog does not know yet, and deletes files together
//! with their records.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::catalog::{Catalog, Id, Image};
use crate::config::Config;
use crate::error::{LensmarkError, RegistrationError, Result};
use crate::types::ScanStats;

use super::discovery::FileDiscovery;
use super::metadata::MetadataExtractor;
use super::validate::Validator;

/// Whether a registration created a record or refreshed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created,
    Refreshed,
}

/// A registered image and how it got there.
#[derive(Debug, Clone)]
pub struct Registered {
    pub image: Image,
    pub outcome: RegistrationOutcome,
}

/// Registers image files, extracting their metadata on the way in.
pub struct Registrar {
    image_dir: PathBuf,
    discovery: FileDiscovery,
    validator: Validator,
    extractor: MetadataExtractor,
}

impl Registrar {
    pub fn new(config: &Config) -> Self {
        Self {
            image_dir: config.image_dir(),
            discovery: FileDiscovery::new(config.processing.clone()),
            validator: Validator::new(config.limits.clone()),
            extractor: MetadataExtractor::new(&config.limits),
        }
    }

    /// Directory registered files live in.
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Validate `path`, extract its metadata and upsert the record keyed by
    /// its file name.
    pub fn register(
        &self,
        catalog: &mut Catalog,
        path: &Path,
        image_type_id: Option<Id>,
    ) -> Result<Registered> {
        let filename = file_name(path)?;
        self.validator.validate(path)?;

        let metadata = self.extractor.extract(path);
        let (image, created) =
            catalog.upsert_image(&filename, path.to_path_buf(), metadata, image_type_id)?;

        let outcome = if created {
            tracing::info!("Registered {} as image {}", filename, image.id);
            RegistrationOutcome::Created
        } else {
            tracing::debug!("Refreshed image {} ({})", image.id, filename);
            RegistrationOutcome::Refreshed
        };

        Ok(Registered { image, outcome })
    }

    /// Register every supported file directly inside the image directory.
    ///
    /// Files that fail validation are skipped with a warning. `on_file` is
    /// called once per file looked at, for progress reporting.
    pub fn scan<F>(&self, catalog: &mut Catalog, mut on_file: F) -> Result<ScanStats>
    where
        F: FnMut(&Path),
    {
        let start = Instant::now();
        let mut stats = ScanStats::default();

        std::fs::create_dir_all(&self.image_dir).map_err(|source| RegistrationError::Io {
            path: self.image_dir.clone(),
            source,
        })?;

        let files = self.discovery.discover(&self.image_dir, false);
        tracing::debug!("Found {} file(s) in {:?}", files.len(), self.image_dir);

        for file in &files {
            match self.register(catalog, &file.path, None) {
                Ok(registered) => {
                    match registered.outcome {
                        RegistrationOutcome::Created => stats.registered += 1,
                        RegistrationOutcome::Refreshed => stats.refreshed += 1,
                    }
                    if !registered.image.metadata.is_empty() {
                        stats.with_metadata += 1;
                    }
                }
                Err(LensmarkError::Registration(e)) => {
                    tracing::warn!("Skipping {:?}: {}", file.path, e);
                    stats.skipped += 1;
                }
                Err(e) => return Err(e),
            }
            on_file(&file.path);
        }

        stats.total_seconds = start.elapsed().as_secs_f64();
        Ok(stats)
    }

    /// Copy `source` into the image directory and register it.
    ///
    /// Rejected when a file of the same name is already there or when the
    /// image type is unknown; nothing is copied in either case.
    pub fn import(
        &self,
        catalog: &mut Catalog,
        source: &Path,
        image_type_id: Option<Id>,
    ) -> Result<Registered> {
        let filename = file_name(source)?;
        let target = self.image_dir.join(&filename);
        if target.exists() {
            return Err(RegistrationError::AlreadyExists(target).into());
        }
        if let Some(type_id) = image_type_id {
            catalog.image_type(type_id)?;
        }
        self.validator.validate(source)?;

        let io_err = |source| RegistrationError::Io {
            path: target.clone(),
            source,
        };
        std::fs::create_dir_all(&self.image_dir).map_err(io_err)?;
        std::fs::copy(source, &target).map_err(io_err)?;
        tracing::debug!("Copied {:?} to {:?}", source, target);

        self.register(catalog, &target, image_type_id)
    }

    /// Delete an image's file (when still present) and its record.
    pub fn remove(&self, catalog: &mut Catalog, image_id: Id) -> Result<Image> {
        let path = catalog.image(image_id)?.path.clone();
        if path.is_file() {
            std::fs::remove_file(&path).map_err(|source| RegistrationError::Io {
                path: path.clone(),
                source,
            })?;
        }

        let image = catalog.remove_image(image_id)?;
        tracing::info!("Removed image {} ({})", image.id, image.filename);
        Ok(image)
    }
}

fn file_name(path: &Path) -> std::result::Result<String, RegistrationError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| RegistrationError::InvalidFileName(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    fn setup() -> (tempfile::TempDir, Config, Registrar) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.general.image_dir = dir.path().join("image_data");
        config.general.catalog_path = dir.path().join("catalog.json");
        let registrar = Registrar::new(&config);
        (dir, config, registrar)
    }

    fn write_png(path: &Path) {
        image::RgbImage::new(4, 3).save(path).unwrap();
    }

    #[test]
    fn test_register_then_refresh() {
        let (dir, _config, registrar) = setup();
        let mut catalog = Catalog::in_memory();
        let path = dir.path().join("plain.png");
        write_png(&path);

        let first = registrar.register(&mut catalog, &path, None).unwrap();
        assert_eq!(first.outcome, RegistrationOutcome::Created);
        assert_eq!(first.image.filename, "plain.png");
        assert!(first.image.metadata.is_empty());

        let second = registrar.register(&mut catalog, &path, None).unwrap();
        assert_eq!(second.outcome, RegistrationOutcome::Refreshed);
        assert_eq!(second.image.id, first.image.id);
    }

    #[test]
    fn test_scan_counts_and_skips() {
        let (_dir, _config, registrar) = setup();
        let mut catalog = Catalog::in_memory();
        std::fs::create_dir_all(registrar.image_dir()).unwrap();
        write_png(&registrar.image_dir().join("a.png"));
        write_png(&registrar.image_dir().join("b.png"));
        std::fs::write(registrar.image_dir().join("broken.jpg"), b"not an image").unwrap();
        std::fs::write(registrar.image_dir().join("readme.txt"), b"ignored").unwrap();

        let mut seen = 0;
        let stats = registrar.scan(&mut catalog, |_| seen += 1).unwrap();
        assert_eq!(seen, 3);
        assert_eq!(stats.registered, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.with_metadata, 0);
        assert_eq!(catalog.images().len(), 2);

        let again = registrar.scan(&mut catalog, |_| {}).unwrap();
        assert_eq!(again.refreshed, 2);
        assert_eq!(again.registered, 0);
    }

    #[test]
    fn test_scan_creates_missing_directory() {
        let (_dir, _config, registrar) = setup();
        let mut catalog = Catalog::in_memory();
        let stats = registrar.scan(&mut catalog, |_| {}).unwrap();
        assert_eq!(stats.total(), 0);
        assert!(registrar.image_dir().is_dir());
    }

    #[test]
    fn test_import_copies_and_rejects_duplicates() {
        let (dir, _config, registrar) = setup();
        let mut catalog = Catalog::in_memory();
        let rgb = catalog.add_image_type("rgb").unwrap();
        let source = dir.path().join("upload.png");
        write_png(&source);

        let registered = registrar.import(&mut catalog, &source, Some(rgb.id)).unwrap();
        assert_eq!(registered.image.image_type_id, Some(rgb.id));
        assert_eq!(registered.image.path, registrar.image_dir().join("upload.png"));
        assert!(registered.image.path.is_file());

        let err = registrar.import(&mut catalog, &source, None).unwrap_err();
        assert!(matches!(
            err,
            LensmarkError::Registration(RegistrationError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_import_rejects_unknown_type_without_copying() {
        let (dir, _config, registrar) = setup();
        let mut catalog = Catalog::in_memory();
        let source = dir.path().join("upload.png");
        write_png(&source);

        let err = registrar.import(&mut catalog, &source, Some(9)).unwrap_err();
        assert!(matches!(
            err,
            LensmarkError::Catalog(CatalogError::NotFound { entity: "Image type", id: 9 })
        ));
        assert!(!registrar.image_dir().join("upload.png").exists());
    }

    #[test]
    fn test_remove_deletes_file_and_record() {
        let (dir, _config, registrar) = setup();
        let mut catalog = Catalog::in_memory();
        let source = dir.path().join("upload.png");
        write_png(&source);
        let registered = registrar.import(&mut catalog, &source, None).unwrap();

        registrar.remove(&mut catalog, registered.image.id).unwrap();
        assert!(!registered.image.path.exists());
        assert!(catalog.images().is_empty());
        assert!(registrar.remove(&mut catalog, registered.image.id).is_err());
    }
}
