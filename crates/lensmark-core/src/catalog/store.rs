//! Loading and saving the catalog document.

use std::path::{Path, PathBuf};

use super::Catalog;
use crate::error::{CatalogError, CatalogResult};

impl Catalog {
    /// Open the catalog stored at `path`.
    ///
    /// A missing file yields an empty catalog bound to `path`; the file is
    /// created on the first [`save`](Self::save).
    pub fn open(path: &Path) -> CatalogResult<Self> {
        let mut catalog = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Store {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str::<Catalog>(&content).map_err(|source| CatalogError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            tracing::debug!("No catalog at {:?}, starting empty", path);
            Catalog::default()
        };

        catalog.path = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// File the catalog is bound to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the catalog back to its file.
    ///
    /// The document is written to a sibling temp file and renamed into place,
    /// so a crash never leaves a half-written catalog. In-memory catalogs
    /// have nothing to save.
    pub fn save(&self) -> CatalogResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let store_err = |source| CatalogError::Store {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(store_err)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| store_err(std::io::Error::other(e)))?;

        let tmp = temp_path(path);
        std::fs::write(&tmp, json).map_err(store_err)?;
        std::fs::rename(&tmp, path).map_err(store_err)?;

        tracing::debug!("Saved catalog to {:?}", path);
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Role;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let catalog = Catalog::open(&path).unwrap();
        assert!(catalog.users().is_empty());
        assert_eq!(catalog.path(), Some(path.as_path()));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");

        let mut catalog = Catalog::open(&path).unwrap();
        catalog.add_user("ada", Role::Admin).unwrap();
        catalog.add_image_type("rgb").unwrap();
        catalog.save().unwrap();

        let reopened = Catalog::open(&path).unwrap();
        assert_eq!(reopened.users().len(), 1);
        assert_eq!(reopened.image_types()[0].name, "rgb");

        // Sequences survive the round trip, so ids keep counting up.
        let mut reopened = reopened;
        let second = reopened.add_image_type("thermal").unwrap();
        assert_eq!(second.id, 2);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Catalog::open(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt { .. }));
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let catalog = Catalog::in_memory();
        assert!(catalog.path().is_none());
        catalog.save().unwrap();
    }
}
