//! Image records.

use chrono::Utc;
use std::path::PathBuf;

use super::{bump, get, get_mut, take, Catalog};
use super::{Id, Image};
use crate::error::{CatalogError, CatalogResult};
use crate::types::ExtractedMetadata;

impl Catalog {
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn image(&self, id: Id) -> CatalogResult<&Image> {
        get(&self.images, id)
    }

    pub fn image_by_filename(&self, filename: &str) -> Option<&Image> {
        self.images.iter().find(|i| i.filename == filename)
    }

    /// Insert or refresh the record for `filename`.
    ///
    /// An existing record keeps its id and upload time; extracted fields
    /// overwrite the stored ones, the path is refreshed and the image type is
    /// only changed when one is given. Returns the record and whether it was
    /// newly created.
    pub fn upsert_image(
        &mut self,
        filename: &str,
        path: PathBuf,
        metadata: ExtractedMetadata,
        image_type_id: Option<Id>,
    ) -> CatalogResult<(Image, bool)> {
        if filename.is_empty() {
            return Err(CatalogError::InvalidInput(
                "image filename must not be empty".into(),
            ));
        }
        if let Some(type_id) = image_type_id {
            get(&self.image_types, type_id)?;
        }

        if let Some(image) = self.images.iter_mut().find(|i| i.filename == filename) {
            image.metadata.merge_from(metadata);
            image.path = path;
            if image_type_id.is_some() {
                image.image_type_id = image_type_id;
            }
            return Ok((image.clone(), false));
        }

        let image = Image {
            id: bump(&mut self.sequences.image),
            filename: filename.to_string(),
            path,
            uploaded_at: Utc::now(),
            image_type_id,
            metadata,
        };
        self.images.push(image.clone());
        Ok((image, true))
    }

    /// Set or clear an image's type.
    pub fn set_image_type(
        &mut self,
        image_id: Id,
        image_type_id: Option<Id>,
    ) -> CatalogResult<Image> {
        if let Some(type_id) = image_type_id {
            get(&self.image_types, type_id)?;
        }
        let image = get_mut(&mut self.images, image_id)?;
        image.image_type_id = image_type_id;
        Ok(image.clone())
    }

    /// Remove an image record together with its answers and annotations.
    ///
    /// The file on disk is left alone; the registrar owns that.
    pub fn remove_image(&mut self, image_id: Id) -> CatalogResult<Image> {
        let removed = take(&mut self.images, image_id)?;
        self.answers.retain(|a| a.image_id != image_id);
        self.annotations.retain(|a| a.image_id != image_id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Role, Shape};

    fn meta(make: &str) -> ExtractedMetadata {
        ExtractedMetadata {
            camera_make: Some(make.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_upsert_creates_then_refreshes() {
        let mut catalog = Catalog::in_memory();
        let thermal = catalog.add_image_type("thermal").unwrap();

        let (first, created) = catalog
            .upsert_image(
                "DJI_0001.jpg",
                PathBuf::from("/old/DJI_0001.jpg"),
                meta("DJI"),
                Some(thermal.id),
            )
            .unwrap();
        assert!(created);
        assert_eq!(first.id, 1);

        let fresh = ExtractedMetadata {
            iso: Some(100),
            ..Default::default()
        };
        let (second, created) = catalog
            .upsert_image("DJI_0001.jpg", PathBuf::from("/new/DJI_0001.jpg"), fresh, None)
            .unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.uploaded_at, first.uploaded_at);
        assert_eq!(second.path, PathBuf::from("/new/DJI_0001.jpg"));
        assert_eq!(second.image_type_id, Some(thermal.id));
        assert_eq!(second.metadata.camera_make.as_deref(), Some("DJI"));
        assert_eq!(second.metadata.iso, Some(100));
        assert_eq!(catalog.images().len(), 1);
    }

    #[test]
    fn test_upsert_rejects_unknown_type() {
        let mut catalog = Catalog::in_memory();
        let err = catalog
            .upsert_image("a.jpg", PathBuf::from("a.jpg"), meta("Canon"), Some(7))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Image type", id: 7 }));
        assert!(catalog.images().is_empty());
    }

    #[test]
    fn test_set_image_type() {
        let mut catalog = Catalog::in_memory();
        let rgb = catalog.add_image_type("rgb").unwrap();
        let (image, _) = catalog
            .upsert_image("a.jpg", PathBuf::from("a.jpg"), meta("Canon"), None)
            .unwrap();

        let image = catalog.set_image_type(image.id, Some(rgb.id)).unwrap();
        assert_eq!(image.image_type_id, Some(rgb.id));
        assert!(catalog.set_image_type(image.id, Some(99)).is_err());
        assert_eq!(catalog.set_image_type(image.id, None).unwrap().image_type_id, None);
    }

    #[test]
    fn test_remove_image_cascades() {
        let mut catalog = Catalog::in_memory();
        let user = catalog.add_user("grace", Role::Expert).unwrap();
        let (image, _) = catalog
            .upsert_image("a.jpg", PathBuf::from("a.jpg"), meta("Canon"), None)
            .unwrap();
        let (other, _) = catalog
            .upsert_image("b.jpg", PathBuf::from("b.jpg"), meta("Canon"), None)
            .unwrap();
        let question = catalog.add_question("Cloudy?", &[]).unwrap();
        let yes = catalog.add_option(question.id, "yes").unwrap();
        let label = catalog.add_label("tree", &[]).unwrap();
        let shape = Shape::BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };

        catalog.answer(user.id, image.id, question.id, yes.id).unwrap();
        catalog.answer(user.id, other.id, question.id, yes.id).unwrap();
        catalog.annotate(user.id, image.id, label.id, shape).unwrap();

        catalog.remove_image(image.id).unwrap();
        assert!(catalog.image(image.id).is_err());
        assert_eq!(catalog.answers().len(), 1);
        assert!(catalog.annotations().is_empty());

        // Ids are not reused.
        let (next, _) = catalog
            .upsert_image("c.jpg", PathBuf::from("c.jpg"), meta("Canon"), None)
            .unwrap();
        assert_eq!(next.id, 3);
    }
}
