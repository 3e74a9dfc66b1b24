//! Image types (e.g. RGB, thermal, multispectral).

use super::{bump, clean_name, get, get_mut, take, Catalog};
use super::{Id, ImageType};
use crate::error::{CatalogError, CatalogResult};

impl Catalog {
    pub fn image_types(&self) -> &[ImageType] {
        &self.image_types
    }

    pub fn image_type(&self, id: Id) -> CatalogResult<&ImageType> {
        get(&self.image_types, id)
    }

    pub fn add_image_type(&mut self, name: &str) -> CatalogResult<ImageType> {
        let name = clean_name("Image type", name)?;
        self.ensure_unique_image_type(&name, None)?;

        let image_type = ImageType {
            id: bump(&mut self.sequences.image_type),
            name,
        };
        self.image_types.push(image_type.clone());
        Ok(image_type)
    }

    pub fn rename_image_type(&mut self, id: Id, name: &str) -> CatalogResult<ImageType> {
        let name = clean_name("Image type", name)?;
        self.ensure_unique_image_type(&name, Some(id))?;
        let image_type = get_mut(&mut self.image_types, id)?;
        image_type.name = name;
        Ok(image_type.clone())
    }

    /// Delete an image type and unlink it from images, questions, labels and
    /// expert types. Images keep their record but become untyped.
    pub fn delete_image_type(&mut self, id: Id) -> CatalogResult<ImageType> {
        let removed = take(&mut self.image_types, id)?;

        for image in &mut self.images {
            if image.image_type_id == Some(id) {
                image.image_type_id = None;
            }
        }
        for scope in self
            .questions
            .iter_mut()
            .map(|q| &mut q.image_type_ids)
            .chain(self.labels.iter_mut().map(|l| &mut l.image_type_ids))
            .chain(self.expert_types.iter_mut().map(|e| &mut e.image_type_ids))
        {
            scope.retain(|&t| t != id);
        }

        tracing::debug!("Deleted image type {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    fn ensure_unique_image_type(&self, name: &str, except: Option<Id>) -> CatalogResult<()> {
        if self
            .image_types
            .iter()
            .any(|t| t.name == name && Some(t.id) != except)
        {
            return Err(CatalogError::Duplicate {
                entity: "Image type",
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
