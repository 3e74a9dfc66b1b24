//! Region annotations drawn on images.

use chrono::Utc;

use super::{bump, get, get_mut, in_scope, take, Catalog};
use super::{Annotation, AnnotationUpdate, Id, Shape};
use crate::error::{CatalogError, CatalogResult};

impl Catalog {
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotation(&self, id: Id) -> CatalogResult<&Annotation> {
        get(&self.annotations, id)
    }

    /// Draw a labelled shape on an image.
    pub fn annotate(
        &mut self,
        user_id: Id,
        image_id: Id,
        label_id: Id,
        shape: Shape,
    ) -> CatalogResult<Annotation> {
        get(&self.users, user_id)?;
        self.check_label_for_image(label_id, image_id)?;
        shape.validate()?;

        let annotation = Annotation {
            id: bump(&mut self.sequences.annotation),
            image_id,
            label_id,
            user_id,
            shape,
            annotated_at: Utc::now(),
        };
        self.annotations.push(annotation.clone());
        Ok(annotation)
    }

    /// Apply a partial update. Everything is validated before anything changes.
    pub fn update_annotation(
        &mut self,
        id: Id,
        update: AnnotationUpdate,
    ) -> CatalogResult<Annotation> {
        let current = get(&self.annotations, id)?;
        let image_id = update.image_id.unwrap_or(current.image_id);
        let label_id = update.label_id.unwrap_or(current.label_id);

        self.check_label_for_image(label_id, image_id)?;
        if let Some(shape) = &update.shape {
            shape.validate()?;
        }

        let annotation = get_mut(&mut self.annotations, id)?;
        annotation.image_id = image_id;
        annotation.label_id = label_id;
        if let Some(shape) = update.shape {
            annotation.shape = shape;
        }
        annotation.annotated_at = Utc::now();
        Ok(annotation.clone())
    }

    pub fn delete_annotation(&mut self, id: Id) -> CatalogResult<Annotation> {
        take(&mut self.annotations, id)
    }

    /// Annotations on an image, optionally limited to one user.
    pub fn annotations_for(
        &self,
        image_id: Id,
        user_id: Option<Id>,
    ) -> CatalogResult<Vec<&Annotation>> {
        get(&self.images, image_id)?;
        Ok(self
            .annotations
            .iter()
            .filter(|a| a.image_id == image_id && user_id.map_or(true, |u| a.user_id == u))
            .collect())
    }

    fn check_label_for_image(&self, label_id: Id, image_id: Id) -> CatalogResult<()> {
        let image = get(&self.images, image_id)?;
        let label = get(&self.labels, label_id)?;
        if !in_scope(&label.image_type_ids, image.image_type_id) {
            return Err(CatalogError::InvalidInput(format!(
                "label {} does not apply to image {}",
                label.name, image.filename
            )));
        }
        Ok(())
    }
}
