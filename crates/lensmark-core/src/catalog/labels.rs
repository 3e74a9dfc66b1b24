//! Annotation labels.

use super::{bump, clean_name, dedup_ids, ensure_all, get, get_mut, take, Catalog};
use super::{Id, Label};
use crate::error::{CatalogError, CatalogResult};

impl Catalog {
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn label(&self, id: Id) -> CatalogResult<&Label> {
        get(&self.labels, id)
    }

    pub fn add_label(&mut self, name: &str, image_type_ids: &[Id]) -> CatalogResult<Label> {
        let name = clean_name("Label", name)?;
        self.ensure_unique_label(&name, None)?;
        ensure_all(&self.image_types, image_type_ids)?;

        let label = Label {
            id: bump(&mut self.sequences.label),
            name,
            image_type_ids: dedup_ids(image_type_ids),
        };
        self.labels.push(label.clone());
        Ok(label)
    }

    pub fn rename_label(&mut self, id: Id, name: &str) -> CatalogResult<Label> {
        let name = clean_name("Label", name)?;
        self.ensure_unique_label(&name, Some(id))?;
        let label = get_mut(&mut self.labels, id)?;
        label.name = name;
        Ok(label.clone())
    }

    /// Replace the image types a label applies to.
    pub fn set_label_scope(&mut self, id: Id, image_type_ids: &[Id]) -> CatalogResult<Label> {
        ensure_all(&self.image_types, image_type_ids)?;
        let label = get_mut(&mut self.labels, id)?;
        label.image_type_ids = dedup_ids(image_type_ids);
        Ok(label.clone())
    }

    /// Delete a label and every annotation using it.
    pub fn delete_label(&mut self, id: Id) -> CatalogResult<Label> {
        let removed = take(&mut self.labels, id)?;
        self.annotations.retain(|a| a.label_id != id);
        Ok(removed)
    }

    fn ensure_unique_label(&self, name: &str, except: Option<Id>) -> CatalogResult<()> {
        if self
            .labels
            .iter()
            .any(|l| l.name == name && Some(l.id) != except)
        {
            return Err(CatalogError::Duplicate {
                entity: "Label",
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
