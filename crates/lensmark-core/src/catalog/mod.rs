//! The survey catalog: users, image types, images, questions, labels,
//! answers and annotations.
//!
//! The catalog is a single JSON document loaded fully into memory. Mutating
//! operations validate every referenced id up front and leave the catalog
//! untouched on error; callers persist with [`Catalog::save`].

mod annotations;
mod answers;
mod image_types;
mod images;
mod labels;
pub mod model;
mod questions;
mod store;
mod users;

pub use model::*;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CatalogError, CatalogResult};

/// Next id to hand out, per entity kind. Ids are never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Sequences {
    user: Id,
    expert_type: Id,
    image_type: Id,
    image: Id,
    question: Id,
    option: Id,
    label: Id,
    answer: Id,
    annotation: Id,
}

impl Default for Sequences {
    fn default() -> Self {
        Self {
            user: 1,
            expert_type: 1,
            image_type: 1,
            image: 1,
            question: 1,
            option: 1,
            label: 1,
            answer: 1,
            annotation: 1,
        }
    }
}

fn bump(counter: &mut Id) -> Id {
    let id = *counter;
    *counter += 1;
    id
}

/// In-memory catalog backed by a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    #[serde(skip)]
    path: Option<PathBuf>,

    sequences: Sequences,
    users: Vec<User>,
    expert_types: Vec<ExpertType>,
    image_types: Vec<ImageType>,
    images: Vec<Image>,
    questions: Vec<Question>,
    options: Vec<QuestionOption>,
    labels: Vec<Label>,
    answers: Vec<Answer>,
    annotations: Vec<Annotation>,
}

impl Catalog {
    /// Create an empty catalog that is not bound to a file.
    pub fn in_memory() -> Self {
        Self::default()
    }
}

/// Look up an entity by id.
fn get<T: Entity>(items: &[T], id: Id) -> CatalogResult<&T> {
    items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| CatalogError::not_found(T::NAME, id))
}

/// Look up an entity by id for modification.
fn get_mut<T: Entity>(items: &mut [T], id: Id) -> CatalogResult<&mut T> {
    items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| CatalogError::not_found(T::NAME, id))
}

/// Remove an entity by id, returning it.
fn take<T: Entity>(items: &mut Vec<T>, id: Id) -> CatalogResult<T> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| CatalogError::not_found(T::NAME, id))?;
    Ok(items.remove(index))
}

/// Check that every id refers to an existing entity.
fn ensure_all<T: Entity>(items: &[T], ids: &[Id]) -> CatalogResult<()> {
    ids.iter().try_for_each(|&id| get(items, id).map(|_| ()))
}

/// Trim a display name and reject blanks.
fn clean_name(entity: &'static str, name: &str) -> CatalogResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::InvalidInput(format!(
            "{} name must not be empty",
            entity
        )));
    }
    Ok(name.to_string())
}

/// Sorted, de-duplicated copy of an id list.
fn dedup_ids(ids: &[Id]) -> Vec<Id> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Whether an item scoped to `scope` applies to an image of type `image_type`.
///
/// An empty scope and an untyped image both match everything.
fn in_scope(scope: &[Id], image_type: Option<Id>) -> bool {
    match image_type {
        Some(t) if !scope.is_empty() => scope.contains(&t),
        _ => true,
    }
}
