//! Catalog entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CatalogError, CatalogResult};
use crate::types::ExtractedMetadata;

/// Identifier of a catalog entity. Sequential per entity kind, starting at 1.
pub type Id = u64;

/// Anything stored in the catalog under a numeric id.
pub trait Entity {
    /// Human-readable entity name used in error messages.
    const NAME: &'static str;

    fn id(&self) -> Id;
}

macro_rules! entity {
    ($ty:ty, $name:literal) => {
        impl Entity for $ty {
            const NAME: &'static str = $name;

            fn id(&self) -> Id {
                self.id
            }
        }
    };
}

/// What a user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages images, image types, questions and labels
    Admin,
    /// Answers questions and annotates images
    #[default]
    Expert,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Expert => write!(f, "expert"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub expert_type_ids: Vec<Id>,
}

/// A field of expertise, scoped to the image types it covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertType {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub image_type_ids: Vec<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageType {
    pub id: Id,
    pub name: String,
}

/// A registered image file and the metadata extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: Id,
    /// File name inside the image directory (unique)
    pub filename: String,
    pub path: PathBuf,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_type_id: Option<Id>,
    #[serde(default)]
    pub metadata: ExtractedMetadata,
}

/// A classification question, answered by picking one of its options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Id,
    pub text: String,
    /// Image types the question applies to; empty means every type
    #[serde(default)]
    pub image_type_ids: Vec<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: Id,
    pub question_id: Id,
    pub text: String,
}

/// A region label usable in annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub id: Id,
    pub name: String,
    /// Image types the label applies to; empty means every type
    #[serde(default)]
    pub image_type_ids: Vec<Id>,
}

/// One user's choice for one question on one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: Id,
    pub image_id: Id,
    pub question_id: Id,
    pub option_id: Id,
    pub user_id: Id,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Annotated region, in image pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    BoundingBox {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Polygon {
        points: Vec<Point>,
    },
}

impl Shape {
    /// Reject degenerate or non-finite geometry.
    pub fn validate(&self) -> CatalogResult<()> {
        match self {
            Shape::BoundingBox {
                x,
                y,
                width,
                height,
            } => {
                if ![x, y, width, height].iter().all(|v| v.is_finite()) {
                    return Err(CatalogError::InvalidInput(
                        "bounding box coordinates must be finite".into(),
                    ));
                }
                if *width < 0.0 || *height < 0.0 {
                    return Err(CatalogError::InvalidInput(
                        "bounding box width and height must be >= 0".into(),
                    ));
                }
            }
            Shape::Polygon { points } => {
                if points.len() < 3 {
                    return Err(CatalogError::InvalidInput(
                        "polygon needs at least 3 points".into(),
                    ));
                }
                if !points.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
                    return Err(CatalogError::InvalidInput(
                        "polygon coordinates must be finite".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub id: Id,
    pub image_id: Id,
    pub label_id: Id,
    pub user_id: Id,
    pub shape: Shape,
    pub annotated_at: DateTime<Utc>,
}

/// Partial update of an annotation; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct AnnotationUpdate {
    pub image_id: Option<Id>,
    pub label_id: Option<Id>,
    pub shape: Option<Shape>,
}

entity!(User, "User");
entity!(ExpertType, "Expert type");
entity!(ImageType, "Image type");
entity!(Image, "Image");
entity!(Question, "Question");
entity!(QuestionOption, "Option");
entity!(Label, "Label");
entity!(Answer, "Answer");
entity!(Annotation, "Annotation");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_serde_is_tagged() {
        let shape = Shape::BoundingBox {
            x: 1.0,
            y: 2.0,
            width: 30.0,
            height: 40.0,
        };
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"kind\":\"bounding_box\""));

        let parsed: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, shape);
    }

    #[test]
    fn test_polygon_needs_three_points() {
        let line = Shape::Polygon {
            points: vec![Point { x: 0.0, y: 0.0 }, Point { x: 1.0, y: 1.0 }],
        };
        assert!(line.validate().is_err());

        let triangle = Shape::Polygon {
            points: vec![
                Point { x: 0.0, y: 0.0 },
                Point { x: 4.0, y: 0.0 },
                Point { x: 0.0, y: 3.0 },
            ],
        };
        assert!(triangle.validate().is_ok());
    }

    #[test]
    fn test_bounding_box_rejects_negative_size() {
        let shape = Shape::BoundingBox {
            x: 0.0,
            y: 0.0,
            width: -1.0,
            height: 5.0,
        };
        let err = shape.validate().unwrap_err();
        assert!(err.to_string().contains("width and height"));
    }

    #[test]
    fn test_role_defaults_to_expert() {
        let user: User = serde_json::from_str(r#"{"id":1,"username":"ada"}"#).unwrap();
        assert_eq!(user.role, Role::Expert);
        assert!(user.expert_type_ids.is_empty());
    }
}
