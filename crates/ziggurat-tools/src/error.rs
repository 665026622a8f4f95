use std::fmt;

use ziggurat_scene::{Dimensions, SceneError, SceneField};

/// Precondition failure reported by the hierarchy utilities.
///
/// Every variant is detected before any output is written.
#[derive(Debug, Clone, PartialEq)]
pub enum HierarchyError {
    /// The scene has no `Parent` field.
    MissingParentField,
    /// A 2D entry point was called on a 3D scene or the other way around.
    DimensionMismatch {
        expected: Dimensions,
        actual: Dimensions,
    },
    /// Field id is not below the scene's field count.
    FieldIdOutOfRange { id: usize, count: usize },
    /// No field with this name exists in the scene.
    FieldNotFound(SceneField),
    /// Caller-provided destination or companion array has the wrong length.
    SizeMismatch { expected: usize, actual: usize },
    /// An object index is not below the mapping bound.
    ObjectOutOfBounds { object: u32, bound: u32 },
    /// A parent index is not below the mapping bound.
    ParentOutOfBounds { parent: u32, bound: u32 },
    /// Two fields expected to share an object mapping do not.
    MappingMismatch(SceneField),
    /// The scene data could not be read.
    Scene(SceneError),
}

impl fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParentField => f.write_str("scene has no Parent field"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "expected a {expected} scene, got a {actual} one")
            }
            Self::FieldIdOutOfRange { id, count } => {
                write!(f, "field id {id} out of range for {count} fields")
            }
            Self::FieldNotFound(name) => write!(f, "scene has no {name} field"),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "expected a view of {expected} entries, got {actual}")
            }
            Self::ObjectOutOfBounds { object, bound } => {
                write!(f, "object {object} out of bounds for mapping bound {bound}")
            }
            Self::ParentOutOfBounds { parent, bound } => {
                write!(f, "parent {parent} out of bounds for mapping bound {bound}")
            }
            Self::MappingMismatch(name) => {
                write!(f, "{name} field is not mapped to the same objects")
            }
            Self::Scene(e) => write!(f, "invalid scene data: {e}"),
        }
    }
}

impl std::error::Error for HierarchyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scene(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SceneError> for HierarchyError {
    fn from(e: SceneError) -> Self {
        Self::Scene(e)
    }
}
