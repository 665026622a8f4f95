use std::fmt;

use crate::{Dimensions, SceneField};

/// Error produced while assembling or querying a [`SceneData`](crate::SceneData).
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Object mapping and field data have different lengths.
    SizeMismatch {
        field: SceneField,
        mapping: usize,
        data: usize,
    },
    /// A mapped object is not below the scene's mapping bound.
    ObjectOutOfBounds {
        field: SceneField,
        object: u32,
        bound: u32,
    },
    /// A parent reference is not below the scene's mapping bound.
    ParentOutOfBounds {
        object: u32,
        parent: u32,
        bound: u32,
    },
    /// A field with this name is already present.
    DuplicateField(SceneField),
    /// Field data is 2D in a 3D scene or the other way around.
    WrongDimensions {
        field: SceneField,
        expected: Dimensions,
        actual: Dimensions,
    },
    /// Field data kind does not fit the field name (e.g. a `Parent` field
    /// holding matrices).
    UnexpectedData {
        field: SceneField,
        found: &'static str,
    },
    /// Translation, rotation and scaling fields are present but are not
    /// mapped to the same objects in the same order.
    TrsMappingMismatch(SceneField),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { field, mapping, data } => write!(
                f,
                "scene field {field}: mapping has {mapping} entries but data has {data}"
            ),
            Self::ObjectOutOfBounds { field, object, bound } => write!(
                f,
                "scene field {field}: object {object} out of bounds for mapping bound {bound}"
            ),
            Self::ParentOutOfBounds { object, parent, bound } => write!(
                f,
                "parent {parent} of object {object} out of bounds for mapping bound {bound}"
            ),
            Self::DuplicateField(field) => write!(f, "scene field {field} is already present"),
            Self::WrongDimensions { field, expected, actual } => write!(
                f,
                "scene field {field}: expected {expected} data, got {actual}"
            ),
            Self::UnexpectedData { field, found } => {
                write!(f, "scene field {field} cannot hold {found} data")
            }
            Self::TrsMappingMismatch(field) => write!(
                f,
                "scene field {field} is not mapped to the same objects as the other TRS fields"
            ),
        }
    }
}

impl std::error::Error for SceneError {}
