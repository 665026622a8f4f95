//! Scene hierarchy flattening.
//!
//! Responsibilities:
//! - order a parent field so parents precede children (`order`)
//! - propagate local transformations down the ordered hierarchy and map the
//!   result onto an arbitrary field (`absolute`)
//!
//! Everything works on index tables sized by the scene's mapping bound. No
//! traversal recurses, so hierarchy depth is not limited by the stack.

mod absolute;
mod order;

use ziggurat_scene::{SceneData, SceneField};

use crate::error::HierarchyError;

pub use absolute::{
    absolute_field_transformations_2d, absolute_field_transformations_2d_into,
    absolute_field_transformations_3d, absolute_field_transformations_3d_into,
};
pub use order::{cluster_parents, order_cluster_parents, order_cluster_parents_into, ParentEntry};

/// Selects a scene field either by id or by name.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldLookup {
    Id(usize),
    Name(SceneField),
}

impl FieldLookup {
    /// Resolves to a field id valid for `scene`.
    pub fn resolve(self, scene: &SceneData) -> Result<usize, HierarchyError> {
        match self {
            Self::Id(id) if id < scene.field_count() => Ok(id),
            Self::Id(id) => Err(HierarchyError::FieldIdOutOfRange {
                id,
                count: scene.field_count(),
            }),
            Self::Name(name) => scene.field_id(name).ok_or(HierarchyError::FieldNotFound(name)),
        }
    }
}

impl From<usize> for FieldLookup {
    #[inline]
    fn from(id: usize) -> Self {
        Self::Id(id)
    }
}

impl From<SceneField> for FieldLookup {
    #[inline]
    fn from(name: SceneField) -> Self {
        Self::Name(name)
    }
}
