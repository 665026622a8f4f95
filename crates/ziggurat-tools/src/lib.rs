//! Ziggurat scene tools.
//!
//! Flattens object hierarchies stored in [`ziggurat_scene::SceneData`] into
//! absolute transformations, for baking into meshes or uploading to shaders.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`hierarchy`] | parent clustering, absolute transformation propagation |
//! | [`upload`] | `DrawInstance` packing for GPU buffers |
//! | [`logging`] | optional `env_logger` setup |
//! | [`error`] | `HierarchyError` |

pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod upload;

pub use error::HierarchyError;
pub use hierarchy::{
    absolute_field_transformations_2d, absolute_field_transformations_2d_into,
    absolute_field_transformations_3d, absolute_field_transformations_3d_into, FieldLookup,
};
