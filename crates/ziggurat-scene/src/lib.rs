//! Object-mapped scene data for the **ziggurat** scene tools.
//!
//! A scene is a set of fields over a dense object index space
//! `0..mapping_bound`. Each field maps its entries to objects; objects
//! themselves are never materialized.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`field`] | `SceneField`, `FieldData`, `Field` |
//! | [`scene`] | `SceneData`, `Dimensions` |
//! | [`error`] | `SceneError` |
//!
//! # Quick start
//!
//! ```rust
//! use glam::Mat4;
//! use ziggurat_scene::{Dimensions, Field, SceneData, SceneField};
//!
//! let scene = SceneData::new(Dimensions::Three, 3)
//!     .with_field(Field::parents(&[(2, Some(0)), (0, None), (1, Some(0))]))
//!     .unwrap()
//!     .with_field(Field::transformations_3d(&[(2, Mat4::IDENTITY)]))
//!     .unwrap();
//!
//! assert!(scene.is_3d());
//! assert_eq!(scene.field_id(SceneField::Transformation), Some(1));
//! ```

pub mod error;
pub mod field;
pub mod scene;
mod trs;

pub use error::SceneError;
pub use field::{Field, FieldData, SceneField};
pub use scene::{Dimensions, SceneData};
