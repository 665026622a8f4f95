use core::ops::Mul;

use glam::{Mat3, Mat4};
use ziggurat_scene::{Dimensions, SceneData, SceneError};

use super::order::cluster_into;
use super::FieldLookup;
use crate::error::HierarchyError;

/// Matrix type the propagation is generic over.
pub(crate) trait Transform: Copy + Mul<Output = Self> {
    const IDENTITY: Self;
    const DIMENSIONS: Dimensions;

    fn local_transformations(scene: &SceneData) -> Result<Vec<(u32, Self)>, SceneError>;
}

impl Transform for Mat3 {
    const IDENTITY: Self = Mat3::IDENTITY;
    const DIMENSIONS: Dimensions = Dimensions::Two;

    fn local_transformations(scene: &SceneData) -> Result<Vec<(u32, Self)>, SceneError> {
        scene.transformations_2d_as_array()
    }
}

impl Transform for Mat4 {
    const IDENTITY: Self = Mat4::IDENTITY;
    const DIMENSIONS: Dimensions = Dimensions::Three;

    fn local_transformations(scene: &SceneData) -> Result<Vec<(u32, Self)>, SceneError> {
        scene.transformations_3d_as_array()
    }
}

/// Absolute 2D transformations of the objects each entry of `field` is attached to.
///
/// Returns one matrix per field entry, in the field's order, with `global`
/// prepended to every hierarchy. Pass `None` to prepend nothing, which is the
/// same as passing `Mat3::IDENTITY`. Local transformations come from the scene's
/// `Transformation` field, or its `Translation`/`Rotation`/`Scaling` fields;
/// objects without one use identity.
///
/// The scene needs a `Parent` field without cycles or duplicates and has to
/// be 2D. Runs in O(m + n) time and memory, `m` being the field size and `n`
/// the mapping bound.
///
/// Entries attached to objects that have no `Parent` entry, or that sit in a
/// cycle, get an unspecified value. Currently that is `global`, but callers
/// should not depend on it.
pub fn absolute_field_transformations_2d(
    scene: &SceneData,
    field: impl Into<FieldLookup>,
    global: impl Into<Option<Mat3>>,
) -> Result<Vec<Mat3>, HierarchyError> {
    allocate_and_fill(scene, field.into(), global.into().unwrap_or(Mat3::IDENTITY))
}

/// Like [`absolute_field_transformations_2d`], writing into `out`.
///
/// `out` must have exactly as many entries as the field; it is never resized.
pub fn absolute_field_transformations_2d_into(
    scene: &SceneData,
    field: impl Into<FieldLookup>,
    out: &mut [Mat3],
    global: impl Into<Option<Mat3>>,
) -> Result<(), HierarchyError> {
    fill(scene, field.into(), out, global.into().unwrap_or(Mat3::IDENTITY))
}

/// Absolute 3D transformations of the objects each entry of `field` is attached to.
///
/// Same contract as [`absolute_field_transformations_2d`] for 3D scenes.
///
/// ```rust
/// use glam::{Mat4, Vec3};
/// use ziggurat_scene::{Dimensions, Field, SceneData, SceneField};
/// use ziggurat_tools::hierarchy::absolute_field_transformations_3d;
///
/// let child = Mat4::from_translation(Vec3::X);
/// let scene = SceneData::new(Dimensions::Three, 2)
///     .with_field(Field::parents(&[(1, Some(0)), (0, None)])).unwrap()
///     .with_field(Field::transformations_3d(&[(1, child)])).unwrap();
///
/// let out = absolute_field_transformations_3d(&scene, SceneField::Transformation, None).unwrap();
/// assert_eq!(out, vec![child]);
/// ```
pub fn absolute_field_transformations_3d(
    scene: &SceneData,
    field: impl Into<FieldLookup>,
    global: impl Into<Option<Mat4>>,
) -> Result<Vec<Mat4>, HierarchyError> {
    allocate_and_fill(scene, field.into(), global.into().unwrap_or(Mat4::IDENTITY))
}

/// Like [`absolute_field_transformations_3d`], writing into `out`.
pub fn absolute_field_transformations_3d_into(
    scene: &SceneData,
    field: impl Into<FieldLookup>,
    out: &mut [Mat4],
    global: impl Into<Option<Mat4>>,
) -> Result<(), HierarchyError> {
    fill(scene, field.into(), out, global.into().unwrap_or(Mat4::IDENTITY))
}

fn allocate_and_fill<T: Transform>(
    scene: &SceneData,
    field: FieldLookup,
    global: T,
) -> Result<Vec<T>, HierarchyError> {
    check_dimensions::<T>(scene)?;
    let id = field.resolve(scene)?;
    let mut out = vec![T::IDENTITY; scene.field_size(id).unwrap_or(0)];
    fill(scene, FieldLookup::Id(id), &mut out, global)?;
    Ok(out)
}

fn check_dimensions<T: Transform>(scene: &SceneData) -> Result<(), HierarchyError> {
    if scene.dimensions() == T::DIMENSIONS {
        Ok(())
    } else {
        Err(HierarchyError::DimensionMismatch {
            expected: T::DIMENSIONS,
            actual: scene.dimensions(),
        })
    }
}

fn fill<T: Transform>(
    scene: &SceneData,
    field: FieldLookup,
    out: &mut [T],
    global: T,
) -> Result<(), HierarchyError> {
    check_dimensions::<T>(scene)?;
    let id = field.resolve(scene)?;
    let mapping = scene.mapping(id).unwrap_or(&[]);
    if out.len() != mapping.len() {
        return Err(HierarchyError::SizeMismatch { expected: mapping.len(), actual: out.len() });
    }
    let parents = scene.parents_as_array().ok_or(HierarchyError::MissingParentField)?;
    let locals = T::local_transformations(scene)?;

    log::debug!(
        "absolute transformations for field {id}: {} entries, {} parent entries",
        mapping.len(),
        parents.len()
    );
    if mapping.is_empty() {
        return Ok(());
    }

    // Scene fields are validated against the mapping bound on insertion, so
    // every index below is in range.
    let bound = scene.mapping_bound() as usize;

    let mut local = vec![T::IDENTITY; bound];
    for (object, m) in locals {
        local[object as usize] = m;
    }

    let mut ordered = vec![(0, None); parents.len()];
    let ordered_len = cluster_into(&parents, bound, &mut ordered);
    ordered.truncate(ordered_len);

    // `absolute[0]` is the global transformation; objects never reached by the
    // walk keep slot 0.
    let mut slot = vec![0usize; bound];
    let mut absolute = Vec::with_capacity(ordered.len() + 1);
    absolute.push(global);
    for &(object, parent) in &ordered {
        let base = match parent {
            Some(p) => absolute[slot[p as usize]],
            None => global,
        };
        slot[object as usize] = absolute.len();
        absolute.push(base * local[object as usize]);
    }

    for (dst, &object) in out.iter_mut().zip(mapping) {
        *dst = absolute[slot[object as usize]];
    }
    Ok(())
}
