//! Translation / rotation / scaling field combination.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

use crate::error::SceneError;
use crate::field::{Field, FieldData};

/// Returns the mapping shared by all present TRS fields.
fn shared_mapping<'a>(fields: [Option<&'a Field>; 3]) -> Result<Option<&'a [u32]>, SceneError> {
    let mut mapping: Option<&[u32]> = None;
    for field in fields.into_iter().flatten() {
        match mapping {
            None => mapping = Some(field.mapping()),
            Some(m) if m != field.mapping() => {
                return Err(SceneError::TrsMappingMismatch(field.name()));
            }
            Some(_) => {}
        }
    }
    Ok(mapping)
}

fn entry<T: Copy>(values: Option<&[T]>, i: usize, default: T) -> T {
    values.map_or(default, |v| v[i])
}

pub(crate) fn combine_2d(
    translation: Option<&Field>,
    rotation: Option<&Field>,
    scaling: Option<&Field>,
) -> Result<Vec<(u32, Mat3)>, SceneError> {
    let Some(mapping) = shared_mapping([translation, rotation, scaling])? else {
        return Ok(Vec::new());
    };

    let t = translation.and_then(|f| match f.data() {
        FieldData::Translation2D(v) => Some(v.as_slice()),
        _ => None,
    });
    let r = rotation.and_then(|f| match f.data() {
        FieldData::Rotation2D(v) => Some(v.as_slice()),
        _ => None,
    });
    let s = scaling.and_then(|f| match f.data() {
        FieldData::Scaling2D(v) => Some(v.as_slice()),
        _ => None,
    });

    Ok(mapping
        .iter()
        .enumerate()
        .map(|(i, &object)| {
            let m = Mat3::from_scale_angle_translation(
                entry(s, i, Vec2::ONE),
                entry(r, i, 0.0),
                entry(t, i, Vec2::ZERO),
            );
            (object, m)
        })
        .collect())
}

pub(crate) fn combine_3d(
    translation: Option<&Field>,
    rotation: Option<&Field>,
    scaling: Option<&Field>,
) -> Result<Vec<(u32, Mat4)>, SceneError> {
    let Some(mapping) = shared_mapping([translation, rotation, scaling])? else {
        return Ok(Vec::new());
    };

    let t = translation.and_then(|f| match f.data() {
        FieldData::Translation3D(v) => Some(v.as_slice()),
        _ => None,
    });
    let r = rotation.and_then(|f| match f.data() {
        FieldData::Rotation3D(v) => Some(v.as_slice()),
        _ => None,
    });
    let s = scaling.and_then(|f| match f.data() {
        FieldData::Scaling3D(v) => Some(v.as_slice()),
        _ => None,
    });

    Ok(mapping
        .iter()
        .enumerate()
        .map(|(i, &object)| {
            let m = Mat4::from_scale_rotation_translation(
                entry(s, i, Vec3::ONE),
                entry(r, i, Quat::IDENTITY),
                entry(t, i, Vec3::ZERO),
            );
            (object, m)
        })
        .collect())
}
