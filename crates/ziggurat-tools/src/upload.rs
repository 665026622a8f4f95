//! GPU-ready packing of flattened transformations.
//!
//! Shaders never walk the hierarchy: they read one absolute transformation per
//! draw instance. This module pairs the output of
//! [`absolute_field_transformations_3d`] with per-instance material indices
//! and exposes the bytes for a storage or instance buffer upload.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use ziggurat_scene::{FieldData, SceneData, SceneError, SceneField};

use crate::error::HierarchyError;
use crate::hierarchy::absolute_field_transformations_3d;

/// Per-draw record consumed by the line and mesh shaders.
///
/// Layout matches a std430 `struct { mat4 transform; uint material; }` padded
/// to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// Column-major absolute transformation.
    pub transform: [[f32; 4]; 4],
    pub material: u32,
    pub _pad: [u32; 3],
}

impl DrawInstance {
    #[inline]
    pub fn new(transform: Mat4, material: u32) -> Self {
        Self {
            transform: transform.to_cols_array_2d(),
            material,
            _pad: [0; 3],
        }
    }
}

/// Pairs each transformation with the material at the same position.
pub fn draw_instances(
    transforms: &[Mat4],
    materials: &[u32],
) -> Result<Vec<DrawInstance>, HierarchyError> {
    if transforms.len() != materials.len() {
        return Err(HierarchyError::SizeMismatch {
            expected: transforms.len(),
            actual: materials.len(),
        });
    }
    Ok(transforms
        .iter()
        .zip(materials)
        .map(|(&t, &m)| DrawInstance::new(t, m))
        .collect())
}

/// One draw instance per `Mesh` entry of a 3D scene.
///
/// Materials come from the `MeshMaterial` field, which has to share the mesh
/// field's object mapping; without it every instance uses material 0.
pub fn mesh_draw_instances(
    scene: &SceneData,
    global: impl Into<Option<Mat4>>,
) -> Result<Vec<DrawInstance>, HierarchyError> {
    let mesh_id = scene
        .field_id(SceneField::Mesh)
        .ok_or(HierarchyError::FieldNotFound(SceneField::Mesh))?;
    let mesh_mapping = scene.mapping(mesh_id).unwrap_or(&[]);

    let materials = match scene.field_id(SceneField::MeshMaterial).and_then(|id| scene.field(id)) {
        Some(field) => {
            if field.mapping() != mesh_mapping {
                return Err(HierarchyError::MappingMismatch(SceneField::MeshMaterial));
            }
            let FieldData::Index(materials) = field.data() else {
                return Err(HierarchyError::Scene(SceneError::UnexpectedData {
                    field: SceneField::MeshMaterial,
                    found: field.data().kind(),
                }));
            };
            materials.clone()
        }
        None => vec![0; mesh_mapping.len()],
    };

    let transforms = absolute_field_transformations_3d(scene, mesh_id, global)?;
    log::debug!("packed {} mesh draw instances", transforms.len());
    draw_instances(&transforms, &materials)
}

/// Raw bytes of `instances`, ready for a buffer write.
#[inline]
pub fn instance_bytes(instances: &[DrawInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Raw bytes of bare transformations, for shaders that index a `mat4` array.
#[inline]
pub fn transform_bytes(transforms: &[Mat4]) -> &[u8] {
    bytemuck::cast_slice(transforms)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use ziggurat_scene::{Dimensions, Field};

    use super::*;

    fn scene() -> SceneData {
        SceneData::new(Dimensions::Three, 3)
            .with_field(Field::parents(&[(0, None), (1, Some(0)), (2, Some(1))]))
            .unwrap()
            .with_field(Field::transformations_3d(&[
                (0, Mat4::from_translation(Vec3::X)),
                (2, Mat4::from_translation(Vec3::Y)),
            ]))
            .unwrap()
            .with_field(Field::indices(SceneField::Mesh, &[(2, 0), (1, 1)]))
            .unwrap()
    }

    #[test]
    fn instance_is_std430_sized() {
        assert_eq!(core::mem::size_of::<DrawInstance>(), 80);
        let instances = [DrawInstance::new(Mat4::IDENTITY, 3); 2];
        let bytes = instance_bytes(&instances);
        assert_eq!(bytes.len(), 160);
        assert_eq!(&bytes[64..68], &3u32.to_ne_bytes());
    }

    #[test]
    fn transform_bytes_are_column_major() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let bytes = transform_bytes(core::slice::from_ref(&m));
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[48..52], &1.0f32.to_ne_bytes());
    }

    #[test]
    fn draw_instances_rejects_length_mismatch() {
        assert_eq!(
            draw_instances(&[Mat4::IDENTITY], &[]),
            Err(HierarchyError::SizeMismatch { expected: 1, actual: 0 })
        );
    }

    #[test]
    fn mesh_instances_without_materials() {
        let out = mesh_draw_instances(&scene(), Mat4::IDENTITY).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|i| i.material == 0));
        let expected = Mat4::from_translation(Vec3::new(1.0, 1.0, 0.0));
        assert!(Mat4::from_cols_array_2d(&out[0].transform).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn mesh_instances_with_materials() {
        let scene = scene()
            .with_field(Field::indices(SceneField::MeshMaterial, &[(2, 7), (1, 4)]))
            .unwrap();
        let out = mesh_draw_instances(&scene, Mat4::IDENTITY).unwrap();
        assert_eq!(out.iter().map(|i| i.material).collect::<Vec<_>>(), vec![7, 4]);
    }

    #[test]
    fn mesh_instances_follow_mesh_order_with_materials() {
        let scene = scene()
            .with_field(Field::indices(SceneField::MeshMaterial, &[(2, 7), (1, 4)]))
            .unwrap();
        let g = Mat4::from_translation(Vec3::Z);
        let out = mesh_draw_instances(&scene, g).unwrap();
        let expected = [
            DrawInstance::new(g * Mat4::from_translation(Vec3::new(1.0, 1.0, 0.0)), 7),
            DrawInstance::new(g * Mat4::from_translation(Vec3::X), 4),
        ];
        assert_eq!(out.as_slice(), expected.as_slice());
    }

    #[test]
    fn mesh_material_mapping_must_match() {
        let scene = scene()
            .with_field(Field::indices(SceneField::MeshMaterial, &[(1, 4), (2, 7)]))
            .unwrap();
        assert_eq!(
            mesh_draw_instances(&scene, Mat4::IDENTITY),
            Err(HierarchyError::MappingMismatch(SceneField::MeshMaterial))
        );
    }
}
