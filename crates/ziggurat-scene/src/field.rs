use core::fmt;

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

use crate::Dimensions;

/// Field name.
///
/// Builtin names constrain the kind of [`FieldData`] the field may carry;
/// `Custom` fields accept anything.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SceneField {
    /// Parent object, `None` for top-level objects.
    Parent,
    /// Local transformation matrix.
    Transformation,
    /// Local translation, combined with `Rotation` and `Scaling`.
    Translation,
    /// Local rotation (radians in 2D, quaternion in 3D).
    Rotation,
    /// Local scaling.
    Scaling,
    /// Mesh index attached to the object.
    Mesh,
    /// Material index for the object's mesh.
    MeshMaterial,
    /// Light index attached to the object.
    Light,
    /// Camera index attached to the object.
    Camera,
    /// Application-defined field.
    Custom(u32),
}

impl SceneField {
    /// Whether `data` is an acceptable payload for this field name.
    pub fn accepts(self, data: &FieldData) -> bool {
        use FieldData as D;
        match self {
            Self::Parent => matches!(data, D::Parent(_)),
            Self::Transformation => {
                matches!(data, D::Transformation2D(_) | D::Transformation3D(_))
            }
            Self::Translation => matches!(data, D::Translation2D(_) | D::Translation3D(_)),
            Self::Rotation => matches!(data, D::Rotation2D(_) | D::Rotation3D(_)),
            Self::Scaling => matches!(data, D::Scaling2D(_) | D::Scaling3D(_)),
            Self::Mesh | Self::MeshMaterial | Self::Light | Self::Camera => {
                matches!(data, D::Index(_))
            }
            Self::Custom(_) => true,
        }
    }
}

impl fmt::Display for SceneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => f.write_str("Parent"),
            Self::Transformation => f.write_str("Transformation"),
            Self::Translation => f.write_str("Translation"),
            Self::Rotation => f.write_str("Rotation"),
            Self::Scaling => f.write_str("Scaling"),
            Self::Mesh => f.write_str("Mesh"),
            Self::MeshMaterial => f.write_str("MeshMaterial"),
            Self::Light => f.write_str("Light"),
            Self::Camera => f.write_str("Camera"),
            Self::Custom(id) => write!(f, "Custom({id})"),
        }
    }
}

/// Per-entry payload of a field. Entry `i` belongs to object `mapping[i]`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldData {
    Parent(Vec<Option<u32>>),
    Transformation2D(Vec<Mat3>),
    Transformation3D(Vec<Mat4>),
    Translation2D(Vec<Vec2>),
    Translation3D(Vec<Vec3>),
    /// Counterclockwise angle in radians.
    Rotation2D(Vec<f32>),
    Rotation3D(Vec<Quat>),
    Scaling2D(Vec<Vec2>),
    Scaling3D(Vec<Vec3>),
    Index(Vec<u32>),
}

impl FieldData {
    pub fn len(&self) -> usize {
        match self {
            Self::Parent(v) => v.len(),
            Self::Transformation2D(v) => v.len(),
            Self::Transformation3D(v) => v.len(),
            Self::Translation2D(v) | Self::Scaling2D(v) => v.len(),
            Self::Translation3D(v) | Self::Scaling3D(v) => v.len(),
            Self::Rotation2D(v) => v.len(),
            Self::Rotation3D(v) => v.len(),
            Self::Index(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of spatial payloads; `None` for parents and indices.
    pub fn dimensions(&self) -> Option<Dimensions> {
        match self {
            Self::Transformation2D(_)
            | Self::Translation2D(_)
            | Self::Rotation2D(_)
            | Self::Scaling2D(_) => Some(Dimensions::Two),
            Self::Transformation3D(_)
            | Self::Translation3D(_)
            | Self::Rotation3D(_)
            | Self::Scaling3D(_) => Some(Dimensions::Three),
            Self::Parent(_) | Self::Index(_) => None,
        }
    }

    /// Short human-readable name of the payload kind, used in errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parent(_) => "parent",
            Self::Transformation2D(_) => "2D transformation",
            Self::Transformation3D(_) => "3D transformation",
            Self::Translation2D(_) => "2D translation",
            Self::Translation3D(_) => "3D translation",
            Self::Rotation2D(_) => "2D rotation",
            Self::Rotation3D(_) => "3D rotation",
            Self::Scaling2D(_) => "2D scaling",
            Self::Scaling3D(_) => "3D scaling",
            Self::Index(_) => "index",
        }
    }
}

/// A named field: object mapping plus one payload entry per mapped object.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: SceneField,
    mapping: Vec<u32>,
    data: FieldData,
}

impl Field {
    /// Creates a field. Consistency is checked when the field is added to a
    /// [`SceneData`](crate::SceneData).
    #[inline]
    pub fn new(name: SceneField, mapping: Vec<u32>, data: FieldData) -> Self {
        Self { name, mapping, data }
    }

    /// Parent field from `(object, parent)` pairs.
    pub fn parents(pairs: &[(u32, Option<u32>)]) -> Self {
        let (mapping, parents) = pairs.iter().copied().unzip();
        Self::new(SceneField::Parent, mapping, FieldData::Parent(parents))
    }

    /// 2D transformation field from `(object, matrix)` pairs.
    pub fn transformations_2d(pairs: &[(u32, Mat3)]) -> Self {
        let (mapping, data) = pairs.iter().copied().unzip();
        Self::new(SceneField::Transformation, mapping, FieldData::Transformation2D(data))
    }

    /// 3D transformation field from `(object, matrix)` pairs.
    pub fn transformations_3d(pairs: &[(u32, Mat4)]) -> Self {
        let (mapping, data) = pairs.iter().copied().unzip();
        Self::new(SceneField::Transformation, mapping, FieldData::Transformation3D(data))
    }

    /// Index attachment field (mesh, light, camera...) from `(object, index)` pairs.
    pub fn indices(name: SceneField, pairs: &[(u32, u32)]) -> Self {
        let (mapping, data) = pairs.iter().copied().unzip();
        Self::new(name, mapping, FieldData::Index(data))
    }

    #[inline]
    pub fn name(&self) -> SceneField {
        self.name
    }

    #[inline]
    pub fn mapping(&self) -> &[u32] {
        &self.mapping
    }

    #[inline]
    pub fn data(&self) -> &FieldData {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
