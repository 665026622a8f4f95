use core::fmt;

use glam::{Mat3, Mat4};

use crate::error::SceneError;
use crate::field::{Field, FieldData, SceneField};
use crate::trs;

/// Scene dimensionality. All spatial fields of a scene share it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Dimensions {
    Two,
    Three,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Two => f.write_str("2D"),
            Self::Three => f.write_str("3D"),
        }
    }
}

/// Object-mapped scene description.
///
/// Objects have no storage of their own: an object is an index in
/// `0..mapping_bound`, and everything known about it lives in fields that map
/// entries to object indices. Fields are validated on insertion, so every
/// stored mapping and parent reference is below the mapping bound.
///
/// Cycles and duplicate entries in the `Parent` field are not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneData {
    dimensions: Dimensions,
    mapping_bound: u32,
    fields: Vec<Field>,
}

impl SceneData {
    pub fn new(dimensions: Dimensions, mapping_bound: u32) -> Self {
        Self {
            dimensions,
            mapping_bound,
            fields: Vec::new(),
        }
    }

    /// Builder-style [`add_field`](Self::add_field).
    pub fn with_field(mut self, field: Field) -> Result<Self, SceneError> {
        self.add_field(field)?;
        Ok(self)
    }

    /// Validates and appends a field, returning its id.
    pub fn add_field(&mut self, field: Field) -> Result<usize, SceneError> {
        let name = field.name();

        if self.has_field(name) {
            return Err(SceneError::DuplicateField(name));
        }
        if !name.accepts(field.data()) {
            return Err(SceneError::UnexpectedData { field: name, found: field.data().kind() });
        }
        if let Some(actual) = field.data().dimensions() {
            if actual != self.dimensions {
                return Err(SceneError::WrongDimensions {
                    field: name,
                    expected: self.dimensions,
                    actual,
                });
            }
        }
        if field.mapping().len() != field.data().len() {
            return Err(SceneError::SizeMismatch {
                field: name,
                mapping: field.mapping().len(),
                data: field.data().len(),
            });
        }

        let bound = self.mapping_bound;
        if let Some(&object) = field.mapping().iter().find(|&&o| o >= bound) {
            return Err(SceneError::ObjectOutOfBounds { field: name, object, bound });
        }
        if let FieldData::Parent(parents) = field.data() {
            let bad = field
                .mapping()
                .iter()
                .zip(parents)
                .find(|&(_, p)| p.is_some_and(|p| p >= bound));
            if let Some((&object, &Some(parent))) = bad {
                return Err(SceneError::ParentOutOfBounds { object, parent, bound });
            }
        }

        self.fields.push(field);
        Ok(self.fields.len() - 1)
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    pub fn is_2d(&self) -> bool {
        self.dimensions == Dimensions::Two
    }

    #[inline]
    pub fn is_3d(&self) -> bool {
        self.dimensions == Dimensions::Three
    }

    /// Upper bound (exclusive) on object indices in this scene.
    #[inline]
    pub fn mapping_bound(&self) -> u32 {
        self.mapping_bound
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[inline]
    pub fn field(&self, id: usize) -> Option<&Field> {
        self.fields.get(id)
    }

    /// Resolves a field name to its id.
    pub fn field_id(&self, name: SceneField) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    #[inline]
    pub fn has_field(&self, name: SceneField) -> bool {
        self.field_id(name).is_some()
    }

    #[inline]
    pub fn field_name(&self, id: usize) -> Option<SceneField> {
        self.field(id).map(Field::name)
    }

    #[inline]
    pub fn field_size(&self, id: usize) -> Option<usize> {
        self.field(id).map(Field::len)
    }

    #[inline]
    pub fn mapping(&self, id: usize) -> Option<&[u32]> {
        self.field(id).map(Field::mapping)
    }

    fn named(&self, name: SceneField) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// `(object, parent)` pairs of the `Parent` field, or `None` if the scene
    /// has no hierarchy.
    pub fn parents_as_array(&self) -> Option<Vec<(u32, Option<u32>)>> {
        let field = self.named(SceneField::Parent)?;
        let FieldData::Parent(parents) = field.data() else { return None };
        Some(field.mapping().iter().copied().zip(parents.iter().copied()).collect())
    }

    /// Local 2D transformations as `(object, matrix)` pairs.
    ///
    /// Uses the `Transformation` field if present, otherwise combines the
    /// `Translation`, `Rotation` and `Scaling` fields. Empty if the scene
    /// carries no transformation data at all.
    pub fn transformations_2d_as_array(&self) -> Result<Vec<(u32, Mat3)>, SceneError> {
        self.expect_dimensions(Dimensions::Two)?;
        if let Some(field) = self.named(SceneField::Transformation) {
            if let FieldData::Transformation2D(m) = field.data() {
                return Ok(field.mapping().iter().copied().zip(m.iter().copied()).collect());
            }
        }
        trs::combine_2d(
            self.named(SceneField::Translation),
            self.named(SceneField::Rotation),
            self.named(SceneField::Scaling),
        )
    }

    /// Local 3D transformations as `(object, matrix)` pairs.
    ///
    /// Same lookup rules as [`transformations_2d_as_array`](Self::transformations_2d_as_array).
    pub fn transformations_3d_as_array(&self) -> Result<Vec<(u32, Mat4)>, SceneError> {
        self.expect_dimensions(Dimensions::Three)?;
        if let Some(field) = self.named(SceneField::Transformation) {
            if let FieldData::Transformation3D(m) = field.data() {
                return Ok(field.mapping().iter().copied().zip(m.iter().copied()).collect());
            }
        }
        trs::combine_3d(
            self.named(SceneField::Translation),
            self.named(SceneField::Rotation),
            self.named(SceneField::Scaling),
        )
    }

    fn expect_dimensions(&self, expected: Dimensions) -> Result<(), SceneError> {
        if self.dimensions == expected {
            Ok(())
        } else {
            Err(SceneError::WrongDimensions {
                field: SceneField::Transformation,
                expected,
                actual: self.dimensions,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec2, Vec3};

    use super::*;

    fn scene_3d() -> SceneData {
        SceneData::new(Dimensions::Three, 4)
    }

    // ── add_field validation ──────────────────────────────────────────────

    #[test]
    fn add_field_returns_sequential_ids() {
        let mut scene = scene_3d();
        assert_eq!(scene.add_field(Field::parents(&[(0, None)])).unwrap(), 0);
        assert_eq!(scene.add_field(Field::indices(SceneField::Mesh, &[(0, 5)])).unwrap(), 1);
        assert_eq!(scene.field_count(), 2);
        assert_eq!(scene.field_id(SceneField::Mesh), Some(1));
        assert_eq!(scene.field_name(0), Some(SceneField::Parent));
        assert_eq!(scene.field_size(1), Some(1));
    }

    #[test]
    fn rejects_duplicate_field() {
        let err = scene_3d()
            .with_field(Field::parents(&[(0, None)]))
            .unwrap()
            .with_field(Field::parents(&[(1, None)]))
            .unwrap_err();
        assert_eq!(err, SceneError::DuplicateField(SceneField::Parent));
    }

    #[test]
    fn rejects_object_past_mapping_bound() {
        let err = scene_3d().with_field(Field::parents(&[(4, None)])).unwrap_err();
        assert_eq!(
            err,
            SceneError::ObjectOutOfBounds { field: SceneField::Parent, object: 4, bound: 4 }
        );
    }

    #[test]
    fn rejects_parent_past_mapping_bound() {
        let err = scene_3d().with_field(Field::parents(&[(1, Some(9))])).unwrap_err();
        assert_eq!(err, SceneError::ParentOutOfBounds { object: 1, parent: 9, bound: 4 });
    }

    #[test]
    fn rejects_size_mismatch() {
        let field = Field::new(SceneField::Mesh, vec![0, 1], FieldData::Index(vec![0]));
        let err = scene_3d().with_field(field).unwrap_err();
        assert_eq!(
            err,
            SceneError::SizeMismatch { field: SceneField::Mesh, mapping: 2, data: 1 }
        );
    }

    #[test]
    fn rejects_wrong_dimensions() {
        let err = scene_3d()
            .with_field(Field::transformations_2d(&[(0, Mat3::IDENTITY)]))
            .unwrap_err();
        assert!(matches!(err, SceneError::WrongDimensions { actual: Dimensions::Two, .. }));
    }

    #[test]
    fn rejects_wrong_payload_kind() {
        let field = Field::new(SceneField::Parent, vec![0], FieldData::Index(vec![0]));
        let err = scene_3d().with_field(field).unwrap_err();
        assert_eq!(err, SceneError::UnexpectedData { field: SceneField::Parent, found: "index" });
    }

    // ── typed accessors ───────────────────────────────────────────────────

    #[test]
    fn parents_as_array_pairs_mapping_with_parents() {
        let scene = scene_3d()
            .with_field(Field::parents(&[(2, Some(0)), (0, None)]))
            .unwrap();
        assert_eq!(scene.parents_as_array(), Some(vec![(2, Some(0)), (0, None)]));
        assert_eq!(scene_3d().parents_as_array(), None);
    }

    #[test]
    fn transformation_field_takes_precedence_over_trs() {
        let m = Mat4::from_translation(Vec3::X);
        let scene = scene_3d()
            .with_field(Field::transformations_3d(&[(1, m)]))
            .unwrap()
            .with_field(Field::new(
                SceneField::Translation,
                vec![2],
                FieldData::Translation3D(vec![Vec3::Y]),
            ))
            .unwrap();
        assert_eq!(scene.transformations_3d_as_array().unwrap(), vec![(1, m)]);
    }

    #[test]
    fn trs_fields_are_combined() {
        let scene = scene_3d()
            .with_field(Field::new(
                SceneField::Translation,
                vec![0, 3],
                FieldData::Translation3D(vec![Vec3::X, Vec3::Z]),
            ))
            .unwrap()
            .with_field(Field::new(
                SceneField::Scaling,
                vec![0, 3],
                FieldData::Scaling3D(vec![Vec3::splat(2.0), Vec3::ONE]),
            ))
            .unwrap();

        let out = scene.transformations_3d_as_array().unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].0, 0);
        let expected =
            Mat4::from_scale_rotation_translation(Vec3::splat(2.0), Quat::IDENTITY, Vec3::X);
        assert!(out[0].1.abs_diff_eq(expected, 1e-6));
        assert!(out[1].1.abs_diff_eq(Mat4::from_translation(Vec3::Z), 1e-6));
    }

    #[test]
    fn no_transformation_data_is_empty() {
        let scene = SceneData::new(Dimensions::Two, 1);
        assert!(scene.transformations_2d_as_array().unwrap().is_empty());
    }

    #[test]
    fn wrong_dimension_accessor_fails() {
        let scene = SceneData::new(Dimensions::Two, 1)
            .with_field(Field::new(
                SceneField::Translation,
                vec![0],
                FieldData::Translation2D(vec![Vec2::ONE]),
            ))
            .unwrap();
        assert!(scene.transformations_3d_as_array().is_err());
        assert_eq!(scene.transformations_2d_as_array().unwrap().len(), 1);
    }
}
