//! Local transform state and cached world matrix

use crate::foundation::math::{utils, Mat4, Rotation3, Unit, Vec3};

/// Per-node scale, rotation and translation, plus the cached world matrix
///
/// Rotation is stored as axis-angle: an angle in degrees about an axis the
/// caller must supply as a unit vector. The axis is never normalized or
/// validated here; passing a non-unit axis leaves the rotation undefined.
///
/// The cached matrix is only meaningful while the dirty flag is clear; the
/// owning scene recomputes and stores it on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    scale: Vec3,
    translation: Vec3,
    rotation_degrees: f32,
    rotation_axis: Vec3,
    world: Mat4,
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            translation: Vec3::zeros(),
            rotation_degrees: 0.0,
            rotation_axis: Vec3::z(),
            world: Mat4::identity(),
            dirty: true,
        }
    }
}

impl Transform {
    /// Create an identity transform (marked dirty until first composition)
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scale factors
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Current translation
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Current rotation as (degrees, axis)
    pub fn rotation(&self) -> (f32, Vec3) {
        (self.rotation_degrees, self.rotation_axis)
    }

    /// True when the cached world matrix is stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set per-axis scale factors
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Set the same scale factor on all three axes
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.set_scale(Vec3::new(scale, scale, scale));
    }

    /// Set the translation
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.dirty = true;
    }

    /// Set x/y translation, zeroing z
    pub fn set_translation_xy(&mut self, x: f32, y: f32) {
        self.set_translation(Vec3::new(x, y, 0.0));
    }

    /// Set the rotation in degrees about `axis`
    ///
    /// `axis` must be a unit vector.
    pub fn set_rotation(&mut self, degrees: f32, axis: Vec3) {
        self.rotation_degrees = degrees;
        self.rotation_axis = axis;
        self.dirty = true;
    }

    /// Restore the default scale, translation and rotation
    pub fn reset(&mut self) {
        let world = self.world;
        *self = Self {
            world,
            ..Self::default()
        };
    }

    /// Compose the local matrix: translation * rotation * scale
    ///
    /// Column-vector convention, so scale applies first and translation last.
    pub fn local_matrix(&self) -> Mat4 {
        let axis = Unit::new_unchecked(self.rotation_axis);
        let rotation = Rotation3::from_axis_angle(&axis, utils::deg_to_rad(self.rotation_degrees));
        Mat4::new_translation(&self.translation)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// The most recently stored world matrix
    ///
    /// Stale while [`Transform::is_dirty`] is true.
    pub fn cached_world(&self) -> Mat4 {
        self.world
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn store_world(&mut self, world: Mat4) {
        self.world = world;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let transform = Transform::new();
        assert_eq!(transform.scale(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(transform.translation(), Vec3::zeros());
        let (degrees, axis) = transform.rotation();
        assert_eq!(degrees, 0.0);
        assert_eq!(axis, Vec3::z());
        assert!(transform.is_dirty());
        assert_relative_eq!(transform.local_matrix(), Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_setters_mark_dirty() {
        let mut transform = Transform::new();
        transform.store_world(Mat4::identity());
        assert!(!transform.is_dirty());

        transform.set_scale(Vec3::new(2.0, 1.0, 1.0));
        assert!(transform.is_dirty());

        transform.store_world(Mat4::identity());
        transform.set_translation(Vec3::new(1.0, 0.0, 0.0));
        assert!(transform.is_dirty());

        transform.store_world(Mat4::identity());
        transform.set_rotation(45.0, Vec3::y());
        assert!(transform.is_dirty());

        transform.store_world(Mat4::identity());
        transform.reset();
        assert!(transform.is_dirty());
        assert_eq!(transform.scale(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_composition_order_scale_then_rotate_then_translate() {
        let mut transform = Transform::new();
        transform.set_uniform_scale(2.0);
        transform.set_rotation(90.0, Vec3::z());
        transform.set_translation(Vec3::new(0.0, 0.0, 3.0));

        // (1,0,0) scales to (2,0,0), rotates to (0,2,0), translates to (0,2,3)
        let point = transform.local_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(point, Point3::new(0.0, 2.0, 3.0), epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_quarter_turn_about_z() {
        let mut transform = Transform::new();
        transform.set_rotation(90.0, Vec3::new(0.0, 0.0, 1.0));

        let point = transform.local_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(point, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_translation_xy_zeroes_z() {
        let mut transform = Transform::new();
        transform.set_translation(Vec3::new(1.0, 2.0, 3.0));
        transform.set_translation_xy(4.0, 5.0);
        assert_eq!(transform.translation(), Vec3::new(4.0, 5.0, 0.0));
    }
}
