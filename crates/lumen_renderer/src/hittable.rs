//! Intersection contract shared by primitives, the BVH and the scene.

use crate::{MaterialId, Ray};
use lumen_math::{Aabb, Interval, Vec3};

/// Nearest intersection found so far along a ray.
///
/// Filled in place by `hit` calls; a closer hit found later in the same
/// query simply overwrites it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// World-space hit point
    pub p: Vec3,
    /// Unit normal facing the incoming ray
    pub normal: Vec3,
    /// Index of the material in the scene's material table
    pub material: MaterialId,
    /// Ray parameter of the hit
    pub t: f32,
    /// True when the ray arrived from the outward side
    pub front_face: bool,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: 0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl HitRecord {
    /// Store `outward_normal` flipped to face the ray, remembering which
    /// side was hit.
    #[inline]
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        self.front_face = front_face;
        self.normal = if front_face { outward_normal } else { -outward_normal };
    }
}

/// Anything a ray can be tested against.
pub trait Hittable {
    /// Overwrite `rec` and return true if `ray` hits within `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool;

    /// Box enclosing everything `hit` can report.
    fn bounding_box(&self) -> Aabb;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_face_normal_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        rec.set_face_normal(&ray, Vec3::Z);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_set_face_normal_back_flips() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let mut rec = HitRecord::default();
        rec.set_face_normal(&ray, Vec3::Z);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
    }
}
