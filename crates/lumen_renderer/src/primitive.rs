//! Closed set of intersectable shapes.

use crate::{HitRecord, Hittable, MaterialId, Ray, Sphere};
use lumen_math::{Aabb, Interval};

/// Every shape the scene can hold.
///
/// Dispatch is a `match`, so BVH leaves store a plain index into the
/// scene's primitive list and traversal never goes through a vtable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
}

impl Primitive {
    /// Material this primitive shades with.
    pub fn material(&self) -> MaterialId {
        match self {
            Primitive::Sphere(sphere) => sphere.material(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t, rec),
        }
    }

    #[inline]
    fn bounding_box(&self) -> Aabb {
        match self {
            Primitive::Sphere(sphere) => sphere.bounding_box(),
        }
    }
}
