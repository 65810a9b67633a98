//! Sphere, the only primitive shape.

use crate::{HitRecord, Hittable, MaterialId, Ray};
use lumen_math::{Aabb, Interval, Vec3};

/// A sphere primitive.
///
/// A negative radius is allowed: the surface is the same, but the outward
/// normal points inwards. Nesting one inside a glass sphere of positive
/// radius makes a hollow glass shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        let rvec = Vec3::splat(radius.abs());
        let bbox = Aabb::new(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        // |origin + t*dir - center|^2 = r^2, solved for t with b = 2*half_b
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Prefer the near root; fall back to the far one
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(root);
        rec.material = self.material;
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_sphere_hit_exact() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 3);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-6);
        assert_vec_near(rec.p, Vec3::new(0.0, 0.0, 1.0));
        assert_vec_near(rec.normal, Vec3::new(0.0, 0.0, 1.0));
        assert!(rec.front_face);
        assert_eq!(rec.material, 3);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, 0);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_sphere_far_root_when_near_root_out_of_range() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        // Near root t=4 excluded, far root t=6 accepted
        assert!(sphere.hit(&ray, Interval::new(4.5, f32::INFINITY), &mut rec));
        assert!((rec.t - 6.0).abs() < 1e-6);
        assert!(!rec.front_face);
        assert_vec_near(rec.normal, Vec3::new(0.0, 0.0, 1.0));

        // Both roots excluded
        assert!(!sphere.hit(&ray, Interval::new(6.5, f32::INFINITY), &mut rec));
        assert!(!sphere.hit(&ray, Interval::new(0.001, 3.5), &mut rec));
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-6);
        assert!(!rec.front_face);
        assert_vec_near(rec.normal, -Vec3::X);
    }

    #[test]
    fn test_negative_radius_has_valid_box_and_inward_normal() {
        let sphere = Sphere::new(Vec3::new(1.0, 0.0, 0.0), -0.5, 0);
        let bbox = sphere.bounding_box();

        assert_eq!(bbox.minimum, Vec3::new(0.5, -0.5, -0.5));
        assert_eq!(bbox.maximum, Vec3::new(1.5, 0.5, 0.5));

        let ray = Ray::new(Vec3::new(1.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        // Outward normal points inward, so the ray sees a back face
        assert!(!rec.front_face);
        assert_vec_near(rec.normal, Vec3::Z);
    }
}
