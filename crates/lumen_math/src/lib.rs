//! Math types shared by the lumen path tracer.
//!
//! Vectors come straight from `glam`; this crate adds the ray, interval and
//! bounding box types the renderer's intersection code is written against.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod axis;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use axis::Axis;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.min(b), a);
        assert_eq!(a.max(b), b);
    }
}
