//! Camera for ray generation.

use crate::Ray;
use lumen_math::Vec3;

/// Maps fractional screen coordinates to primary rays.
///
/// `u` runs left to right and `v` bottom to top, both over `[0, 1]`. The
/// renderer treats implementations as opaque and only requires them to be
/// shareable across worker threads.
pub trait RayGenerator: Sync {
    fn ray_for(&self, u: f32, v: f32) -> Ray;
}

/// Pinhole camera with a viewport one unit in front of the eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Create a camera at `look_from` aimed at `look_at`.
    ///
    /// - `vup`: the world "up" used to orient the image
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect_ratio`: image width divided by height
    pub fn new(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32, aspect_ratio: f32) -> Self {
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;

        Self {
            origin: look_from,
            lower_left_corner: look_from - horizontal / 2.0 - vertical / 2.0 - w,
            horizontal,
            vertical,
        }
    }
}

impl RayGenerator for Camera {
    #[inline]
    fn ray_for(&self, u: f32, v: f32) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin,
        )
    }
}
