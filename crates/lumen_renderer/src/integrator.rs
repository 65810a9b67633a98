//! Path integrator: follows one light path from the eye to the sky.

use crate::rng::XoshiroRng;
use crate::{Color, HitRecord, Hittable, Ray, Scene};
use lumen_math::Interval;

/// Maximum number of surface interactions along one path.
pub const MAX_BOUNCES: usize = 16;

/// Lower bound on hit distance; keeps bounced rays from re-hitting the
/// surface they start on.
pub const T_MIN: f32 = 1e-3;

pub const T_MAX: f32 = f32::MAX;

/// Compute the color seen by a ray.
///
/// Throughput starts white and is multiplied by each bounce's attenuation.
/// The sky is the only light source: escaping rays pick up the gradient and
/// end the path. Absorbed paths and paths that run out of bounces carry no
/// light back.
pub fn ray_color(ray: &Ray, scene: &Scene, rng: &mut XoshiroRng) -> Color {
    let mut throughput = Color::ONE;
    let mut ray = *ray;
    let mut rec = HitRecord::default();

    for _ in 0..MAX_BOUNCES {
        if !scene.hit(&ray, Interval::new(T_MIN, T_MAX), &mut rec) {
            return throughput * sky_gradient(&ray);
        }

        match scene.material(rec.material).scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Vertical white to sky-blue gradient by the normalized direction's y.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Material;
    use lumen_math::Vec3;

    fn assert_color_near(a: Color, b: Color) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0)));
        let level = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::X));

        assert_color_near(up, Color::new(0.5, 0.7, 1.0));
        assert_color_near(down, Color::ONE);
        assert_color_near(level, Color::new(0.75, 0.85, 1.0));
    }

    #[test]
    fn test_empty_scene_returns_sky() {
        let mut scene = Scene::new();
        let mut rng = XoshiroRng::seeded(0);
        scene.compute_bvh(&mut rng).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.2, 0.5, -1.0));
        assert_eq!(ray_color(&ray, &scene, &mut rng), sky_gradient(&ray));
    }

    #[test]
    fn test_mirror_attenuates_sky() {
        let mut scene = Scene::new();
        let mirror = scene.add_material(Material::metal(Color::new(0.5, 0.5, 0.5), 0.0));
        scene.add_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, mirror).unwrap();
        let mut rng = XoshiroRng::seeded(0);
        scene.compute_bvh(&mut rng).unwrap();

        // Head-on: reflects straight back along +z, a level direction
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = ray_color(&ray, &scene, &mut rng);
        assert_color_near(color, 0.5 * Color::new(0.75, 0.85, 1.0));
    }

    #[test]
    fn test_absorbed_path_is_black() {
        let mut scene = Scene::new();
        // Fully rough metal inside a closed mirror sphere: the path either
        // gets absorbed or exhausts its bounces; no light ever escapes.
        let metal = scene.add_material(Material::metal(Color::ONE, 1.0));
        scene.add_sphere(Vec3::ZERO, 10.0, metal).unwrap();
        let mut rng = XoshiroRng::seeded(1);
        scene.compute_bvh(&mut rng).unwrap();

        for _ in 0..50 {
            let dir = crate::rng::random_unit_vector(&mut rng);
            let color = ray_color(&Ray::new(Vec3::ZERO, dir), &scene, &mut rng);
            assert_eq!(color, Color::ZERO);
        }
    }

    #[test]
    fn test_lambertian_colors_are_bounded_by_albedo() {
        let mut scene = Scene::new();
        let albedo = Color::new(0.8, 0.4, 0.2);
        let diffuse = scene.add_material(Material::lambertian(albedo));
        scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, diffuse).unwrap();
        let mut rng = XoshiroRng::seeded(2);
        scene.compute_bvh(&mut rng).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -0.2));
        for _ in 0..200 {
            let c = ray_color(&ray, &scene, &mut rng);
            assert!(c.cmpge(Color::ZERO).all());
            assert!(c.cmple(albedo + Color::splat(1e-6)).all(), "{c}");
        }
    }
}
