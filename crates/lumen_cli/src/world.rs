//! The default scene: a field of small random spheres around three large
//! feature spheres.

use lumen_math::Vec3;
use lumen_renderer::rng::{random_color, random_vec3};
use lumen_renderer::{Color, Material, Scene, SceneError, XoshiroRng};

/// Build the default world from `seed`, BVH included.
///
/// The same seed always yields the same spheres, materials and tree.
pub fn construct_default_world(seed: u32) -> Result<Scene, SceneError> {
    let mut rng = XoshiroRng::seeded(seed);
    let mut scene = Scene::new();

    let ground = scene.add_material(Material::lambertian(Color::new(0.8, 0.8, 0.8)));
    scene.add_sphere(Vec3::new(0.0, -1000.0, -1.0), 1000.0, ground)?;

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = rng.next_f32();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.next_f32(),
                0.2,
                b as f32 + 0.9 * rng.next_f32(),
            );

            // Keep clear of the metal feature sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.9 {
                let albedo = random_color(&mut rng) * random_color(&mut rng);
                Material::lambertian(albedo)
            } else if choose_mat < 0.95 {
                let albedo = random_vec3(&mut rng, 0.5, 1.0);
                let fuzz = rng.gen_f32(0.0, 0.5);
                Material::metal(albedo, fuzz)
            } else {
                Material::dielectric(1.5)
            };
            let id = scene.add_material(material);
            scene.add_sphere(center, 0.2, id)?;
        }
    }

    let center = scene.add_material(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let left = scene.add_material(Material::dielectric(1.5));
    let right = scene.add_material(Material::metal(Color::new(0.8, 0.6, 0.2), 0.0));

    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)?;
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, center)?;
    // Hollow glass: the negative radius flips the inner shell's normals
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, left)?;
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), -0.95, left)?;
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, right)?;

    scene.compute_bvh(&mut rng)?;
    log::debug!(
        "Default world: {} spheres, {} materials, {} BVH nodes",
        scene.primitive_count(),
        scene.material_count(),
        scene.bvh().map_or(0, |bvh| bvh.node_count())
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::{HitRecord, Hittable, Interval, Ray};

    #[test]
    fn test_default_world_is_ready() {
        let scene = construct_default_world(500).unwrap();
        assert!(scene.is_ready());

        // Ground + up to 22x22 small spheres + 5 feature spheres
        let n = scene.primitive_count();
        assert!(n > 400 && n <= 1 + 22 * 22 + 5, "{n}");
        // Every small sphere owns its material; 4 shared materials otherwise
        assert_eq!(scene.material_count(), n - 6 + 4);
        assert_eq!(scene.bvh().unwrap().node_count(), 2 * n - 1);
    }

    #[test]
    fn test_default_world_is_deterministic() {
        let a = construct_default_world(500).unwrap();
        let b = construct_default_world(500).unwrap();
        assert_eq!(a.primitives(), b.primitives());
        assert_eq!(a.bvh().unwrap().nodes(), b.bvh().unwrap().nodes());
    }

    #[test]
    fn test_camera_ray_hits_feature_spheres() {
        let scene = construct_default_world(500).unwrap();
        let origin = Vec3::new(13.0, 2.0, 3.0);
        let ray = Ray::new(origin, Vec3::new(0.0, 1.0, 0.0) - origin);
        let mut rec = HitRecord::default();

        assert!(scene.hit(&ray, Interval::new(1e-3, f32::MAX), &mut rec));
        assert!(rec.front_face);
    }
}
