use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use lumen_renderer::rng::random_vec3;
use lumen_renderer::{
    Camera, Color, HitRecord, Hittable, Interval, Material, Ray, RenderConfig, Renderer, Scene,
    Vec3, XoshiroRng,
};

fn random_scene(count: usize) -> Scene {
    let mut rng = XoshiroRng::seeded(42);
    let mut scene = Scene::new();
    let diffuse = scene.add_material(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    let metal = scene.add_material(Material::metal(Color::new(0.8, 0.6, 0.2), 0.2));
    let glass = scene.add_material(Material::dielectric(1.5));
    let materials = [diffuse, metal, glass];

    for i in 0..count {
        let center = random_vec3(&mut rng, -10.0, 10.0);
        let radius = rng.gen_f32(0.1, 0.6);
        scene.add_sphere(center, radius, materials[i % 3]).unwrap();
    }
    scene.compute_bvh(&mut rng).unwrap();
    scene
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let scene = random_scene(500);

    c.bench_function("bvh_hit/500_spheres", |b| {
        let mut rng = XoshiroRng::seeded(1);
        b.iter(|| {
            let ray = Ray::new(Vec3::new(0.0, 0.0, 20.0), random_vec3(&mut rng, -0.5, 0.5) - Vec3::Z);
            let mut rec = HitRecord::default();
            black_box(scene.hit(&ray, Interval::new(1e-3, f32::MAX), &mut rec))
        });
    });

    c.bench_function("render/32x18x8", |b| {
        let config = RenderConfig {
            width: 32,
            height: 18,
            thread_count: 4,
            samples: 8,
        };
        let renderer = Renderer::new(config).unwrap();
        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::ZERO,
            Vec3::Y,
            60.0,
            config.aspect_ratio(),
        );
        // render returns a whole image, so drop it outside the timed region
        b.iter_batched(
            || (),
            |_| renderer.render(&camera, &scene).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
