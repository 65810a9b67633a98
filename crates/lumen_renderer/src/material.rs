//! Surface scattering behaviours.

use crate::rng::{random_in_unit_sphere, random_unit_vector, XoshiroRng};
use crate::{HitRecord, Ray};
use lumen_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Stable index into a scene's material table.
///
/// Primitives refer to materials by index so many primitives can share one.
pub type MaterialId = usize;

/// Outcome of a scattering event that did not absorb the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Color factor applied to light arriving along `scattered`
    pub attenuation: Color,
    /// The outgoing ray, starting at the hit point
    pub scattered: Ray,
}

/// How light interacts with a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Ideal diffuse reflector.
    Lambertian { albedo: Color },
    /// Mirror with the reflected direction jittered by `roughness`.
    Metal { albedo: Color, roughness: f32 },
    /// Clear refractive material such as glass or water.
    Dielectric { refraction_index: f32 },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a metal. `roughness` is clamped to `[0, 1]`: 0 is a perfect
    /// mirror, 1 is very rough.
    pub fn metal(albedo: Color, roughness: f32) -> Self {
        Material::Metal {
            albedo,
            roughness: roughness.clamp(0.0, 1.0),
        }
    }

    /// Create a dielectric (1.0 = air, 1.5 = glass, 2.4 = diamond).
    pub fn dielectric(refraction_index: f32) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut XoshiroRng,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if near_zero(scatter_direction) {
                    scatter_direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, scatter_direction),
                })
            }
            Material::Metal { albedo, roughness } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + roughness * random_in_unit_sphere(rng);

                if direction.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.p, direction),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric { refraction_index } => {
                let refraction_ratio = if rec.front_face {
                    1.0 / refraction_index
                } else {
                    refraction_index
                };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = refraction_ratio * sin_theta > 1.0;
                let direction = if cannot_refract
                    || reflectance(cos_theta, refraction_ratio) > rng.next_f32()
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with normal `n`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[inline]
fn near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-6;
    v.abs().cmplt(Vec3::splat(S)).all()
}
