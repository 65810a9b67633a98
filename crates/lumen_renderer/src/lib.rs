//! Lumen renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over spheres with Lambertian, metal and
//! dielectric materials. Scenes are built once, indexed by a BVH, then
//! rendered by a pool of workers whose partial images are averaged into
//! the final frame.

mod bvh;
mod camera;
mod error;
mod hittable;
mod image;
mod integrator;
mod material;
mod primitive;
mod renderer;
pub mod rng;
mod scene;
mod sphere;

pub use bvh::{Bvh, BvhNode, NodeId};
pub use camera::{Camera, RayGenerator};
pub use error::{RenderError, SceneError};
pub use hittable::{HitRecord, Hittable};
pub use self::image::ImageBuffer;
pub use integrator::{ray_color, sky_gradient, MAX_BOUNCES};
pub use material::{reflect, reflectance, refract, Color, Material, MaterialId, ScatterResult};
pub use primitive::Primitive;
pub use renderer::{reduce_images, RenderConfig, Renderer};
pub use rng::XoshiroRng;
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export common math types from lumen_math
pub use lumen_math::{Aabb, Axis, Interval, Ray, Vec3};
