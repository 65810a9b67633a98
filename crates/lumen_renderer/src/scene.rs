//! Scene: primitives, the materials they reference, and the BVH over them.

use crate::bvh::Bvh;
use crate::error::SceneError;
use crate::rng::XoshiroRng;
use crate::{HitRecord, Hittable, Material, MaterialId, Primitive, Ray, Sphere};
use lumen_math::{Aabb, Interval, Vec3};

/// Everything the integrator needs to trace paths.
///
/// Populate materials and primitives, then call [`Scene::compute_bvh`]
/// exactly once. After that the scene is frozen and can be shared by
/// reference across render threads.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    materials: Vec<Material>,
    bvh: Option<Bvh>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material and return the id primitives use to reference it.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Append a sphere and return its index in the primitive list.
    pub fn add_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        material: MaterialId,
    ) -> Result<usize, SceneError> {
        self.add_primitive(Sphere::new(center, radius, material).into())
    }

    /// Append a primitive.
    ///
    /// Fails if the primitive's material does not exist yet or if the BVH
    /// has already been built.
    pub fn add_primitive(&mut self, primitive: Primitive) -> Result<usize, SceneError> {
        if self.bvh.is_some() {
            return Err(SceneError::SceneFrozen);
        }
        let id = primitive.material();
        if id >= self.materials.len() {
            return Err(SceneError::UnknownMaterial {
                id,
                count: self.materials.len(),
            });
        }
        self.primitives.push(primitive);
        Ok(self.primitives.len() - 1)
    }

    /// Build the BVH over all primitives. Must be called once, after the
    /// last primitive is added and before rendering.
    pub fn compute_bvh(&mut self, rng: &mut XoshiroRng) -> Result<(), SceneError> {
        if self.bvh.is_some() {
            return Err(SceneError::BvhAlreadyBuilt);
        }
        self.bvh = Some(Bvh::build(&self.primitives, rng));
        Ok(())
    }

    /// True once the BVH exists and the scene can be rendered.
    pub fn is_ready(&self) -> bool {
        self.bvh.is_some()
    }

    pub fn bvh(&self) -> Option<&Bvh> {
        self.bvh.as_ref()
    }

    /// Look up a material. Ids handed out by [`Scene::add_material`] are
    /// always valid.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id]
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

impl Hittable for Scene {
    /// Nearest hit through the BVH. A scene whose BVH has not been built
    /// hits nothing.
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        match &self.bvh {
            Some(bvh) => bvh.hit(&self.primitives, ray, ray_t, rec),
            None => false,
        }
    }

    fn bounding_box(&self) -> Aabb {
        self.primitives
            .iter()
            .fold(Aabb::EMPTY, |acc, p| Aabb::surrounding(&acc, &p.bounding_box()))
    }
}
