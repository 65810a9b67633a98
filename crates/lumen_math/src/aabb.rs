use crate::{Axis, Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// Stored as two corners with `minimum <= maximum` on every axis. The only
/// box that breaks this is [`Aabb::EMPTY`], which is the identity for
/// [`Aabb::surrounding`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub minimum: Vec3,
    pub maximum: Vec3,
}

impl Aabb {
    /// An inverted box that contains nothing; surrounding it with any box
    /// yields that box.
    pub const EMPTY: Aabb = Aabb {
        minimum: Vec3::splat(f32::INFINITY),
        maximum: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create an AABB from its minimum and maximum corners.
    pub fn new(minimum: Vec3, maximum: Vec3) -> Self {
        debug_assert!(minimum.cmple(maximum).all(), "inverted box {minimum} {maximum}");
        Self { minimum, maximum }
    }

    /// Create an AABB from two arbitrary opposite corners.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            minimum: a.min(b),
            maximum: a.max(b),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            minimum: box0.minimum.min(box1.minimum),
            maximum: box0.maximum.max(box1.maximum),
        }
    }

    /// Minimum coordinate along `axis`; the BVH sort key.
    #[inline]
    pub fn axis_min(&self, axis: Axis) -> f32 {
        self.minimum[axis.index()]
    }

    /// True if `other` lies entirely inside this box (boundaries included).
    pub fn encloses(&self, other: &Aabb) -> bool {
        self.minimum.cmple(other.minimum).all() && self.maximum.cmpge(other.maximum).all()
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method on all three axes at once. Near and far slab distances are
    /// ordered with componentwise min/max, so negative and zero direction
    /// components need no special casing: the cached reciprocal turns them
    /// into signed infinities. An empty or inverted `ray_t` never hits.
    #[inline]
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> bool {
        let inv_d = r.inv_direction();
        let t0 = (self.minimum - r.origin()) * inv_d;
        let t1 = (self.maximum - r.origin()) * inv_d;

        let t_min = t0.min(t1).max_element().max(ray_t.min);
        let t_max = t0.max(t1).min_element().min(ray_t.max);

        t_max >= t_min && t_min < t_max
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
