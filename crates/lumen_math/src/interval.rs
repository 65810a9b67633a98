/// A closed range of ray parameters `[min, max]`.
///
/// Hit queries carry one of these instead of a loose `(t_min, t_max)` pair;
/// the BVH narrows `max` as closer hits are found.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Nothing lies inside: `min` is above `max`.
    pub const EMPTY: Interval = Interval::new(f32::INFINITY, f32::NEG_INFINITY);

    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Closed membership test, endpoints included.
    #[inline]
    pub fn contains(&self, t: f32) -> bool {
        (self.min..=self.max).contains(&t)
    }

    /// Same lower bound, upper bound replaced by `max`.
    #[inline]
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}
