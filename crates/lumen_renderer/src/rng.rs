//! Per-thread pseudorandom source for every stochastic decision.
//!
//! The generator is xoshiro256+: 256 bits of state, one add for the output
//! and a fixed shift/xor/rotate network to advance. It is fast, has good
//! statistical quality in its high bits (which is all a float sample uses)
//! and is trivially cheap to give each worker its own instance. Not
//! suitable for anything security related.

use lumen_math::Vec3;
use rand::{Error, RngCore, SeedableRng};

/// Scales a 24-bit integer into `[0, 1)`.
const F32_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

/// xoshiro256+ state owned by exactly one rendering context.
///
/// Two generators seeded with the same value produce bit-identical streams
/// for the same call sequence, whichever thread runs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XoshiroRng {
    s: [u64; 4],
}

impl XoshiroRng {
    /// Build a generator from a 32-bit seed (typically a thread index).
    pub fn seeded(seed: u32) -> Self {
        Self::seed_from_u64(u64::from(seed))
    }

    /// Uniform float in `[0, 1)` built from the top 24 bits of the output.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        ((self.next_u64() >> 40) as u32) as f32 * F32_UNIT
    }

    /// Uniform float in `[min, max)`.
    #[inline]
    pub fn gen_f32(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Uniform integer in `[min, max]`, inclusive on both ends.
    pub fn gen_i32(&mut self, min: i32, max: i32) -> i32 {
        let v = self.gen_f32(min as f32, max as f32 + 1.0) as i32;
        v.min(max)
    }
}

impl RngCore for XoshiroRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = &mut self.s;
        let result = s0.wrapping_add(*s3);
        let t = *s1 << 17;

        *s2 ^= *s0;
        *s3 ^= *s1;
        *s1 ^= *s2;
        *s0 ^= *s3;

        *s2 ^= t;
        *s3 = s3.rotate_left(45);

        result
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XoshiroRng {
    type Seed = [u8; 32];

    fn from_seed(seed: [u8; 32]) -> Self {
        // All-zero state is a fixed point of the generator.
        if seed.iter().all(|&b| b == 0) {
            return Self::seed_from_u64(0);
        }
        let mut s = [0u64; 4];
        for (word, bytes) in s.iter_mut().zip(seed.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(bytes);
            *word = u64::from_le_bytes(le);
        }
        Self { s }
    }

    /// Expand a 64-bit seed through SplitMix64, the conventional way to
    /// initialise xoshiro state.
    fn seed_from_u64(seed: u64) -> Self {
        let mut state = seed;
        let mut splitmix = || {
            state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        };
        Self {
            s: [splitmix(), splitmix(), splitmix(), splitmix()],
        }
    }
}

/// Random vector with each component in `[min, max)`.
#[inline]
pub fn random_vec3(rng: &mut XoshiroRng, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        rng.gen_f32(min, max),
        rng.gen_f32(min, max),
        rng.gen_f32(min, max),
    )
}

/// Random color with each channel in `[0, 1)`.
#[inline]
pub fn random_color(rng: &mut XoshiroRng) -> Vec3 {
    random_vec3(rng, 0.0, 1.0)
}

/// Uniform point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut XoshiroRng) -> Vec3 {
    loop {
        let p = random_vec3(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere.
///
/// Points too close to the origin are rejected so normalising never divides
/// by (almost) zero.
pub fn random_unit_vector(rng: &mut XoshiroRng) -> Vec3 {
    loop {
        let p = random_vec3(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        if len_sq > 1e-12 && len_sq < 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn test_matches_reference_xoshiro256plus() {
        for seed in [0u32, 1, 7, 500, u32::MAX] {
            let mut ours = XoshiroRng::seeded(seed);
            let mut reference = Xoshiro256Plus::seed_from_u64(u64::from(seed));
            for _ in 0..1000 {
                assert_eq!(ours.next_u64(), reference.next_u64());
            }
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = XoshiroRng::seeded(42);
        let mut b = XoshiroRng::seeded(42);
        for _ in 0..256 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = XoshiroRng::seeded(0);
        let mut b = XoshiroRng::seeded(1);
        let same = (0..64).filter(|_| a.next_u64() == b.next_u64()).count();
        assert_eq!(same, 0);
    }

    #[test]
    fn test_zero_seed_bytes_are_remapped() {
        let mut rng = XoshiroRng::from_seed([0u8; 32]);
        assert_ne!(rng.next_u64() | rng.next_u64(), 0);
    }

    #[test]
    fn test_next_f32_in_unit_range() {
        let mut rng = XoshiroRng::seeded(9);
        let mut sum = 0.0f64;
        let n = 100_000;
        for _ in 0..n {
            let x = rng.next_f32();
            assert!((0.0..1.0).contains(&x), "{x} out of range");
            sum += x as f64;
        }
        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean {mean}");
    }

    #[test]
    fn test_gen_f32_range() {
        let mut rng = XoshiroRng::seeded(11);
        for _ in 0..10_000 {
            let x = rng.gen_f32(-3.0, 2.0);
            assert!((-3.0..2.0).contains(&x));
        }
    }

    #[test]
    fn test_gen_i32_inclusive_and_covers_range() {
        let mut rng = XoshiroRng::seeded(5);
        let mut seen = [0usize; 3];
        for _ in 0..3000 {
            let i = rng.gen_i32(0, 2);
            assert!((0..=2).contains(&i));
            seen[i as usize] += 1;
        }
        assert!(seen.iter().all(|&c| c > 800), "{seen:?}");
    }

    #[test]
    fn test_works_through_rand_api() {
        let mut rng = XoshiroRng::seeded(1);
        let x: f64 = rng.gen();
        assert!((0.0..1.0).contains(&x));

        let mut buf = [0u8; 13];
        rng.fill_bytes(&mut buf);
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_unit_sphere_samples() {
        let mut rng = XoshiroRng::seeded(2);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
            let u = random_unit_vector(&mut rng);
            assert!((u.length() - 1.0).abs() < 1e-5);
        }
    }
}
