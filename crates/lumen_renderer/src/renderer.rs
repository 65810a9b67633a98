//! Parallel renderer.
//!
//! Rendering runs in two phases on a persistent worker pool:
//! - Sampling: every worker owns a full-size image and its own RNG seeded
//!   from the worker index, and traces its share of the sample budget.
//! - Reduction: images are averaged pairwise in rounds (offset 2, 4, 8, ...)
//!   until the mean of all of them sits at index 0.

use crate::camera::RayGenerator;
use crate::error::RenderError;
use crate::integrator::ray_color;
use crate::rng::XoshiroRng;
use crate::{Color, ImageBuffer, Scene};
use rayon::prelude::*;
use std::time::Instant;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of workers; must be a power of two
    pub thread_count: usize,
    /// Samples per pixel across all workers
    pub samples: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 560,
            height: 315,
            thread_count: 4,
            samples: 64,
        }
    }
}

impl RenderConfig {
    /// Check every field before any render work starts.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.thread_count.is_power_of_two() {
            return Err(RenderError::InvalidThreadCount(self.thread_count));
        }
        if self.samples == 0 {
            return Err(RenderError::InvalidSampleCount);
        }
        if (self.samples as usize) < self.thread_count {
            return Err(RenderError::TooFewSamples {
                samples: self.samples,
                threads: self.thread_count,
            });
        }
        Ok(())
    }

    /// Samples traced by worker `index`. The budget is split evenly and the
    /// last worker also takes the remainder.
    pub fn samples_for_thread(&self, index: usize) -> u32 {
        let threads = self.thread_count as u32;
        let share = self.samples / threads;
        if index + 1 == self.thread_count {
            share + self.samples % threads
        } else {
            share
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Multi-threaded renderer owning its worker pool.
pub struct Renderer {
    config: RenderConfig,
    pool: rayon::ThreadPool,
}

impl Renderer {
    /// Validate `config` and start `thread_count` workers.
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .thread_name(|i| format!("lumen-worker-{i}"))
            .build()?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `scene` as seen by `camera`.
    ///
    /// The output depends only on the configuration and the scene: the same
    /// inputs give a bit-identical image on every run.
    pub fn render<C: RayGenerator>(
        &self,
        camera: &C,
        scene: &Scene,
    ) -> Result<ImageBuffer, RenderError> {
        if !scene.is_ready() {
            return Err(RenderError::SceneNotReady);
        }

        let config = self.config;
        log::info!(
            "Rendering {}x{} with {} samples on {} threads",
            config.width,
            config.height,
            config.samples,
            config.thread_count
        );

        let start = Instant::now();
        let mut images = vec![ImageBuffer::new(config.width, config.height); config.thread_count];
        self.pool.install(|| {
            images.par_iter_mut().enumerate().for_each(|(index, image)| {
                let worker_start = Instant::now();
                let samples = config.samples_for_thread(index);
                render_samples(image, index as u32, samples, camera, scene);
                log::debug!(
                    "Worker {} traced {} samples/pixel in {:.2?}",
                    index,
                    samples,
                    worker_start.elapsed()
                );
            });
        });
        log::info!("Sampling finished in {:.2?}", start.elapsed());

        let start = Instant::now();
        let image = self.pool.install(|| reduce_images(images));
        log::info!("Reduction finished in {:.2?}", start.elapsed());

        Ok(image)
    }
}

/// Fill `image` with `samples` jittered samples per pixel, seeding the RNG
/// from `seed`. Pixels are written gamma corrected.
fn render_samples<C: RayGenerator>(
    image: &mut ImageBuffer,
    seed: u32,
    samples: u32,
    camera: &C,
    scene: &Scene,
) {
    let mut rng = XoshiroRng::seeded(seed);
    let width = image.width();
    let height = image.height();
    let u_scale = (width.saturating_sub(1)).max(1) as f32;
    let v_scale = (height.saturating_sub(1)).max(1) as f32;

    for y in 0..height {
        for x in 0..width {
            let mut sum = Color::ZERO;
            for _ in 0..samples {
                let u = (x as f32 + rng.next_f32()) / u_scale;
                let v = (y as f32 + rng.next_f32()) / v_scale;
                let ray = camera.ray_for(u, v);
                sum += ray_color(&ray, scene, &mut rng);
            }
            image.set(x, y, gamma_correct(sum / samples as f32));
        }
    }
}

/// Gamma 2 encode a linear color.
#[inline]
fn gamma_correct(c: Color) -> Color {
    Color::new(c.x.max(0.0).sqrt(), c.y.max(0.0).sqrt(), c.z.max(0.0).sqrt())
}

/// Average all `images` into one with a pairwise tree reduction.
///
/// Round `k` pairs `images[i]` with `images[i + offset / 2]` for every `i`
/// that is a multiple of `offset = 2^k`; pairs within a round are disjoint
/// and run in parallel. For a power-of-two count the result is the
/// per-pixel arithmetic mean of every input.
///
/// # Panics
///
/// If `images` is empty, its length is not a power of two, or the images
/// differ in size.
pub fn reduce_images(mut images: Vec<ImageBuffer>) -> ImageBuffer {
    assert!(!images.is_empty(), "cannot reduce an empty image set");
    assert!(
        images.len().is_power_of_two(),
        "image count must be a power of two, got {}",
        images.len()
    );

    let mut offset = 2;
    while offset / 2 < images.len() {
        let half = offset / 2;
        images.par_chunks_mut(offset).for_each(|chunk| {
            if chunk.len() > half {
                let (dst, src) = chunk.split_at_mut(half);
                dst[0].average(&src[0]);
            }
        });
        log::debug!("Reduction round with offset {} complete", offset);
        offset *= 2;
    }

    images.swap_remove(0)
}
