//! Error types for scene construction and rendering.

use thiserror::Error;

use crate::MaterialId;

/// Errors raised while assembling a [`Scene`](crate::Scene).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("material id {id} does not exist (scene has {count} materials)")]
    UnknownMaterial { id: MaterialId, count: usize },

    #[error("scene is frozen: primitives cannot be added after the BVH is built")]
    SceneFrozen,

    #[error("BVH has already been built for this scene")]
    BvhAlreadyBuilt,
}

/// Errors raised while configuring or running a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("image width and height must both be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("thread count must be a non-zero power of two, got {0}")]
    InvalidThreadCount(usize),

    #[error("sample count must be positive")]
    InvalidSampleCount,

    #[error("{samples} samples cannot be split across {threads} threads")]
    TooFewSamples { samples: u32, threads: usize },

    #[error("scene BVH has not been built; call compute_bvh before rendering")]
    SceneNotReady,

    #[error("failed to start render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
