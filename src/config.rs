//! Runtime configuration.
//!
//! [`SceneConfig`] is a plain value with sensible defaults; callers adjust the
//! fields they care about before handing it to [`crate::flow::run`].

use std::{fmt, str::FromStr};

use crate::resources::particles;

/// Which subject stands in the middle of the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Humanoid figure with swinging limbs.
    #[default]
    Mascot,
    /// Abstract torus-knot core.
    Core,
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mascot" => Ok(Variant::Mascot),
            "core" => Ok(Variant::Core),
            other => Err(anyhow::anyhow!(
                "unknown scene variant '{}', expected 'mascot' or 'core'",
                other
            )),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Mascot => f.write_str("mascot"),
            Variant::Core => f.write_str("core"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub variant: Variant,
    pub particle_count: usize,
    /// Upper bound for the device pixel ratio; sharper is not worth the fill rate.
    pub max_pixel_ratio: f32,
    /// Fixed seed for the particle field. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Element id of the canvas to render into (web only).
    pub canvas_id: String,
    pub clear_colour: wgpu::Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            particle_count: particles::DEFAULT_COUNT,
            max_pixel_ratio: 2.0,
            seed: None,
            canvas_id: "canvas".to_string(),
            clear_colour: wgpu::Color::TRANSPARENT,
        }
    }
}

impl SceneConfig {
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The ratio the drawing buffer is scaled by, fixed for the lifetime of a mount.
    pub fn pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        device_pixel_ratio.min(self.max_pixel_ratio).max(f32::EPSILON)
    }
}
