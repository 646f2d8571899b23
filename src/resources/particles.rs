//! The particle backdrop: a cylindrical shell of static points around the
//! subject. Only the owning node rotates; the positions never change after
//! generation.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng, rngs::StdRng};

pub const INNER_RADIUS: f32 = 2.8;
pub const RADIUS_SPREAD: f32 = 2.5;
pub const HEIGHT_SPREAD: f32 = 2.4;
pub const DEFAULT_COUNT: usize = 240;

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    points: Vec<[f32; 3]>,
}

impl ParticleField {
    /// Draws `count` points with radius in `[2.8, 5.3)` around the Y axis and
    /// height in `[-1.2, 1.2)`.
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let points = (0..count)
            .map(|_| {
                let radius = INNER_RADIUS + rng.r#gen::<f32>() * RADIUS_SPREAD;
                let angle = rng.r#gen::<f32>() * TAU;
                let height = (rng.r#gen::<f32>() - 0.5) * HEIGHT_SPREAD;
                [angle.cos() * radius, height, angle.sin() * radius]
            })
            .collect();
        Self { points }
    }

    pub fn seeded(count: usize, seed: u64) -> Self {
        Self::generate(count, &mut StdRng::seed_from_u64(seed))
    }

    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<[f32; 3]> {
        self.points
    }
}
