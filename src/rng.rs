//! Injectable randomness
//!
//! Simulations never touch a global RNG. Everything random (particle velocity,
//! colour jitter, obstacle placement) pulls uniform floats from a
//! [`UniformSource`], so tests can script the exact sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies uniform floats in `[0, 1)`
pub trait UniformSource {
    fn next_f32(&mut self) -> f32;

    /// Uniform float in `[lo, hi)`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }
}

/// Seeded PCG source used at runtime
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
        }
    }
}

impl UniformSource for SimRng {
    fn next_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f32>,
    index: usize,
}

impl FixedSequence {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, index: 0 }
    }

    /// A source that always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl UniformSource for FixedSequence {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
