//! The uniform random numbers every sampler consumes.
//!
//! Any [`rand::Rng`] is a [`UniformSource`]. [`FixedSequence`] replays a
//! hand-written list of uniforms, which makes golden-output tests possible.

use std::collections::VecDeque;

use rand::{rand_core::impls, Rng, RngCore};

/// Independent uniform reals in `[0, 1)`, one per call.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: Rng + ?Sized> UniformSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

const PRECISION: u32 = 53;

/// A generator that yields a fixed list of uniforms and then panics.
///
/// `rng.random::<f64>()` returns the listed values exactly, as long as each
/// of them is a multiple of `2^-53` in `[0, 1)` (every "round" binary
/// fraction like `0.5` or `0.375` is). Other values are truncated to that
/// grid.
///
/// # Example
///
/// ```
/// use rv_sampler::{FixedSequence, UniformSource};
///
/// let mut rng = FixedSequence::new([0.25, 0.5]);
/// assert_eq!(rng.next_uniform(), 0.25);
/// assert_eq!(rng.next_uniform(), 0.5);
/// assert_eq!(rng.remaining(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSequence {
    values: VecDeque<f64>,
}

impl FixedSequence {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let values: VecDeque<f64> = values.into_iter().collect();
        assert!(
            values.iter().all(|v| (0. ..1.).contains(v)),
            "FixedSequence values must lie in [0, 1)"
        );
        FixedSequence { values }
    }

    /// Number of uniforms not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RngCore for FixedSequence {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let value = self
            .values
            .pop_front()
            .expect("FixedSequence ran out of values");
        let mantissa = (value * (1u64 << PRECISION) as f64) as u64;
        mantissa << (64 - PRECISION)
    }

    #[inline]
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}
