use rand::{distr::Distribution, Rng};

use crate::uniform::UniformSource;

/// Sample by inverting a cumulative distribution function.
///
/// Wraps a quantile function `F^-1: [0, 1) -> R` and returns `F^-1(u)` for a
/// single uniform `u`. No bound or domain is needed, which makes this the
/// cheapest sampler whenever the quantile function is known in closed form.
///
/// # Example
///
/// ```
/// use rand::distr::Distribution;
/// use rv_sampler::InverseCdf;
///
/// let exponential = InverseCdf::new(|u: f64| -(-u).ln_1p());
/// let x = exponential.sample(&mut rand::rng());
/// assert!(x >= 0.);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InverseCdf<F> {
    quantile: F,
}

impl<F: Fn(f64) -> f64> InverseCdf<F> {
    pub fn new(quantile: F) -> Self {
        InverseCdf { quantile }
    }

    pub fn sample_one<R: UniformSource + ?Sized>(&self, rng: &mut R) -> f64 {
        (self.quantile)(rng.next_uniform())
    }
}

impl<F: Fn(f64) -> f64> Distribution<f64> for InverseCdf<F> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample_one(rng)
    }
}

/// Draw `count` samples through the quantile function `quantile`.
pub fn inverse_cdf_sample<F, R>(quantile: F, count: usize, rng: &mut R) -> Vec<f64>
where
    F: Fn(f64) -> f64,
    R: UniformSource + ?Sized,
{
    let sampler = InverseCdf::new(quantile);
    (0..count).map(|_| sampler.sample_one(rng)).collect()
}
