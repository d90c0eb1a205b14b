//! Proposal distributions for the Metropolis-Hastings chain.
//!
//! A [`ProposalFamily`] maps the current state `x` to a conditional
//! distribution `Q(.|x)`, which must both evaluate its density and draw from
//! itself. Any closure `Fn(f64) -> P` with `P: Proposal` is a family, so
//! proposals can capture whatever parameters they need.

use std::f64::consts::PI;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::{
    density::{Density, Domain},
    error::{Result, SamplerError},
    rejection::{RejectionSampler, RejectionSettings},
    uniform::UniformSource,
};

/// A conditional distribution `Q(.|x)` for a fixed current state `x`.
///
/// The density must be normalized, or at least normalized by a constant
/// that does not depend on `x`, since it enters the acceptance ratio as
/// `Q(x|y) / Q(y|x)`.
pub trait Proposal: Density {
    /// Draw a proposed next state.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64>;
}

/// Maps a state to the proposal distribution centered on it.
pub trait ProposalFamily {
    type Proposal<'family>: Proposal
    where
        Self: 'family;

    fn conditional(&self, x: f64) -> Self::Proposal<'_>;
}

impl<F, P> ProposalFamily for F
where
    F: Fn(f64) -> P,
    P: Proposal,
{
    type Proposal<'family>
        = P
    where
        Self: 'family;

    fn conditional(&self, x: f64) -> P {
        self(x)
    }
}

fn check_scale(scale: f64) -> Result<f64> {
    if scale.is_finite() && scale > 0. {
        Ok(scale)
    } else {
        Err(SamplerError::InvalidScale(scale))
    }
}

/// Gaussian random walk: `Q(.|x) = Normal(x, scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianWalk {
    scale: f64,
}

impl GaussianWalk {
    pub fn new(scale: f64) -> Result<Self> {
        Ok(GaussianWalk {
            scale: check_scale(scale)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianStep {
    center: f64,
    scale: f64,
}

impl Density for GaussianStep {
    fn density(&self, y: f64) -> f64 {
        let z = (y - self.center) / self.scale;
        (-0.5 * z * z).exp() / (self.scale * (2. * PI).sqrt())
    }
}

impl Proposal for GaussianStep {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        let z: f64 = StandardNormal.sample(rng);
        Ok(self.center + self.scale * z)
    }
}

impl ProposalFamily for GaussianWalk {
    type Proposal<'family> = GaussianStep;

    fn conditional(&self, x: f64) -> GaussianStep {
        GaussianStep {
            center: x,
            scale: self.scale,
        }
    }
}

/// Uniform random walk: `Q(.|x) = Uniform[x - half_width, x + half_width]`.
///
/// Uses a single uniform per proposal, which keeps chains driven by a
/// [`FixedSequence`](crate::FixedSequence) easy to follow by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformWalk {
    half_width: f64,
}

impl UniformWalk {
    pub fn new(half_width: f64) -> Result<Self> {
        Ok(UniformWalk {
            half_width: check_scale(half_width)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformStep {
    center: f64,
    half_width: f64,
}

impl Density for UniformStep {
    fn density(&self, y: f64) -> f64 {
        if (y - self.center).abs() <= self.half_width {
            0.5 / self.half_width
        } else {
            0.
        }
    }
}

impl Proposal for UniformStep {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        let u = rng.next_uniform();
        Ok(self.center - self.half_width + 2. * self.half_width * u)
    }
}

impl ProposalFamily for UniformWalk {
    type Proposal<'family> = UniformStep;

    fn conditional(&self, x: f64) -> UniformStep {
        UniformStep {
            center: x,
            half_width: self.half_width,
        }
    }
}

/// Proposals from an arbitrary kernel `k(x, y)`, drawn by rejection sampling.
///
/// `Q(.|x)` is supported on `[x - half_width, x + half_width]` and drawn
/// with a [`RejectionSampler`] bounded by `max_val`, so the kernel must
/// satisfy `k(x, y) <= max_val` on that window. Translation invariant
/// kernels `k(x, y) = g(y - x)` satisfy the normalization requirement of
/// [`Proposal`] automatically.
#[derive(Debug, Clone, Copy)]
pub struct BoundedKernel<K> {
    kernel: K,
    max_val: f64,
    half_width: f64,
    settings: RejectionSettings,
}

impl<K: Fn(f64, f64) -> f64> BoundedKernel<K> {
    pub fn new(
        kernel: K,
        max_val: f64,
        half_width: f64,
        settings: RejectionSettings,
    ) -> Result<Self> {
        Ok(BoundedKernel {
            kernel,
            max_val,
            half_width: check_scale(half_width)?,
            settings,
        })
    }
}

pub struct KernelStep<'family, K> {
    family: &'family BoundedKernel<K>,
    center: f64,
}

// Manual impls: the step only borrows the kernel, so `K` needs no bounds.
impl<K> Clone for KernelStep<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for KernelStep<'_, K> {}

impl<K> std::fmt::Debug for KernelStep<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelStep")
            .field("center", &self.center)
            .field("half_width", &self.family.half_width)
            .field("max_val", &self.family.max_val)
            .finish()
    }
}

impl<K: Fn(f64, f64) -> f64> Density for KernelStep<'_, K> {
    fn density(&self, y: f64) -> f64 {
        if (y - self.center).abs() <= self.family.half_width {
            (self.family.kernel)(self.center, y)
        } else {
            0.
        }
    }
}

impl<K: Fn(f64, f64) -> f64> Proposal for KernelStep<'_, K> {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        let family = self.family;
        let center = self.center;
        let window = Domain::new(center - family.half_width, center + family.half_width)?;
        RejectionSampler::new(
            |y: f64| (family.kernel)(center, y),
            family.max_val,
            window,
            family.settings,
        )
        .sample_one(rng)
    }
}

impl<K: Fn(f64, f64) -> f64> ProposalFamily for BoundedKernel<K> {
    type Proposal<'family>
        = KernelStep<'family, K>
    where
        K: 'family;

    fn conditional(&self, x: f64) -> KernelStep<'_, K> {
        KernelStep {
            family: self,
            center: x,
        }
    }
}
