//! Draw random variates from distributions that have no closed-form sampler.
//!
//! All you need is a source of uniform random numbers and either a density
//! (possibly unnormalized) or a quantile function:
//!
//! - [`RejectionSampler`] draws independent samples from a density on a
//!   bounded interval, given an upper bound on the density.
//! - [`MetropolisChain`] simulates a Markov chain whose stationary
//!   distribution is the target density, using a [`ProposalFamily`] to
//!   propose moves.
//! - [`InverseCdf`] pushes uniforms through a quantile function.
//!
//! Every sampler takes its random numbers explicitly. Any [`rand::Rng`]
//! works, and [`FixedSequence`] replays a fixed list of uniforms for
//! reproducible tests.
//!
//! # Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use rv_sampler::{metropolis_hastings, rejection_sample, GaussianWalk};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! // Triangular density on [0, 1], bounded by 2.
//! let draws = rejection_sample(|x: f64| 2. * x, 2., (0., 1.), 100, &mut rng).unwrap();
//! assert!(draws.iter().all(|x| (0. ..=1.).contains(x)));
//!
//! // Unnormalized standard normal.
//! let walk = GaussianWalk::new(1.).unwrap();
//! let normal = |x: f64| (-0.5 * x * x).exp();
//! let draws = metropolis_hastings(normal, walk, 10, 100, &mut rng).unwrap();
//! assert_eq!(draws.len(), 10);
//! ```

pub(crate) mod density;
pub(crate) mod error;
pub(crate) mod inverse;
pub(crate) mod metropolis;
pub(crate) mod proposal;
pub(crate) mod rejection;
pub(crate) mod uniform;

pub use density::{Density, Domain};
pub use error::{Result, SamplerError};
pub use inverse::{inverse_cdf_sample, InverseCdf};
pub use metropolis::{
    metropolis_hastings, ChainStats, MetropolisChain, MetropolisSettings, ZeroDensityPolicy,
};
pub use proposal::{
    BoundedKernel, GaussianStep, GaussianWalk, KernelStep, Proposal, ProposalFamily, UniformStep,
    UniformWalk,
};
pub use rejection::{rejection_sample, RejectionSampler, RejectionSettings};
pub use uniform::{FixedSequence, UniformSource};
