use log::{debug, trace, warn};
use rand::Rng;

use crate::{
    density::Density,
    error::{Result, SamplerError},
    proposal::{Proposal, ProposalFamily},
    uniform::UniformSource,
};

/// What to do when the acceptance ratio is `0 / 0` (or NaN).
///
/// This happens when the chain sits at a state of zero target density and
/// proposes another zero-density state, or when a density returns NaN.
/// Leaving a zero-density state for a positive one is always accepted and
/// does not involve this policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroDensityPolicy {
    /// Treat the proposal as rejected and stay at the current state.
    #[default]
    Reject,
    /// Stop sampling with [`SamplerError::DegenerateState`].
    Fail,
}

/// Settings for the Metropolis-Hastings sampler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetropolisSettings {
    /// The number of chain transitions before each retained sample.
    pub burn_in: u64,
    /// The starting state. `None` draws it uniformly from `[0, 1)`.
    pub init_state: Option<f64>,
    pub zero_density: ZeroDensityPolicy,
}

impl Default for MetropolisSettings {
    fn default() -> Self {
        Self {
            burn_in: 10_000,
            init_state: None,
            zero_density: ZeroDensityPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainStats {
    pub steps: u64,
    pub accepted: u64,
}

impl ChainStats {
    /// Fraction of accepted transitions, NaN before the first step.
    pub fn acceptance_rate(&self) -> f64 {
        self.accepted as f64 / self.steps as f64
    }
}

/// A single Markov chain whose stationary distribution is the target.
///
/// Consecutive calls to [`draw`](MetropolisChain::draw) continue the same
/// chain, so retained samples are a thinned chain and remain autocorrelated
/// unless `burn_in` is large compared to the mixing time of the proposal.
pub struct MetropolisChain<T, Q> {
    target: T,
    family: Q,
    settings: MetropolisSettings,
    state: f64,
    stats: ChainStats,
}

impl<T: Density, Q: ProposalFamily> MetropolisChain<T, Q> {
    /// Create a chain at `settings.init_state`, or at a uniform draw from
    /// `[0, 1)` if none is given.
    pub fn new<R: Rng + ?Sized>(
        target: T,
        family: Q,
        settings: MetropolisSettings,
        rng: &mut R,
    ) -> Self {
        let state = match settings.init_state {
            Some(state) => state,
            None => rng.next_uniform(),
        };
        debug!(
            "metropolis chain starting at {} with burn-in {}",
            state, settings.burn_in
        );
        MetropolisChain {
            target,
            family,
            settings,
            state,
            stats: ChainStats::default(),
        }
    }

    /// The current state of the chain.
    pub fn state(&self) -> f64 {
        self.state
    }

    pub fn stats(&self) -> ChainStats {
        self.stats
    }

    /// Perform one transition and report whether the proposal was accepted.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<bool> {
        let current = self.state;
        let forward = self.family.conditional(current);
        let proposed = forward.draw(rng)?;
        let backward = self.family.conditional(proposed);

        let numerator = self.target.density(proposed) * backward.density(current);
        let denominator = self.target.density(current) * forward.density(proposed);

        let accept_prob = match acceptance_probability(numerator, denominator) {
            Some(prob) => prob,
            None => match self.settings.zero_density {
                ZeroDensityPolicy::Reject => {
                    trace!("undefined acceptance ratio from {} to {}", current, proposed);
                    0.
                }
                ZeroDensityPolicy::Fail => {
                    warn!("undefined acceptance ratio from {} to {}", current, proposed);
                    return Err(SamplerError::DegenerateState {
                        state: current,
                        proposed,
                    });
                }
            },
        };

        let accepted = rng.next_uniform() < accept_prob;
        self.stats.steps += 1;
        if accepted {
            self.state = proposed;
            self.stats.accepted += 1;
        }
        trace!(
            "proposal {} from {} with acceptance {}: {}",
            proposed,
            current,
            accept_prob,
            if accepted { "accepted" } else { "rejected" }
        );
        Ok(accepted)
    }

    /// Run `burn_in` transitions and return the resulting state.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<f64> {
        for _ in 0..self.settings.burn_in {
            self.step(rng)?;
        }
        Ok(self.state)
    }

    /// Retain `count` consecutive draws of the chain.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Result<Vec<f64>> {
        let draws = (0..count)
            .map(|_| self.draw(rng))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "{} metropolis draws after {} steps, acceptance rate {:.3}",
            count,
            self.stats.steps,
            self.stats.acceptance_rate()
        );
        Ok(draws)
    }
}

/// `min(1, numerator / denominator)`, or `None` when the ratio is undefined.
fn acceptance_probability(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0. {
        let ratio = numerator / denominator;
        if ratio.is_nan() {
            None
        } else {
            Some(ratio.min(1.))
        }
    } else if numerator > 0. {
        Some(1.)
    } else {
        None
    }
}

/// Draw `count` samples from the target `pi` with proposals from `q`.
///
/// The chain starts at a uniform draw from `[0, 1)` and runs `burn_in`
/// transitions before each retained sample, continuing from the previous
/// one. A `count` of zero returns an empty vector and consumes no uniforms.
pub fn metropolis_hastings<T, Q, R>(
    pi: T,
    q: Q,
    count: usize,
    burn_in: u64,
    rng: &mut R,
) -> Result<Vec<f64>>
where
    T: Density,
    Q: ProposalFamily,
    R: Rng + ?Sized,
{
    if count == 0 {
        return Ok(vec![]);
    }
    let settings = MetropolisSettings {
        burn_in,
        ..Default::default()
    };
    MetropolisChain::new(pi, q, settings, rng).sample(rng, count)
}
