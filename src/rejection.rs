use log::{debug, trace, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::{
    density::{Density, Domain},
    error::{Result, SamplerError},
    uniform::UniformSource,
};

/// Settings for the rejection sampler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionSettings {
    /// Give up on a single draw after this many rejected candidates.
    /// `None` retries until a candidate is accepted.
    pub max_trials: Option<u64>,
}

/// Draw independent samples proportional to a density on a bounded interval.
///
/// Each trial proposes a uniform candidate `x` in the domain and accepts it
/// if `u * max_val < f(x)` for a second uniform `u`. The expected number of
/// trials per sample is `max_val * width / integral(f)`.
///
/// `max_val` must bound `f` from above on the whole domain. This is not
/// checked: a loose bound only costs extra trials, but a bound below the
/// true maximum silently flattens the sampled distribution wherever `f`
/// exceeds it.
#[derive(Debug, Clone)]
pub struct RejectionSampler<F> {
    density: F,
    max_val: f64,
    domain: Domain,
    settings: RejectionSettings,
    trials: u64,
}

impl<F: Density> RejectionSampler<F> {
    pub fn new(density: F, max_val: f64, domain: Domain, settings: RejectionSettings) -> Self {
        trace!(
            "rejection sampler on [{}, {}] with bound {}",
            domain.lo(),
            domain.hi(),
            max_val
        );
        RejectionSampler {
            density,
            max_val,
            domain,
            settings,
            trials: 0,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Total number of candidates proposed by this sampler so far.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Draw a single sample.
    pub fn sample_one<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> Result<f64> {
        let mut trials = 0;
        let draw = self.draw(rng, &mut trials);
        self.trials += trials;
        draw
    }

    /// Draw `count` independent samples from one stream of uniforms.
    pub fn sample<R: UniformSource + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<f64>> {
        let mut trials = 0;
        let draws = (0..count)
            .map(|_| self.draw(rng, &mut trials))
            .collect::<Result<Vec<_>>>();
        self.trials += trials;
        debug!("{} rejection draws took {} trials", count, trials);
        draws
    }

    /// Draw `count` independent samples on `streams` rayon tasks.
    ///
    /// Task `i` owns a `ChaCha8Rng` seeded with `seed` on stream `i`, so the
    /// output only depends on `seed`, `count` and `streams`, not on thread
    /// scheduling.
    pub fn sample_parallel(&mut self, seed: u64, count: usize, streams: usize) -> Result<Vec<f64>>
    where
        F: Sync,
    {
        if count == 0 {
            return Ok(vec![]);
        }
        let streams = streams.clamp(1, count);
        let per_stream = count / streams;
        let remainder = count % streams;

        let this = &*self;
        let chunks: Vec<(Result<Vec<f64>>, u64)> = (0..streams)
            .into_par_iter()
            .map(|stream| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(stream as u64);
                let len = per_stream + usize::from(stream < remainder);
                let mut trials = 0;
                let draws = (0..len)
                    .map(|_| this.draw(&mut rng, &mut trials))
                    .collect::<Result<Vec<_>>>();
                (draws, trials)
            })
            .collect();

        // Count the trials of every stream, including failed ones.
        self.trials += chunks.iter().map(|(_, trials)| trials).sum::<u64>();
        let mut draws = Vec::with_capacity(count);
        for (chunk, _) in chunks {
            draws.extend(chunk?);
        }
        debug!(
            "{} rejection draws on {} streams, {} trials in total",
            count, streams, self.trials
        );
        Ok(draws)
    }

    fn draw<R: UniformSource + ?Sized>(&self, rng: &mut R, trials: &mut u64) -> Result<f64> {
        let mut attempts = 0u64;
        loop {
            if let Some(max_trials) = self.settings.max_trials {
                if attempts >= max_trials {
                    warn!(
                        "rejection sampler gave up after {} trials with bound {}",
                        max_trials, self.max_val
                    );
                    return Err(SamplerError::ExhaustedRetries { trials: max_trials });
                }
            }
            attempts += 1;
            *trials += 1;

            let candidate = self.domain.lerp(rng.next_uniform());
            let threshold = rng.next_uniform() * self.max_val;
            if threshold < self.density.density(candidate) {
                return Ok(candidate);
            }
        }
    }
}

/// Draw `count` samples proportional to `f` on `domain = (lo, hi)`.
///
/// Fails with [`SamplerError::InvalidDomain`] if `hi < lo`, even when
/// `count` is zero. A `count` of zero returns an empty vector and consumes
/// no uniforms.
pub fn rejection_sample<F, R>(
    f: F,
    max_val: f64,
    domain: (f64, f64),
    count: usize,
    rng: &mut R,
) -> Result<Vec<f64>>
where
    F: Density,
    R: UniformSource + ?Sized,
{
    let domain = Domain::try_from(domain)?;
    RejectionSampler::new(f, max_val, domain, RejectionSettings::default()).sample(rng, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniform::FixedSequence;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::rngs::StdRng;

    #[test]
    fn empty_count() {
        let mut rng = FixedSequence::new(Vec::new());
        let draws = rejection_sample(|_: f64| 1., 1., (0., 1.), 0, &mut rng).unwrap();
        assert!(draws.is_empty());
    }

    #[test]
    fn invalid_domain_even_for_empty_count() {
        let mut rng = StdRng::seed_from_u64(42);
        for count in [0, 1, 10] {
            let err = rejection_sample(|_: f64| 1., 1., (1., 0.), count, &mut rng).unwrap_err();
            assert_eq!(err, SamplerError::InvalidDomain { lo: 1., hi: 0. });
        }
    }

    #[test]
    fn golden_trials() {
        // Reject x = 0.25 (1.5 >= 0.5), then accept x = 0.75 (0.5 < 1.5).
        let mut rng = FixedSequence::new([0.25, 0.75, 0.75, 0.25]);
        let mut sampler =
            RejectionSampler::new(|x: f64| 2. * x, 2., Domain::unit(), Default::default());
        assert_eq!(sampler.sample_one(&mut rng).unwrap(), 0.75);
        assert_eq!(sampler.trials(), 2);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn shifted_domain() {
        let mut rng = FixedSequence::new([0.5, 0., 0.25, 0.]);
        let draws = rejection_sample(|_: f64| 1., 1., (-2., 2.), 2, &mut rng).unwrap();
        assert_eq!(draws, vec![0., -1.]);
    }

    #[test]
    fn exhausted_retries() {
        let settings = RejectionSettings {
            max_trials: Some(5),
        };
        let mut sampler = RejectionSampler::new(|_: f64| 0., 1., Domain::unit(), settings);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            sampler.sample_one(&mut rng),
            Err(SamplerError::ExhaustedRetries { trials: 5 })
        );
        assert_eq!(sampler.trials(), 5);
    }

    #[test]
    fn parallel_failure_keeps_trial_count() {
        let settings = RejectionSettings {
            max_trials: Some(3),
        };
        let mut sampler = RejectionSampler::new(|_: f64| 0., 1., Domain::unit(), settings);
        let err = sampler.sample_parallel(7, 8, 4).unwrap_err();
        assert_eq!(err, SamplerError::ExhaustedRetries { trials: 3 });
        // Every stream gives up on its first draw after three trials.
        assert_eq!(sampler.trials(), 4 * 3);
    }

    #[test]
    fn deterministic() {
        let f = |x: f64| (-x * x).exp();
        let domain = Domain::new(-2., 2.).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let first = RejectionSampler::new(f, 1., domain, Default::default())
            .sample(&mut rng, 100)
            .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let second = RejectionSampler::new(f, 1., domain, Default::default())
            .sample(&mut rng, 100)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn parallel_streams() {
        let f = |x: f64| x * (1. - x);
        let mut sampler = RejectionSampler::new(f, 0.25, Domain::unit(), Default::default());

        let draws = sampler.sample_parallel(7, 1001, 4).unwrap();
        assert_eq!(draws.len(), 1001);
        assert!(draws.iter().all(|x| (0. ..=1.).contains(x)));
        assert!(sampler.trials() >= 1001);

        let again = sampler.sample_parallel(7, 1001, 4).unwrap();
        assert_eq!(draws, again);

        assert!(sampler.sample_parallel(7, 0, 4).unwrap().is_empty());
        assert_eq!(sampler.sample_parallel(7, 3, 16).unwrap().len(), 3);
    }

    proptest! {
        #[test]
        fn draws_stay_in_domain(
            lo in -100f64..100.,
            width in 0f64..50.,
            count in 0usize..50,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let draws =
                rejection_sample(|_: f64| 1., 1., (lo, lo + width), count, &mut rng).unwrap();
            prop_assert_eq!(draws.len(), count);
            prop_assert!(draws.iter().all(|&x| lo <= x && x <= lo + width));
        }
    }
}
