use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    /// The interval is empty (`hi < lo`) or one of its bounds is not finite.
    #[error("invalid domain [{lo}, {hi}]: upper bound must be finite and not below the lower bound")]
    InvalidDomain { lo: f64, hi: f64 },

    /// A single rejection draw needed more trials than the configured cap.
    #[error("no candidate accepted after {trials} trials, the density bound may be far too loose")]
    ExhaustedRetries { trials: u64 },

    /// Both sides of the Metropolis-Hastings acceptance ratio vanished.
    #[error("acceptance ratio is undefined when moving from {state} to {proposed}")]
    DegenerateState { state: f64, proposed: f64 },

    #[error("proposal scale must be finite and positive, got {0}")]
    InvalidScale(f64),
}

pub type Result<T> = std::result::Result<T, SamplerError>;
