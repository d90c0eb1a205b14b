use crate::error::{Result, SamplerError};

/// A non-negative function proportional to a probability density.
///
/// The function does not need to integrate to one. It must be deterministic
/// and free of side effects, since samplers may evaluate it any number of
/// times at the same point.
pub trait Density {
    fn density(&self, x: f64) -> f64;
}

impl<F: Fn(f64) -> f64> Density for F {
    #[inline]
    fn density(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A closed interval `[lo, hi]` of finite measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    lo: f64,
    hi: f64,
}

impl Domain {
    /// Fails with [`SamplerError::InvalidDomain`] if `hi < lo` or either
    /// bound is NaN or infinite.
    pub fn new(lo: f64, hi: f64) -> Result<Domain> {
        if !(lo.is_finite() && hi.is_finite() && hi >= lo) {
            return Err(SamplerError::InvalidDomain { lo, hi });
        }
        Ok(Domain { lo, hi })
    }

    /// The unit interval `[0, 1]`.
    pub fn unit() -> Domain {
        Domain { lo: 0., hi: 1. }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Map a uniform in `[0, 1)` onto the interval.
    ///
    /// Weighs the bounds instead of scaling `width()`, which overflows to
    /// infinity for intervals wider than `f64::MAX`.
    #[inline]
    pub(crate) fn lerp(&self, u: f64) -> f64 {
        (self.lo * (1. - u) + self.hi * u).clamp(self.lo, self.hi)
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::unit()
    }
}

impl TryFrom<(f64, f64)> for Domain {
    type Error = SamplerError;

    fn try_from((lo, hi): (f64, f64)) -> Result<Domain> {
        Domain::new(lo, hi)
    }
}
