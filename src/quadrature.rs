//! Fixed-resolution composite Simpson quadrature.

use crate::errors::{MagneticFieldError, Result};
use crate::math::Scalar;

/// Composite Simpson rule over an even number of sub-intervals.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simpson {
    intervals: usize,
}

impl Simpson {
    /// Rule used for boundary projections over the winding window (32 sub-intervals).
    pub const WINDOW: Self = Self { intervals: 32 };
    /// Rule used for projections over a single gap (16 sub-intervals).
    pub const GAP: Self = Self { intervals: 16 };

    /// Creates a rule with `intervals` sub-intervals; the count must be even and non-zero.
    pub fn new(intervals: usize) -> Result<Self> {
        if intervals == 0 || intervals % 2 != 0 {
            return Err(MagneticFieldError::InvalidInput(format!(
                "Simpson's rule needs an even, non-zero interval count, got {intervals}"
            )));
        }
        Ok(Self { intervals })
    }

    /// Number of sub-intervals.
    #[must_use]
    pub const fn intervals(&self) -> usize {
        self.intervals
    }

    /// Integrates `f` over `[lower, upper]`.
    pub fn integrate<F>(&self, lower: Scalar, upper: Scalar, f: F) -> Scalar
    where
        F: Fn(Scalar) -> Scalar,
    {
        let h = (upper - lower) / self.intervals as Scalar;
        let mut sum = f(lower) + f(upper);
        for i in 1..self.intervals {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * f(lower + i as Scalar * h);
        }
        sum * h / 3.0
    }
}

/// Integrates `f` over `[lower, upper]` with `intervals` Simpson sub-intervals.
pub fn simpson<F>(f: F, lower: Scalar, upper: Scalar, intervals: usize) -> Result<Scalar>
where
    F: Fn(Scalar) -> Scalar,
{
    Ok(Simpson::new(intervals)?.integrate(lower, upper, f))
}
