//! Exponential reliability law.
//!
//! ```text
//! R(t) = exp(-t / MTBF)
//! ```
//!
//! The constant-hazard model: the failure rate is `λ = 1 / MTBF` at every
//! age, so a unit that has survived to time `s` is as good as new.
//!
//! # Reference
//! Meeker & Escobar (1998), *Statistical Methods for Reliability Data*,
//! Wiley, Ch. 4.

use crate::error::{ReliabilityError, Result};

/// Checks that `mtbf` is a positive finite real.
pub(crate) fn validate_mtbf(mtbf: f64) -> Result<f64> {
    if !mtbf.is_finite() {
        return Err(ReliabilityError::invalid("mtbf", mtbf, "must be finite"));
    }
    if mtbf <= 0.0 {
        return Err(ReliabilityError::invalid("mtbf", mtbf, "must be positive"));
    }
    Ok(mtbf)
}

/// Checks that `t` is a non-negative finite real.
pub(crate) fn validate_time(t: f64) -> Result<f64> {
    if !t.is_finite() {
        return Err(ReliabilityError::invalid("t", t, "must be finite"));
    }
    if t < 0.0 {
        return Err(ReliabilityError::invalid("t", t, "must be non-negative"));
    }
    Ok(t)
}

/// Evaluates the exponential reliability `R(t) = exp(-t / mtbf)`.
///
/// The result lies in (0, 1] for ordinary inputs and is exactly `1.0` at
/// `t = 0`. Very large `t` underflows to `0.0`, which is not an error.
///
/// # Errors
///
/// [`ReliabilityError::InvalidParameter`] if `mtbf <= 0`, `t < 0`, or either
/// value is NaN or infinite.
///
/// # Examples
///
/// ```
/// use u_reliability::exponential::evaluate;
///
/// assert_eq!(evaluate(0.0, 500.0).unwrap(), 1.0);
///
/// let r = evaluate(100.0, 500.0).unwrap();
/// assert!((r - (-0.2_f64).exp()).abs() < 1e-15);
///
/// assert!(evaluate(10.0, 0.0).is_err());
/// assert!(evaluate(-1.0, 500.0).is_err());
/// ```
pub fn evaluate(t: f64, mtbf: f64) -> Result<f64> {
    let mtbf = validate_mtbf(mtbf)?;
    let t = validate_time(t)?;
    Ok((-t / mtbf).exp())
}

/// Evaluates `R(t)` for every time in `times`.
///
/// All-or-nothing: the first invalid time aborts the whole call and no
/// partial result is returned.
///
/// # Examples
///
/// ```
/// use u_reliability::exponential::evaluate_batch;
///
/// let r = evaluate_batch(&[0.0, 50.0, 100.0], 100.0).unwrap();
/// assert_eq!(r.len(), 3);
/// assert_eq!(r[0], 1.0);
/// assert!(r[1] > r[2]);
///
/// assert!(evaluate_batch(&[0.0, -1.0], 100.0).is_err());
/// ```
pub fn evaluate_batch(times: &[f64], mtbf: f64) -> Result<Vec<f64>> {
    let mtbf = validate_mtbf(mtbf)?;
    times
        .iter()
        .enumerate()
        .map(|(i, &t)| -> Result<f64> {
            validate_time(t).map_err(|e| match e {
                ReliabilityError::InvalidParameter { reason, .. } => {
                    ReliabilityError::invalid("t", format!("{t} (index {i})"), reason)
                }
                other => other,
            })?;
            Ok((-t / mtbf).exp())
        })
        .collect()
}

/// Reliability analysis for a unit with a constant failure rate.
///
/// Validates the MTBF once, then exposes the usual reliability engineering
/// quantities derived from it.
///
/// # Examples
///
/// ```
/// use u_reliability::exponential::ExponentialReliability;
///
/// let unit = ExponentialReliability::new(500.0).unwrap();
/// assert!((unit.reliability(500.0).unwrap() - (-1.0_f64).exp()).abs() < 1e-12);
/// assert!((unit.hazard_rate() - 0.002).abs() < 1e-15);
///
/// let b10 = unit.b_life(0.10).unwrap();
/// assert!(b10 > 0.0 && b10 < 500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialReliability {
    mtbf: f64,
}

impl ExponentialReliability {
    /// Creates an analysis for the given MTBF.
    ///
    /// # Errors
    /// [`ReliabilityError::InvalidParameter`] if `mtbf` is not positive and finite.
    pub fn new(mtbf: f64) -> Result<Self> {
        Ok(Self {
            mtbf: validate_mtbf(mtbf)?,
        })
    }

    /// Returns the mean time between failures.
    pub fn mtbf(&self) -> f64 {
        self.mtbf
    }

    /// Reliability (survival probability) at time `t`.
    pub fn reliability(&self, t: f64) -> Result<f64> {
        evaluate(t, self.mtbf)
    }

    /// Probability of having failed by time `t`, `F(t) = 1 - R(t)`.
    ///
    /// Computed with `exp_m1` so small `t / MTBF` ratios keep full precision.
    pub fn unreliability(&self, t: f64) -> Result<f64> {
        let t = validate_time(t)?;
        Ok(-(-t / self.mtbf).exp_m1())
    }

    /// Failure rate, `λ = 1 / MTBF`, independent of age.
    pub fn hazard_rate(&self) -> f64 {
        1.0 / self.mtbf
    }

    /// Time at which reliability drops to `p`.
    ///
    /// ```text
    /// t = -MTBF * ln(p)
    /// ```
    ///
    /// # Errors
    /// [`ReliabilityError::InvalidParameter`] unless `p` is in (0, 1].
    ///
    /// # Examples
    ///
    /// ```
    /// use u_reliability::exponential::ExponentialReliability;
    ///
    /// let unit = ExponentialReliability::new(100.0).unwrap();
    /// let median = unit.time_to_reliability(0.5).unwrap();
    /// assert!((median - 100.0 * 2.0_f64.ln()).abs() < 1e-10);
    /// assert_eq!(unit.time_to_reliability(1.0).unwrap(), 0.0);
    /// assert!(unit.time_to_reliability(0.0).is_err());
    /// ```
    pub fn time_to_reliability(&self, p: f64) -> Result<f64> {
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            return Err(ReliabilityError::invalid("p", p, "must be in (0, 1]"));
        }
        if p == 1.0 {
            return Ok(0.0);
        }
        Ok(-self.mtbf * p.ln())
    }

    /// B-life: time by which `fraction_failed` of the population has failed.
    ///
    /// `b_life(0.10)` is the B10 life, equal to `time_to_reliability(0.90)`.
    ///
    /// # Errors
    /// [`ReliabilityError::InvalidParameter`] unless `fraction_failed` is in [0, 1).
    pub fn b_life(&self, fraction_failed: f64) -> Result<f64> {
        if !fraction_failed.is_finite() || !(0.0..1.0).contains(&fraction_failed) {
            return Err(ReliabilityError::invalid(
                "fraction_failed",
                fraction_failed,
                "must be in [0, 1)",
            ));
        }
        self.time_to_reliability(1.0 - fraction_failed)
    }

    /// Samples the reliability curve over `[0, 5 * MTBF]`.
    pub fn curve(&self, sample_count: usize) -> Result<super::Curve> {
        super::build_curve(self.mtbf, sample_count)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn reliability_in_unit_interval(
            mtbf in 1e-3_f64..1e6,
            t in 0.0_f64..1e6,
        ) {
            let r = evaluate(t, mtbf).expect("valid inputs");
            prop_assert!((0.0..=1.0).contains(&r), "R = {r}");
        }

        #[test]
        fn reliability_strictly_decays(
            mtbf in 1.0_f64..1e4,
            ratio in 0.0_f64..20.0,
            gap in 1e-6_f64..5.0,
        ) {
            // ratios up to 25 stay well clear of exp underflow
            let t1 = ratio * mtbf;
            let t2 = (ratio + gap) * mtbf;
            let r1 = evaluate(t1, mtbf).expect("valid");
            let r2 = evaluate(t2, mtbf).expect("valid");
            prop_assert!(r1 > r2, "R({t1}) = {r1} <= R({t2}) = {r2}");
        }

        #[test]
        fn reliability_at_mtbf(mtbf in 1e-6_f64..1e9) {
            let r = evaluate(mtbf, mtbf).expect("valid");
            prop_assert!((r - (-1.0_f64).exp()).abs() < 1e-9);
        }

        #[test]
        fn negative_time_rejected(mtbf in 1e-3_f64..1e6, t in -1e6_f64..-1e-9) {
            prop_assert!(evaluate(t, mtbf).is_err());
        }

        #[test]
        fn non_positive_mtbf_rejected(mtbf in -1e6_f64..=0.0, t in 0.0_f64..1e3) {
            prop_assert!(evaluate(t, mtbf).is_err());
        }
    }
}
