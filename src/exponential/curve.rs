//! Reliability curve sampling.
//!
//! Builds an evenly spaced sequence of `(t, R(t))` pairs over
//! `[0, 5 * MTBF]`. At the right edge `R = exp(-5) ≈ 0.0067`, which is
//! enough to show the whole decay on a plot.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::model::{evaluate_batch, validate_mtbf};
use crate::error::{ReliabilityError, Result};

/// Number of samples used when the caller does not choose one.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Curve horizon, in multiples of MTBF.
pub const HORIZON_MULTIPLE: f64 = 5.0;

/// One sample of a reliability curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Time, in the same unit as the MTBF.
    pub time: f64,
    /// Reliability at `time`, in (0, 1].
    pub reliability: f64,
}

/// A sampled reliability curve.
///
/// Times are strictly increasing, the first point is `(0, 1)` and the last
/// point sits exactly on `5 * MTBF`. Deserializing checks all of this, so
/// a curve read back from JSON holds the same guarantees as a freshly
/// built one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct Curve {
    mtbf: f64,
    points: Vec<CurvePoint>,
}

/// Unchecked wire form of [`Curve`].
#[derive(Deserialize)]
struct RawCurve {
    mtbf: f64,
    points: Vec<CurvePoint>,
}

/// Largest tolerated deviation of a stored reliability from `exp(-t / mtbf)`.
const RELIABILITY_TOLERANCE: f64 = 1e-12;

/// `false` for NaN on either side.
fn within(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

impl TryFrom<RawCurve> for Curve {
    type Error = ReliabilityError;

    fn try_from(raw: RawCurve) -> Result<Self> {
        let mtbf = validate_mtbf(raw.mtbf)?;
        let points = raw.points;

        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() >= 2 => (*first, *last),
            _ => {
                return Err(ReliabilityError::invalid(
                    "points",
                    points.len(),
                    "needs at least 2 samples",
                ))
            }
        };
        if first.time != 0.0 || first.reliability != 1.0 {
            return Err(ReliabilityError::invalid(
                "points",
                format!("({}, {})", first.time, first.reliability),
                "must start at (0, 1)",
            ));
        }
        if let Some(w) = points
            .windows(2)
            .find(|w| w[1].time.partial_cmp(&w[0].time) != Some(Ordering::Greater))
        {
            return Err(ReliabilityError::invalid(
                "points",
                format!("{} then {}", w[0].time, w[1].time),
                "times must be strictly increasing",
            ));
        }
        let horizon = HORIZON_MULTIPLE * mtbf;
        if !horizon.is_finite() {
            return Err(ReliabilityError::invalid("mtbf", mtbf, "5 * mtbf overflows"));
        }
        if !within(last.time, horizon, horizon * 1e-12) {
            return Err(ReliabilityError::invalid(
                "points",
                last.time,
                "last time must be 5 * mtbf",
            ));
        }
        if let Some(p) = points
            .iter()
            .find(|p| !within(p.reliability, (-p.time / mtbf).exp(), RELIABILITY_TOLERANCE))
        {
            return Err(ReliabilityError::invalid(
                "points",
                format!("R({}) = {}", p.time, p.reliability),
                "does not match exp(-t / mtbf)",
            ));
        }

        Ok(Self { mtbf, points })
    }
}

impl Curve {
    /// MTBF the curve was built from.
    pub fn mtbf(&self) -> f64 {
        self.mtbf
    }

    /// All samples, ordered by time.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a curve produced by [`build_curve`].
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The `t = 0` sample.
    pub fn first(&self) -> Option<&CurvePoint> {
        self.points.first()
    }

    /// The `t = 5 * MTBF` sample.
    pub fn last(&self) -> Option<&CurvePoint> {
        self.points.last()
    }

    /// Sample times.
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// Sample reliabilities.
    pub fn reliabilities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.reliability).collect()
    }
}

/// Returns `n` evenly spaced values over the closed interval `[start, stop]`.
///
/// The last value is `stop` exactly, not `start + (n - 1) * step`.
///
/// # Examples
///
/// ```
/// use u_reliability::exponential::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n - 1).map(|i| start + i as f64 * step).collect();
            out.push(stop);
            out
        }
    }
}

/// Samples `R(t)` at `sample_count` evenly spaced times over `[0, 5 * mtbf]`.
///
/// # Errors
///
/// [`ReliabilityError::InvalidParameter`] if `mtbf` is not positive and
/// finite, if `sample_count < 2`, if `5 * mtbf` overflows, or if `mtbf` is
/// so small that adjacent sample times would coincide.
///
/// # Examples
///
/// ```
/// use u_reliability::exponential::build_curve;
///
/// let curve = build_curve(500.0, 100).unwrap();
/// assert_eq!(curve.len(), 100);
///
/// let first = curve.first().unwrap();
/// assert_eq!((first.time, first.reliability), (0.0, 1.0));
///
/// let last = curve.last().unwrap();
/// assert_eq!(last.time, 2500.0);
/// assert!((last.reliability - 0.006738).abs() < 1e-6);
/// ```
pub fn build_curve(mtbf: f64, sample_count: usize) -> Result<Curve> {
    let mtbf = validate_mtbf(mtbf)?;
    if sample_count < 2 {
        return Err(ReliabilityError::invalid(
            "sample_count",
            sample_count,
            "must be at least 2",
        ));
    }

    let horizon = HORIZON_MULTIPLE * mtbf;
    if !horizon.is_finite() {
        return Err(ReliabilityError::invalid(
            "mtbf",
            mtbf,
            "curve horizon overflows",
        ));
    }

    let times = linspace(0.0, horizon, sample_count);
    if times.windows(2).any(|w| w[1] <= w[0]) {
        return Err(ReliabilityError::invalid(
            "mtbf",
            mtbf,
            "too small to space samples apart",
        ));
    }

    let reliabilities = evaluate_batch(&times, mtbf)?;
    let points = times
        .into_iter()
        .zip(reliabilities)
        .map(|(time, reliability)| CurvePoint { time, reliability })
        .collect();

    Ok(Curve { mtbf, points })
}

/// [`build_curve`] with [`DEFAULT_SAMPLE_COUNT`] samples.
pub fn build_default_curve(mtbf: f64) -> Result<Curve> {
    build_curve(mtbf, DEFAULT_SAMPLE_COUNT)
}
