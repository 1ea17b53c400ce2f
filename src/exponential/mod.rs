//! Constant-hazard (exponential) reliability.
//!
//! # Modules
//!
//! - [`evaluate`] / [`evaluate_batch`] - R(t) = exp(-t/MTBF) for one or many times
//! - [`ExponentialReliability`] - hazard rate, unreliability, B-life from a validated MTBF
//! - [`build_curve`] - evenly sampled `(t, R)` curve over `[0, 5·MTBF]`
//!
//! # References
//!
//! - Meeker, W.Q. & Escobar, L.A. (1998). *Statistical Methods for
//!   Reliability Data*, Wiley.
//! - O'Connor, P. & Kleyner, A. (2012). *Practical Reliability
//!   Engineering*, 5th ed., Wiley.

mod curve;
mod model;

pub use curve::{
    build_curve, build_default_curve, linspace, Curve, CurvePoint, DEFAULT_SAMPLE_COUNT,
    HORIZON_MULTIPLE,
};
pub use model::{evaluate, evaluate_batch, ExponentialReliability};
pub(crate) use model::{validate_mtbf, validate_time};
