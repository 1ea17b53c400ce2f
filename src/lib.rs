//! # u-reliability
//!
//! Exponential (constant hazard rate) reliability: evaluate
//! `R(t) = exp(-t / MTBF)` and sample it into a plottable curve.
//!
//! The computation is pure and stateless. Text parsing, exports and
//! rendering sit in separate modules that only call into it.
//!
//! ## Modules
//!
//! - [`exponential`] - R(t), hazard rate, B-life, curve sampling over [0, 5·MTBF]
//! - [`input`] - parsing MTBF and time from user text
//! - [`report`] - sentence record, `Time (h), MTBF (h), Reliability (%)` table, JSON curve
//! - [`plot`] - SVG line plot with a data-driven [`plot::PlotStyle`]
//! - [`config`] - TOML settings
//! - [`error`] - [`ReliabilityError`]
//!
//! ## Example
//!
//! ```
//! use u_reliability::exponential::{build_default_curve, evaluate};
//!
//! let r = evaluate(100.0, 500.0).unwrap();
//! assert!((r - 0.818731).abs() < 1e-6);
//!
//! let curve = build_default_curve(500.0).unwrap();
//! assert_eq!(curve.len(), 100);
//! assert_eq!(curve.last().unwrap().time, 2500.0);
//! ```

pub mod config;
pub mod error;
pub mod exponential;
pub mod input;
pub mod plot;
pub mod report;

pub use error::{ReliabilityError, Result};
