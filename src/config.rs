//! TOML settings.
//!
//! Every key is optional:
//!
//! ```toml
//! mtbf = 500.0
//! time = 100.0
//! sample_count = 100
//!
//! [plot]
//! title = "Pump reliability"
//! line_color = "#d62728"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReliabilityError, Result};
use crate::exponential::{validate_mtbf, validate_time, DEFAULT_SAMPLE_COUNT};
use crate::plot::PlotStyle;

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

/// Defaults used when a value is not given on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Default MTBF.
    #[serde(default)]
    pub mtbf: Option<f64>,
    /// Default evaluation time.
    #[serde(default)]
    pub time: Option<f64>,
    /// Samples per curve.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Plot theme.
    #[serde(default)]
    pub plot: PlotStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mtbf: None,
            time: None,
            sample_count: DEFAULT_SAMPLE_COUNT,
            plot: PlotStyle::default(),
        }
    }
}

impl Settings {
    /// Parses and validates settings from TOML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_reliability::config::Settings;
    ///
    /// let s = Settings::from_toml("mtbf = 500.0\n[plot]\nwidth = 800\n").unwrap();
    /// assert_eq!(s.mtbf, Some(500.0));
    /// assert_eq!(s.sample_count, 100);
    /// assert_eq!(s.plot.width, 800);
    /// assert_eq!(s.plot.title, "Reliability Curve");
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let settings = Self::from_toml(&text)?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Rejects out-of-domain MTBF, time and sample count values.
    pub fn validate(&self) -> Result<()> {
        if let Some(mtbf) = self.mtbf {
            validate_mtbf(mtbf)?;
        }
        if let Some(time) = self.time {
            validate_time(time)?;
        }
        if self.sample_count < 2 {
            return Err(ReliabilityError::invalid(
                "sample_count",
                self.sample_count,
                "must be at least 2",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let s = Settings::from_toml("").expect("empty is valid");
        assert_eq!(s, Settings::default());
        assert_eq!(s.sample_count, DEFAULT_SAMPLE_COUNT);
    }

    #[test]
    fn test_full_file() {
        let text = r##"
mtbf = 8760.0
time = 720.0
sample_count = 250

[plot]
title = "Pump"
x_label = "Hours"
line_color = "#d62728"
grid = false
"##;
        let s = Settings::from_toml(text).expect("valid");
        assert_eq!(s.mtbf, Some(8760.0));
        assert_eq!(s.time, Some(720.0));
        assert_eq!(s.sample_count, 250);
        assert_eq!(s.plot.title, "Pump");
        assert_eq!(s.plot.x_label, "Hours");
        assert_eq!(s.plot.y_label, "Reliability");
        assert!(!s.plot.grid);
        assert!(s.plot.legend);
    }

    #[test]
    fn test_roundtrip() {
        let s = Settings {
            mtbf: Some(500.0),
            time: Some(100.0),
            sample_count: 64,
            plot: PlotStyle::default(),
        };
        let text = toml::to_string(&s).expect("serializable");
        assert_eq!(Settings::from_toml(&text).expect("valid"), s);
    }

    #[test]
    fn test_invalid_values() {
        for text in ["mtbf = 0.0", "mtbf = -5.0", "time = -1.0", "sample_count = 1"] {
            let err = Settings::from_toml(text).expect_err(text);
            assert!(err.is_invalid_parameter(), "{text}: {err}");
        }
    }

    #[test]
    fn test_malformed_toml() {
        let err = Settings::from_toml("mtbf = ").expect_err("syntax error");
        assert!(matches!(err, ReliabilityError::Config(_)));

        let err = Settings::from_toml("colour = 3").expect_err("unknown key");
        assert!(matches!(err, ReliabilityError::Config(_)));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("reliability.toml");
        fs::write(&path, "mtbf = 42.0\n").expect("write");
        let s = Settings::load(&path).expect("load");
        assert_eq!(s.mtbf, Some(42.0));

        let missing = Settings::load(dir.path().join("missing.toml")).expect_err("missing");
        assert!(matches!(missing, ReliabilityError::Io(_)));
    }
}
