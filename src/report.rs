//! Result records and exports.
//!
//! Three shapes are produced from evaluated points:
//!
//! - a one-line sentence, e.g. `Reliability at time 100: 0.8187`
//! - a tabular record with header `Time (h), MTBF (h), Reliability (%)`
//! - a JSON document holding a whole [`Curve`]
//!
//! plus a boxed terminal table for interactive use.
//!
//! # Examples
//!
//! ```
//! use u_reliability::report::{summary_sentence, tabular_record, ReliabilityRecord};
//!
//! let record = ReliabilityRecord::evaluate(100.0, 500.0).unwrap();
//! assert_eq!(summary_sentence(&record), "Reliability at time 100: 0.8187");
//!
//! let table = tabular_record(&[record]);
//! assert_eq!(table, "Time (h), MTBF (h), Reliability (%)\n100, 500, 81.87\n");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tabled::{builder::Builder, settings::Style};
use tracing::info;

use crate::error::Result;
use crate::exponential::{evaluate, Curve};

/// Header line of the tabular record.
pub const TABLE_HEADER: &str = "Time (h), MTBF (h), Reliability (%)";

/// One evaluated point: the inputs and the reliability they produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityRecord {
    /// Time at which reliability was evaluated.
    pub time: f64,
    /// Mean time between failures.
    pub mtbf: f64,
    /// `R(time)` as a fraction in (0, 1].
    pub reliability: f64,
}

impl ReliabilityRecord {
    /// Evaluates `R(t)` and wraps the result with its inputs.
    pub fn evaluate(time: f64, mtbf: f64) -> Result<Self> {
        Ok(Self {
            time,
            mtbf,
            reliability: evaluate(time, mtbf)?,
        })
    }

    /// Reliability as a percentage.
    pub fn percent(&self) -> f64 {
        self.reliability * 100.0
    }
}

/// One record per curve sample, each carrying the curve's MTBF.
pub fn curve_records(curve: &Curve) -> Vec<ReliabilityRecord> {
    curve
        .points()
        .iter()
        .map(|p| ReliabilityRecord {
            time: p.time,
            mtbf: curve.mtbf(),
            reliability: p.reliability,
        })
        .collect()
}

/// Formats a time or MTBF for display.
///
/// Plain decimal inside [1e-4, 1e9), exponent form outside it.
///
/// ```
/// use u_reliability::report::format_value;
///
/// assert_eq!(format_value(2500.0), "2500");
/// assert_eq!(format_value(12.5), "12.5");
/// assert_eq!(format_value(1e-320), "1e-320");
/// assert_eq!(format_value(1.5e12), "1.5e12");
/// ```
pub fn format_value(v: f64) -> String {
    if v == 0.0 || (1e-4..1e9).contains(&v.abs()) {
        format!("{v}")
    } else {
        format!("{v:e}")
    }
}

/// Human-readable sentence for a single result, reliability to 4 decimals.
pub fn summary_sentence(record: &ReliabilityRecord) -> String {
    format!(
        "Reliability at time {}: {:.4}",
        format_value(record.time),
        record.reliability
    )
}

/// Renders records as the comma-separated tabular record.
///
/// One line per record after the header; percentages use 2 decimals.
pub fn tabular_record(records: &[ReliabilityRecord]) -> String {
    let mut out = String::with_capacity(TABLE_HEADER.len() + 1 + records.len() * 24);
    out.push_str(TABLE_HEADER);
    out.push('\n');
    for r in records {
        out.push_str(&format!(
            "{}, {}, {:.2}\n",
            format_value(r.time),
            format_value(r.mtbf),
            r.percent()
        ));
    }
    out
}

/// Renders records as a boxed table for terminal output.
pub fn render_table(records: &[ReliabilityRecord]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Time (h)", "MTBF (h)", "Reliability", "Reliability (%)"]);
    for r in records {
        builder.push_record([
            format_value(r.time),
            format_value(r.mtbf),
            format!("{:.6}", r.reliability),
            format!("{:.2} %", r.percent()),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Serializes a curve as pretty-printed JSON.
///
/// ```
/// use u_reliability::exponential::build_curve;
/// use u_reliability::report::curve_to_json;
///
/// let json = curve_to_json(&build_curve(10.0, 2).unwrap()).unwrap();
/// assert!(json.contains("\"mtbf\": 10.0"));
/// assert!(json.contains("\"reliability\": 1.0"));
/// ```
pub fn curve_to_json(curve: &Curve) -> Result<String> {
    Ok(serde_json::to_string_pretty(curve)?)
}

/// Writes the sentence record to `path`.
pub fn write_text_record(path: impl AsRef<Path>, record: &ReliabilityRecord) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, summary_sentence(record))?;
    info!(path = %path.display(), "saved result");
    Ok(())
}

/// Writes the tabular record for `records` to `path`.
pub fn write_tabular_record(path: impl AsRef<Path>, records: &[ReliabilityRecord]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, tabular_record(records))?;
    info!(path = %path.display(), rows = records.len(), "saved table");
    Ok(())
}

/// Writes a curve as JSON to `path`.
pub fn write_curve_json(path: impl AsRef<Path>, curve: &Curve) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, curve_to_json(curve)?)?;
    info!(path = %path.display(), points = curve.len(), "saved curve");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exponential::build_curve;

    #[test]
    fn test_record_percent() {
        let record = ReliabilityRecord::evaluate(100.0, 500.0).expect("valid");
        assert!((record.percent() - 81.873_075).abs() < 1e-5);
    }

    #[test]
    fn test_record_invalid_inputs() {
        assert!(ReliabilityRecord::evaluate(1.0, 0.0).is_err());
        assert!(ReliabilityRecord::evaluate(-1.0, 10.0).is_err());
    }

    #[test]
    fn test_summary_sentence() {
        let record = ReliabilityRecord::evaluate(0.0, 42.0).expect("valid");
        assert_eq!(summary_sentence(&record), "Reliability at time 0: 1.0000");

        let record = ReliabilityRecord::evaluate(12.5, 50.0).expect("valid");
        assert_eq!(summary_sentence(&record), "Reliability at time 12.5: 0.7788");
    }

    #[test]
    fn test_tabular_record_header_only() {
        assert_eq!(tabular_record(&[]), format!("{TABLE_HEADER}\n"));
    }

    #[test]
    fn test_tabular_record_from_curve() {
        let curve = build_curve(500.0, 3).expect("valid");
        let text = tabular_record(&curve_records(&curve));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], TABLE_HEADER);
        assert_eq!(lines[1], "0, 500, 100.00");
        assert_eq!(lines[2], "1250, 500, 8.21");
        assert_eq!(lines[3], "2500, 500, 0.67");
    }

    #[test]
    fn test_curve_records() {
        let curve = build_curve(200.0, 3).expect("valid");
        let records = curve_records(&curve);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.mtbf == 200.0));
        assert_eq!(records[0].reliability, 1.0);
        assert_eq!(records[2].time, 1000.0);
    }

    #[test]
    fn test_format_value_ranges() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(1e-4), "0.0001");
        assert_eq!(format_value(999_999_999.0), "999999999");
        assert_eq!(format_value(1e9), "1e9");
        assert_eq!(format_value(5e-5), "5e-5");
        assert_eq!(format_value(-2.5e10), "-2.5e10");
    }

    #[test]
    fn test_extreme_values_stay_readable() {
        let record = ReliabilityRecord::evaluate(0.0, 1e-320).expect("valid");
        assert_eq!(
            tabular_record(&[record]),
            format!("{TABLE_HEADER}\n0, 1e-320, 100.00\n")
        );
        assert!(render_table(&[record]).contains("1e-320"));

        let record = ReliabilityRecord::evaluate(3e12, 1.5e12).expect("valid");
        assert_eq!(summary_sentence(&record), "Reliability at time 3e12: 0.1353");
        let row = tabular_record(&[record]);
        assert!(row.ends_with("3e12, 1.5e12, 13.53\n"), "{row}");
        assert!(row.lines().all(|l| l.len() < 64));
    }

    #[test]
    fn test_render_table() {
        let record = ReliabilityRecord::evaluate(100.0, 500.0).expect("valid");
        let table = render_table(&[record]);
        assert!(table.contains("Reliability (%)"));
        assert!(table.contains("81.87 %"));
        assert!(table.contains("0.818731"));
    }

    #[test]
    fn test_curve_json_roundtrip() {
        let curve = build_curve(75.0, 9).expect("valid");
        let json = curve_to_json(&curve).expect("serializable");
        let back: Curve = serde_json::from_str(&json).expect("parseable");
        assert_eq!(back.len(), curve.len());
        assert_eq!(back.mtbf(), 75.0);
        for (a, b) in back.points().iter().zip(curve.points()) {
            assert!((a.time - b.time).abs() < 1e-12);
            assert!((a.reliability - b.reliability).abs() < 1e-15);
        }
    }

    #[test]
    fn test_write_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let record = ReliabilityRecord::evaluate(100.0, 500.0).expect("valid");

        let text_path = dir.path().join("result.txt");
        write_text_record(&text_path, &record).expect("write text");
        assert_eq!(
            fs::read_to_string(&text_path).expect("read"),
            "Reliability at time 100: 0.8187"
        );

        let table_path = dir.path().join("result.csv");
        write_tabular_record(&table_path, &[record]).expect("write table");
        let table = fs::read_to_string(&table_path).expect("read");
        assert!(table.starts_with(TABLE_HEADER));
        assert!(table.ends_with("100, 500, 81.87\n"));

        let json_path = dir.path().join("curve.json");
        let curve = build_curve(500.0, 5).expect("valid");
        write_curve_json(&json_path, &curve).expect("write json");
        let back: Curve =
            serde_json::from_str(&fs::read_to_string(&json_path).expect("read")).expect("json");
        assert_eq!(back.len(), 5);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("no-such-dir").join("result.txt");
        let record = ReliabilityRecord::evaluate(1.0, 1.0).expect("valid");
        let err = write_text_record(&path, &record).expect_err("missing parent");
        assert!(!err.is_invalid_parameter());
    }
}
