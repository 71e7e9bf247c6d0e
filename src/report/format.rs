//! Demo report: per-stage spectrum summaries, as text or JSON.

use serde::{Deserialize, Serialize};

use crate::domain::SpectrumStats;
use crate::spectrum::Spectrum;

/// One pipeline stage's summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: String,
    pub calibrated: bool,
    pub stats: Option<SpectrumStats>,
}

/// The full demo report (serializable for `--json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoReport {
    pub tool: String,
    pub seed: u64,
    pub normalization: String,
    pub rv_kms: f64,
    pub stages: Vec<StageSummary>,
}

/// Summarize a spectrum at a named pipeline stage.
pub fn summarize_stage(stage: &str, spectrum: &Spectrum) -> StageSummary {
    StageSummary {
        stage: stage.to_string(),
        calibrated: spectrum.calibrated(),
        stats: spectrum.stats(),
    }
}

/// Format the report for the terminal.
pub fn format_report(report: &DemoReport) -> String {
    let mut out = String::new();

    out.push_str("=== spectro demo ===\n");
    out.push_str(&format!("Seed: {}\n", report.seed));
    out.push_str(&format!("Normalization: {}\n", report.normalization));
    out.push_str(&format!("Doppler RV: {} km/s\n\n", report.rv_kms));

    for stage in &report.stages {
        match &stage.stats {
            Some(stats) => out.push_str(&format!(
                "{:<12} n={:<5} axis=[{:.3}, {:.3}] flux=[{:.4}, {:.4}] mean={:.4}{}\n",
                stage.stage,
                stats.n_points,
                stats.axis_min,
                stats.axis_max,
                stats.flux_min,
                stats.flux_max,
                stats.flux_mean,
                if stage.calibrated { "" } else { " (uncalibrated)" },
            )),
            None => out.push_str(&format!("{:<12} (no finite samples)\n", stage.stage)),
        }
    }

    out
}
