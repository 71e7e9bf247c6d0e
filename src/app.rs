//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - generates a synthetic spectrum
//! - runs it through the demo pipeline (select, normalize, doppler shift)
//! - prints the per-stage report

use clap::Parser;

use crate::cli::{Cli, Command, DemoArgs};
use crate::data::SynthConfig;
use crate::error::SpectrumError;
use crate::report::{DemoReport, format_report, summarize_stage};
use crate::spectrum::Spectrum;

/// Entry point for the `spectro` binary.
pub fn run() -> Result<(), SpectrumError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Demo(args) => handle_demo(args),
    }
}

fn handle_demo(args: DemoArgs) -> Result<(), SpectrumError> {
    let config = SynthConfig {
        n_points: args.points,
        wav_min: args.wav_min,
        wav_max: args.wav_max,
        snr: (args.snr > 0.0).then_some(args.snr),
        seed: args.seed,
        ..SynthConfig::default()
    };

    let mut raw = crate::data::generate_spectrum(&config)?;
    raw.set_interp_method(args.interp);

    let mut stages = vec![summarize_stage("raw", &raw)];

    let mut working: Spectrum = raw.clone();
    if let (Some(lo), Some(hi)) = (args.select_min, args.select_max) {
        working.wav_select(lo, hi)?;
        stages.push(summarize_stage("selected", &working));
    }

    let normalized = working.normalize(args.norm)?;
    stages.push(summarize_stage("normalized", &normalized));

    let mut shifted = normalized.clone();
    shifted.doppler_shift(args.rv);
    stages.push(summarize_stage("shifted", &shifted));

    let report = DemoReport {
        tool: "spectro".to_string(),
        seed: args.seed,
        normalization: args.norm.to_string(),
        rv_kms: args.rv,
        stages,
    };

    if args.json {
        // Report serialization cannot name a spectrum error; surface it on
        // stderr and keep stdout clean for consumers.
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("failed to serialize report: {err}"),
        }
    } else {
        println!("{}", format_report(&report));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn demo_pipeline_runs_end_to_end() {
        let cli = Cli::parse_from([
            "spectro", "demo", "--select-min", "2110", "--select-max", "2150",
        ]);
        let Command::Demo(args) = cli.command;
        assert!(handle_demo(args).is_ok());
    }
}
