//! jagodno: does a dedicated bus lane beat one more general lane?
//!
//! Runs the preset layouts (A: 3 lanes, B: 2 + bus lane, C: 3 + bus lane,
//! D: 4 lanes) over the same seed sequence and prints a comparison table.
//! Layouts with a bus lane are also run against their matched baseline (the
//! bus lane turned into a general lane) under the same seed.
//!
//! ```text
//! jagodno --variant all --seed 42 --reruns 5 --output ./simulation_data
//! RUST_LOG=debug jagodno --variant b --duration 1800
//! ```

mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;

use jg_core::{LaneConfiguration, SimRng, SimulationParameters, Variant};
use jg_metrics::SummaryReport;
use jg_output::{CsvWriter, SimOutputObserver};
use jg_sim::{NoopObserver, SimBuilder};

use report::{RunRow, print_comparison, print_loaded, print_means};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum VariantArg {
    A,
    B,
    C,
    D,
    All,
}

impl VariantArg {
    fn variants(self) -> Vec<Variant> {
        match self {
            VariantArg::A   => vec![Variant::A],
            VariantArg::B   => vec![Variant::B],
            VariantArg::C   => vec![Variant::C],
            VariantArg::D   => vec![Variant::D],
            VariantArg::All => Variant::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "jagodno")]
#[command(about = "Compare a dedicated bus lane with an extra general lane")]
struct Cli {
    /// Lane layout to simulate
    #[arg(long, value_enum, default_value_t = VariantArg::All)]
    variant: VariantArg,

    /// Base seed; rerun n uses a seed derived from it
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of seeds to run every layout with
    #[arg(long, default_value_t = 1)]
    reruns: u64,

    /// Simulated seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Road length in km
    #[arg(long)]
    road_length: Option<f64>,

    /// Share of privileged vehicles (buses), 0..=1
    #[arg(long)]
    privileged: Option<f64>,

    /// Directory to write one CSV run directory per layout and seed into
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn parameters(&self) -> SimulationParameters {
        let mut params = SimulationParameters::default();
        if let Some(duration) = self.duration {
            params.simulation_duration = duration;
        }
        if let Some(road_length) = self.road_length {
            params.road_length = road_length;
            // Keep side roads (and the lights placed on them) at the same
            // relative positions.
            let scale = road_length / SimulationParameters::default().road_length;
            for p in &mut params.side_road_positions {
                *p *= scale;
            }
        }
        if let Some(privileged) = self.privileged {
            params.privileged_percentage = privileged;
        }
        params
    }
}

// ── Runs ──────────────────────────────────────────────────────────────────────

/// Directory of one run under the output root.
pub(crate) fn run_dir(root: &Path, label: &str, seed: u64) -> PathBuf {
    root.join(format!("{label}_seed{seed}"))
}

/// Run one configuration to the horizon, writing CSVs under `output` when
/// given.  Returns the short layout description and the summary.
fn run_one(
    label:  &str,
    config: LaneConfiguration,
    params: &SimulationParameters,
    seed:   u64,
    output: Option<&Path>,
) -> Result<(String, SummaryReport)> {
    let mut sim = SimBuilder::new(config, params.clone(), seed)
        .build()
        .with_context(|| format!("configuring {label}"))?;
    let layout = sim.describe_short();

    let Some(root) = output else {
        return Ok((layout, sim.run(&mut NoopObserver)));
    };

    let dir = run_dir(root, label, seed);
    let writer = CsvWriter::new(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut observer = SimOutputObserver::new(writer, &sim);
    let summary = sim.run(&mut observer);
    if let Some(e) = observer.take_error() {
        return Err(anyhow::Error::new(e).context(format!("writing {}", dir.display())));
    }
    info!("{label}: wrote {}", dir.display());
    Ok((layout, summary))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.reruns == 0 {
        bail!("--reruns must be at least 1");
    }
    let params = cli.parameters();
    params.validate().context("invalid simulation parameters")?;
    let variants = cli.variant.variants();
    let output = cli.output.as_deref();

    info!(
        "{} layout(s) x {} seed(s), {:.0}s on {:.2} km, {:.0}% privileged",
        variants.len(),
        cli.reruns,
        params.simulation_duration,
        params.road_length,
        params.privileged_percentage * 100.0,
    );

    let mut rows = Vec::new();
    for rerun in 0..cli.reruns {
        let seed = SimRng::rerun_seed(cli.seed, rerun);
        for &variant in &variants {
            let config = variant.lane_configuration(&params);
            let baseline = config.baseline();
            let (layout, summary) = run_one(variant.as_str(), config, &params, seed, output)?;

            let vs_baseline = match baseline {
                Some(baseline) => {
                    let label = format!("{variant}_baseline");
                    let (_, base) = run_one(&label, baseline, &params, seed, None)?;
                    summary.efficiency_against(&base)
                }
                None => None,
            };
            rows.push(RunRow { variant, seed, layout, summary, vs_baseline });
        }
    }

    print_comparison(&rows);
    if cli.reruns > 1 {
        print_means(&rows, &variants);
    }
    if let Some(root) = output {
        print_loaded(root, &rows)?;
    }
    Ok(())
}
