//! Comparison tables printed to stdout.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use jg_core::{Variant, VehicleClass};
use jg_metrics::SummaryReport;
use jg_output::{RunSummary, load_run_summary};

use crate::run_dir;

/// One finished run of one layout.
pub struct RunRow {
    pub variant:     Variant,
    pub seed:        u64,
    pub layout:      String,
    pub summary:     SummaryReport,
    /// Privileged trips against the matched baseline; layouts with a bus
    /// lane only.
    pub vs_baseline: Option<f64>,
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0u32), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub fn print_comparison(rows: &[RunRow]) {
    println!();
    println!(
        "{:<3} {:<11} {:>20} {:>6} {:>9} {:>9} {:>8} {:>7} {:>7} {:>7} {:>9} {:>8} {:>8}",
        "", "layout", "seed", "done", "travel s", "km/h", "wait s", "jam km", "backlog", "util %",
        "bus s", "bus eff", "vs base",
    );
    for row in rows {
        let s = &row.summary;
        println!(
            "{:<3} {:<11} {:>20} {:>6} {:>9.1} {:>9.1} {:>8.1} {:>7.3} {:>7} {:>7.1} {:>9.1} {:>8} {:>8}",
            row.variant.as_str(),
            row.layout,
            row.seed,
            s.completed_vehicles,
            s.average_travel_time,
            s.average_speed,
            s.average_waiting_time,
            s.average_jam_length,
            s.max_queue_length,
            s.summary_row().map_or(0.0, |u| u.utilization_percent),
            s.class(VehicleClass::Privileged).average_travel_time,
            percent(s.bus_lane_efficiency),
            percent(row.vs_baseline),
        );
    }
}

/// Per-layout means over all seeds.
pub fn print_means(rows: &[RunRow], variants: &[Variant]) {
    println!();
    println!(
        "{:<3} {:>6} {:>9} {:>9} {:>8} {:>7} {:>8}",
        "", "runs", "travel s", "km/h", "wait s", "jam km", "vs base",
    );
    for &variant in variants {
        let runs: Vec<&RunRow> = rows.iter().filter(|r| r.variant == variant).collect();
        let of = |f: fn(&SummaryReport) -> f64| mean(runs.iter().map(|r| f(&r.summary))).unwrap_or(0.0);
        println!(
            "{:<3} {:>6} {:>9.1} {:>9.1} {:>8.1} {:>7.3} {:>8}",
            variant.as_str(),
            runs.len(),
            of(|s| s.average_travel_time),
            of(|s| s.average_speed),
            of(|s| s.average_waiting_time),
            of(|s| s.average_jam_length),
            percent(mean(runs.iter().filter_map(|r| r.vs_baseline))),
        );
    }
}

/// Reload every written run and compare each bus-lane layout with its
/// counterpart (B with A, C with D) at the same seed.
pub fn print_loaded(root: &Path, rows: &[RunRow]) -> Result<()> {
    let mut loaded: BTreeMap<(u64, &'static str), RunSummary> = BTreeMap::new();
    for row in rows {
        let dir = run_dir(root, row.variant.as_str(), row.seed);
        let summary = load_run_summary(&dir).with_context(|| format!("loading {}", dir.display()))?;
        loaded.insert((row.seed, row.variant.as_str()), summary);
    }

    println!();
    println!("Reloaded from {}:", root.display());
    println!("{:<3} {:>20} {:>6} {:>9} {:>9} {:>8} {:>13}", "", "seed", "done", "travel s", "km/h", "bus eff", "vs counterpart");
    for row in rows {
        let Some(run) = loaded.get(&(row.seed, row.variant.as_str())) else {
            continue;
        };
        let counterpart = row.variant.counterpart();
        let vs_counterpart = if run.has_dedicated_lane {
            loaded
                .get(&(row.seed, counterpart.as_str()))
                .and_then(|other| run.efficiency_against(other))
        } else {
            None
        };
        println!(
            "{:<3} {:>20} {:>6} {:>9.1} {:>9.1} {:>8} {:>13}",
            row.variant.as_str(),
            row.seed,
            run.completed_vehicles,
            run.average_travel_time,
            run.average_speed,
            percent(run.bus_lane_efficiency),
            percent(vs_counterpart),
        );
    }
    Ok(())
}
