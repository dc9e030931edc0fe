//! Batch conversion command handler
//!
//! Maps are independent, so they are converted in parallel. A map that fails
//! to read or decode is reported and skipped; the rest of the batch continues.

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use mapconv::Options;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

use crate::scan::{read_source, scan_dir};

/// Result of converting one map
#[derive(Debug)]
pub struct Outcome {
    pub name: String,
    /// Number of diagnostics on success
    pub result: Result<usize>,
}

/// Handle the convert command
///
/// # Arguments
/// * `input` - Folder holding the `.idx`/`.map`/`.obj` files
/// * `output` - Folder receiving one `<name>.json` per map
/// * `options` - Conversion options (key names, tileset, verbosity)
/// * `jobs` - Worker thread count, `None` for one per CPU
/// * `pretty` - Pretty-print the JSON output
pub fn handle(
    input: &Path,
    output: &Path,
    options: &Options,
    jobs: Option<usize>,
    pretty: bool,
) -> Result<()> {
    let scan = scan_dir(input)?;
    tracing::info!("Found a total of {} maps.", scan.total());
    tracing::info!(
        "Of those, {} were valid and {} were invalid.",
        scan.valid.len(),
        scan.invalid.len()
    );
    if !scan.invalid.is_empty() {
        tracing::warn!("Skipping incomplete maps: {}", scan.invalid.join(", "));
    }

    if scan.valid.is_empty() {
        eprintln!("No complete maps found in {}", input.display());
        return Ok(());
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output folder {}", output.display()))?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
        .context("Failed to start worker threads")?;

    let pb = ProgressBar::new(scan.valid.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let outcomes = pool.install(|| {
        convert_all(input, output, &scan.valid, options, pretty, || pb.inc(1))
    });

    pb.finish_with_message("Done");

    report(&outcomes)
}

/// Convert each named map, in parallel on the current rayon pool
pub fn convert_all<F>(
    input: &Path,
    output: &Path,
    names: &[String],
    options: &Options,
    pretty: bool,
    progress: F,
) -> Vec<Outcome>
where
    F: Fn() + Sync,
{
    names
        .par_iter()
        .map(|name| {
            let result = convert_one(input, output, name, options, pretty);
            progress();
            if let Err(ref e) = result {
                tracing::error!("{}: {:#}", name, e);
            }
            Outcome {
                name: name.clone(),
                result,
            }
        })
        .collect()
}

/// Convert one map and write `<output>/<name>.json`
fn convert_one(
    input: &Path,
    output: &Path,
    name: &str,
    options: &Options,
    pretty: bool,
) -> Result<usize> {
    let source = read_source(input, name)?;
    let converted =
        mapconv::convert(&source, options).with_context(|| format!("Failed to decode {}", name))?;

    let keyed = converted.document.keyed(&options.keys);
    let json = if pretty {
        serde_json::to_vec_pretty(&keyed)
    } else {
        serde_json::to_vec(&keyed)
    }
    .with_context(|| format!("Failed to serialize {}", name))?;

    let path = output.join(format!("{}.json", name));
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!(
        "Wrote {} ({} diagnostics)",
        path.display(),
        converted.diagnostics.len()
    );
    Ok(converted.diagnostics.len())
}

/// Print the batch summary; fails if any map failed
fn report(outcomes: &[Outcome]) -> Result<()> {
    let failed: Vec<&Outcome> = outcomes.iter().filter(|o| o.result.is_err()).collect();
    let success = outcomes.len() - failed.len();
    let diagnostics: usize = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .sum();

    eprintln!(
        "Converted: {}, Failed: {}, Diagnostics: {}",
        success,
        failed.len(),
        diagnostics
    );

    if failed.is_empty() {
        return Ok(());
    }

    for outcome in &failed {
        if let Err(e) = &outcome.result {
            eprintln!("  {}: {:#}", outcome.name, e);
        }
    }
    bail!("{} of {} maps failed to convert", failed.len(), outcomes.len())
}
