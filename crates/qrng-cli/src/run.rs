//! Run implementation: sample, then report.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use qrng_adapter_sim::SimulatorBackend;
use qrng_core::{Reporter, RunConfig, Sampler};
use qrng_hal::{BackendConfig, BackendFactory};

use crate::output::{print_artifacts, print_run};

/// Execute a QRNG run.
pub async fn execute(config: &RunConfig) -> Result<()> {
    config.validate()?;

    println!(
        "{} Running QRNG: {} samples of {}-bit values...",
        style("→").cyan().bold(),
        config.shots,
        config.bits
    );

    let sampler = Sampler::new(simulator(config)?).with_bit_order(config.bit_order);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Sampling...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let run = sampler.sample(config.bits, config.shots).await;
    spinner.finish_and_clear();
    let run = run.context("Sampling failed")?;
    info!(job_id = %run.job_id, reconciliation = ?run.reconciliation, "sampling complete");

    print_run(&run);

    let artifacts = Reporter::new()
        .with_bit_order(config.bit_order)
        .report(&run.counts, &run.samples, config.bits, &config.out)
        .with_context(|| format!("Failed to write results to {}", config.out.display()))?;

    print_artifacts(&artifacts, run.samples.len());

    Ok(())
}

/// Build the local simulator, seeded when requested.
fn simulator(config: &RunConfig) -> Result<SimulatorBackend> {
    let mut backend_config = BackendConfig::new("simulator");
    if let Some(seed) = config.seed {
        backend_config = backend_config.with_extra("seed", serde_json::Value::from(seed));
    }
    SimulatorBackend::from_config(backend_config).context("Failed to create simulator backend")
}
