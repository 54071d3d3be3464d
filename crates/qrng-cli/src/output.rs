//! Console output for a run.

use console::style;

use qrng_core::{Reconciliation, ReportArtifacts, SampleRun};

const PREVIEW_LEN: usize = 10;

/// Print the sample preview, the most frequent outcomes and run facts.
pub fn print_run(run: &SampleRun) {
    println!(
        "{} Done. Sampled values (first {}): {}",
        style("✓").green().bold(),
        PREVIEW_LEN,
        format_preview(&run.samples)
    );

    println!("  Raw counts (top {PREVIEW_LEN}):");
    for (bitstring, count) in run.counts.sorted().into_iter().take(PREVIEW_LEN) {
        println!("    {}: {:>6}", style(bitstring).cyan(), count);
    }

    match run.reconciliation {
        Reconciliation::Exact => {}
        Reconciliation::Padded { missing } => println!(
            "  {} backend returned {} too few outcomes; padded with 0",
            style("!").yellow().bold(),
            missing
        ),
        Reconciliation::Truncated { excess } => println!(
            "  {} backend returned {} too many outcomes; truncated",
            style("!").yellow().bold(),
            excess
        ),
    }

    if let Some(time_ms) = run.execution_time_ms {
        println!(
            "  Backend: {}, job {}, {} ms",
            style(&run.backend).yellow(),
            run.job_id,
            time_ms
        );
    }
}

/// Print where each artifact was written.
pub fn print_artifacts(artifacts: &ReportArtifacts, num_samples: usize) {
    println!(
        "{} Saved {} samples to {}",
        style("→").cyan().bold(),
        num_samples,
        style(artifacts.samples.display()).green()
    );
    println!(
        "{} Saved histogram of values to: {}",
        style("→").cyan().bold(),
        style(artifacts.histogram.display()).green()
    );
    println!(
        "{} Saved bitwise frequency plot to: {}",
        style("→").cyan().bold(),
        style(artifacts.bit_frequency.display()).green()
    );
}

fn format_preview(samples: &[u64]) -> String {
    let shown: Vec<String> = samples
        .iter()
        .take(PREVIEW_LEN)
        .map(u64::to_string)
        .collect();
    format!("[{}]", shown.join(", "))
}
