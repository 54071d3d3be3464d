//! QRNG core: quantum random sampling and reporting.
//!
//! A [`Sampler`] builds an `n`-qubit circuit that puts every qubit into an
//! equal superposition, runs it on any [`qrng_hal::Backend`], and turns the
//! returned frequency table into exactly `shots` integers in
//! `[0, 2^n - 1]`. A [`Reporter`] writes those samples to disk together with
//! a value histogram and a per-bit frequency chart.
//!
//! # Example
//!
//! ```ignore
//! use qrng_adapter_sim::SimulatorBackend;
//! use qrng_core::{Reporter, Sampler};
//!
//! let sampler = Sampler::new(SimulatorBackend::new());
//! let run = sampler.sample(16, 1024).await?;
//! assert_eq!(run.samples.len(), 1024);
//!
//! Reporter::new().report(&run.counts, &run.samples, 16, "results".as_ref())?;
//! ```
//!
//! # Reconciliation
//!
//! If a backend reports more or fewer outcomes than requested, the expanded
//! list is truncated or zero-padded to `shots` entries. This masks a backend
//! fault, so it is logged at `warn` level and recorded in
//! [`SampleRun::reconciliation`].

pub mod bit_order;
pub mod charts;
pub mod circuit;
pub mod config;
pub mod error;
pub mod report;
pub mod sampler;

pub use bit_order::BitOrder;
pub use charts::PlottersRenderer;
pub use circuit::random_bits_circuit;
pub use config::{DEFAULT_BITS, DEFAULT_OUT, DEFAULT_SHOTS, MAX_BITS, RunConfig};
pub use error::{QrngError, QrngResult};
pub use report::{
    BIT_FREQUENCY_FILE, ChartRenderer, HISTOGRAM_FILE, ReportArtifacts, Reporter, SAMPLES_FILE,
    bit_fractions, read_samples, value_histogram, write_samples,
};
pub use sampler::{Reconciliation, SampleRun, Sampler, expand_counts, reconcile};
