//! QRNG Command-Line Interface
//!
//! Draws random integers from a simulated quantum circuit and writes the
//! samples plus two charts to an output directory.
//!
//! ```text
//! qrng --bits 16 --shots 1024 --out results
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use qrng_core::{BitOrder, DEFAULT_BITS, DEFAULT_OUT, DEFAULT_SHOTS, RunConfig};

mod output;
mod run;

/// QRNG - quantum random number generator on a local statevector simulator
#[derive(Parser, Debug)]
#[command(name = "qrng")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of bits per random number (one qubit each)
    #[arg(
        long,
        env = "QRNG_BITS",
        default_value_t = DEFAULT_BITS,
        value_parser = clap::value_parser!(u32).range(1..=64)
    )]
    bits: u32,

    /// Number of samples to draw
    #[arg(
        long,
        env = "QRNG_SHOTS",
        default_value_t = DEFAULT_SHOTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    shots: u32,

    /// Output folder
    #[arg(long, env = "QRNG_OUT", default_value = DEFAULT_OUT)]
    out: PathBuf,

    /// How outcome bit-strings map to integers (msb-first, lsb-first)
    #[arg(long, env = "QRNG_BIT_ORDER", default_value_t = BitOrder::MsbFirst)]
    bit_order: BitOrder,

    /// Seed the simulator for a reproducible run
    #[arg(long, env = "QRNG_SEED")]
    seed: Option<u64>,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        RunConfig {
            bits: self.bits,
            shots: self.shots,
            out: self.out,
            bit_order: self.bit_order,
            seed: self.seed,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run::execute(&cli.into_config()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["qrng"]).unwrap();
        let config = cli.into_config();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "qrng",
            "--bits",
            "8",
            "--shots",
            "100",
            "--out",
            "/tmp/q",
            "--bit-order",
            "lsb-first",
            "--seed",
            "42",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let config = cli.into_config();
        assert_eq!(config.bits, 8);
        assert_eq!(config.shots, 100);
        assert_eq!(config.out, PathBuf::from("/tmp/q"));
        assert_eq!(config.bit_order, BitOrder::LsbFirst);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_rejects_out_of_range_bits() {
        assert!(Cli::try_parse_from(["qrng", "--bits", "0"]).is_err());
        assert!(Cli::try_parse_from(["qrng", "--bits", "65"]).is_err());
        assert!(Cli::try_parse_from(["qrng", "--bits", "64"]).is_ok());
    }

    #[test]
    fn test_rejects_zero_shots() {
        assert!(Cli::try_parse_from(["qrng", "--shots", "0"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_bit_order() {
        assert!(Cli::try_parse_from(["qrng", "--bit-order", "sideways"]).is_err());
    }

    #[test]
    fn test_no_subcommands() {
        assert!(Cli::try_parse_from(["qrng", "run"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
