//! End-to-end tests for the `qrng` binary.
//!
//! Each test runs the compiled binary against a temporary output directory
//! with a seeded simulator.

use std::path::Path;
use std::process::{Command, Output};

use qrng_core::{BIT_FREQUENCY_FILE, HISTOGRAM_FILE, SAMPLES_FILE, read_samples};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

fn qrng(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qrng"))
        .args(args)
        .env_remove("QRNG_BITS")
        .env_remove("QRNG_SHOTS")
        .env_remove("QRNG_OUT")
        .env_remove("QRNG_BIT_ORDER")
        .env_remove("QRNG_SEED")
        .output()
        .expect("failed to launch qrng")
}

fn run_in(out: &Path, extra: &[&str]) -> Output {
    let out = out.to_str().unwrap();
    let mut args = vec!["--out", out];
    args.extend_from_slice(extra);
    qrng(&args)
}

#[test]
fn test_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results");

    let output = run_in(&out, &["--bits", "6", "--shots", "200", "--seed", "1"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let samples = read_samples(&out.join(SAMPLES_FILE)).unwrap();
    assert_eq!(samples.len(), 200);
    assert!(samples.iter().all(|&v| v < 64));

    for image in [HISTOGRAM_FILE, BIT_FREQUENCY_FILE] {
        let bytes = std::fs::read(out.join(image)).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC, "{image} is not a PNG");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Running QRNG: 200 samples of 6-bit values..."));
    assert!(stdout.contains("Sampled values (first 10)"));
    assert!(stdout.contains("Saved 200 samples to"));
}

#[test]
fn test_seeded_runs_match() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");

    for out in [&a, &b] {
        let output = run_in(out, &["--bits", "5", "--shots", "64", "--seed", "77"]);
        assert!(output.status.success());
    }

    let mut first = read_samples(&a.join(SAMPLES_FILE)).unwrap();
    let mut second = read_samples(&b.join(SAMPLES_FILE)).unwrap();
    first.sort_unstable();
    second.sort_unstable();
    assert_eq!(first, second);
}

#[test]
fn test_env_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("env");

    let output = Command::new(env!("CARGO_BIN_EXE_qrng"))
        .env("QRNG_BITS", "3")
        .env("QRNG_SHOTS", "17")
        .env("QRNG_OUT", &out)
        .env("QRNG_SEED", "5")
        .env_remove("QRNG_BIT_ORDER")
        .output()
        .unwrap();
    assert!(output.status.success());

    let samples = read_samples(&out.join(SAMPLES_FILE)).unwrap();
    assert_eq!(samples.len(), 17);
    assert!(samples.iter().all(|&v| v < 8));
}

#[test]
fn test_too_many_bits_for_simulator_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &["--bits", "40", "--shots", "4"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Sampling failed"), "stderr: {stderr}");
    assert!(!dir.path().join(SAMPLES_FILE).exists());
}

#[test]
fn test_invalid_flag_value_fails() {
    let output = qrng(&["--shots", "0"]);
    assert!(!output.status.success());
}

#[test]
fn test_unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let output = run_in(&blocker, &["--bits", "2", "--shots", "4", "--seed", "3"]);
    assert!(!output.status.success());
}
