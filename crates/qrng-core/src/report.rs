//! Report artifacts: the samples file and two charts.
//!
//! | File | Content |
//! |------|---------|
//! | `random_bits.txt` | one decimal sample per line |
//! | `random_values_hist.png` | observed count per value |
//! | `bitwise_frequency.png` | fraction of 1s per bit position |

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use qrng_hal::Counts;

use crate::bit_order::BitOrder;
use crate::charts::PlottersRenderer;
use crate::config::validate_bit_width;
use crate::error::{QrngError, QrngResult};

/// Samples file name.
pub const SAMPLES_FILE: &str = "random_bits.txt";
/// Value histogram image name.
pub const HISTOGRAM_FILE: &str = "random_values_hist.png";
/// Bit-frequency chart image name.
pub const BIT_FREQUENCY_FILE: &str = "bitwise_frequency.png";

/// Something that can turn report data into image files.
pub trait ChartRenderer {
    /// Render `(value, count)` bars, sorted by value, for `bit_width`-bit values.
    fn histogram(
        &self,
        path: &Path,
        title: &str,
        bars: &[(u64, u64)],
        bit_width: u32,
    ) -> QrngResult<()>;

    /// Render one bar per bit position; `fractions[0]` is the LSB.
    fn bit_fractions(&self, path: &Path, title: &str, fractions: &[f64]) -> QrngResult<()>;
}

/// Paths written by [`Reporter::report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    /// The samples text file.
    pub samples: PathBuf,
    /// The value histogram.
    pub histogram: PathBuf,
    /// The bit-frequency chart.
    pub bit_frequency: PathBuf,
}

impl ReportArtifacts {
    fn in_dir(dir: &Path) -> Self {
        Self {
            samples: dir.join(SAMPLES_FILE),
            histogram: dir.join(HISTOGRAM_FILE),
            bit_frequency: dir.join(BIT_FREQUENCY_FILE),
        }
    }

    /// All paths, in write order.
    pub fn paths(&self) -> [&Path; 3] {
        [
            self.samples.as_path(),
            self.histogram.as_path(),
            self.bit_frequency.as_path(),
        ]
    }
}

/// Writes the report artifacts for a run.
pub struct Reporter<R = PlottersRenderer> {
    renderer: R,
    bit_order: BitOrder,
}

impl Reporter<PlottersRenderer> {
    /// Reporter rendering PNGs with the default sizes.
    pub fn new() -> Self {
        Self::with_renderer(PlottersRenderer::default())
    }
}

impl Default for Reporter<PlottersRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ChartRenderer> Reporter<R> {
    /// Reporter using a custom renderer.
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            bit_order: BitOrder::default(),
        }
    }

    /// Decoding for histogram keys; must match the sampler's.
    #[must_use]
    pub fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }

    /// The renderer in use.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Write all artifacts into `out_dir`, creating it if needed.
    ///
    /// Existing files with the same names are overwritten.
    pub fn report(
        &self,
        counts: &Counts,
        samples: &[u64],
        bit_width: u32,
        out_dir: &Path,
    ) -> QrngResult<ReportArtifacts> {
        validate_bit_width(bit_width)?;
        fs::create_dir_all(out_dir).map_err(|e| QrngError::io(out_dir, e))?;
        let artifacts = ReportArtifacts::in_dir(out_dir);

        write_samples(&artifacts.samples, samples)?;
        info!(path = %artifacts.samples.display(), count = samples.len(), "wrote samples");

        let bars = value_histogram(counts, bit_width, self.bit_order)?;
        self.renderer.histogram(
            &artifacts.histogram,
            &histogram_title(samples.len(), bit_width),
            &bars,
            bit_width,
        )?;
        info!(path = %artifacts.histogram.display(), "wrote value histogram");

        let fractions = bit_fractions(samples, bit_width);
        self.renderer.bit_fractions(
            &artifacts.bit_frequency,
            BIT_FREQUENCY_TITLE,
            &fractions,
        )?;
        info!(path = %artifacts.bit_frequency.display(), "wrote bit frequency chart");

        Ok(artifacts)
    }
}

const BIT_FREQUENCY_TITLE: &str = "Bitwise frequency (fraction of 1s per bit position)";

fn histogram_title(num_samples: usize, bit_width: u32) -> String {
    format!("QRNG: {num_samples} samples, {bit_width}-bit values (raw counts)")
}

/// Write samples as newline-delimited decimal integers.
pub fn write_samples(path: &Path, samples: &[u64]) -> QrngResult<()> {
    let file = File::create(path).map_err(|e| QrngError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for sample in samples {
        writeln!(writer, "{sample}").map_err(|e| QrngError::io(path, e))?;
    }
    writer.flush().map_err(|e| QrngError::io(path, e))
}

/// Read a file written by [`write_samples`].
pub fn read_samples(path: &Path) -> QrngResult<Vec<u64>> {
    let text = fs::read_to_string(path).map_err(|e| QrngError::io(path, e))?;
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            line.trim().parse().map_err(|_| QrngError::ParseSample {
                line: i + 1,
                content: line.to_string(),
            })
        })
        .collect()
}

/// Decode a frequency table into `(value, count)` pairs sorted by value.
pub fn value_histogram(
    counts: &Counts,
    bit_width: u32,
    bit_order: BitOrder,
) -> QrngResult<Vec<(u64, u64)>> {
    let mut bars = BTreeMap::new();
    for (bitstring, &count) in counts.iter() {
        *bars.entry(bit_order.decode(bitstring, bit_width)?).or_insert(0) += count;
    }
    Ok(bars.into_iter().collect())
}

/// Fraction of samples with bit `i` set, for each `i` in `0..bit_width`.
///
/// Bit 0 is the least significant. An empty sample list yields zeros.
#[allow(clippy::cast_precision_loss)]
pub fn bit_fractions(samples: &[u64], bit_width: u32) -> Vec<f64> {
    let mut ones = vec![0usize; bit_width as usize];
    for &sample in samples {
        for (count, bit) in ones.iter_mut().zip(0u32..) {
            if sample.checked_shr(bit).unwrap_or(0) & 1 == 1 {
                *count += 1;
            }
        }
    }

    if samples.is_empty() {
        return vec![0.0; ones.len()];
    }
    let total = samples.len() as f64;
    ones.into_iter().map(|c| c as f64 / total).collect()
}
