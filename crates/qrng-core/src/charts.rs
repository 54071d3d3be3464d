//! PNG rendering with `plotters`.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::error::{QrngError, QrngResult};
use crate::report::ChartRenderer;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 18);

/// Rasterizes report charts to PNG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlottersRenderer {
    /// Value histogram size in pixels.
    pub histogram_size: (u32, u32),
    /// Bit-frequency chart size in pixels.
    pub bit_fraction_size: (u32, u32),
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            histogram_size: (600, 400),
            bit_fraction_size: (600, 300),
        }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn histogram(
        &self,
        path: &Path,
        title: &str,
        bars: &[(u64, u64)],
        bit_width: u32,
    ) -> QrngResult<()> {
        draw_histogram(path, self.histogram_size, title, bars, bit_width)
            .map_err(|e| chart_error(path, e.as_ref()))
    }

    fn bit_fractions(&self, path: &Path, title: &str, fractions: &[f64]) -> QrngResult<()> {
        draw_bit_fractions(path, self.bit_fraction_size, title, fractions)
            .map_err(|e| chart_error(path, e.as_ref()))
    }
}

fn chart_error(path: &Path, err: &dyn Error) -> QrngError {
    QrngError::Chart {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn draw_histogram(
    path: &Path,
    size: (u32, u32),
    title: &str,
    bars: &[(u64, u64)],
    bit_width: u32,
) -> Result<(), Box<dyn Error>> {
    let x_max = 2f64.powi(i32::try_from(bit_width)?);
    let y_max = bars.iter().map(|&(_, count)| count).max().unwrap_or(0).max(1) as f64;
    // Keep every bar at least one pixel wide on wide value ranges.
    let bar_width = (x_max / f64::from(size.0)).max(1.0);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..x_max, 0f64..(y_max * 1.1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Value")
        .y_desc("Count")
        .x_label_formatter(&|x| format!("{x:.0}"))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .draw()?;

    chart.draw_series(bars.iter().map(|&(value, count)| {
        let x0 = value as f64;
        Rectangle::new([(x0, 0.0), (x0 + bar_width, count as f64)], BLUE.filled())
    }))?;

    root.present()?;
    Ok(())
}

fn draw_bit_fractions(
    path: &Path,
    size: (u32, u32),
    title: &str,
    fractions: &[f64],
) -> Result<(), Box<dyn Error>> {
    let num_bits = u32::try_from(fractions.len())?;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..num_bits).into_segmented(), 0f64..1f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Bit index (LSB = 0)")
        .y_desc("Fraction of 1s")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.8).filled())
            .margin(4)
            .data(
                fractions
                    .iter()
                    .zip(0u32..)
                    .map(|(&fraction, bit)| (bit, fraction)),
            ),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_renders_png_files() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PlottersRenderer::default();

        let hist = dir.path().join("hist.png");
        renderer
            .histogram(&hist, "hist", &[(0, 3), (5, 1), (7, 4)], 3)
            .unwrap();

        let bits = dir.path().join("bits.png");
        renderer
            .bit_fractions(&bits, "bits", &[0.25, 0.5, 1.0])
            .unwrap();

        for path in [hist, bits] {
            let bytes = std::fs::read(&path).unwrap();
            assert_eq!(&bytes[..8], &PNG_MAGIC, "{} is not a PNG", path.display());
        }
    }

    #[test]
    fn test_empty_histogram_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        PlottersRenderer::default()
            .histogram(&path, "empty", &[], 4)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_path_is_chart_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("hist.png");
        let err = PlottersRenderer::default()
            .histogram(&path, "hist", &[(1, 1)], 1)
            .unwrap_err();
        assert!(matches!(err, QrngError::Chart { .. }));
    }
}
