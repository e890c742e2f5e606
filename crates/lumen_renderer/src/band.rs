//! Row-band partitioning for parallel rendering.
//!
//! The image is cut into contiguous runs of rows, one per worker. Each band
//! renders into its own buffer with its own random stream, so workers share
//! nothing mutable and the result does not depend on scheduling.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable};
use lumen_core::RenderSettings;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Instant;

/// A contiguous run of output rows.
///
/// Rows are counted in output order: row 0 is the top of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First output row of the band
    pub first_row: u32,
    /// Number of rows in the band
    pub rows: u32,
    /// Position of this band in top-to-bottom order
    pub index: usize,
}

impl RowBand {
    /// Create a new band.
    pub fn new(first_row: u32, rows: u32, index: usize) -> Self {
        Self {
            first_row,
            rows,
            index,
        }
    }

    /// One past the last output row of the band.
    pub fn end_row(&self) -> u32 {
        self.first_row + self.rows
    }

    /// Get the total number of pixels in this band.
    pub fn pixel_count(&self, width: u32) -> usize {
        self.rows as usize * width as usize
    }
}

/// Split `height` rows into at most `workers` contiguous bands.
///
/// Sizes differ by at most one row; the first `height % n` bands take the
/// extra rows. Never returns empty bands.
pub fn partition_rows(height: u32, workers: usize) -> Vec<RowBand> {
    let count = (workers.max(1) as u32).min(height);
    if count == 0 {
        return Vec::new();
    }

    let base = height / count;
    let remainder = height % count;

    let mut bands = Vec::with_capacity(count as usize);
    let mut first_row = 0;
    for index in 0..count {
        let rows = base + u32::from(index < remainder);
        bands.push(RowBand::new(first_row, rows, index as usize));
        first_row += rows;
    }

    bands
}

/// Random stream for a band: master seed plus band index.
pub fn band_rng(seed: u64, band_index: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(band_index as u64))
}

/// Result of rendering a band.
#[derive(Debug, Clone)]
pub struct BandResult {
    /// The band that was rendered
    pub band: RowBand,
    /// Averaged linear colors in row-major output order
    pub pixels: Vec<Color>,
}

impl BandResult {
    /// Create a new band result.
    pub fn new(band: RowBand, pixels: Vec<Color>) -> Self {
        Self { band, pixels }
    }
}

/// Render every pixel of a band, top row first.
pub fn render_band(
    band: &RowBand,
    camera: &Camera,
    world: &dyn Hittable,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> BandResult {
    let start = Instant::now();
    let width = settings.image_width;
    let height = settings.image_height();
    let mut pixels = Vec::with_capacity(band.pixel_count(width));

    for row in band.first_row..band.end_row() {
        // Image-plane rows count up from the bottom
        let j = height - 1 - row;
        for i in 0..width {
            pixels.push(render_pixel(camera, world, i, j, settings, rng));
        }
    }

    log::debug!(
        "Band {} rows [{}, {}) finished in {:?}",
        band.index,
        band.first_row,
        band.end_row(),
        start.elapsed()
    );

    BandResult::new(*band, pixels)
}
