//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Anti-aliasing via jittered multi-sampling
//! - Row bands rendered in parallel on a rayon pool
//! - Gamma correction on output

use crate::band::{band_rng, partition_rows, render_band, BandResult, RowBand};
use crate::integrator::ray_color;
use crate::sampling::gen_f32;
use crate::{Camera, Color, Hittable};
use lumen_core::RenderSettings;
use lumen_math::Interval;
use rand::RngCore;
use rayon::prelude::*;
use std::time::Instant;
use thiserror::Error;

/// Errors that can occur before rendering starts.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Output range before scaling to 8 bits.
const OUTPUT_RANGE: Interval = Interval::new(0.0, 0.999);

/// Reject settings that cannot produce an image.
pub fn validate_settings(settings: &RenderSettings) -> RenderResult<()> {
    if settings.image_width == 0 {
        return Err(RenderError::InvalidSettings("image width must be at least 1".into()));
    }
    if !(settings.aspect_ratio.is_finite() && settings.aspect_ratio > 0.0) {
        return Err(RenderError::InvalidSettings(format!(
            "aspect ratio {} must be positive",
            settings.aspect_ratio
        )));
    }
    if settings.samples_per_pixel == 0 {
        return Err(RenderError::InvalidSettings("samples per pixel must be at least 1".into()));
    }
    if settings.threads == Some(0) {
        return Err(RenderError::InvalidSettings("thread count must be at least 1".into()));
    }
    Ok(())
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let channel = |x: f32| (256.0 * OUTPUT_RANGE.clamp(linear_to_gamma(x))) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `(i, j)` are image-plane coordinates: `i` from the left, `j` from the
/// bottom. Each sample jitters its position inside the pixel.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    let width_span = settings.image_width.saturating_sub(1).max(1) as f32;
    let height_span = settings.image_height().saturating_sub(1).max(1) as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..settings.samples_per_pixel {
        let u = (i as f32 + gen_f32(rng)) / width_span;
        let v = (j as f32 + gen_f32(rng)) / height_span;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, settings.max_depth, rng);
    }

    // Average the samples
    pixel_color / settings.samples_per_pixel as f32
}

/// Averaged linear colors for a whole image.
///
/// Row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Place band results at their rows.
    ///
    /// Bands may arrive in any order; rows no band covers stay black.
    pub fn from_bands(width: u32, height: u32, bands: Vec<BandResult>) -> Self {
        let mut image = Self::new(width, height);

        for result in bands {
            debug_assert_eq!(result.pixels.len(), result.band.pixel_count(width));
            let start = image.index(0, result.band.first_row).min(image.pixels.len());
            let end = (start + result.pixels.len()).min(image.pixels.len());
            image.pixels[start..end].copy_from_slice(&result.pixels[..end - start]);
        }

        image
    }


    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Gamma-corrected 8-bit RGB bytes, row-major from the top.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb(*color))
            .collect()
    }
}

/// Number of workers, and so row bands, a render uses.
///
/// `settings.threads` when pinned, otherwise one per logical core.
pub fn worker_count(settings: &RenderSettings) -> usize {
    settings.threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    })
}

/// Render the scene on a pool of worker threads.
///
/// The image is split into one row band per worker. Band `k` draws from
/// a generator seeded with `settings.seed + k`, so the output depends only
/// on the inputs and the worker count.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    settings: &RenderSettings,
) -> RenderResult<ImageBuffer> {
    validate_settings(settings)?;

    let workers = worker_count(settings);
    let width = settings.image_width;
    let height = settings.image_height();
    let bands = partition_rows(height, workers);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} bands on {} threads",
        width,
        height,
        settings.samples_per_pixel,
        settings.max_depth,
        bands.len(),
        workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("lumen-worker-{}", i))
        .build()?;

    let start = Instant::now();
    let results: Vec<BandResult> = pool.install(|| {
        bands
            .par_iter()
            .map(|band| {
                let mut rng = band_rng(settings.seed, band.index);
                render_band(band, camera, world, settings, &mut rng)
            })
            .collect()
    });
    log::info!("Rendered in {:?}", start.elapsed());

    Ok(ImageBuffer::from_bands(width, height, results))
}

/// Render the same bands as [`render`] one after another on this thread.
///
/// Produces the identical image to a parallel render with `band_count`
/// workers; pass [`worker_count`] to reproduce [`render`] exactly.
pub fn render_serial(
    camera: &Camera,
    world: &dyn Hittable,
    settings: &RenderSettings,
    band_count: usize,
) -> RenderResult<ImageBuffer> {
    validate_settings(settings)?;

    let width = settings.image_width;
    let height = settings.image_height();
    let start = Instant::now();

    let results: Vec<BandResult> = partition_rows(height, band_count)
        .iter()
        .map(|band: &RowBand| {
            let mut rng = band_rng(settings.seed, band.index);
            render_band(band, camera, world, settings, &mut rng)
        })
        .collect();
    log::info!("Rendered serially in {:?}", start.elapsed());

    Ok(ImageBuffer::from_bands(width, height, results))
}
