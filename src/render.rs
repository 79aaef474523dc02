//! Recursive shading and the parallel scanline renderer.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Instant,
};

use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use thiserror::Error;

use crate::{
    frame::{self, FrameBuffer, Rgb24, BYTES_PER_PIXEL},
    hit::Hit,
    vector::{self, Color},
    Camera, Interval, Ray,
};

/// Lower bound of the hit interval for shading rays, keeps surfaces from
/// re-hitting themselves.
const SHADOW_ACNE_T: f64 = 0.001;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("pixel buffer holds {actual} bytes but the image needs {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("a {width}x{height} image is too large to render")]
    TooLarge { width: usize, height: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Master seed; each scanline derives its own generator from it.
    pub seed: u64,
    /// Number of scanline bands rendered in parallel. Zero uses one band per
    /// rayon worker thread.
    pub workers: usize,
}

/// Background seen by rays that escape the scene: white at the bottom,
/// sky blue at the top.
pub fn background(ray: &Ray) -> Color {
    let unit_direction = vector::unit(ray.direction);
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Vector3::new(1.0, 1.0, 1.0) + a * Vector3::new(0.5, 0.7, 1.0)
}

/// Light arriving along `ray`, following at most `depth` bounces.
pub fn ray_color<W, R>(ray: &Ray, depth: usize, world: &W, rng: &mut R) -> Color
where
    W: Hit + ?Sized,
    R: Rng + ?Sized,
{
    if depth == 0 {
        return Color::zeros();
    }

    match world.hit(*ray, Interval::new(SHADOW_ACNE_T, f64::INFINITY)) {
        Some(record) => match record.material.scatter(ray, &record, rng) {
            Some((attenuation, scattered)) => {
                attenuation.component_mul(&ray_color(&scattered, depth - 1, world, rng))
            }
            None => Color::zeros(),
        },
        None => background(ray),
    }
}

/// Average of `samples_per_pixel` traced samples for pixel (`x`, `y`).
pub fn sample_pixel<W, R>(camera: &Camera, world: &W, x: usize, y: usize, rng: &mut R) -> Color
where
    W: Hit + ?Sized,
    R: Rng + ?Sized,
{
    let samples = camera.samples_per_pixel();
    let sum = (0..samples)
        .map(|_| {
            let ray = camera.cast(x, y, rng);
            ray_color(&ray, camera.max_depth(), world, rng)
        })
        .fold(Color::zeros(), |acc, e| acc + e);
    sum / samples as f64
}

fn scanline_rng(seed: u64, y: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(y as u64);
    rng
}

/// Renders into a caller-owned buffer of `3 * width * height` bytes,
/// interleaved RGB in raster order.
pub fn render_into<W>(
    camera: &Camera,
    world: &W,
    options: &RenderOptions,
    pixels: &mut [u8],
) -> Result<(), RenderError>
where
    W: Hit + Sync + ?Sized,
{
    let width = camera.image_width();
    let height = camera.image_height();
    let expected =
        frame::byte_len(width, height).ok_or(RenderError::TooLarge { width, height })?;
    let stride = width * BYTES_PER_PIXEL;
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }

    let workers = match options.workers {
        0 => rayon::current_num_threads(),
        n => n,
    };
    let band_rows = height.div_ceil(workers.max(1));
    let remaining = AtomicUsize::new(height);
    let started = Instant::now();
    log::info!(
        "rendering {}x{} at {} samples per pixel, depth {}, {} bands",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth(),
        height.div_ceil(band_rows)
    );

    pixels
        .par_chunks_mut(band_rows * stride)
        .enumerate()
        .for_each(|(band, chunk)| {
            let first_row = band * band_rows;
            for (offset, row) in chunk.chunks_exact_mut(stride).enumerate() {
                let y = first_row + offset;
                let mut rng = scanline_rng(options.seed, y);
                for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                    let color = sample_pixel(camera, world, x, y, &mut rng);
                    pixel.copy_from_slice(&color.to_rgb24());
                }
            }
            let rows = chunk.len() / stride;
            let left = remaining.fetch_sub(rows, Ordering::Relaxed) - rows;
            log::debug!("band {} done ({} scanlines), {} scanlines remaining", band, rows, left);
        });

    log::info!("render finished in {:.2?}", started.elapsed());
    Ok(())
}

/// Renders the whole image into a new frame buffer.
pub fn render<W>(
    camera: &Camera,
    world: &W,
    options: &RenderOptions,
) -> Result<FrameBuffer, RenderError>
where
    W: Hit + Sync + ?Sized,
{
    let mut frame = FrameBuffer::new(camera.image_width(), camera.image_height())?;
    render_into(camera, world, options, frame.pixel_data_mut())?;
    Ok(frame)
}
