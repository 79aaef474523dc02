use crate::{render::RenderError, vector::Color, Interval};

pub const BYTES_PER_PIXEL: usize = 3;

const INTENSITY: Interval = Interval::new(0.000, 0.999);

/// Approximate linear to gamma-2 conversion.
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

pub trait Rgb24 {
    fn to_rgb24(&self) -> [u8; 3];
}

impl Rgb24 for [u8; 3] {
    fn to_rgb24(&self) -> [u8; 3] {
        *self
    }
}

/// Linear colors are gamma corrected and quantized on the way out.
impl Rgb24 for Color {
    fn to_rgb24(&self) -> [u8; 3] {
        let quantize = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
        [quantize(self.x), quantize(self.y), quantize(self.z)]
    }
}

/// Bytes needed for a `width` x `height` RGB image, or `None` when that
/// does not fit in a `usize`.
pub fn byte_len(width: usize, height: usize) -> Option<usize> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
}

/// Interleaved RGB pixels in raster order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixel_data: Box<[u8]>,
}

impl FrameBuffer {
    /// A black image. Fails instead of aborting when the image is too large
    /// to allocate.
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        let too_large = || RenderError::TooLarge { width, height };
        let len = byte_len(width, height).ok_or_else(too_large)?;
        let mut pixel_data: Vec<u8> = Vec::new();
        pixel_data.try_reserve_exact(len).map_err(|_| too_large())?;
        pixel_data.resize(len, 0);

        Ok(Self {
            width,
            height,
            pixel_data: pixel_data.into_boxed_slice(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    pub fn pixel_data_mut(&mut self) -> &mut [u8] {
        &mut self.pixel_data
    }

    pub fn set_pixel<T: Rgb24>(&mut self, x: usize, y: usize, color: T) {
        let start = (x + y * self.width) * BYTES_PER_PIXEL;
        self.pixel_data[start..start + BYTES_PER_PIXEL].copy_from_slice(&color.to_rgb24());
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let start = (x + y * self.width) * BYTES_PER_PIXEL;
        let p = &self.pixel_data[start..start + BYTES_PER_PIXEL];
        [p[0], p[1], p[2]]
    }

    /// Pixels of row `y`, left to right.
    pub fn row(&self, y: usize) -> impl Iterator<Item = [u8; 3]> + '_ {
        let stride = self.width * BYTES_PER_PIXEL;
        self.pixel_data[y * stride..(y + 1) * stride]
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|p| [p[0], p[1], p[2]])
    }
}
