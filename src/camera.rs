use nalgebra::Vector3;
use rand::Rng;

use crate::{vector, Ray};

/// User-facing camera settings. Turned into a [`Camera`] before rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    /// Image width over height.
    pub aspect_ratio: f64,
    pub image_width: usize,
    pub samples_per_pixel: usize,
    /// Maximum number of bounces per camera ray.
    pub max_depth: usize,
    /// Vertical field of view in degrees.
    pub vfov: f64,
    pub look_from: Vector3<f64>,
    pub look_at: Vector3<f64>,
    /// Camera-relative up direction.
    pub vup: Vector3<f64>,
    /// Aperture cone angle in degrees; zero disables depth of field.
    pub defocus_angle: f64,
    /// Distance from `look_from` to the plane of perfect focus.
    pub focus_dist: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Vector3::new(0.0, 0.0, 0.0),
            look_at: Vector3::new(0.0, 0.0, -1.0),
            vup: Vector3::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraConfig {
    /// Aims the camera from yaw and pitch angles in degrees. Yaw -90 with
    /// pitch 0 looks down -z.
    pub fn look_along(&mut self, yaw: f64, pitch: f64) {
        let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
        let forward = Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.look_at = self.look_from + vector::unit(forward);
    }

    /// Moves the eye and the target together.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.look_from += offset;
        self.look_at += offset;
    }
}

/// A camera with its viewport geometry derived from a [`CameraConfig`].
#[derive(Clone, Debug)]
pub struct Camera {
    config: CameraConfig,
    image_height: usize,
    samples_per_pixel: usize,
    center: Vector3<f64>,
    pixel_0: Vector3<f64>,
    pixel_delta_u: Vector3<f64>,
    pixel_delta_v: Vector3<f64>,
    u: Vector3<f64>,
    v: Vector3<f64>,
    w: Vector3<f64>,
    defocus_disk_u: Vector3<f64>,
    defocus_disk_v: Vector3<f64>,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        let image_width = config.image_width.max(1);
        if image_width != config.image_width {
            log::warn!("image_width must be at least 1, using 1");
        }
        let aspect_ratio = if config.aspect_ratio.is_finite() && config.aspect_ratio > 0.0 {
            config.aspect_ratio
        } else {
            log::warn!(
                "aspect_ratio must be positive and finite, got {}, using 1",
                config.aspect_ratio
            );
            1.0
        };
        // saturates on absurdly thin images; rendering refuses those
        let image_height = ((image_width as f64 / aspect_ratio) as usize).max(1);
        let samples_per_pixel = config.samples_per_pixel.max(1);
        if samples_per_pixel != config.samples_per_pixel {
            log::warn!("samples_per_pixel must be at least 1, using 1");
        }

        let center = config.look_from;
        let h = (config.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * image_width as f64 / image_height as f64;

        let w = vector::unit(config.look_from - config.look_at);
        let u = vector::unit(config.vup.cross(&w));
        let v = w.cross(&u);
        if vector::near_zero(&u) {
            log::warn!(
                "degenerate camera basis: look_from {:?}, look_at {:?}, vup {:?}",
                config.look_from,
                config.look_at,
                config.vup
            );
        }

        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;
        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;
        let viewport_upper_left =
            center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel_0 = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();

        Self {
            image_height,
            samples_per_pixel,
            center,
            pixel_0,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
            config: CameraConfig {
                image_width,
                aspect_ratio,
                ..config
            },
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Replaces the configuration and recomputes everything derived from it.
    pub fn set_config(&mut self, config: CameraConfig) {
        *self = Self::new(config);
    }

    pub fn image_width(&self) -> usize {
        self.config.image_width
    }

    pub fn image_height(&self) -> usize {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> usize {
        self.samples_per_pixel
    }

    pub fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    /// Right, up and backward unit vectors of the camera frame.
    pub fn basis(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        (self.u, self.v, self.w)
    }

    /// A sample ray through a random point of pixel (`x`, `y`), leaving from
    /// the defocus disk when depth of field is enabled.
    pub fn cast<R: Rng + ?Sized>(&self, x: usize, y: usize, rng: &mut R) -> Ray {
        let px = rng.gen::<f64>() - 0.5;
        let py = rng.gen::<f64>() - 0.5;
        let pixel_sampled = self.pixel_0
            + ((x as f64 + px) * self.pixel_delta_u)
            + ((y as f64 + py) * self.pixel_delta_v);

        let origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(origin, pixel_sampled - origin, rng.gen())
    }

    fn defocus_disk_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        let p = vector::random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }
}
