use std::{error::Error, path::PathBuf};

use clap::{Parser, ValueEnum};
use env_logger::Env;
use nalgebra::Vector3;
use rand::Rng;

use raytracer::{ppm, render, scenes, Camera, CameraConfig, RenderOptions, Scene};

const DEFAULT_LOGGING_LEVEL: &str = "info";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Ground plus one moving sphere.
    Demo,
    /// Field of random spheres in every material.
    Showcase,
    /// Nothing but the background.
    Empty,
}

#[derive(Parser, Debug)]
#[command(version, about = "Render a scene of spheres to a PPM image")]
struct Args {
    /// Where to write the P3 image
    #[arg(short, long, default_value = "image.ppm")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = Preset::Showcase)]
    scene: Preset,

    /// Image width in pixels
    #[arg(short, long, default_value_t = 800)]
    width: usize,

    /// Width over height
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect_ratio: f64,

    #[arg(short, long, default_value_t = 100)]
    samples: usize,

    /// Maximum bounces per ray
    #[arg(short, long, default_value_t = 50)]
    depth: usize,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 20.0)]
    vfov: f64,

    #[arg(long, value_parser = parse_vector, default_value = "13,2,3")]
    look_from: Vector3<f64>,

    #[arg(long, value_parser = parse_vector, default_value = "0,0,0")]
    look_at: Vector3<f64>,

    #[arg(long, value_parser = parse_vector, default_value = "0,1,0")]
    vup: Vector3<f64>,

    /// Aperture angle in degrees, 0 for a pinhole camera
    #[arg(long, default_value_t = 0.6)]
    defocus_angle: f64,

    #[arg(long, default_value_t = 10.0)]
    focus_dist: f64,

    /// Random seed; picked at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Parallel scanline bands, 0 for one per CPU
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Show the render in a window instead of writing a file (needs the
    /// `display` feature)
    #[arg(long)]
    display: bool,
}

fn parse_vector(s: &str) -> Result<Vector3<f64>, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{}: {}", p, e)))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!("expected three comma separated numbers, got {:?}", s)),
    }
}

impl Args {
    fn camera_config(&self) -> CameraConfig {
        CameraConfig {
            aspect_ratio: self.aspect_ratio,
            image_width: self.width,
            samples_per_pixel: self.samples,
            max_depth: self.depth,
            vfov: self.vfov,
            look_from: self.look_from,
            look_at: self.look_at,
            vup: self.vup,
            defocus_angle: self.defocus_angle,
            focus_dist: self.focus_dist,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOGGING_LEVEL)).init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::rngs::OsRng.gen());
    log::info!("using seed {}", seed);

    let world = match args.scene {
        Preset::Demo => scenes::demo(),
        Preset::Showcase => scenes::showcase(seed),
        Preset::Empty => Scene::new(),
    };
    let options = RenderOptions {
        seed,
        workers: args.threads,
    };

    if args.display {
        #[cfg(feature = "display")]
        return raytracer::display::run(args.camera_config(), &world, options);
        #[cfg(not(feature = "display"))]
        log::warn!("built without the display feature, writing {} instead", args.output.display());
    }

    let camera = Camera::new(args.camera_config());
    let frame = render(&camera, &world, &options)?;
    ppm::save_ppm(&frame, &args.output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vectors() {
        assert_eq!(parse_vector("13, 2,3"), Ok(Vector3::new(13.0, 2.0, 3.0)));
        assert!(parse_vector("1,2").is_err());
        assert!(parse_vector("1,x,3").is_err());
    }

    #[test]
    fn defaults_match_builtin_camera() {
        let args = Args::parse_from(["raytracer"]);

        assert_eq!(args.camera_config(), scenes::default_camera());
        assert_eq!(args.output, PathBuf::from("image.ppm"));
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
