//! Built-in scenes and the camera settings that frame them.

use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{CameraConfig, Material, Scene, Sphere};

fn ground() -> Sphere {
    Sphere::new(
        Vector3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Vector3::new(0.8, 0.8, 0.0)),
    )
}

/// Camera looking at the origin from (13, 2, 3) with a shallow depth of field.
pub fn default_camera() -> CameraConfig {
    CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 800,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        look_from: Vector3::new(13.0, 2.0, 3.0),
        look_at: Vector3::new(0.0, 0.0, 0.0),
        vup: Vector3::new(0.0, 1.0, 0.0),
        defocus_angle: 0.6,
        focus_dist: 10.0,
    }
}

/// Yellow ground with a single small sphere bouncing upward.
pub fn demo() -> Scene {
    let mut scene = Scene::new();
    scene.add(ground());

    let center0 = Vector3::new(0.0, 0.0, -1.0);
    let center1 = center0 + Vector3::new(0.0, 0.5, 0.0);
    scene.add(Sphere::moving(
        center0,
        center1,
        0.2,
        Material::lambertian(Vector3::new(0.1, 0.2, 0.2)),
    ));

    scene.into_bvh()
}

/// Ground covered in small random spheres of every material, with three
/// large feature spheres in the middle.
pub fn showcase(seed: u64) -> Scene {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut scene = Scene::new();
    scene.add(ground());

    let clearing = Vector3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let center = Vector3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (center - clearing).norm() <= 0.9 {
                continue;
            }

            let choice: f64 = rng.gen();
            if choice < 0.8 {
                let albedo = random_color(&mut rng).component_mul(&random_color(&mut rng));
                let bounce = Vector3::new(0.0, rng.gen_range(0.0..0.5), 0.0);
                scene.add(Sphere::moving(
                    center,
                    center + bounce,
                    0.2,
                    Material::lambertian(albedo),
                ));
            } else if choice < 0.95 {
                let albedo = random_color(&mut rng).map(|c| 0.5 + 0.5 * c);
                let fuzz = rng.gen_range(0.0..0.5);
                scene.add(Sphere::new(center, 0.2, Material::metal(albedo, fuzz)));
            } else {
                scene.add(Sphere::new(center, 0.2, Material::dielectric(1.5)));
            }
        }
    }

    scene.add(Sphere::new(
        Vector3::new(0.0, 1.0, 0.0),
        1.0,
        Material::dielectric(1.5),
    ));
    scene.add(Sphere::new(
        Vector3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Vector3::new(0.4, 0.2, 0.1)),
    ));
    scene.add(Sphere::new(
        Vector3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Vector3::new(0.7, 0.6, 0.5), 0.0),
    ));

    log::debug!("showcase scene has {} spheres", scene.len());
    scene.into_bvh()
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    Vector3::new(rng.gen(), rng.gen(), rng.gen())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hit, Hittable};

    #[test]
    fn presets_are_wrapped_in_a_bvh() {
        for scene in [demo(), showcase(3)] {
            assert_eq!(scene.len(), 1);
            assert!(matches!(scene.objects()[0], Hittable::Bvh(_)));
        }
    }

    #[test]
    fn showcase_is_deterministic_per_seed() {
        let a = showcase(5).bounding_box();
        let b = showcase(5).bounding_box();

        assert_eq!(a, b);
        assert!(a.y.max >= 1.0);
    }
}
