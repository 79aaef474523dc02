//! Helpers on top of `nalgebra::Vector3` that the tracer needs everywhere.

use nalgebra::Vector3;
use rand::Rng;

/// Linear RGB, one channel per component.
pub type Color = Vector3<f64>;

const NEAR_ZERO: f64 = 1e-8;

/// Unit vector in the direction of `v`, or the zero vector when `v` has no length.
pub fn unit(v: Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}

pub fn near_zero(v: &Vector3<f64>) -> bool {
    v.iter().all(|c| c.abs() < NEAR_ZERO)
}

pub fn reflect(v: Vector3<f64>, n: Vector3<f64>) -> Vector3<f64> {
    v - 2.0 * v.dot(&n) * n
}

/// Snell refraction of the unit vector `uv` through a surface with normal `n`.
pub fn refract(uv: Vector3<f64>, n: Vector3<f64>, eta_ratio: f64) -> Vector3<f64> {
    let cos_theta = (-uv).dot(&n).min(1.0);
    let perpendicular = eta_ratio * (uv + cos_theta * n);
    let parallel = -(1.0 - perpendicular.norm_squared()).abs().sqrt() * n;
    perpendicular + parallel
}

pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    loop {
        let p = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.norm_squared() < 1.0 {
            return p;
        }
    }
}

pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.norm_squared();
        // tiny vectors lose precision when normalized
        if len_sq > 1e-160 {
            return p / len_sq.sqrt();
        }
    }
}

/// Point in the unit disk on the xy plane.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    loop {
        let p = Vector3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
        if p.norm_squared() < 1.0 {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn unit_of_zero_is_zero() {
        assert_eq!(unit(Vector3::zeros()), Vector3::zeros());
        assert!((unit(Vector3::new(3.0, 4.0, 0.0)).norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reflect_flips_normal_component() {
        let v = Vector3::new(1.0, -1.0, 0.0);
        let n = Vector3::new(0.0, 1.0, 0.0);

        assert_eq!(reflect(v, n), Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn refract_with_unit_ratio_passes_straight_through() {
        let uv = unit(Vector3::new(1.0, -1.0, 0.0));
        let n = Vector3::new(0.0, 1.0, 0.0);
        let out = refract(uv, n, 1.0);

        assert!((out - uv).norm() < 1e-12);
    }

    #[test]
    fn random_samples_stay_in_their_domains() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).norm() < 1.0);
            assert!((random_unit_vector(&mut rng).norm() - 1.0).abs() < 1e-9);
            let d = random_in_unit_disk(&mut rng);
            assert!(d.norm() < 1.0);
            assert_eq!(d.z, 0.0);
        }
    }

    #[test]
    fn near_zero_detects_degenerate_vectors() {
        assert!(near_zero(&Vector3::new(1e-9, -1e-9, 0.0)));
        assert!(!near_zero(&Vector3::new(0.0, 1e-3, 0.0)));
    }
}
