use nalgebra::Vector3;

use crate::{
    hit::{Hit, Record},
    Aabb, Interval, Material, Ray,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    /// Center at time 0.
    pub center: Vector3<f64>,
    /// Displacement of the center between time 0 and time 1.
    pub motion: Vector3<f64>,
    pub radius: f64,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vector3<f64>, radius: f64, material: Material) -> Self {
        Self::moving(center, center, radius, material)
    }

    /// Sphere whose center travels linearly from `center0` at time 0 to
    /// `center1` at time 1.
    pub fn moving(
        center0: Vector3<f64>,
        center1: Vector3<f64>,
        radius: f64,
        material: Material,
    ) -> Self {
        Self {
            center: center0,
            motion: center1 - center0,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center_at(&self, time: f64) -> Vector3<f64> {
        self.center + time * self.motion
    }
}

impl Hit for Sphere {
    fn hit(&self, ray: Ray, interval: Interval) -> Option<Record> {
        let center = self.center_at(ray.time);
        let oc = center - ray.origin;
        let a = ray.direction.norm_squared();
        let h = ray.direction.dot(&oc);
        let c = oc.norm_squared() - self.radius * self.radius;
        let d = (h * h) - (a * c);

        if d < 0.0 || a == 0.0 {
            return None;
        }

        let sqrtd = d.sqrt();
        let mut root = (h - sqrtd) / a;

        if !interval.surrounds(root) {
            root = (h + sqrtd) / a;
            if !interval.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = if self.radius > 0.0 {
            (point - center) / self.radius
        } else {
            Vector3::zeros()
        };
        Some(Record::new(&ray, root, point, outward_normal, self.material))
    }

    fn bounding_box(&self) -> Aabb {
        let r = Vector3::new(self.radius, self.radius, self.radius);
        let start = self.center_at(0.0);
        let end = self.center_at(1.0);
        Aabb::surrounding(
            &Aabb::from_points(start - r, start + r),
            &Aabb::from_points(end - r, end + r),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn gray() -> Material {
        Material::lambertian(Vector3::new(0.5, 0.5, 0.5))
    }

    fn forward() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn hits_near_side_first() {
        let sphere = Sphere::new(Vector3::new(0.0, 0.0, -1.0), 0.5, gray());
        let ray = Ray::new(Vector3::zeros(), Vector3::new(0.0, 0.0, -1.0), 0.0);

        let record = sphere.hit(ray, forward()).unwrap();
        assert!((record.t - 0.5).abs() < 1e-12);
        assert!(record.front);
        assert_eq!(record.normal, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(record.material, gray());
    }

    #[test]
    fn misses_when_pointing_away() {
        let sphere = Sphere::new(Vector3::new(0.0, 0.0, -1.0), 0.5, gray());
        let ray = Ray::new(Vector3::zeros(), Vector3::new(0.0, 1.0, 0.0), 0.0);

        assert!(sphere.hit(ray, forward()).is_none());
    }

    #[test]
    fn falls_back_to_far_root_from_inside() {
        let sphere = Sphere::new(Vector3::zeros(), 2.0, gray());
        let ray = Ray::new(Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0), 0.0);

        let record = sphere.hit(ray, forward()).unwrap();
        assert!((record.t - 2.0).abs() < 1e-12);
        assert!(!record.front);
        assert_eq!(record.normal, Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn interval_bounds_are_exclusive() {
        let sphere = Sphere::new(Vector3::new(0.0, 0.0, -2.0), 1.0, gray());
        let ray = Ray::new(Vector3::zeros(), Vector3::new(0.0, 0.0, -1.0), 0.0);

        // near root at t = 1, far root at t = 3
        assert!(sphere.hit(ray, Interval::new(0.0, 1.0)).is_none());
        let record = sphere.hit(ray, Interval::new(1.0, 10.0)).unwrap();
        assert!((record.t - 3.0).abs() < 1e-12);
        assert!(sphere.hit(ray, Interval::new(1.0, 3.0)).is_none());
    }

    #[test]
    fn moving_sphere_follows_ray_time() {
        let sphere = Sphere::moving(
            Vector3::new(0.0, 0.0, -2.0),
            Vector3::new(0.0, 2.0, -2.0),
            0.5,
            gray(),
        );
        let at_start = Ray::new(Vector3::zeros(), Vector3::new(0.0, 0.0, -1.0), 0.0);
        let at_end = Ray::new(Vector3::zeros(), Vector3::new(0.0, 0.0, -1.0), 1.0);

        assert!(sphere.hit(at_start, forward()).is_some());
        assert!(sphere.hit(at_end, forward()).is_none());

        let bbox = sphere.bounding_box();
        assert_eq!(bbox.y, Interval::new(-0.5, 2.5));
    }

    #[test]
    fn hits_lie_on_surface_with_unit_normals() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..500 {
            let center = Vector3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-8.0..-4.0),
            );
            let radius = rng.gen_range(0.2..2.0);
            let sphere = Sphere::new(center, radius, gray());
            let ray = Ray::new(
                Vector3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0),
                Vector3::new(
                    rng.gen_range(-0.5..0.5),
                    rng.gen_range(-0.5..0.5),
                    rng.gen_range(-1.0..-0.1),
                ),
                0.0,
            );

            if let Some(record) = sphere.hit(ray, forward()) {
                let p = ray.at(record.t);
                let implicit = (p - center).norm_squared() - radius * radius;
                assert!(implicit.abs() < 1e-6 * radius.max(1.0).powi(2));
                assert!((record.normal.norm() - 1.0).abs() < 1e-9);
                assert!(ray.direction.dot(&record.normal) <= 0.0);

                let outward = (p - center) / radius;
                assert_eq!(record.front, ray.direction.dot(&outward) < 0.0);
            }
        }
    }
}
