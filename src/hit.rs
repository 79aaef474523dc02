use nalgebra::Vector3;

use crate::{Aabb, Bvh, Interval, Material, Ray, Scene, Sphere};

pub trait Hit {
    /// Nearest intersection with `t` strictly inside `interval`.
    fn hit(&self, ray: Ray, interval: Interval) -> Option<Record>;

    /// Box enclosing the object over the whole [0, 1] time range.
    fn bounding_box(&self) -> Aabb;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record {
    pub point: Vector3<f64>,
    /// Unit normal, always facing against the incoming ray.
    pub normal: Vector3<f64>,
    pub t: f64,
    /// True when the ray arrived from outside the surface.
    pub front: bool,
    pub material: Material,
}

impl Record {
    /// Orients `outward_normal` (assumed unit length) against `ray`.
    pub(crate) fn new(
        ray: &Ray,
        t: f64,
        point: Vector3<f64>,
        outward_normal: Vector3<f64>,
        material: Material,
    ) -> Self {
        let front = ray.direction.dot(&outward_normal) < 0.0;
        Self {
            point,
            normal: if front {
                outward_normal
            } else {
                -outward_normal
            },
            t,
            front,
            material,
        }
    }
}

/// Every kind of object a scene can hold.
#[derive(Clone, Debug)]
pub enum Hittable {
    Sphere(Sphere),
    Bvh(Bvh),
    Scene(Scene),
}

impl Hit for Hittable {
    fn hit(&self, ray: Ray, interval: Interval) -> Option<Record> {
        match self {
            Self::Sphere(sphere) => sphere.hit(ray, interval),
            Self::Bvh(bvh) => bvh.hit(ray, interval),
            Self::Scene(scene) => scene.hit(ray, interval),
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            Self::Sphere(sphere) => sphere.bounding_box(),
            Self::Bvh(bvh) => bvh.bounding_box(),
            Self::Scene(scene) => scene.bounding_box(),
        }
    }
}

impl From<Sphere> for Hittable {
    fn from(sphere: Sphere) -> Self {
        Self::Sphere(sphere)
    }
}

impl From<Bvh> for Hittable {
    fn from(bvh: Bvh) -> Self {
        Self::Bvh(bvh)
    }
}

impl From<Scene> for Hittable {
    fn from(scene: Scene) -> Self {
        Self::Scene(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_faces_the_incoming_ray() {
        let material = Material::Dielectric(1.5);
        let outward = Vector3::new(0.0, 0.0, 1.0);

        let outside = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0), 0.0);
        let record = Record::new(&outside, 4.0, outside.at(4.0), outward, material);
        assert!(record.front);
        assert_eq!(record.normal, outward);

        let inside = Ray::new(Vector3::zeros(), Vector3::new(0.0, 0.0, 1.0), 0.0);
        let record = Record::new(&inside, 1.0, inside.at(1.0), outward, material);
        assert!(!record.front);
        assert_eq!(record.normal, -outward);
        assert!(inside.direction.dot(&record.normal) <= 0.0);
    }
}
