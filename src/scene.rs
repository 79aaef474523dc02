use crate::{
    hit::{Hit, Hittable, Record},
    Aabb, Bvh, Interval, Ray,
};

/// Ordered list of objects; a hit is the closest hit among all of them.
#[derive(Clone, Debug)]
pub struct Scene {
    objects: Vec<Hittable>,
    bbox: Aabb,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    pub fn add(&mut self, object: impl Into<Hittable>) {
        let object = object.into();
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Hittable] {
        &self.objects
    }

    /// Replaces the flat list with a single BVH over its objects. An empty
    /// scene is returned unchanged.
    pub fn into_bvh(self) -> Self {
        match Bvh::new(self.objects) {
            Ok(bvh) => {
                let mut scene = Scene::new();
                scene.add(bvh);
                scene
            }
            Err(_) => Scene::new(),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Into<Hittable>> FromIterator<T> for Scene {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut scene = Scene::new();
        for object in iter {
            scene.add(object);
        }
        scene
    }
}

impl Hit for Scene {
    fn hit(&self, ray: Ray, interval: Interval) -> Option<Record> {
        let mut closest = None;
        let mut search = interval;

        for object in &self.objects {
            if let Some(record) = object.hit(ray, search) {
                search = search.with_max(record.t);
                closest = Some(record);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Sphere};
    use nalgebra::Vector3;

    fn sphere_at(z: f64, albedo: f64) -> Sphere {
        Sphere::new(
            Vector3::new(0.0, 0.0, z),
            0.5,
            Material::lambertian(Vector3::new(albedo, albedo, albedo)),
        )
    }

    #[test]
    fn returns_closest_regardless_of_order() {
        let ray = Ray::new(Vector3::zeros(), Vector3::new(0.0, 0.0, -1.0), 0.0);
        let interval = Interval::new(0.001, f64::INFINITY);

        let near_first: Scene = [sphere_at(-2.0, 0.1), sphere_at(-5.0, 0.9)].into_iter().collect();
        let far_first: Scene = [sphere_at(-5.0, 0.9), sphere_at(-2.0, 0.1)].into_iter().collect();

        for scene in [near_first, far_first] {
            let record = scene.hit(ray, interval).unwrap();
            assert!((record.t - 1.5).abs() < 1e-12);
            assert_eq!(record.material, sphere_at(-2.0, 0.1).material);
        }
    }

    #[test]
    fn empty_scene_never_hits() {
        let scene = Scene::new();
        let ray = Ray::new(Vector3::zeros(), Vector3::new(0.0, 0.0, -1.0), 0.0);

        assert!(scene.is_empty());
        assert!(scene.hit(ray, Interval::UNIVERSE).is_none());
        assert_eq!(scene.bounding_box(), Aabb::EMPTY);
    }

    #[test]
    fn bounding_box_grows_with_each_add() {
        let mut scene = Scene::new();
        scene.add(sphere_at(-2.0, 0.5));
        assert_eq!(scene.bounding_box().z, Interval::new(-2.5, -1.5));

        scene.add(sphere_at(-5.0, 0.5));
        assert_eq!(scene.bounding_box().z, Interval::new(-5.5, -1.5));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn into_bvh_keeps_hits() {
        let scene: Scene = (0..8).map(|i| sphere_at(-2.0 * i as f64 - 2.0, 0.5)).collect();
        let ray = Ray::new(Vector3::zeros(), Vector3::new(0.0, 0.0, -1.0), 0.0);
        let interval = Interval::new(0.001, f64::INFINITY);
        let flat = scene.hit(ray, interval).unwrap();

        let optimized = scene.into_bvh();
        assert_eq!(optimized.len(), 1);
        assert!(matches!(optimized.objects()[0], Hittable::Bvh(_)));
        assert_eq!(optimized.hit(ray, interval), Some(flat));

        assert!(Scene::new().into_bvh().is_empty());
    }
}
