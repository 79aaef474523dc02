//! Axis-aligned bounding boxes and the slab test used by the BVH.

use nalgebra::Vector3;

use crate::{Interval, Ray};

const MIN_EXTENT: f64 = 1e-4;
const PARALLEL_EPSILON: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// Box spanned by two opposite corners, in any order.
    pub fn from_points(a: Vector3<f64>, b: Vector3<f64>) -> Self {
        let lo = a.inf(&b);
        let hi = a.sup(&b);
        let mut aabb = Self {
            x: Interval::new(lo.x, hi.x),
            y: Interval::new(lo.y, hi.y),
            z: Interval::new(lo.z, hi.z),
        };
        aabb.pad_to_minimums();
        aabb
    }

    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(a.x, b.x),
            y: Interval::surrounding(a.y, b.y),
            z: Interval::surrounding(a.z, b.z),
        }
    }

    pub fn axis(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Index of the axis with the greatest extent; ties go to the later axis.
    pub fn longest_axis(&self) -> usize {
        let (x, y, z) = (self.x.size(), self.y.size(), self.z.size());
        if x > y && x > z {
            0
        } else if y > z {
            1
        } else {
            2
        }
    }

    /// Slab test over `ray_t`. Rays parallel to a slab only pass when their
    /// origin lies inside it.
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        for n in 0..3 {
            let slab = self.axis(n);
            let origin = ray.origin[n];
            let direction = ray.direction[n];

            if direction.abs() < PARALLEL_EPSILON {
                if !slab.contains(origin) {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t0 = (slab.min - origin) * inv;
            let mut t1 = (slab.max - origin) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = ray_t.min.max(t0);
            ray_t.max = ray_t.max.min(t1);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    fn pad_to_minimums(&mut self) {
        for slab in [&mut self.x, &mut self.y, &mut self.z] {
            if slab.size() < MIN_EXTENT {
                *slab = slab.expand(MIN_EXTENT);
            }
        }
    }
}
