//! Bounding volume hierarchy over scene objects.
//!
//! Built once from a list of objects; every node owns exactly two children
//! and the box enclosing both.

use std::cmp::Ordering;

use thiserror::Error;

use crate::{
    hit::{Hit, Hittable, Record},
    Aabb, Interval, Ray,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BvhError {
    #[error("cannot build a BVH from zero objects")]
    Empty,
}

#[derive(Clone, Debug)]
pub struct Bvh {
    left: Box<Hittable>,
    right: Box<Hittable>,
    bbox: Aabb,
}

impl Bvh {
    pub fn new(objects: Vec<Hittable>) -> Result<Self, BvhError> {
        let count = objects.len();
        let bvh = Self::build(objects)?;
        log::debug!("built BVH over {} objects, depth {}", count, bvh.depth());
        Ok(bvh)
    }

    fn build(mut objects: Vec<Hittable>) -> Result<Self, BvhError> {
        let bbox = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, &o.bounding_box()));
        let axis = bbox.longest_axis();

        let (left, right) = match objects.len() {
            0 => return Err(BvhError::Empty),
            1 => {
                let only = objects.remove(0);
                (only.clone(), only)
            }
            2 => {
                let second = objects.remove(1);
                let first = objects.remove(0);
                (first, second)
            }
            n => {
                objects.sort_by(|a, b| box_compare(a, b, axis));
                let upper = objects.split_off(n / 2);
                (
                    Hittable::Bvh(Self::build(objects)?),
                    Hittable::Bvh(Self::build(upper)?),
                )
            }
        };

        Ok(Self {
            bbox: Aabb::surrounding(&left.bounding_box(), &right.bounding_box()),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Number of node levels, counting this one.
    pub fn depth(&self) -> usize {
        let child_depth = |child: &Hittable| match child {
            Hittable::Bvh(bvh) => bvh.depth(),
            _ => 0,
        };
        1 + child_depth(&self.left).max(child_depth(&self.right))
    }
}

fn box_compare(a: &Hittable, b: &Hittable, axis: usize) -> Ordering {
    let a_min = a.bounding_box().axis(axis).min;
    let b_min = b.bounding_box().axis(axis).min;
    a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
}

impl Hit for Bvh {
    fn hit(&self, ray: Ray, interval: Interval) -> Option<Record> {
        if !self.bbox.hit(&ray, interval) {
            return None;
        }

        let left = self.left.hit(ray, interval);
        let search = left.map_or(interval, |record| interval.with_max(record.t));
        self.right.hit(ray, search).or(left)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
