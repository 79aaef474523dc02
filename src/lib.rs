//! A small physically based ray tracer: spheres, three materials, a BVH,
//! and a thin-lens camera rendered in parallel scanline bands.

mod aabb;
mod bvh;
mod camera;
#[cfg(feature = "display")]
pub mod display;
pub mod frame;
mod hit;
mod interval;
mod material;
pub mod ppm;
mod ray;
pub mod render;
mod scene;
pub mod scenes;
mod sphere;
pub mod vector;

pub use aabb::Aabb;
pub use bvh::{Bvh, BvhError};
pub use camera::{Camera, CameraConfig};
pub use frame::FrameBuffer;
pub use hit::{Hit, Hittable, Record};
pub use interval::Interval;
pub use material::Material;
pub use ray::Ray;
pub use render::{render, render_into, RenderError, RenderOptions};
pub use scene::Scene;
pub use sphere::Sphere;
