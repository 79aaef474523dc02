use nalgebra::Vector3;
use rand::Rng;

use crate::{
    hit::Record,
    vector::{self, Color},
    Ray,
};

/// Surface scattering models. Materials are plain values; every primitive
/// that uses one keeps its own copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Diffuse surface with the given albedo.
    Lambertian(Color),
    /// Specular surface: albedo and fuzz radius in [0, 1].
    Metal(Color, f64),
    /// Clear refractive surface with the given index of refraction.
    Dielectric(f64),
}

fn clamp_albedo(albedo: Color) -> Color {
    albedo.map(|c| c.clamp(0.0, 1.0))
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian(clamp_albedo(albedo))
    }

    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Self::Metal(clamp_albedo(albedo), fuzz.clamp(0.0, 1.0))
    }

    /// Indices that are not positive and finite fall back to 1, an interface
    /// that bends nothing.
    pub fn dielectric(refraction_index: f64) -> Self {
        if refraction_index.is_finite() && refraction_index > 0.0 {
            Self::Dielectric(refraction_index)
        } else {
            log::warn!(
                "refraction index must be positive and finite, got {}, using 1",
                refraction_index
            );
            Self::Dielectric(1.0)
        }
    }

    /// Attenuation and outgoing ray, or `None` when the ray is absorbed.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        ray: &Ray,
        record: &Record,
        rng: &mut R,
    ) -> Option<(Color, Ray)> {
        match *self {
            Self::Lambertian(albedo) => {
                let mut direction = record.normal + vector::random_unit_vector(rng);
                if vector::near_zero(&direction) {
                    direction = record.normal;
                }
                Some((albedo, Ray::new(record.point, direction, ray.time)))
            }
            Self::Metal(albedo, fuzz) => {
                let reflected = vector::reflect(vector::unit(ray.direction), record.normal);
                let direction = reflected + fuzz * vector::random_in_unit_sphere(rng);
                if direction.dot(&record.normal) > 0.0 {
                    Some((albedo, Ray::new(record.point, direction, ray.time)))
                } else {
                    None
                }
            }
            Self::Dielectric(index) => {
                let ratio = if record.front { 1.0 / index } else { index };
                let unit_direction = vector::unit(ray.direction);
                let cos_theta = (-unit_direction).dot(&record.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = ratio * sin_theta > 1.0;
                let direction = if cannot_refract || reflectance(cos_theta, ratio) > rng.gen() {
                    vector::reflect(unit_direction, record.normal)
                } else {
                    vector::refract(unit_direction, record.normal, ratio)
                };
                Some((
                    Vector3::new(1.0, 1.0, 1.0),
                    Ray::new(record.point, direction, ray.time),
                ))
            }
        }
    }
}

/// Schlick's approximation of Fresnel reflectance.
fn reflectance(cosine: f64, ratio: f64) -> f64 {
    let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
