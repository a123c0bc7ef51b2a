//! Materials and surface scattering.
//!
//! The set of materials is closed: [`Material`] is an enum over the
//! diffuse, metal and dielectric models and dispatches by `match`.
//! Materials are stored once in a [`MaterialArena`] and shared between
//! objects through copyable [`MaterialId`] handles.

use crate::hittable::HitRecord;
use orb_math::{
    random_double, random_unit_vector, reflect, refract, unit_vector, Color, Ray, Vec3Ext,
};
use rand::RngCore;

/// Result of a ray scattering off a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// How much of the scattered light each channel keeps
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    /// Scatter around the normal. Never absorbs.
    pub fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.near_zero() {
            scatter_direction = rec.normal;
        }

        Some(Scatter {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough. Clamped to [0, 1].
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }

    /// Mirror reflection perturbed by `fuzz`. Absorbs rays that the
    /// perturbation pushes below the surface.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let reflected = unit_vector(reflect(ray_in.direction(), rec.normal));
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(Scatter {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Refractive index in vacuum or air, or the ratio of the material's
    /// index over the index of the enclosing media
    refraction_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    pub fn refraction_index(&self) -> f64 {
        self.refraction_index
    }

    /// Schlick's approximation for reflectance.
    pub fn reflectance(cosine: f64, refraction_index: f64) -> f64 {
        let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    /// Reflect or refract. Never absorbs.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let ri = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = unit_vector(ray_in.direction());
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = ri * sin_theta > 1.0;

        let direction =
            if cannot_refract || Self::reflectance(cos_theta, ri) > random_double(rng) {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, ri)
            };

        Some(Scatter {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// A surface material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and scattered ray, or `None` if the ray is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

/// Handle to a material stored in a [`MaterialArena`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Owns every material in a scene. Handles stay valid for the arena's lifetime.
#[derive(Debug, Clone, Default)]
pub struct MaterialArena {
    materials: Vec<Material>,
}

impl MaterialArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and return its handle.
    pub fn add(&mut self, material: impl Into<Material>) -> MaterialId {
        self.materials.push(material.into());
        MaterialId(self.materials.len() - 1)
    }

    /// Look up a material. Returns `None` for handles from another arena.
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
