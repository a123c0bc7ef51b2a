//! Vector helpers on top of `glam::DVec3`.
//!
//! glam covers the arithmetic, dot/cross products and lengths. This module
//! adds the pieces a ray tracer needs on top: degenerate-direction checks,
//! reflection and refraction, and random sampling.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Components smaller than this are treated as zero by [`Vec3Ext::near_zero`].
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Extra predicates on [`Vec3`] that glam does not provide.
pub trait Vec3Ext {
    /// True if the vector is close to zero in every dimension.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }
}

/// Normalize `v` by dividing it by its length.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with relative index `etai_over_etat`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Uniform random number in [0, 1).
#[inline]
pub fn random_double(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform random number in [min, max).
#[inline]
pub fn random_double_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_double(rng)
}

/// Random vector with each component in [0, 1).
pub fn random_vec3(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_double(rng), random_double(rng), random_double(rng))
}

/// Random vector with each component in [min, max).
pub fn random_vec3_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_double_range(rng, min, max),
        random_double_range(rng, min, max),
        random_double_range(rng, min, max),
    )
}

/// Generate a random unit vector, uniformly distributed on the unit sphere.
///
/// Samples the cube and rejects points outside the unit ball before
/// normalizing; normalizing a raw cube sample would bias towards the corners.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3_range(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        // Tiny vectors would normalize to infinity.
        if 1e-160 < len_sq && len_sq < 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Random point inside the unit disk on the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_double_range(rng, -1.0, 1.0),
            random_double_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!Vec3::new(1e-9, 1e-7, 0.0).near_zero());
        assert!(!Vec3::new(0.0, 0.0, -1.0).near_zero());
    }

    #[test]
    fn test_unit_vector_length() {
        let vectors = [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1e-3, 2e-3, 5e-4),
            Vec3::new(1e6, -2e6, 3e6),
            Vec3::new(0.0, 0.0, -7.5),
        ];
        for v in vectors {
            assert!((unit_vector(v).length() - 1.0).abs() < 1e-12, "{v:?}");
        }
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let n = Vec3::Y;
        assert_eq!(reflect(v, n), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_index_one_is_straight() {
        let uv = unit_vector(Vec3::new(0.3, -1.0, 0.2));
        let refracted = refract(uv, Vec3::Y, 1.0);
        assert!((refracted - uv).length() < 1e-12);
    }

    #[test]
    fn test_refract_bends_towards_normal() {
        // Entering a denser medium: the tangential component shrinks.
        let uv = unit_vector(Vec3::new(1.0, -1.0, 0.0));
        let refracted = refract(uv, Vec3::Y, 1.0 / 1.5);
        assert!(refracted.x < uv.x);
        assert!(refracted.y < 0.0);
        assert!((refracted.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_random_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = random_double(&mut rng);
            assert!((0.0..1.0).contains(&d));

            let r = random_double_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&r));

            let v = random_vec3(&mut rng);
            assert!(v.min_element() >= 0.0 && v.max_element() < 1.0);

            let w = random_vec3_range(&mut rng, 0.5, 0.75);
            assert!(w.min_element() >= 0.5 && w.max_element() < 0.75);
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_random_unit_vector_is_unbiased() {
        let mut rng = StdRng::seed_from_u64(1);
        let n = 20_000;
        let mean = (0..n).fold(Vec3::ZERO, |acc, _| acc + random_unit_vector(&mut rng)) / n as f64;
        assert!(mean.length() < 0.05, "mean = {mean:?}");
    }

    #[test]
    fn test_random_in_unit_disk() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }
}
