//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    material::MaterialId,
};
use orb_math::{Interval, Point3, Ray};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f64, material: MaterialId) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // A clamped sphere has no surface to hit or normal to report
        if self.radius == 0.0 {
            return None;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn forward() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    fn unit_sphere() -> Sphere {
        Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, MaterialId::default())
    }

    #[test]
    fn test_sphere_hit() {
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = unit_sphere().hit(&ray, forward()).unwrap();

        assert!((rec.t - 0.5).abs() < 1e-12);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.material, MaterialId::default());
    }

    #[test]
    fn test_sphere_miss() {
        // Ray pointing away from sphere
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(unit_sphere().hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_tangent_ray_has_single_root() {
        let sphere = Sphere::new(Point3::ZERO, 1.0, MaterialId::default());
        // Grazes the top of the sphere: discriminant is exactly zero
        let ray = Ray::new(Point3::new(-2.0, 1.0, 0.0), Vec3::X);
        let rec = sphere.hit(&ray, forward()).unwrap();

        assert_eq!(rec.t, 2.0);
        assert_eq!(rec.p, Point3::new(0.0, 1.0, 0.0));

        // No second, farther root to fall back on
        assert!(sphere.hit(&ray, Interval::new(2.0, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_hit_from_inside_uses_far_root() {
        let sphere = Sphere::new(Point3::ZERO, 1.0, MaterialId::default());
        let ray = Ray::new(Point3::ZERO, Vec3::X);
        let rec = sphere.hit(&ray, forward()).unwrap();

        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_X);
    }

    #[test]
    fn test_interval_bounds_are_exclusive() {
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let sphere = unit_sphere();

        // Near root at exactly t = 0.5 is rejected; far root at 1.5 is taken
        let rec = sphere.hit(&ray, Interval::new(0.5, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-12);

        assert!(sphere.hit(&ray, Interval::new(0.001, 0.5)).is_none());
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(Point3::ZERO, -3.0, MaterialId::default());
        assert_eq!(sphere.radius(), 0.0);
    }

    #[test]
    fn test_zero_radius_sphere_is_never_hit() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), -1.0, MaterialId::default());
        // Passes straight through the center
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);

        assert!(sphere.hit(&ray, forward()).is_none());
        assert!(sphere.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_normals_are_unit_and_face_the_ray() {
        let mut rng = StdRng::seed_from_u64(42);
        let sphere = Sphere::new(Point3::new(0.3, -0.2, -2.0), 0.75, MaterialId::default());

        let mut hits = 0;
        for _ in 0..500 {
            let origin = Point3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
            );
            let target = sphere.center()
                + Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                );
            let ray = Ray::new(origin, target - origin);

            if let Some(rec) = sphere.hit(&ray, forward()) {
                hits += 1;
                assert!((rec.normal.length() - 1.0).abs() < 1e-9);
                // Stored normal always opposes the ray
                assert!(ray.direction().dot(rec.normal) <= 0.0);

                let outward = (rec.p - sphere.center()) / sphere.radius();
                let facing = ray.direction().dot(outward);
                if rec.front_face {
                    assert!(facing < 0.0);
                } else {
                    assert!(facing >= 0.0);
                }
            }
        }
        assert!(hits > 0);
    }
}
