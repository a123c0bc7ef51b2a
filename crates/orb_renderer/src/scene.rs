//! Renderable scene: the material arena plus the world geometry.

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    material::{Dielectric, Lambertian, Material, MaterialArena, MaterialId, Metal},
    sphere::Sphere,
};
use orb_core::{MaterialDesc, SceneDescription, SceneResult};
use orb_math::{Interval, Point3, Ray};

/// Geometry and materials for one render.
///
/// The arena owns every material and outlives the geometry that refers to
/// it. Nothing is mutated once rendering starts.
#[derive(Default)]
pub struct Scene {
    materials: MaterialArena,
    world: HittableList,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from a validated description.
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        let resolved = desc.resolve()?;

        let mut scene = Self::new();
        let ids: Vec<MaterialId> = desc
            .materials
            .iter()
            .map(|entry| scene.add_material(convert_material(&entry.material)))
            .collect();

        for (sphere, material) in desc.spheres.iter().zip(resolved) {
            scene.add_sphere(sphere.center, sphere.radius, ids[material]);
        }

        log::info!(
            "Built scene: {} materials, {} objects",
            scene.material_count(),
            scene.object_count()
        );

        Ok(scene)
    }

    /// Store a material and return a handle objects can share.
    pub fn add_material(&mut self, material: impl Into<Material>) -> MaterialId {
        self.materials.add(material)
    }

    /// Add a sphere using a material from this scene.
    pub fn add_sphere(&mut self, center: Point3, radius: f64, material: MaterialId) {
        self.add(Box::new(Sphere::new(center, radius, material)));
    }

    /// Add an arbitrary object to the world.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.world.add(object);
    }

    /// Look up a material by handle.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn object_count(&self) -> usize {
        self.world.len()
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.world.hit(ray, ray_t)
    }
}

fn convert_material(desc: &MaterialDesc) -> Material {
    match *desc {
        MaterialDesc::Lambertian { albedo } => Lambertian::new(albedo).into(),
        MaterialDesc::Metal { albedo, fuzz } => Metal::new(albedo, fuzz).into(),
        MaterialDesc::Dielectric { refraction_index } => Dielectric::new(refraction_index).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::{MaterialEntry, MaterialRef, SceneError};
    use orb_math::{Color, Vec3};

    #[test]
    fn test_from_default_description() {
        let scene = Scene::from_description(&SceneDescription::default_scene()).unwrap();
        assert_eq!(scene.material_count(), 5);
        assert_eq!(scene.object_count(), 5);
    }

    #[test]
    fn test_spheres_share_materials() {
        let mut desc = SceneDescription::default();
        let metal = desc.add_material(MaterialEntry::named(
            "chrome",
            MaterialDesc::Metal {
                albedo: Color::splat(0.9),
                fuzz: 2.0,
            },
        ));
        desc.add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, metal);
        desc.add_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, MaterialRef::Name("chrome".into()));

        let scene = Scene::from_description(&desc).unwrap();
        assert_eq!(scene.material_count(), 1);
        assert_eq!(scene.object_count(), 2);

        let left = Ray::new(Point3::ZERO, Vec3::new(-1.0, 0.0, -1.0));
        let right = Ray::new(Point3::ZERO, Vec3::new(1.0, 0.0, -1.0));
        let forward = Interval::new(0.001, f64::INFINITY);
        let a = scene.hit(&left, forward).unwrap().material;
        let b = scene.hit(&right, forward).unwrap().material;
        assert_eq!(a, b);

        // Fuzz is clamped on conversion
        match scene.material(a) {
            Some(Material::Metal(m)) => assert_eq!(m.fuzz(), 1.0),
            other => panic!("expected metal, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_description_is_rejected() {
        let mut desc = SceneDescription::default();
        desc.add_sphere(Point3::ZERO, 1.0, MaterialRef::Index(0));

        assert!(matches!(
            Scene::from_description(&desc),
            Err(SceneError::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn test_foreign_handle_has_no_material() {
        let scene = Scene::new();
        assert!(scene.material(MaterialId::from_index(0)).is_none());
    }
}
