//! Scene description types.
//!
//! A [`SceneDescription`] is the renderer-agnostic form of a scene: a camera
//! configuration, a table of materials and a list of spheres that refer to
//! materials by index or by name. Many spheres may share one material.

use std::collections::HashMap;

use orb_math::{Color, Point3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::CameraConfig;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid material {index}: {reason}")]
    InvalidMaterial { index: usize, reason: String },

    #[error("Duplicate material name: {0}")]
    DuplicateMaterial(String),

    #[error("Sphere {sphere} references unknown material {material}")]
    UnknownMaterial { sphere: usize, material: String },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Surface scattering model of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Diffuse surface.
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` of 0 is a perfect mirror.
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
    },
    /// Clear refractive surface such as glass or water.
    Dielectric { refraction_index: f64 },
}

/// An entry in the scene's material table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    /// Optional name spheres can use instead of an index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub material: MaterialDesc,
}

impl MaterialEntry {
    /// An unnamed material.
    pub fn new(material: MaterialDesc) -> Self {
        Self {
            name: None,
            material,
        }
    }

    /// A material that spheres can reference by name.
    pub fn named(name: impl Into<String>, material: MaterialDesc) -> Self {
        Self {
            name: Some(name.into()),
            material,
        }
    }
}

/// Reference from a sphere to an entry in the material table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialRef {
    Index(usize),
    Name(String),
}

impl std::fmt::Display for MaterialRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialRef::Index(index) => write!(f, "#{}", index),
            MaterialRef::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

/// A sphere in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    /// Negative radii are clamped to zero by the renderer
    pub radius: f64,
    pub material: MaterialRef,
}

impl SphereDesc {
    pub fn new(center: Point3, radius: f64, material: MaterialRef) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// Complete description of a renderable scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: CameraConfig,
    pub materials: Vec<MaterialEntry>,
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Create an empty scene with the given camera.
    pub fn new(camera: CameraConfig) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Add a material and return a reference to it.
    pub fn add_material(&mut self, entry: MaterialEntry) -> MaterialRef {
        self.materials.push(entry);
        MaterialRef::Index(self.materials.len() - 1)
    }

    /// Add a sphere.
    pub fn add_sphere(&mut self, center: Point3, radius: f64, material: MaterialRef) {
        self.spheres.push(SphereDesc::new(center, radius, material));
    }

    /// Get the number of materials.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Get the number of spheres.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Check the camera and materials, and resolve every sphere's material
    /// reference to an index into `materials`.
    ///
    /// The returned vector is parallel to `spheres`.
    pub fn resolve(&self) -> SceneResult<Vec<usize>> {
        self.camera.validate()?;

        let mut names: HashMap<&str, usize> = HashMap::new();
        for (index, entry) in self.materials.iter().enumerate() {
            validate_material(index, &entry.material)?;
            if let Some(name) = &entry.name {
                if names.insert(name.as_str(), index).is_some() {
                    return Err(SceneError::DuplicateMaterial(name.clone()));
                }
            }
        }

        self.spheres
            .iter()
            .enumerate()
            .map(|(sphere, desc)| {
                let resolved = match &desc.material {
                    MaterialRef::Index(index) if *index < self.materials.len() => Some(*index),
                    MaterialRef::Index(_) => None,
                    MaterialRef::Name(name) => names.get(name.as_str()).copied(),
                };
                resolved.ok_or_else(|| SceneError::UnknownMaterial {
                    sphere,
                    material: desc.material.to_string(),
                })
            })
            .collect()
    }

    /// Validate without keeping the resolved material indices.
    pub fn validate(&self) -> SceneResult<()> {
        self.resolve().map(|_| ())
    }

    /// The showcase scene: a diffuse sphere flanked by a hollow glass sphere
    /// and a brushed metal sphere, resting on a large ground sphere, viewed
    /// through a wide-aperture lens.
    pub fn default_scene() -> Self {
        let camera = CameraConfig::default()
            .with_resolution(400, 16.0 / 9.0)
            .with_quality(100, 50)
            .with_position(
                Point3::new(-2.0, 2.0, 1.0),
                Point3::new(0.0, 0.0, -1.0),
                Vec3::Y,
            )
            .with_lens(20.0, 10.0, 3.4);

        let mut scene = Self::new(camera);

        let ground = scene.add_material(MaterialEntry::named(
            "ground",
            MaterialDesc::Lambertian {
                albedo: Color::new(0.8, 0.8, 0.0),
            },
        ));
        let center = scene.add_material(MaterialEntry::named(
            "center",
            MaterialDesc::Lambertian {
                albedo: Color::new(0.1, 0.2, 0.5),
            },
        ));
        let glass = scene.add_material(MaterialEntry::named(
            "glass",
            MaterialDesc::Dielectric {
                refraction_index: 1.5,
            },
        ));
        let bubble = scene.add_material(MaterialEntry::named(
            "bubble",
            MaterialDesc::Dielectric {
                refraction_index: 1.0 / 1.5,
            },
        ));
        let gold = scene.add_material(MaterialEntry::named(
            "gold",
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.6, 0.2),
                fuzz: 1.0,
            },
        ));

        scene.add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, ground);
        scene.add_sphere(Point3::new(0.0, 0.0, -1.2), 0.5, center);
        scene.add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, glass);
        scene.add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.4, bubble);
        scene.add_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, gold);

        scene
    }
}

fn validate_material(index: usize, material: &MaterialDesc) -> SceneResult<()> {
    let invalid = |reason: &str| {
        Err(SceneError::InvalidMaterial {
            index,
            reason: reason.to_string(),
        })
    };

    match material {
        MaterialDesc::Lambertian { albedo } | MaterialDesc::Metal { albedo, .. }
            if !albedo.is_finite() =>
        {
            invalid("albedo must be finite")
        }
        MaterialDesc::Metal { fuzz, .. } if fuzz.is_nan() => invalid("fuzz must be a number"),
        MaterialDesc::Dielectric { refraction_index }
            if !(refraction_index.is_finite() && *refraction_index > 0.0) =>
        {
            invalid("refraction_index must be a positive number")
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey() -> MaterialDesc {
        MaterialDesc::Lambertian {
            albedo: Color::splat(0.5),
        }
    }

    #[test]
    fn test_default_scene_is_valid() {
        let scene = SceneDescription::default_scene();
        assert_eq!(scene.material_count(), 5);
        assert_eq!(scene.sphere_count(), 5);
        assert_eq!(scene.resolve().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_shared_material() {
        let mut scene = SceneDescription::default();
        let shared = scene.add_material(MaterialEntry::new(grey()));
        scene.add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, shared.clone());
        scene.add_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, shared);

        assert_eq!(scene.resolve().unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_resolve_by_name() {
        let mut scene = SceneDescription::default();
        scene.add_material(MaterialEntry::new(grey()));
        scene.add_material(MaterialEntry::named(
            "mirror",
            MaterialDesc::Metal {
                albedo: Color::ONE,
                fuzz: 0.0,
            },
        ));
        scene.add_sphere(Point3::ZERO, 1.0, MaterialRef::Name("mirror".into()));

        assert_eq!(scene.resolve().unwrap(), vec![1]);
    }

    #[test]
    fn test_unknown_material() {
        let mut scene = SceneDescription::default();
        scene.add_material(MaterialEntry::new(grey()));
        scene.add_sphere(Point3::ZERO, 1.0, MaterialRef::Index(3));

        match scene.validate() {
            Err(SceneError::UnknownMaterial { sphere, material }) => {
                assert_eq!(sphere, 0);
                assert_eq!(material, "#3");
            }
            other => panic!("expected UnknownMaterial, got {:?}", other),
        }

        scene.spheres[0].material = MaterialRef::Name("missing".into());
        assert!(matches!(
            scene.validate(),
            Err(SceneError::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn test_duplicate_material_name() {
        let mut scene = SceneDescription::default();
        scene.add_material(MaterialEntry::named("a", grey()));
        scene.add_material(MaterialEntry::named("a", grey()));

        assert!(matches!(
            scene.validate(),
            Err(SceneError::DuplicateMaterial(name)) if name == "a"
        ));
    }

    #[test]
    fn test_invalid_dielectric() {
        let mut scene = SceneDescription::default();
        scene.add_material(MaterialEntry::new(MaterialDesc::Dielectric {
            refraction_index: 0.0,
        }));

        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidMaterial { index: 0, .. })
        ));
    }

    #[test]
    fn test_negative_radius_is_not_rejected() {
        let mut scene = SceneDescription::default();
        let m = scene.add_material(MaterialEntry::new(grey()));
        scene.add_sphere(Point3::ZERO, -2.0, m);

        assert!(scene.validate().is_ok());
    }
}
