//! Scene file loading.
//!
//! Scenes are stored as JSON. Every section is optional; missing camera
//! fields fall back to [`CameraConfig::default`](crate::CameraConfig).
//!
//! ```json
//! {
//!   "camera": { "image_width": 400, "aspect_ratio": 1.7778, "vfov": 20.0 },
//!   "materials": [
//!     { "name": "ground", "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
//!     { "type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.3 },
//!     { "type": "dielectric", "refraction_index": 1.5 }
//!   ],
//!   "spheres": [
//!     { "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" },
//!     { "center": [1.0, 0.0, -1.0], "radius": 0.5, "material": 1 }
//!   ]
//! }
//! ```

use std::path::Path;

use crate::scene::{SceneDescription, SceneResult};

/// Load and validate a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&contents)?;

    log::info!(
        "Loaded scene {}: {} materials, {} spheres",
        path.display(),
        scene.material_count(),
        scene.sphere_count()
    );

    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(json)?;
    scene.validate()?;
    Ok(scene)
}
