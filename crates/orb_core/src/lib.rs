//! Orb Core - scene description for the Orb ray tracer.
//!
//! This crate provides:
//!
//! - **Camera configuration**: `CameraConfig` with pinhole defaults
//! - **Scene description**: materials, spheres and the references between them
//! - **Loading**: JSON scene files with validation
//!
//! # Example
//!
//! ```ignore
//! use orb_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres", scene.sphere_count());
//! ```

pub mod camera;
pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use camera::CameraConfig;
pub use loader::{load_scene, load_scene_from_str};
pub use scene::{
    MaterialDesc, MaterialEntry, MaterialRef, SceneDescription, SceneError, SceneResult,
    SphereDesc,
};
