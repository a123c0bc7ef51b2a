//! Camera configuration.
//!
//! This is the user-facing half of the camera: the options a scene file or
//! the command line can set. The renderer derives its viewport and basis
//! vectors from it.

use orb_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::scene::{SceneError, SceneResult};

/// Options describing image size, sampling quality and camera placement.
///
/// Defaults describe a pinhole camera at the origin looking down -Z with
/// no depth-of-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Count of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,

    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point the camera is looking from
    pub look_from: Point3,
    /// Point the camera is looking at
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,

    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraConfig {
    /// Set image width and aspect ratio.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Image height derived from width and aspect ratio, at least 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f64 / self.aspect_ratio) as u32).max(1)
    }

    /// Reject configurations the renderer cannot derive a viewport from.
    pub fn validate(&self) -> SceneResult<()> {
        let invalid = |reason: &str| Err(SceneError::InvalidCamera(reason.to_string()));

        if self.image_width == 0 {
            return invalid("image_width must be at least 1");
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel must be at least 1");
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return invalid("aspect_ratio must be a positive number");
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return invalid("vfov must be between 0 and 180 degrees");
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return invalid("focus_dist must be a positive number");
        }
        if !(self.defocus_angle >= 0.0 && self.defocus_angle < 180.0) {
            return invalid("defocus_angle must be in [0, 180) degrees");
        }

        let view = self.look_from - self.look_at;
        if view.length_squared() == 0.0 {
            return invalid("look_from and look_at must differ");
        }
        if self.vup.cross(view).length_squared() == 0.0 {
            return invalid("vup must not be parallel to the view direction");
        }

        Ok(())
    }
}
