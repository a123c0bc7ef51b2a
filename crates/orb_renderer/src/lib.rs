//! Orb Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! materials. Rays are generated by the camera, traced recursively through
//! the scene up to a depth limit, and averaged per pixel.

mod camera;
mod color;
mod hittable;
mod material;
mod output;
mod renderer;
mod scene;
mod sphere;

pub use camera::Camera;
pub use color::{channel_to_byte, color_to_rgb8, linear_to_gamma};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Dielectric, Lambertian, Material, MaterialArena, MaterialId, Metal, Scatter,
};
pub use output::{save_image, write_ppm, OutputError, OutputResult};
pub use renderer::{
    ray_color, render, render_pixel, sky_gradient, ImageBuffer, RenderConfig, Shading,
};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export math types from orb_math
pub use orb_math::{Color, Interval, Point3, Ray, Vec3};
