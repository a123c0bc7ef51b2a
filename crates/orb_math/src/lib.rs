//! Orb math types.
//!
//! Double-precision vector algebra built on `glam::DVec3`, plus the
//! ray and interval primitives used throughout the tracer.

pub use glam::DVec3;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{
    random_double, random_double_range, random_in_unit_disk, random_unit_vector, random_vec3,
    random_vec3_range, reflect, refract, unit_vector, Vec3Ext,
};

/// 3D vector with f64 components.
pub type Vec3 = DVec3;

/// A position in space. Same representation as [`Vec3`].
pub type Point3 = DVec3;

/// Linear RGB color. Same representation as [`Vec3`].
pub type Color = DVec3;
