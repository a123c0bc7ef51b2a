//! Camera for ray generation.

use orb_core::CameraConfig;
use orb_math::{random_double, random_in_unit_disk, unit_vector, Point3, Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// All viewport geometry is derived from the [`CameraConfig`] when the
/// camera is constructed and stays fixed afterwards.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,

    // Derived from config
    image_height: u32,
    pixel_samples_scale: f64,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Build a camera from its configuration.
    ///
    /// The configuration should pass [`CameraConfig::validate`]; a `vup`
    /// parallel to the view direction yields a degenerate basis.
    pub fn new(config: CameraConfig) -> Self {
        let image_height = config.image_height();
        let pixel_samples_scale = 1.0 / config.samples_per_pixel as f64;
        let center = config.look_from;

        // Determine viewport dimensions
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width =
            viewport_height * (config.image_width as f64 / image_height as f64);

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        let w = unit_vector(config.look_from - config.look_at);
        let u = unit_vector(config.vup.cross(w));
        let v = w.cross(u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / config.image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        // Calculate the camera defocus disk basis vectors
        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();
        let defocus_disk_u = u * defocus_radius;
        let defocus_disk_v = v * defocus_radius;

        log::debug!(
            "Camera: {}x{}, vfov {}, look_from {:?}, look_at {:?}",
            config.image_width,
            image_height,
            config.vfov,
            config.look_from,
            config.look_at
        );

        Self {
            config,
            image_height,
            pixel_samples_scale,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u,
            defocus_disk_v,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn pixel_samples_scale(&self) -> f64 {
        self.pixel_samples_scale
    }

    /// Camera center (the `look_from` point).
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Orthonormal camera basis: right, up and backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The ray originates from the defocus disk and is directed at a
    /// randomly sampled point around the pixel location.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_double(rng) - 0.5, random_double(rng) - 0.5, 0.0)
}
