//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via multi-sampling
//! - Gamma correction on output

use std::time::Instant;

use crate::{color::color_to_rgb8, Camera, Hittable, Scene};
use orb_math::{unit_vector, Color, Interval, Ray};
use rand::RngCore;

/// Hits closer than this are ignored so a scattered ray cannot
/// re-intersect the surface it left because of floating-point error.
const T_MIN: f64 = 0.001;

/// How surface hits are shaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shading {
    /// Full path tracing through the materials.
    #[default]
    Path,
    /// Visualize surface normals as `0.5 * (normal + 1)`, ignoring materials.
    Normals,
}

/// Render configuration.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub shading: Shading,
}

impl RenderConfig {
    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces and
/// attenuating by each material's albedo, until it escapes to the sky,
/// is absorbed, or runs out of depth.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded the ray bounce limit, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    if config.shading == Shading::Normals {
        return 0.5 * (rec.normal + Color::ONE);
    }

    let scatter = scene
        .material(rec.material)
        .and_then(|material| material.scatter(ray, &rec, rng));

    match scatter {
        Some(scatter) => {
            scatter.attenuation * ray_color(&scatter.scattered, scene, depth - 1, config, rng)
        }
        None => Color::ZERO,
    }
}

/// Background seen by rays that escape the scene: a vertical blend from
/// white at the horizon to sky blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = unit_vector(ray.direction());
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Render a single pixel with multi-sampling.
///
/// Returns the averaged linear color.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, scene, camera.max_depth(), config, rng);
    }

    camera.pixel_samples_scale() * pixel_color
}

/// Image buffer holding averaged linear colors in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to gamma-corrected RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded: scanlines are traced top to bottom, pixels left to right.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth()
    );
    let start = Instant::now();
    let report_every = progress_interval(height);

    for y in 0..height {
        if y % report_every == 0 {
            log::info!("Scanlines remaining: {}", height - y);
        } else {
            log::debug!("Scanlines remaining: {}", height - y);
        }
        for x in 0..width {
            let color = render_pixel(camera, scene, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    log::info!("Done in {:.2?}", start.elapsed());

    image
}

/// Scanlines between info-level progress reports, about ten per render.
fn progress_interval(height: u32) -> u32 {
    height.div_ceil(10).max(1)
}
