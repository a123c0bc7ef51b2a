use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use orb_core::{load_scene, SceneDescription};
use orb_renderer::{render, save_image, write_ppm, Camera, RenderConfig, Scene, Shading};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Render a scene of spheres with a Monte Carlo path tracer.
#[derive(Parser, Debug)]
#[command(name = "orb", version)]
struct Args {
    /// Scene description (JSON). The built-in showcase scene is used when omitted.
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image. `.ppm` is written as text, other extensions are encoded
    /// by format. PPM goes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the random generator, for reproducible renders
    #[arg(long)]
    seed: Option<u64>,

    /// Override the image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Override the samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Shade surface normals instead of path tracing materials
    #[arg(long)]
    normals: bool,
}

impl Args {
    /// Apply command-line overrides on top of the scene's camera settings.
    fn apply_overrides(&self, desc: &mut SceneDescription) {
        let camera = &mut desc.camera;
        if let Some(width) = self.width {
            camera.image_width = width;
        }
        if let Some(samples) = self.samples {
            camera.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            camera.max_depth = max_depth;
        }
    }

    fn render_config(&self) -> RenderConfig {
        let shading = if self.normals {
            Shading::Normals
        } else {
            Shading::Path
        };
        RenderConfig::default().with_shading(shading)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut desc = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the built-in scene");
            SceneDescription::default_scene()
        }
    };
    args.apply_overrides(&mut desc);

    let scene = Scene::from_description(&desc).context("Invalid scene")?;
    let camera = Camera::new(desc.camera.clone());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let image = render(&camera, &scene, &args.render_config(), &mut rng);

    match &args.output {
        Some(path) => save_image(&image, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            write_ppm(&image, &mut out).context("Failed to write image to stdout")?;
        }
    }

    Ok(())
}
