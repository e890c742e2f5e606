use anyhow::{bail, Context, Result};
use clap::Parser;
use lumen_core::builtin::{self, BUILTIN_SCENES};
use lumen_core::{load_scene, RenderSettings, SceneDescription};
use lumen_renderer::{
    render, render_serial, save, worker_count, write_ppm, Camera, ImageBuffer, Scene,
};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Render a sphere scene with a CPU path tracer.
#[derive(Parser, Debug)]
#[command(name = "lumen", version)]
struct Args {
    /// Built-in scene name or path to a scene JSON file
    #[arg(long, default_value = "random-spheres")]
    scene: String,

    /// Width of the rendered image
    #[arg(short = 'w', long)]
    width: Option<u32>,

    /// Aspect ratio as `W:H` or a number
    #[arg(long, value_parser = parse_aspect)]
    aspect: Option<f32>,

    /// Number of samples per pixel
    #[arg(short = 's', long)]
    samples: Option<u32>,

    /// Maximum ray bounce depth
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Master random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to all logical cores)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Output image; `.png` writes PNG, `-` writes PPM to stdout
    #[arg(short = 'o', long, default_value = "image.ppm")]
    output: PathBuf,

    /// Write the resolved scene as JSON and exit without rendering
    #[arg(long)]
    dump_scene: Option<PathBuf>,

    /// Render the bands one after another on the main thread
    #[arg(long)]
    serial: bool,
}

/// Parse `16:9` style ratios or a plain number.
fn parse_aspect(s: &str) -> Result<f32, String> {
    let ratio = match s.split_once(':') {
        Some((w, h)) => {
            let w: f32 = w.trim().parse().map_err(|_| format!("bad width in '{}'", s))?;
            let h: f32 = h.trim().parse().map_err(|_| format!("bad height in '{}'", s))?;
            w / h
        }
        None => s.trim().parse().map_err(|_| format!("'{}' is not a ratio", s))?,
    };

    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(format!("aspect ratio '{}' must be positive", s))
    }
}

impl Args {
    /// Scene settings (or defaults) with command line overrides applied.
    fn settings(&self, scene: &SceneDescription) -> RenderSettings {
        let mut settings = scene.settings.clone().unwrap_or_default();

        if let Some(width) = self.width {
            settings.image_width = width;
        }
        if let Some(aspect) = self.aspect {
            settings.aspect_ratio = aspect;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(threads) = self.threads {
            settings.threads = Some(threads);
        }

        settings
    }
}

fn load(name: &str, seed: u64) -> Result<SceneDescription> {
    if let Some(scene) = builtin::builtin(name, seed) {
        log::info!("Using built-in scene '{}'", name);
        return Ok(scene);
    }

    let path = PathBuf::from(name);
    if !path.exists() {
        bail!(
            "'{}' is neither a scene file nor a built-in scene ({})",
            name,
            BUILTIN_SCENES.join(", ")
        );
    }
    load_scene(&path).with_context(|| format!("Failed to load scene {}", path.display()))
}

/// Render on the worker pool, or band by band on this thread when `serial`.
///
/// Both paths split the image into the same bands, so they produce the
/// same image.
fn render_image(
    camera: &Camera,
    world: &Scene,
    settings: &RenderSettings,
    serial: bool,
) -> Result<ImageBuffer> {
    let image = if serial {
        render_serial(camera, world, settings, worker_count(settings))?
    } else {
        render(camera, world, settings)?
    };
    Ok(image)
}

fn write_output(image: &ImageBuffer, output: &Path) -> Result<()> {
    if output.as_os_str() == "-" {
        let stdout = std::io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_ppm(image, &mut writer).context("Failed to write image to stdout")?;
        writer.flush()?;
        return Ok(());
    }

    save(image, output).with_context(|| format!("Failed to save {}", output.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let description = load(&args.scene, args.seed.unwrap_or_default())?;
    let settings = args.settings(&description);

    if let Some(path) = &args.dump_scene {
        let mut dumped = description.clone();
        dumped.settings = Some(settings.clone());
        let json = dumped.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write scene to {}", path.display()))?;
        log::info!("Wrote scene to {}", path.display());
        return Ok(());
    }

    let world = Scene::from_description(&description).context("Invalid scene")?;
    let camera = Camera::new(&description.camera, settings.aspect_ratio);

    let image = render_image(&camera, &world, &settings, args.serial)?;

    write_output(&image, &args.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aspect() {
        assert!((parse_aspect("16:9").unwrap() - 16.0 / 9.0).abs() < 1e-6);
        assert!((parse_aspect(" 3 : 2 ").unwrap() - 1.5).abs() < 1e-6);
        assert_eq!(parse_aspect("2").unwrap(), 2.0);
        assert_eq!(parse_aspect("1.25").unwrap(), 1.25);
    }

    #[test]
    fn test_parse_aspect_rejects_garbage() {
        assert!(parse_aspect("wide").is_err());
        assert!(parse_aspect("16:").is_err());
        assert!(parse_aspect("16:0").is_err());
        assert!(parse_aspect("-1").is_err());
        assert!(parse_aspect("0").is_err());
    }

    #[test]
    fn test_cli_overrides_scene_settings() {
        let args = Args::parse_from([
            "lumen",
            "--scene",
            "three-spheres",
            "--width",
            "64",
            "--aspect",
            "2:1",
            "--samples",
            "3",
            "--threads",
            "2",
        ]);
        let mut scene = builtin::three_spheres();
        scene.settings = Some(RenderSettings::default().with_quality(500, 12).with_seed(4));

        let settings = args.settings(&scene);
        assert_eq!(settings.image_width, 64);
        assert_eq!(settings.aspect_ratio, 2.0);
        assert_eq!(settings.samples_per_pixel, 3);
        assert_eq!(settings.threads, Some(2));
        // Not given on the command line, so the scene's values stand
        assert_eq!(settings.max_depth, 12);
        assert_eq!(settings.seed, 4);
    }

    #[test]
    fn test_defaults_without_scene_settings() {
        let args = Args::parse_from(["lumen"]);
        assert_eq!(args.scene, "random-spheres");
        assert_eq!(args.output, PathBuf::from("image.ppm"));

        let settings = args.settings(&SceneDescription::default());
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_serial_flag_renders_same_image() {
        let args = Args::parse_from([
            "lumen", "--scene", "three-spheres", "--width", "32", "--aspect", "2", "--samples",
            "4", "--seed", "99", "--serial",
        ]);
        assert!(args.serial);

        let description = load(&args.scene, 0).unwrap();
        let settings = args.settings(&description);
        // No --threads: both paths fall back to one band per core
        assert_eq!(settings.threads, None);

        let world = Scene::from_description(&description).unwrap();
        let camera = Camera::new(&description.camera, settings.aspect_ratio);

        let serial = render_image(&camera, &world, &settings, true).unwrap();
        let parallel = render_image(&camera, &world, &settings, false).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_load_builtin_and_missing() {
        let scene = load("single-sphere", 0).unwrap();
        assert_eq!(scene.sphere_count(), 2);

        let err = load("no-such-scene", 0).unwrap_err();
        assert!(err.to_string().contains("three-spheres"));
    }
}
