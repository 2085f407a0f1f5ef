use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use tensiometer::{overlay, export_svg, AnalysisConfig, Analyzer, RawImage, MEASUREMENT_FAILED};
use tensiometer_common::MeasurementInputs;

/// Estimate the surface tension of a liquid from a pendant droplet photo
#[derive(Parser, Debug)]
#[command(name = "tensiometer")]
#[command(about = "Measure a pendant droplet and estimate surface tension", long_about = None)]
struct Args {
    /// Input image file path
    #[arg(short, long)]
    input: String,

    /// Pipette diameter in millimeters (reference length)
    #[arg(short, long, default_value = "")]
    pipet_diameter: String,

    /// Liquid density in kg/m³
    #[arg(short, long, default_value = "")]
    density: String,

    /// JSON analysis config
    #[arg(short, long)]
    config: Option<String>,

    /// Output file prefix for debug artefacts
    #[arg(short, long, default_value = "droplet")]
    output: String,

    /// Save a contour overlay image
    #[arg(long)]
    debug: bool,

    /// Export the droplet outline as SVG
    #[arg(long)]
    svg: bool,

    /// Print the full measurement as JSON
    #[arg(long)]
    json: bool,

    /// Contrast adjustment applied before thresholding
    #[arg(long)]
    contrast: Option<f32>,

    /// Droplet is lighter than the background
    #[arg(long)]
    light_on_dark: bool,

    /// Gaussian blur sigma in pixels (0 disables)
    #[arg(long)]
    blur_sigma: Option<f32>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(contrast) = args.contrast {
        config.detector.contrast_adjustment = contrast;
    }
    if args.light_on_dark {
        config.detector.dark_on_light = false;
    }
    if let Some(sigma) = args.blur_sigma {
        config.detector.blur_sigma = sigma;
    }
    config.validate()?;

    let inputs = MeasurementInputs::parse(&args.pipet_diameter, &args.density);

    if !args.json {
        println!("Tensiometer - Pendant Drop Analysis");
        println!("===================================");
        println!("Input: {}", args.input);
        match inputs.pipet_diameter_mm {
            Some(d) => println!("Pipette diameter: {}mm", d),
            None => println!("Pipette diameter: not set ({} mm/px fallback)", config.fallback_scale_mm_per_px),
        }
        println!("Density: {} kg/m³", inputs.density_or(config.default_density_kg_m3));
        println!("Polarity: {}", config.detector.polarity());
        println!();
    }

    let analyzer = Analyzer::new(config);
    let traced = RawImage::open(&args.input).and_then(|image| {
        let traced = analyzer.trace(&image, &inputs)?;
        Ok((image, traced))
    });

    let (image, traced) = match traced {
        Ok(result) => result,
        Err(e) => {
            warn!("Droplet measurement failed: {}", e);
            println!("{}", MEASUREMENT_FAILED);
            return Ok(());
        }
    };

    let m = &traced.measurement;
    if args.json {
        println!("{}", serde_json::to_string_pretty(m)?);
    } else {
        println!("Droplet: {} ({} contour points)", m.dimensions, m.contour_points);
        println!("{}", m.message);
    }

    if args.debug {
        let overlay = overlay::draw_overlay(image.color(), &traced.contour, &m.dimensions.extent);
        let overlay_path = format!("{}_overlay.png", args.output);
        overlay
            .save(&overlay_path)
            .with_context(|| format!("Failed to save overlay to {}", overlay_path))?;
        if !args.json {
            println!("Saved contour overlay to: {}", overlay_path);
        }
    }

    if args.svg {
        let svg_path = format!("{}.svg", args.output);
        export_svg::export_svg(&traced.contour, &m.dimensions, m.image_width, m.image_height, &svg_path)
            .with_context(|| format!("Failed to export SVG to {}", svg_path))?;
    }

    Ok(())
}
