use anyhow::{Context, Result};
use clap::Parser;
use drop_gen::{render, DropSpec};

/// Render synthetic pendant-drop photographs for testing the tensiometer
#[derive(Parser, Debug)]
#[command(name = "drop-gen")]
#[command(about = "Generate synthetic pendant droplet images", long_about = None)]
struct Args {
    /// Output PNG file path
    #[arg(short, long, default_value = "droplet.png")]
    output: String,

    /// Image width in pixels
    #[arg(long, default_value = "400")]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "400")]
    height: u32,

    /// Pipette width in pixels (0 for no pipette)
    #[arg(long, default_value = "40")]
    pipette_width: u32,

    /// Pipette length in pixels from the top edge
    #[arg(long, default_value = "150")]
    pipette_length: u32,

    /// Droplet horizontal radius in pixels
    #[arg(long, default_value = "60")]
    rx: u32,

    /// Droplet vertical radius in pixels
    #[arg(long, default_value = "70")]
    ry: u32,

    /// Droplet centre, defaults to the horizontal middle
    #[arg(long)]
    center_x: Option<u32>,

    /// Droplet centre row
    #[arg(long, default_value = "210")]
    center_y: u32,

    /// Render a light droplet on a dark backdrop
    #[arg(long)]
    light_on_dark: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.width == 0 || args.height == 0 {
        anyhow::bail!("Image size must be non-zero, got {}x{}", args.width, args.height);
    }

    let spec = DropSpec {
        width: args.width,
        height: args.height,
        pipette_width: args.pipette_width,
        pipette_length: args.pipette_length,
        droplet_rx: args.rx,
        droplet_ry: args.ry,
        center_x: args.center_x.unwrap_or(args.width / 2),
        center_y: args.center_y,
        dark_on_light: !args.light_on_dark,
    };

    println!("Generating synthetic droplet:");
    println!("  Image: {}x{}px", spec.width, spec.height);
    println!("  Pipette: {}px wide, {}px long", spec.pipette_width, spec.pipette_length);
    println!("  Droplet radii: {}px × {}px at ({}, {})", spec.droplet_rx, spec.droplet_ry, spec.center_x, spec.center_y);

    let (min_x, max_x, min_y, max_y) = spec.silhouette_extent();
    log::info!("Expected silhouette extent x {}..={}, y {}..={}", min_x, max_x, min_y, max_y);

    let img = render(&spec);
    img.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;

    println!("Image generated: {}", args.output);
    Ok(())
}
