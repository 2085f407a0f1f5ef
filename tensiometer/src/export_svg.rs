// SVG export module
// Writes the droplet outline with millimeter coordinates

use anyhow::Result;
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tensiometer_common::{Contour, DropletDimensions};

/// Export the droplet contour to an SVG file
/// Coordinates are in millimeters, relative to the top-left of the extent
pub fn export_svg<P: AsRef<Path>>(
    contour: &Contour,
    dims: &DropletDimensions,
    image_width: u32,
    image_height: u32,
    output_path: P,
) -> Result<()> {
    let mut file = File::create(output_path.as_ref())?;
    write_svg(&mut file, contour, dims, image_width, image_height)?;

    info!(
        "Exported droplet outline to SVG: {} ({:.3}mm × {:.3}mm)",
        output_path.as_ref().display(),
        dims.width_mm,
        dims.height_mm
    );
    Ok(())
}

pub fn write_svg<W: Write>(
    out: &mut W,
    contour: &Contour,
    dims: &DropletDimensions,
    image_width: u32,
    image_height: u32,
) -> Result<()> {
    let margin = 0.1; // mm
    let width = dims.width_mm + 2.0 * margin;
    let height = dims.height_mm + 2.0 * margin;

    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1""#)?;
    writeln!(out, r#"     width="{:.3}mm" height="{:.3}mm""#, width, height)?;
    writeln!(out, r#"     viewBox="{:.3} {:.3} {:.3} {:.3}">"#, -margin, -margin, width, height)?;
    writeln!(out)?;
    writeln!(out, r#"  <title>Droplet outline</title>"#)?;
    writeln!(
        out,
        r#"  <desc>Scale {:.5} mm/px. Units: millimeters</desc>"#,
        dims.scale_mm_per_px
    )?;

    if let Some((first, rest)) = contour.points.split_first() {
        let to_mm = |p: &tensiometer_common::NormalizedPoint| {
            let (px, py) = p.to_pixel(image_width, image_height);
            let (ox, oy) = (
                dims.extent.min_x * image_width as f64,
                dims.extent.min_y * image_height as f64,
            );
            ((px - ox) * dims.scale_mm_per_px, (py - oy) * dims.scale_mm_per_px)
        };

        write!(out, r#"  <path id="droplet" stroke="black" stroke-width="0.01" fill="none" d=""#)?;
        let (x, y) = to_mm(first);
        write!(out, "M {:.4},{:.4} ", x, y)?;
        for pt in rest {
            let (x, y) = to_mm(pt);
            write!(out, "L {:.4},{:.4} ", x, y)?;
        }
        writeln!(out, r#"Z" />"#)?;
    }

    writeln!(out, "</svg>")?;
    Ok(())
}
