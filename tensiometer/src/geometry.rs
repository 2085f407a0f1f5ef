// Droplet geometry
// Bounding extent of the selected contour and the pixel to millimeter conversion

use log::debug;
use tensiometer_common::{BoundingExtent, Contour, DropletDimensions, FALLBACK_SCALE_MM_PER_PX};

use crate::error::{MeasurementError, Result};

pub fn bounding_extent(contour: &Contour) -> Result<BoundingExtent> {
    BoundingExtent::of_points(&contour.points).ok_or(MeasurementError::DegenerateContour)
}

/// Millimeters per pixel
///
/// With a pipette diameter, the droplet's measured pixel width is taken to
/// span exactly that diameter. Without one, `fallback` is used as-is.
pub fn scale_factor(
    extent: &BoundingExtent,
    image_width: u32,
    pipet_diameter_mm: Option<f64>,
    fallback: f64,
) -> Result<f64> {
    let scale = match pipet_diameter_mm.filter(|d| *d > 0.0) {
        Some(diameter) => {
            let measured_px = extent.normalized_width() * image_width as f64;
            diameter / measured_px
        }
        None => fallback,
    };

    if !scale.is_finite() || scale <= 0.0 {
        return Err(MeasurementError::InvalidScale(scale));
    }

    Ok(scale)
}

/// Physical width and height of the droplet contour
pub fn droplet_dimensions(
    contour: &Contour,
    image_width: u32,
    image_height: u32,
    pipet_diameter_mm: Option<f64>,
) -> Result<DropletDimensions> {
    droplet_dimensions_with_fallback(
        contour,
        image_width,
        image_height,
        pipet_diameter_mm,
        FALLBACK_SCALE_MM_PER_PX,
    )
}

pub fn droplet_dimensions_with_fallback(
    contour: &Contour,
    image_width: u32,
    image_height: u32,
    pipet_diameter_mm: Option<f64>,
    fallback_scale: f64,
) -> Result<DropletDimensions> {
    let extent = bounding_extent(contour)?;
    let scale = scale_factor(&extent, image_width, pipet_diameter_mm, fallback_scale)?;

    let (width_px, height_px) = extent.pixel_size(image_width, image_height);
    let dims = DropletDimensions {
        width_mm: width_px * scale,
        height_mm: height_px * scale,
        scale_mm_per_px: scale,
        extent,
    };

    debug!("Droplet {:.1}x{:.1}px -> {}", width_px, height_px, dims);
    Ok(dims)
}
