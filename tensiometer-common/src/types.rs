use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard gravitational acceleration in m/s²
pub const GRAVITY_M_S2: f64 = 9.81;

/// Density used when none is supplied (water, kg/m³)
pub const DEFAULT_DENSITY_KG_M3: f64 = 1000.0;

/// Millimeters per pixel used when no pipette reference is supplied.
/// Arbitrary, not physically calibrated.
pub const FALLBACK_SCALE_MM_PER_PX: f64 = 0.01;

/// 2D point in normalized image coordinates
///
/// Origin is the top-left corner of the image, x grows to the right and
/// y grows downward. Each coordinate is `pixel_index / dimension`, so it
/// lies in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Normalize a pixel position against the image dimensions
    pub fn from_pixel(px: u32, py: u32, width: u32, height: u32) -> Self {
        Self {
            x: px as f64 / width as f64,
            y: py as f64 / height as f64,
        }
    }

    /// Map back to (fractional) pixel coordinates
    pub fn to_pixel(&self, width: u32, height: u32) -> (f64, f64) {
        (self.x * width as f64, self.y * height as f64)
    }
}

/// One connected boundary, as an ordered sequence of normalized points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<NormalizedPoint>,
}

impl Contour {
    pub fn new(points: Vec<NormalizedPoint>) -> Self {
        Self { points }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Axis-aligned extent of a contour in normalized coordinates
///
/// Invariant: `min_x <= max_x` and `min_y <= max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingExtent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingExtent {
    /// Build the extent of a point set. Returns None for an empty set.
    pub fn of_points(points: &[NormalizedPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut extent = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };

        for pt in &points[1..] {
            extent.min_x = extent.min_x.min(pt.x);
            extent.max_x = extent.max_x.max(pt.x);
            extent.min_y = extent.min_y.min(pt.y);
            extent.max_y = extent.max_y.max(pt.y);
        }

        Some(extent)
    }

    pub fn normalized_width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn normalized_height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Width and height in pixels for an image of the given size
    pub fn pixel_size(&self, width: u32, height: u32) -> (f64, f64) {
        (
            self.normalized_width() * width as f64,
            self.normalized_height() * height as f64,
        )
    }
}

/// Physical droplet size derived from a contour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropletDimensions {
    pub width_mm: f64,
    pub height_mm: f64,
    /// Millimeters per pixel used for the conversion
    pub scale_mm_per_px: f64,
    pub extent: BoundingExtent,
}

impl fmt::Display for DropletDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3}mm × {:.3}mm ({:.5} mm/px)",
            self.width_mm, self.height_mm, self.scale_mm_per_px
        )
    }
}

/// Subject polarity against the background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    DarkOnLight,
    LightOnDark,
}

impl Polarity {
    pub fn from_dark_on_light(dark_on_light: bool) -> Self {
        if dark_on_light {
            Polarity::DarkOnLight
        } else {
            Polarity::LightOnDark
        }
    }

    pub fn is_dark_on_light(&self) -> bool {
        matches!(self, Polarity::DarkOnLight)
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::DarkOnLight => write!(f, "dark on light"),
            Polarity::LightOnDark => write!(f, "light on dark"),
        }
    }
}
